// Example: snap targets for a paged list, and the clipping rect while scrolling.
use vscroll::{
    AncestorClip, ContentGeometry, HostEnvironment, ScrollEngine, ScrollViewOptions,
    ViewportGeometry, compute_snap_target, resolve_snap_interval,
};

fn main() {
    let interval = resolve_snap_interval(0, 400);
    for (y, vy) in [(120, 60), (120, 10), (390, -300), (790, 20)] {
        println!(
            "current={y} velocity={vy} -> target={}",
            compute_snap_target(y, vy, interval)
        );
    }

    let mut engine = ScrollEngine::new(
        ScrollViewOptions::new()
            .with_paging_enabled(true)
            .with_remove_clipped_subviews(true),
        HostEnvironment::default(),
        None,
    );
    engine.on_layout(ViewportGeometry::new(320, 400), 0);
    engine.attach_content(ContentGeometry::new(320, 2000), 0);
    engine.on_attached_to_window(AncestorClip::Unclipped);

    engine.on_scroll_changed(0, 250, 16);
    println!("clipping_rect={:?}", engine.clipping_rect());

    engine.fling(900, 32);
    println!("commands={:?}", engine.take_commands());
}

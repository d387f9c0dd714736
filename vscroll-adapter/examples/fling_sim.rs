use vscroll::{ContentGeometry, HostEnvironment, ScrollViewOptions, ViewportGeometry};
use vscroll_adapter::Controller;

fn main() {
    // Example: a fling towards the end of a list that keeps growing (e.g. infinite scroll).
    //
    // The engine flings with an unbounded upper limit, so new content loaded mid-flight is
    // scrolled into instead of bouncing off the old end.
    let mut c = Controller::new(ScrollViewOptions::new(), HostEnvironment::default());
    c.on_layout(ViewportGeometry::new(360, 640), 0);
    c.on_content_layout(ContentGeometry::new(360, 2000), 0);

    c.begin_drag(0);
    c.drag_to(1000, 16);
    c.release(4000, 32);

    let mut now_ms = 32u64;
    let mut loaded = false;
    while c.is_animating() {
        now_ms += 16;
        let (_, y) = c.tick(now_ms);
        if now_ms.is_multiple_of(160) {
            println!("t={now_ms} y={y} max={}", c.engine().max_scroll_y());
        }
        if !loaded && y > 1200 {
            c.on_content_layout(ContentGeometry::new(360, 6000), now_ms);
            loaded = true;
            println!("t={now_ms} loaded more content");
        }
    }

    println!("rest: y={} max={}", c.position().1, c.engine().max_scroll_y());
}

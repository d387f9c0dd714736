// Example: a host-driven fling with momentum events, using the stock fling fallback.
use vscroll::{
    ContentGeometry, HostCommand, HostEnvironment, ScrollEngine, ScrollEvent, ScrollViewOptions,
    TouchAction, TouchSample, ViewportGeometry,
};

fn touch(action: TouchAction, time_ms: u64) -> TouchSample {
    TouchSample {
        action,
        x: 0.0,
        y: 0.0,
        time_ms,
    }
}

fn main() {
    let options = ScrollViewOptions::new()
        .with_send_momentum_events(true)
        .with_on_event(Some(|e: &ScrollEvent| {
            println!("{:?} y={} vy={:.2}", e.kind, e.offset_y, e.velocity.y);
        }));
    let mut engine = ScrollEngine::new(options, HostEnvironment::default(), None);
    println!("fallback={:?}", engine.physics_fallback());

    engine.on_layout(ViewportGeometry::new(360, 640), 0);
    engine.attach_content(ContentGeometry::new(360, 4000), 0);

    engine.on_touch_event(touch(TouchAction::Down, 0));
    engine.on_drag_start();
    for (i, y) in [20, 60, 120].into_iter().enumerate() {
        engine.on_scroll_changed(0, y, 8 * (i as u64 + 1));
    }
    engine.on_touch_event(touch(TouchAction::Up, 32));
    engine.fling(1800, 32);

    // Pretend to be the native container running its own fling.
    let mut y = 120;
    let mut velocity = 1800 / 60;
    let mut now = 32;
    while engine.has_pending_frames() {
        now += 16;
        for command in engine.take_commands() {
            println!("host command: {command:?}");
            if let HostCommand::ScrollTo { y: to, .. } = command {
                y = to;
            }
        }
        if velocity > 0 {
            y = (y + velocity).min(engine.max_scroll_y());
            velocity = velocity * 9 / 10;
            engine.on_scroll_changed(0, y, now);
        }
        engine.on_frame(now);
    }
    println!("settled at y={} after {now}ms", engine.scroll_y());
}

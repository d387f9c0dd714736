use crate::*;

use alloc::vec::Vec;
use std::sync::{Arc, Mutex};

use vscroll::{
    ContentGeometry, FlingRequest, HostEnvironment, ScrollEngine, ScrollEvent, ScrollEventKind,
    ScrollViewOptions, Scroller, ViewportGeometry,
};

fn request(start_y: i32, velocity_y: i32, max_y: i32, overscroll_y: i32) -> FlingRequest {
    FlingRequest {
        start_x: 0,
        start_y,
        velocity_y,
        min_y: 0,
        max_y,
        overscroll_y,
    }
}

fn run_to_rest(s: &mut DecayScroller, start_ms: u64) -> Vec<i32> {
    let mut ys = Vec::new();
    let mut now = start_ms;
    while !s.is_finished() && now < start_ms + 10_000 {
        now += 16;
        if s.compute_scroll_offset(now) {
            ys.push(s.curr_y());
        }
    }
    ys
}

/// Ticks until the controller has nothing left to animate.
fn settle(c: &mut Controller, mut now: u64) -> (Vec<i32>, u64) {
    let mut ys = Vec::new();
    let deadline = now + 10_000;
    while c.is_animating() && now < deadline {
        now += 16;
        ys.push(c.tick(now).1);
    }
    (ys, now)
}

fn laid_out(c: &mut Controller, viewport_height: i32, content_height: i32) {
    c.on_layout(ViewportGeometry::new(300, viewport_height), 0);
    c.on_content_layout(ContentGeometry::new(300, content_height), 0);
}

#[test]
fn tween_interpolates_and_retargets() {
    let t = Tween::new(0, 100, 0, 100, Easing::SmoothStep);
    assert_eq!(t.sample(0), 0);
    assert!(t.sample(25) < 25);
    assert_eq!(t.sample(50), 50);
    assert!(t.sample(75) > 75);
    assert_eq!(t.sample(100), 100);
    assert_eq!(t.sample(500), 100);

    let mut t = Tween::new(0, 100, 0, 100, Easing::SmoothStep);
    t.retarget(50, 0, 100);
    assert_eq!(t.sample(50), 50);
    assert_eq!(t.sample(150), 0);

    let down = Tween::new(100, -20, 0, 10, Easing::EaseOutQuad);
    assert!(down.sample(5) < 40);
    assert_eq!(down.sample(10), -20);
}

#[test]
fn easings_are_monotone() {
    for easing in [Easing::SmoothStep, Easing::EaseOutQuad] {
        let mut last = easing.sample(0.0);
        assert_eq!(last, 0.0);
        for i in 1..=20 {
            let v = easing.sample(i as f32 / 20.0);
            assert!(v >= last, "{easing:?} not monotone at step {i}");
            last = v;
        }
        assert!((last - 1.0).abs() < 1e-6);
    }
}

#[test]
fn decay_fling_comes_to_rest_inside_bounds() {
    let mut s = DecayScroller::new();
    s.fling(&request(0, 2000, 10_000, 0), 0);
    assert!(!s.is_finished());
    let predicted = s.final_y();
    assert!(predicted > 600 && predicted <= 700, "predicted rest {predicted}");

    let ys = run_to_rest(&mut s, 0);
    assert!(s.is_finished());
    assert!(ys.windows(2).all(|w| w[0] <= w[1]));
    let rest = s.curr_y();
    assert!(rest > 600 && rest <= predicted, "rest {rest}");
    assert_eq!(s.final_y(), rest);
}

#[test]
fn decay_fling_springs_back_from_overscroll() {
    let mut s = DecayScroller::new();
    s.fling(&request(900, 2000, 1000, 50), 0);
    let ys = run_to_rest(&mut s, 0);

    assert!(ys.iter().all(|&y| y <= 1050));
    assert!(ys.iter().any(|&y| y > 1000));
    assert_eq!(s.curr_y(), 1000);
    assert_eq!(s.final_y(), 1000);
}

#[test]
fn decay_abort_stops_in_place() {
    let mut s = DecayScroller::new();
    s.fling(&request(0, 3000, i32::MAX, 0), 0);
    assert!(s.compute_scroll_offset(16));
    let y = s.curr_y();
    assert!(y > 0);

    s.abort_animation();
    assert!(s.is_finished());
    assert_eq!(s.final_y(), y);
    assert!(!s.compute_scroll_offset(32));
}

#[test]
fn decay_start_scroll_reaches_target() {
    let mut s = DecayScroller::new();
    s.start_scroll(100, 200, 0);
    assert!(s.compute_scroll_offset(SMOOTH_SCROLL_MS / 2));
    let mid = s.curr_y();
    assert!(mid > 100 && mid < 300);

    assert!(s.compute_scroll_offset(SMOOTH_SCROLL_MS));
    assert_eq!(s.curr_y(), 300);
    assert!(s.is_finished());
    assert!(!s.compute_scroll_offset(SMOOTH_SCROLL_MS + 16));

    s.start_scroll(300, 0, 0);
    assert!(s.is_finished());
}

#[test]
fn controller_fling_stops_at_content_end_without_overshoot() {
    let mut c = Controller::new(ScrollViewOptions::new(), HostEnvironment::default());
    laid_out(&mut c, 500, 1000);

    assert!(c.begin_drag(0));
    c.drag_to(400, 10);
    c.release(3000, 20);
    let (ys, _) = settle(&mut c, 20);

    assert!(ys.iter().all(|&y| y <= 500), "{ys:?}");
    assert!(ys.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(c.position(), (0, 500));
    assert_eq!(c.engine().scroll_y(), 500);
}

#[test]
fn controller_fling_continues_into_grown_content() {
    let mut c = Controller::new(ScrollViewOptions::new(), HostEnvironment::default());
    laid_out(&mut c, 500, 1000);

    c.begin_drag(0);
    c.drag_to(400, 10);
    c.release(3000, 20);

    let mut now = 20;
    let mut ys = Vec::new();
    let mut grown = false;
    while c.is_animating() && now < 10_000 {
        now += 16;
        let y = c.tick(now).1;
        ys.push(y);
        if !grown && y >= 440 {
            c.on_content_layout(ContentGeometry::new(300, 3000), now);
            grown = true;
        }
    }

    assert!(grown);
    assert!(ys.windows(2).all(|w| w[0] <= w[1]), "bounced: {ys:?}");
    let rest = c.position().1;
    assert!(rest > 1000 && rest <= c.engine().max_scroll_y(), "rest {rest}");
}

#[test]
fn stock_fling_reports_one_momentum_pair() {
    let log: Arc<Mutex<Vec<ScrollEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let options = ScrollViewOptions::new()
        .with_send_momentum_events(true)
        .with_on_event(Some(move |e: &ScrollEvent| sink.lock().unwrap().push(*e)));
    let mut c = Controller::from_engine(ScrollEngine::new(
        options,
        HostEnvironment::default(),
        None,
    ));
    laid_out(&mut c, 500, 2000);

    c.begin_drag(0);
    c.drag_to(100, 10);
    c.release(2000, 20);
    settle(&mut c, 20);

    let kinds: Vec<_> = log.lock().unwrap().iter().map(|e| e.kind).collect();
    let begin = kinds
        .iter()
        .position(|&k| k == ScrollEventKind::MomentumBegin)
        .unwrap();
    let end = kinds
        .iter()
        .position(|&k| k == ScrollEventKind::MomentumEnd)
        .unwrap();
    assert!(begin < end);
    assert_eq!(
        kinds
            .iter()
            .filter(|&&k| k == ScrollEventKind::MomentumEnd)
            .count(),
        1
    );
    let y = c.position().1;
    assert!(y > 100 && y <= 1500, "rest {y}");
    assert_eq!(c.engine().scroll_y(), y);
}

#[test]
fn controller_paging_release_snaps_to_page() {
    let mut c = Controller::new(
        ScrollViewOptions::new().with_paging_enabled(true),
        HostEnvironment::default(),
    );
    laid_out(&mut c, 100, 1000);

    c.begin_drag(0);
    c.drag_to(130, 10);
    c.release(0, 20);
    assert!(c.engine().is_settling());
    settle(&mut c, 20);

    assert_eq!(c.position(), (0, 100));
    assert_eq!(c.engine().scroll_y(), 100);
    assert!(!c.engine().is_settling());
}

#[test]
fn controller_follows_engine_reclamp() {
    let mut c = Controller::new(ScrollViewOptions::new(), HostEnvironment::default());
    laid_out(&mut c, 500, 2000);
    c.begin_drag(0);
    c.drag_to(1400, 10);
    c.release(0, 20);

    c.on_content_layout(ContentGeometry::new(300, 1200), 30);
    assert_eq!(c.position(), (0, 700));
    assert_eq!(c.engine().scroll_y(), 700);
}

#[test]
fn controller_respects_disabled_scrolling() {
    let mut c = Controller::new(
        ScrollViewOptions::new().with_scroll_enabled(false),
        HostEnvironment::default(),
    );
    laid_out(&mut c, 500, 2000);
    assert!(!c.begin_drag(0));
    c.drag_to(300, 10);
    assert_eq!(c.position(), (0, 0));

    c.flash_scroll_indicators();
    assert_eq!(c.scroll_bar_flashes(), 1);
}

#[test]
fn slow_fling_resting_past_the_end_is_clamped() {
    let mut c = Controller::new(ScrollViewOptions::new(), HostEnvironment::default());
    laid_out(&mut c, 100, 1000);

    c.begin_drag(0);
    c.drag_to(895, 10);
    c.release(50, 20);
    // One long frame: the fling crosses the end and comes to rest in it.
    c.tick(620);
    settle(&mut c, 620);

    assert_eq!(c.engine().max_scroll_y(), 900);
    assert_eq!(c.engine().scroll_y(), 900);
    assert_eq!(c.position(), (0, 900));
}

#[test]
fn drag_during_paging_snap_lands_on_a_page() {
    let mut c = Controller::new(
        ScrollViewOptions::new().with_paging_enabled(true),
        HostEnvironment::default(),
    );
    laid_out(&mut c, 100, 1000);

    c.begin_drag(0);
    c.drag_to(30, 10);
    c.release(0, 20);
    c.tick(36);
    c.tick(52);
    c.tick(68);
    assert!(c.is_animating());

    assert!(c.begin_drag(70));
    c.drag_to(260, 80);
    c.release(0, 90);
    settle(&mut c, 90);

    assert_eq!(c.position(), (0, 300));
    assert_eq!(c.engine().scroll_y(), 300);
    assert!(!c.engine().is_settling());
}

#[test]
fn release_does_not_fling_while_scrolling_is_disabled() {
    let mut c = Controller::new(
        ScrollViewOptions::new().with_scroll_enabled(false),
        HostEnvironment::default(),
    );
    laid_out(&mut c, 100, 1000);

    c.release(3000, 20);
    let (ys, _) = settle(&mut c, 20);

    assert!(ys.iter().all(|&y| y == 0));
    assert_eq!(c.position(), (0, 0));
    assert_eq!(c.engine().scroll_y(), 0);
}

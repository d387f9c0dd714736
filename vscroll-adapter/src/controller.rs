use alloc::boxed::Box;

use vscroll::{
    ContentGeometry, FlingRequest, HostCommand, HostEnvironment, ScrollEngine, ScrollViewOptions,
    Scroller, TouchAction, TouchSample, ViewportGeometry,
};

use crate::DecayScroller;

/// A framework-neutral host loop around a `vscroll::ScrollEngine`.
///
/// This type does not hold any UI objects. It stands in for the native scroll container:
/// it executes the engine's [`HostCommand`]s, runs stock animations (smooth scroll and the
/// fallback fling) on its own [`DecayScroller`], and reports the resulting positions back.
/// Adapters drive it by calling:
/// - `on_layout` / `on_content_layout` when the UI lays out
/// - `begin_drag` / `drag_to` / `release` for touch gestures
/// - `tick(now_ms)` once per display frame
#[derive(Debug)]
pub struct Controller {
    engine: ScrollEngine,
    native: DecayScroller,
    position: (i32, i32),
    scroll_bar_flashes: u32,
}

impl Controller {
    /// Creates a controller whose engine runs the patched fling on a [`DecayScroller`].
    pub fn new(options: ScrollViewOptions, env: HostEnvironment) -> Self {
        let scroller: Box<dyn Scroller> = Box::new(DecayScroller::new());
        Self::from_engine(ScrollEngine::new(options, env, Some(scroller)))
    }

    pub fn from_engine(engine: ScrollEngine) -> Self {
        Self {
            engine,
            native: DecayScroller::new(),
            position: (0, 0),
            scroll_bar_flashes: 0,
        }
    }

    pub fn engine(&self) -> &ScrollEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ScrollEngine {
        &mut self.engine
    }

    pub fn into_engine(self) -> ScrollEngine {
        self.engine
    }

    /// The position of the simulated native container.
    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn scroll_bar_flashes(&self) -> u32 {
        self.scroll_bar_flashes
    }

    /// Whether any host or engine animation still needs frames.
    pub fn is_animating(&self) -> bool {
        !self.native.is_finished() || self.engine.has_pending_frames()
    }

    pub fn on_layout(&mut self, viewport: ViewportGeometry, now_ms: u64) {
        self.engine.on_layout(viewport, now_ms);
        self.apply_commands(now_ms);
    }

    pub fn on_content_layout(&mut self, content: ContentGeometry, now_ms: u64) {
        if self.engine.content().is_none() {
            self.engine.attach_content(content, now_ms);
        } else {
            self.engine.on_content_layout(content, now_ms);
        }
        self.apply_commands(now_ms);
    }

    /// Starts a drag gesture. Returns `false` while scrolling is disabled.
    pub fn begin_drag(&mut self, now_ms: u64) -> bool {
        self.engine.on_touch_event(touch(TouchAction::Down, now_ms));
        if !self.engine.on_drag_start() {
            return false;
        }
        self.native.abort_animation();
        true
    }

    /// Moves the container under the finger.
    pub fn drag_to(&mut self, y: i32, now_ms: u64) {
        if !self.engine.scroll_state().is_dragging {
            return;
        }
        self.engine.on_touch_event(touch(TouchAction::Move, now_ms));
        self.report(self.position.0, y, now_ms);
    }

    /// Lifts the finger. A non-zero `velocity_y` (px/s) turns into a fling.
    pub fn release(&mut self, velocity_y: i32, now_ms: u64) {
        let accepted = self.engine.on_touch_event(touch(TouchAction::Up, now_ms));
        if accepted && velocity_y != 0 {
            self.engine.fling(velocity_y, now_ms);
        }
        self.apply_commands(now_ms);
    }

    pub fn flash_scroll_indicators(&mut self) {
        self.engine.flash_scroll_indicators();
        self.apply_commands(0);
    }

    /// Advances host animations and the engine's frame queue.
    ///
    /// Returns the container position after the frame.
    pub fn tick(&mut self, now_ms: u64) -> (i32, i32) {
        if self.native.compute_scroll_offset(now_ms) {
            let y = self.native.curr_y();
            self.report(self.position.0, y, now_ms);
        }
        self.engine.on_frame(now_ms);
        self.apply_commands(now_ms);
        self.position
    }

    fn report(&mut self, x: i32, y: i32, now_ms: u64) {
        self.position = (x, y);
        self.engine.on_scroll_changed(x, y, now_ms);
    }

    fn apply_commands(&mut self, now_ms: u64) {
        for command in self.engine.take_commands() {
            #[cfg(feature = "tracing")]
            tracing::trace!(target: "vscroll_adapter", ?command, now_ms, "host command");
            match command {
                HostCommand::ScrollTo { x, y } => {
                    // The engine has already seen this position.
                    self.native.abort_animation();
                    self.position = (x, y);
                }
                HostCommand::SmoothScrollTo { y, .. } => {
                    let from = self.position.1;
                    self.native.start_scroll(from, y - from, now_ms);
                }
                HostCommand::Fling { velocity_y } => {
                    let request = FlingRequest {
                        start_x: self.position.0,
                        start_y: self.position.1,
                        velocity_y,
                        min_y: 0,
                        max_y: self.engine.max_scroll_y(),
                        overscroll_y: 0,
                    };
                    self.native.fling(&request, now_ms);
                }
                HostCommand::AwakenScrollBars => self.scroll_bar_flashes += 1,
            }
        }
    }
}

fn touch(action: TouchAction, time_ms: u64) -> TouchSample {
    TouchSample {
        action,
        x: 0.0,
        y: 0.0,
        time_ms,
    }
}

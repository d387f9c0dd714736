use alloc::boxed::Box;
use alloc::rc::Weak;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::mem;

use crate::bounds::ScrollBoundsTracker;
use crate::clipping::{AncestorClip, ClipRect, ClippingRectManager, ClippingView};
use crate::coalescer::ScrollEventCoalescer;
use crate::fling::{FlingContext, FlingController, FlingPlan, Scroller};
use crate::momentum::{MomentumEventStateMachine, MomentumPollState, PollDecision, SettleOrigin};
use crate::options::TRANSPARENT;
use crate::scheduler::{FrameQueue, FrameTask};
use crate::snap::{compute_snap_target, resolve_snap_interval};
use crate::{
    ContentGeometry, EngineError, FpsListener, FrameState, HostCommand, HostEnvironment,
    ScrollEvent, ScrollEventKind, ScrollState, ScrollViewOptions, TouchAction, TouchSample,
    Velocity, VelocityEstimator, ViewportGeometry,
};

/// A headless vertical scroll engine for one container and its single content child.
///
/// The engine does not hold any UI objects. The host drives it by:
/// - forwarding layout (`on_layout`, `attach_content`, `on_content_layout`)
/// - forwarding touch (`on_drag_start`, `on_touch_event`, `fling`)
/// - reporting native position changes (`on_scroll_changed`)
/// - calling `on_frame(now_ms)` on every display frame while `has_pending_frames()` is true
/// - executing the [`HostCommand`]s returned by `take_commands()`
///
/// Events for the bridge are delivered through `ScrollViewOptions::on_event`.
pub struct ScrollEngine {
    options: ScrollViewOptions,
    env: HostEnvironment,
    state: ScrollState,
    viewport: ViewportGeometry,
    content: Option<ContentGeometry>,
    ancestor: AncestorClip,

    coalescer: ScrollEventCoalescer,
    bounds: ScrollBoundsTracker,
    fling: FlingController,
    momentum: MomentumEventStateMachine,
    clipping: ClippingRectManager,
    frames: FrameQueue,

    velocity: Option<Box<dyn VelocityEstimator>>,
    fps: Option<Box<dyn FpsListener>>,
    commands: Vec<HostCommand>,
}

impl core::fmt::Debug for ScrollEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollEngine")
            .field("options", &self.options)
            .field("env", &self.env)
            .field("state", &self.state)
            .field("viewport", &self.viewport)
            .field("content", &self.content)
            .field("max_scroll_y", &self.bounds.max_scroll_y())
            .field("fling", &self.fling)
            .field("momentum", &self.momentum)
            .field("clipping", &self.clipping)
            .field("pending_frames", &self.frames.len())
            .finish_non_exhaustive()
    }
}

impl ScrollEngine {
    /// Creates an engine.
    ///
    /// `scroller` is the physics primitive used for the patched fling. When it is `None` (or
    /// cannot override fling bounds), flings are delegated to the host through
    /// [`HostCommand::Fling`] and the bounce-back fix is disabled; everything else behaves the
    /// same.
    pub fn new(
        options: ScrollViewOptions,
        env: HostEnvironment,
        scroller: Option<Box<dyn Scroller>>,
    ) -> Self {
        vdebug!(
            paging = options.paging_enabled,
            snap_interval = options.snap_interval,
            momentum_events = options.send_momentum_events,
            "ScrollEngine::new"
        );
        let mut clipping = ClippingRectManager::new();
        clipping.set_enabled(options.remove_clipped_subviews);
        Self {
            options,
            env,
            state: ScrollState::default(),
            viewport: ViewportGeometry::default(),
            content: None,
            ancestor: AncestorClip::default(),
            coalescer: ScrollEventCoalescer::new(),
            bounds: ScrollBoundsTracker::new(),
            fling: FlingController::resolve(scroller),
            momentum: MomentumEventStateMachine::new(),
            clipping,
            frames: FrameQueue::new(),
            velocity: None,
            fps: None,
            commands: Vec::new(),
        }
    }

    pub fn with_velocity_estimator(mut self, estimator: Box<dyn VelocityEstimator>) -> Self {
        self.velocity = Some(estimator);
        self
    }

    pub fn with_fps_listener(mut self, listener: Box<dyn FpsListener>) -> Self {
        self.fps = Some(listener);
        self
    }

    pub fn options(&self) -> &ScrollViewOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ScrollViewOptions) {
        self.options = options;
        vtrace!(options = ?self.options, "ScrollEngine::set_options");
        if self.clipping.set_enabled(self.options.remove_clipped_subviews) {
            self.update_clipping_rect();
        }
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ScrollViewOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn host_environment(&self) -> HostEnvironment {
        self.env
    }

    /// Why the patched fling is unavailable, if it is.
    pub fn physics_fallback(&self) -> Option<EngineError> {
        self.fling.fallback_reason()
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.state
    }

    pub fn scroll_x(&self) -> i32 {
        self.state.offset_x
    }

    pub fn scroll_y(&self) -> i32 {
        self.state.offset_y
    }

    pub fn max_scroll_y(&self) -> i32 {
        self.bounds.max_scroll_y()
    }

    pub fn viewport(&self) -> ViewportGeometry {
        self.viewport
    }

    pub fn content(&self) -> Option<ContentGeometry> {
        self.content
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: self.viewport,
            content: self.content,
            scroll: self.state,
            max_scroll_y: self.bounds.max_scroll_y(),
        }
    }

    pub fn is_settling(&self) -> bool {
        self.momentum.is_settling()
    }

    pub fn momentum_state(&self) -> Option<&MomentumPollState> {
        self.momentum.state()
    }

    pub fn is_animating(&self) -> bool {
        self.fling.is_animating()
    }

    /// Drains the commands the host must apply to its native container.
    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        mem::take(&mut self.commands)
    }

    pub fn has_pending_frames(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn next_frame_due_ms(&self) -> Option<u64> {
        self.frames.next_due_ms()
    }

    pub fn flash_scroll_indicators(&mut self) {
        self.commands.push(HostCommand::AwakenScrollBars);
    }

    /// Applies a layout pass of the container itself.
    pub fn on_layout(&mut self, viewport: ViewportGeometry, now_ms: u64) {
        let size_changed =
            self.viewport.width != viewport.width || self.viewport.height != viewport.height;
        self.viewport = viewport;
        if size_changed {
            self.update_clipping_rect();
        }
        self.bounds.recompute(self.content, &self.viewport);
        self.reclamp(now_ms);
    }

    /// Registers the content child.
    pub fn attach_content(&mut self, content: ContentGeometry, now_ms: u64) {
        self.content = Some(content);
        self.bounds.recompute(self.content, &self.viewport);
        self.reclamp(now_ms);
    }

    /// Registers the content child as a clipping participant. It is held weakly.
    pub fn set_clipping_content(&mut self, content: Option<Weak<RefCell<dyn ClippingView>>>) {
        self.clipping.set_content(content);
    }

    pub fn detach_content(&mut self) {
        self.content = None;
        self.clipping.set_content(None);
        self.bounds.recompute(None, &self.viewport);
    }

    /// Applies a layout change of the content child. If the content shrank below the current
    /// offset, scrolls to the new end immediately.
    pub fn on_content_layout(&mut self, content: ContentGeometry, now_ms: u64) {
        if self.content.is_none() {
            return;
        }
        self.content = Some(content);
        self.bounds.recompute(self.content, &self.viewport);
        self.reclamp(now_ms);
    }

    pub fn on_attached_to_window(&mut self, ancestor: AncestorClip) {
        self.ancestor = ancestor;
        self.update_clipping_rect();
    }

    /// Records a new parent clip without recomputing; the next trigger picks it up.
    pub fn set_ancestor_clip(&mut self, ancestor: AncestorClip) {
        self.ancestor = ancestor;
    }

    fn reclamp(&mut self, now_ms: u64) {
        if self.content.is_none() {
            return;
        }
        if let Some(y) = self.bounds.reclamp(self.state.offset_y) {
            vdebug!(from = self.state.offset_y, to = y, "content shrank; re-clamping");
            self.scroll_to_internal(self.state.offset_x, y, now_ms);
        }
    }

    pub fn update_clipping_rect(&mut self) {
        self.clipping.update(
            self.ancestor,
            (self.state.offset_x, self.state.offset_y),
            (self.viewport.width, self.viewport.height),
        );
    }

    pub fn remove_clipped_subviews(&self) -> bool {
        self.clipping.is_enabled()
    }

    pub fn try_clipping_rect(&self) -> Result<ClipRect, EngineError> {
        self.clipping.clipping_rect()
    }

    /// The visible sub-rectangle of the viewport.
    ///
    /// # Panics
    ///
    /// Panics if `remove_clipped_subviews` is disabled: the rect only exists while clipping is on.
    pub fn clipping_rect(&self) -> ClipRect {
        match self.clipping.clipping_rect() {
            Ok(rect) => rect,
            Err(err) => panic!("{err}"),
        }
    }

    /// The filler area below content shorter than the viewport, when an end fill color is set.
    pub fn end_fill_rect(&self) -> Option<ClipRect> {
        if self.options.end_fill_color == TRANSPARENT {
            return None;
        }
        let content = self.content?;
        (content.height < self.viewport.height).then(|| {
            ClipRect::new(0, content.height, self.viewport.width, self.viewport.height)
        })
    }

    /// Reports a position change of the native container.
    ///
    /// Repeats of the previous position are dropped. Returns the emitted scroll event.
    pub fn on_scroll_changed(&mut self, x: i32, y: i32, now_ms: u64) -> Option<ScrollEvent> {
        let sample = self.coalescer.on_scroll_changed(x, y, now_ms)?;
        self.state.offset_x = sample.x;
        self.state.offset_y = sample.y;
        self.state.is_actively_scrolling = true;
        self.update_clipping_rect();
        Some(self.emit(ScrollEventKind::Scroll, sample.velocity))
    }

    fn scroll_to_internal(&mut self, x: i32, y: i32, now_ms: u64) {
        self.commands.push(HostCommand::ScrollTo { x, y });
        self.on_scroll_changed(x, y, now_ms);
    }

    fn smooth_scroll_to(&mut self, y: i32, now_ms: u64) {
        let y = if self.content.is_some() {
            self.bounds.clamp(y)
        } else {
            y.max(0)
        };
        if y == self.state.offset_y {
            return;
        }
        vtrace!(from = self.state.offset_y, to = y, "smooth scroll");
        match self.fling.start_scroll(self.state.offset_y, y, now_ms) {
            Some(generation) => self
                .frames
                .post_on_animation(FrameTask::AnimationStep { generation }, now_ms),
            None => self.commands.push(HostCommand::SmoothScrollTo {
                x: self.state.offset_x,
                y,
            }),
        }
    }

    fn smooth_scroll_to_page(&mut self, velocity_y: i32, now_ms: u64) {
        let interval = resolve_snap_interval(self.options.snap_interval, self.viewport.height);
        let target = compute_snap_target(self.state.offset_y, velocity_y, interval);
        self.smooth_scroll_to(target, now_ms);
    }

    /// Called when the host's gesture detection claims the touch stream for scrolling.
    ///
    /// Returns `false` (and does nothing) while scrolling is disabled.
    pub fn on_drag_start(&mut self) -> bool {
        if !self.options.scroll_enabled {
            return false;
        }
        self.fling.abort();
        // A new gesture ends the previous settle so it gets its own sequence (and snap).
        if self.momentum.cancel() {
            vdebug!("drag start cancels settle sequence");
            self.state.is_flinging = false;
            if self.options.send_momentum_events {
                self.emit(ScrollEventKind::MomentumEnd, Velocity::ZERO);
            }
            self.disable_fps();
        }
        self.state.is_dragging = true;
        self.emit(ScrollEventKind::BeginDrag, Velocity::ZERO);
        self.enable_fps();
        true
    }

    /// Forwards a touch sample. Returns `false` while scrolling is disabled.
    ///
    /// Lifting (or cancelling) the finger during a drag emits the end-drag event with the
    /// release velocity and starts the settle sequence.
    pub fn on_touch_event(&mut self, sample: TouchSample) -> bool {
        if !self.options.scroll_enabled {
            return false;
        }
        if let Some(estimator) = self.velocity.as_mut() {
            if sample.action == TouchAction::Down {
                estimator.clear();
            }
            estimator.add_sample(&sample);
        }

        let lifted = matches!(sample.action, TouchAction::Up | TouchAction::Cancel);
        if lifted && self.state.is_dragging {
            let velocity = self
                .velocity
                .as_ref()
                .map_or(Velocity::ZERO, |e| e.velocity());
            self.emit(ScrollEventKind::EndDrag, velocity);
            self.state.is_dragging = false;
            self.disable_fps();
            self.handle_post_touch_scrolling(sample.time_ms);
        }
        true
    }

    /// Turns a release velocity (px/s, as reported by the host) into motion.
    ///
    /// Ignored while scrolling is disabled.
    pub fn fling(&mut self, velocity_y: i32, now_ms: u64) {
        if !self.options.scroll_enabled {
            return;
        }
        let ctx = FlingContext {
            snap_to_pages: self.options.snaps_to_pages(),
            page_size: resolve_snap_interval(self.options.snap_interval, self.viewport.height),
            scroll_x: self.state.offset_x,
            scroll_y: self.state.offset_y,
            viewport: self.viewport,
            invert_velocity: self.options.mirrored_fling_policy.inverts(&self.env),
        };
        let plan = self.fling.plan(velocity_y, &ctx);
        vtrace!(velocity_y, ?plan, "fling");

        match plan {
            FlingPlan::Snap { target_y } => {
                self.emit(ScrollEventKind::Scroll, self.coalescer.fling_velocity());
                self.smooth_scroll_to(target_y, now_ms);
                return;
            }
            FlingPlan::Simulate(request) => {
                if let Some(generation) = self.fling.start_fling(&request, now_ms) {
                    self.frames
                        .post_on_animation(FrameTask::AnimationStep { generation }, now_ms);
                }
            }
            FlingPlan::Stock { velocity_y } => {
                self.commands.push(HostCommand::Fling { velocity_y });
            }
        }

        if self.options.send_momentum_events || self.perf_enabled() {
            self.state.is_flinging = true;
            self.begin_settle(SettleOrigin::Fling, now_ms);
        }
    }

    fn handle_post_touch_scrolling(&mut self, now_ms: u64) {
        if !self.options.send_momentum_events
            && !self.options.paging_enabled
            && !self.perf_enabled()
        {
            return;
        }
        self.begin_settle(SettleOrigin::DragRelease, now_ms);
    }

    fn begin_settle(&mut self, origin: SettleOrigin, now_ms: u64) {
        let Some(sequence) = self.momentum.begin() else {
            vtrace!(?origin, "settle sequence already running");
            return;
        };
        self.state.is_actively_scrolling = origin.starts_active();
        if self.options.send_momentum_events {
            self.emit(ScrollEventKind::MomentumBegin, Velocity::ZERO);
        }
        self.enable_fps();
        self.frames.post_delayed(
            FrameTask::MomentumPoll { sequence },
            now_ms,
            self.options.momentum_delay_ms,
        );
    }

    /// Runs every frame task due at `now_ms`. Call once per display frame.
    pub fn on_frame(&mut self, now_ms: u64) {
        for task in self.frames.take_due(now_ms) {
            self.run_frame_task(task, now_ms);
        }
    }

    fn run_frame_task(&mut self, task: FrameTask, now_ms: u64) {
        match task {
            FrameTask::AnimationStep { generation } => self.step_animation(generation, now_ms),
            FrameTask::MomentumPoll { sequence } => self.poll_momentum(sequence, now_ms),
        }
    }

    fn step_animation(&mut self, generation: u64, now_ms: u64) {
        let Some(frame) = self.fling.step(generation, now_ms) else {
            return;
        };
        // Clamp before the position reaches listeners.
        let mut y = self
            .fling
            .clamp_overscroll(frame.y, self.bounds.max_scroll_y());
        // An animation can cross the end and come to rest within one frame.
        if frame.finished && self.content.is_some() {
            y = self.bounds.clamp(y);
        }
        self.scroll_to_internal(self.state.offset_x, y, now_ms);
        if !frame.finished && self.fling.is_animating() {
            self.frames
                .post_on_animation(FrameTask::AnimationStep { generation }, now_ms);
        }
    }

    fn poll_momentum(&mut self, sequence: u64, now_ms: u64) {
        let active = self.state.is_actively_scrolling;
        let Some(decision) = self
            .momentum
            .poll(sequence, active, self.options.paging_enabled)
        else {
            return;
        };
        self.state.is_actively_scrolling = false;

        match decision {
            PollDecision::KeepPolling => self.repost_poll(sequence, now_ms),
            PollDecision::Snap => {
                self.smooth_scroll_to_page(0, now_ms);
                self.repost_poll(sequence, now_ms);
            }
            PollDecision::Settled => self.finish_settle(now_ms),
        }
    }

    fn repost_poll(&mut self, sequence: u64, now_ms: u64) {
        self.frames.post_delayed(
            FrameTask::MomentumPoll { sequence },
            now_ms,
            self.options.momentum_delay_ms,
        );
    }

    fn finish_settle(&mut self, now_ms: u64) {
        self.state.is_flinging = false;
        if self.content.is_some() {
            let y = self.state.offset_y;
            let clamped = self.bounds.clamp(y);
            if clamped != y {
                self.scroll_to_internal(self.state.offset_x, clamped, now_ms);
                // The clamp itself is not motion the next sequence should wait for.
                self.state.is_actively_scrolling = false;
            }
        }
        if self.options.send_momentum_events {
            self.emit(ScrollEventKind::MomentumEnd, Velocity::ZERO);
        }
        self.disable_fps();
    }

    fn emit(&self, kind: ScrollEventKind, velocity: Velocity) -> ScrollEvent {
        let event = ScrollEvent::new(
            kind,
            (self.state.offset_x, self.state.offset_y),
            velocity,
            self.content,
            self.viewport,
        );
        vtrace!(?kind, x = event.offset_x, y = event.offset_y, "emit");
        if let Some(cb) = &self.options.on_event {
            cb(&event);
        }
        event
    }

    fn perf_enabled(&self) -> bool {
        self.fps.is_some() && self.options.perf_tag().is_some()
    }

    fn enable_fps(&mut self) {
        if let (Some(fps), Some(tag)) = (self.fps.as_mut(), self.options.perf_tag()) {
            fps.enable(tag);
        }
    }

    fn disable_fps(&mut self) {
        if let (Some(fps), Some(tag)) = (self.fps.as_mut(), self.options.perf_tag()) {
            fps.disable(tag);
        }
    }
}

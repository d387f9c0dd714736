use alloc::boxed::Box;

use crate::snap::compute_snap_target;
use crate::{EngineError, HostEnvironment, ViewportGeometry};

/// Upper fling bound used in place of the content end. Reaching the real end is handled by
/// [`FlingController::clamp_overscroll`].
pub const UNBOUNDED_MAX_Y: i32 = i32::MAX;

/// The physics primitive driving fling and smooth-scroll animations.
///
/// This mirrors the contract of a platform over-scroller: the engine starts an animation, then
/// calls [`Scroller::compute_scroll_offset`] once per frame and reads [`Scroller::curr_y`].
pub trait Scroller {
    /// Starts a momentum animation with explicit bounds.
    fn fling(&mut self, request: &FlingRequest, now_ms: u64);

    /// Starts a fixed-duration animation from `start_y` by `delta_y`.
    fn start_scroll(&mut self, start_y: i32, delta_y: i32, now_ms: u64);

    /// Advances the animation to `now_ms`.
    ///
    /// Returns `false` when the animation had already finished before this call, so the frame
    /// that completes an animation still reports its final position.
    fn compute_scroll_offset(&mut self, now_ms: u64) -> bool;

    fn curr_y(&self) -> i32;

    fn final_y(&self) -> i32;

    fn is_finished(&self) -> bool;

    /// Stops the animation at its current position.
    fn abort_animation(&mut self);

    /// Whether [`Scroller::fling`] honors caller-provided bounds. Scrollers that clamp to their
    /// own notion of the content end cannot carry the bounce-back fix.
    fn supports_bounds_override(&self) -> bool {
        true
    }
}

/// Parameters of one fling simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlingRequest {
    pub start_x: i32,
    pub start_y: i32,
    pub velocity_y: i32,
    pub min_y: i32,
    pub max_y: i32,
    /// How far the simulation may travel past a bound before springing back.
    pub overscroll_y: i32,
}

/// When to invert the fling velocity for content rendered with a negative vertical scale.
///
/// Hosts differ in whether a mirrored container already reports velocities in content space;
/// this policy is keyed by [`HostEnvironment::platform_version`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MirroredFlingPolicy {
    Never,
    Always,
    /// Invert on hosts whose platform version is strictly greater than the given one.
    AbovePlatformVersion(u32),
}

impl Default for MirroredFlingPolicy {
    fn default() -> Self {
        Self::AbovePlatformVersion(27)
    }
}

impl MirroredFlingPolicy {
    pub fn inverts(self, env: &HostEnvironment) -> bool {
        if !env.is_mirrored() {
            return false;
        }
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::AbovePlatformVersion(v) => env.platform_version > v,
        }
    }
}

/// Inputs to [`FlingController::plan`], gathered by the engine at release time.
#[derive(Clone, Copy, Debug)]
pub struct FlingContext {
    /// Paging is on or an explicit snap interval is set.
    pub snap_to_pages: bool,
    pub page_size: i32,
    pub scroll_x: i32,
    pub scroll_y: i32,
    pub viewport: ViewportGeometry,
    pub invert_velocity: bool,
}

/// The committed post-release trajectory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlingPlan {
    /// Smooth-scroll to a page boundary.
    Snap { target_y: i32 },
    /// Run the patched simulation on the injected scroller.
    Simulate(FlingRequest),
    /// Defer to the host's stock fling.
    Stock { velocity_y: i32 },
}

/// One animation frame produced by [`FlingController::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationFrame {
    pub y: i32,
    pub finished: bool,
}

/// Owns the (optional) physics primitive and decides how a release velocity turns into motion.
pub struct FlingController {
    scroller: Option<Box<dyn Scroller>>,
    fallback: Option<EngineError>,
    generation: u64,
}

impl core::fmt::Debug for FlingController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlingController")
            .field("patched", &self.is_patched())
            .field("fallback", &self.fallback)
            .field("generation", &self.generation)
            .finish()
    }
}

impl FlingController {
    /// Resolves the physics capability once. A missing or incompatible scroller degrades to the
    /// host's stock fling; paging and momentum events are unaffected.
    pub fn resolve(candidate: Option<Box<dyn Scroller>>) -> Self {
        let (scroller, fallback) = match candidate {
            Some(s) if s.supports_bounds_override() => (Some(s), None),
            Some(_) => (None, Some(EngineError::ScrollerIncompatible)),
            None => (None, Some(EngineError::ScrollerMissing)),
        };
        if fallback.is_some() {
            vwarn!(reason = ?fallback, "falling back to stock fling");
        }
        Self {
            scroller,
            fallback,
            generation: 0,
        }
    }

    /// Why the patched fling is unavailable, if it is.
    pub fn fallback_reason(&self) -> Option<EngineError> {
        self.fallback
    }

    /// Whether the bounce-back fix is active.
    pub fn is_patched(&self) -> bool {
        self.scroller.is_some()
    }

    pub fn plan(&self, velocity_y: i32, ctx: &FlingContext) -> FlingPlan {
        if ctx.snap_to_pages {
            return FlingPlan::Snap {
                target_y: compute_snap_target(ctx.scroll_y, velocity_y, ctx.page_size),
            };
        }
        if !self.is_patched() {
            return FlingPlan::Stock { velocity_y };
        }

        let velocity_y = if ctx.invert_velocity {
            velocity_y.saturating_neg()
        } else {
            velocity_y
        };
        let scroll_window_height = ctx.viewport.scroll_window_height();
        FlingPlan::Simulate(FlingRequest {
            start_x: ctx.scroll_x,
            start_y: ctx.scroll_y,
            velocity_y,
            min_y: 0,
            max_y: UNBOUNDED_MAX_Y,
            overscroll_y: (scroll_window_height / 2).max(0),
        })
    }

    /// Starts a simulation. Returns the generation that frame steps must carry.
    pub fn start_fling(&mut self, request: &FlingRequest, now_ms: u64) -> Option<u64> {
        let scroller = self.scroller.as_mut()?;
        vtrace!(
            start_y = request.start_y,
            velocity_y = request.velocity_y,
            overscroll_y = request.overscroll_y,
            "start fling"
        );
        scroller.fling(request, now_ms);
        self.generation = self.generation.wrapping_add(1);
        Some(self.generation)
    }

    /// Starts a smooth scroll on the injected scroller, if any.
    pub fn start_scroll(&mut self, from_y: i32, to_y: i32, now_ms: u64) -> Option<u64> {
        let scroller = self.scroller.as_mut()?;
        scroller.start_scroll(from_y, to_y.saturating_sub(from_y), now_ms);
        self.generation = self.generation.wrapping_add(1);
        Some(self.generation)
    }

    /// Advances the active animation. Stale generations and finished animations yield `None`.
    pub fn step(&mut self, generation: u64, now_ms: u64) -> Option<AnimationFrame> {
        if generation != self.generation {
            return None;
        }
        let scroller = self.scroller.as_mut()?;
        if !scroller.compute_scroll_offset(now_ms) {
            return None;
        }
        Some(AnimationFrame {
            y: scroller.curr_y(),
            finished: scroller.is_finished(),
        })
    }

    /// The second half of the unbounded fling: once an unfinished animation reaches the current
    /// content end, abort it and pin the position to `max_scroll_y`.
    pub fn clamp_overscroll(&mut self, y: i32, max_scroll_y: i32) -> i32 {
        let Some(scroller) = self.scroller.as_mut() else {
            return y;
        };
        if !scroller.is_finished() && scroller.curr_y() != scroller.final_y() && y >= max_scroll_y {
            vdebug!(y, max_scroll_y, "fling reached content end; aborting");
            scroller.abort_animation();
            return max_scroll_y;
        }
        y
    }

    /// Stops any running animation and invalidates pending frame steps.
    pub fn abort(&mut self) {
        if let Some(scroller) = self.scroller.as_mut() {
            if !scroller.is_finished() {
                scroller.abort_animation();
            }
        }
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn is_animating(&self) -> bool {
        self.scroller.as_ref().is_some_and(|s| !s.is_finished())
    }
}

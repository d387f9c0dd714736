use vscroll::{FlingRequest, Scroller};

use crate::tween::round_px;
use crate::{Easing, Tween};

/// Velocity retained after each millisecond of a fling.
pub const DEFAULT_FRICTION_PER_MS: f32 = 0.997;
/// Below this speed (px/ms) a fling is considered at rest.
pub const MIN_FLING_VELOCITY: f32 = 0.02;
/// Duration of the animation returning an overscrolled fling to its bound.
pub const SPRING_BACK_MS: u64 = 200;
/// Duration of `start_scroll` animations.
pub const SMOOTH_SCROLL_MS: u64 = 250;

#[derive(Clone, Copy, Debug, PartialEq)]
struct FlingMotion {
    pos: f32,
    velocity: f32,
    min_y: i32,
    max_y: i32,
    overscroll_y: i32,
    last_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Motion {
    Idle,
    Fling(FlingMotion),
    Tween(Tween),
}

/// A frame-stepped scroller with exponential velocity decay.
///
/// Velocity is multiplied by the friction factor once per elapsed millisecond. A fling may run
/// up to `overscroll_y` past its bounds; once it comes to rest outside them it springs back.
#[derive(Clone, Debug)]
pub struct DecayScroller {
    friction: f32,
    bounds_override: bool,
    motion: Motion,
    curr_y: i32,
    final_y: i32,
}

impl Default for DecayScroller {
    fn default() -> Self {
        Self {
            friction: DEFAULT_FRICTION_PER_MS,
            bounds_override: true,
            motion: Motion::Idle,
            curr_y: 0,
            final_y: 0,
        }
    }
}

impl DecayScroller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-millisecond friction, clamped to `[0.5, 0.9999]`.
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction.clamp(0.5, 0.9999);
        self
    }

    /// Declares whether this scroller honors caller-provided fling bounds.
    pub fn with_bounds_override(mut self, supported: bool) -> Self {
        self.bounds_override = supported;
        self
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Where a fling from `start_y` at `velocity` (px/ms) would come to rest, ignoring bounds.
    pub fn predicted_rest(&self, start_y: i32, velocity: f32) -> f32 {
        // Geometric series of the per-millisecond displacement.
        start_y as f32 + velocity * self.friction / (1.0 - self.friction)
    }

    fn spring_back_or_stop(&mut self, min_y: i32, max_y: i32, now_ms: u64) {
        let target = self.curr_y.clamp(min_y, max_y);
        self.final_y = target;
        self.motion = if target == self.curr_y {
            Motion::Idle
        } else {
            Motion::Tween(Tween::new(
                self.curr_y,
                target,
                now_ms,
                SPRING_BACK_MS,
                Easing::EaseOutQuad,
            ))
        };
    }
}

fn speed(v: f32) -> f32 {
    if v < 0.0 { -v } else { v }
}

impl Scroller for DecayScroller {
    fn fling(&mut self, request: &FlingRequest, now_ms: u64) {
        let velocity = request.velocity_y as f32 / 1000.0;
        self.curr_y = request.start_y;
        if speed(velocity) < MIN_FLING_VELOCITY {
            self.spring_back_or_stop(request.min_y, request.max_y, now_ms);
            return;
        }

        let rest = self.predicted_rest(request.start_y, velocity);
        self.final_y = round_px(rest).clamp(request.min_y, request.max_y);
        self.motion = Motion::Fling(FlingMotion {
            pos: request.start_y as f32,
            velocity,
            min_y: request.min_y,
            max_y: request.max_y,
            overscroll_y: request.overscroll_y.max(0),
            last_ms: now_ms,
        });
    }

    fn start_scroll(&mut self, start_y: i32, delta_y: i32, now_ms: u64) {
        self.curr_y = start_y;
        self.final_y = start_y.saturating_add(delta_y);
        self.motion = if delta_y == 0 {
            Motion::Idle
        } else {
            Motion::Tween(Tween::new(
                start_y,
                self.final_y,
                now_ms,
                SMOOTH_SCROLL_MS,
                Easing::default(),
            ))
        };
    }

    fn compute_scroll_offset(&mut self, now_ms: u64) -> bool {
        match self.motion {
            Motion::Idle => false,
            Motion::Tween(tween) => {
                self.curr_y = tween.sample(now_ms);
                if tween.is_done(now_ms) {
                    self.motion = Motion::Idle;
                }
                true
            }
            Motion::Fling(mut m) => {
                let lo = m.min_y as f32 - m.overscroll_y as f32;
                let hi = m.max_y as f32 + m.overscroll_y as f32;
                for _ in 0..now_ms.saturating_sub(m.last_ms) {
                    m.pos += m.velocity;
                    m.velocity *= self.friction;
                    if m.pos > hi || m.pos < lo {
                        m.pos = m.pos.clamp(lo, hi);
                        m.velocity = 0.0;
                    }
                    if speed(m.velocity) < MIN_FLING_VELOCITY {
                        break;
                    }
                }
                m.last_ms = now_ms;
                self.curr_y = round_px(m.pos);

                if speed(m.velocity) < MIN_FLING_VELOCITY {
                    self.spring_back_or_stop(m.min_y, m.max_y, now_ms);
                } else {
                    self.motion = Motion::Fling(m);
                }
                true
            }
        }
    }

    fn curr_y(&self) -> i32 {
        self.curr_y
    }

    fn final_y(&self) -> i32 {
        self.final_y
    }

    fn is_finished(&self) -> bool {
        self.motion == Motion::Idle
    }

    fn abort_animation(&mut self) {
        self.motion = Motion::Idle;
        self.final_y = self.curr_y;
    }

    fn supports_bounds_override(&self) -> bool {
        self.bounds_override
    }
}

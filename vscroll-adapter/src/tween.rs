/// A time-based interpolation between two scroll positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: i32,
    pub to: i32,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: i32, to: i32, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    pub fn sample(&self, now_ms: u64) -> i32 {
        if self.is_done(now_ms) {
            return self.to;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0);
        let eased = self.easing.sample(t);

        let from = self.from as f32;
        let to = self.to as f32;
        round_px(from + (to - from) * eased)
    }

    /// Restarts from the current sample towards `new_to`.
    pub fn retarget(&mut self, now_ms: u64, new_to: i32, duration_ms: u64) {
        let cur = self.sample(now_ms);
        *self = Self::new(cur, new_to, now_ms, duration_ms, self.easing);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    #[default]
    SmoothStep,
    /// Decelerating curve used for spring-back after an overscroll.
    EaseOutQuad,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        match self {
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Rounds half away from zero. `f32::round` lives in `std`.
pub(crate) fn round_px(v: f32) -> i32 {
    if v >= 0.0 {
        (v + 0.5) as i32
    } else {
        (v - 0.5) as i32
    }
}

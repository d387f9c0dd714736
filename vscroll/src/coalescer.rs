use crate::Velocity;

/// A genuine position change accepted by [`ScrollEventCoalescer`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollSample {
    pub x: i32,
    pub y: i32,
    /// Instantaneous velocity since the previous accepted change, in px/ms.
    pub velocity: Velocity,
}

/// Filters raw "scroll position changed" notifications.
///
/// Host scroll primitives may report the same position several times in a row; those repeats are
/// dropped. Accepted changes carry a velocity estimate derived from the previous accepted change.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollEventCoalescer {
    last: Option<(i32, i32, u64)>,
    velocity: Velocity,
}

impl ScrollEventCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Some` only when `(x, y)` differs from the last accepted position.
    pub fn on_scroll_changed(&mut self, x: i32, y: i32, now_ms: u64) -> Option<ScrollSample> {
        if let Some((prev_x, prev_y, prev_ms)) = self.last {
            if prev_x == x && prev_y == y {
                return None;
            }
            let elapsed = now_ms.saturating_sub(prev_ms);
            // Same-millisecond changes keep the previous estimate.
            if elapsed != 0 {
                let dt = elapsed as f32;
                self.velocity = Velocity::new((x - prev_x) as f32 / dt, (y - prev_y) as f32 / dt);
            }
        } else {
            self.velocity = Velocity::ZERO;
        }

        self.last = Some((x, y, now_ms));
        vtrace!(x, y, vy = self.velocity.y, "coalesced scroll change");
        Some(ScrollSample {
            x,
            y,
            velocity: self.velocity,
        })
    }

    /// The most recent velocity estimate.
    pub fn fling_velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn last_position(&self) -> Option<(i32, i32)> {
        self.last.map(|(x, y, _)| (x, y))
    }
}

use crate::{ContentGeometry, ViewportGeometry};

/// Largest valid `offset_y` for the given content and viewport.
pub fn max_scroll_y(content_height: i32, viewport: &ViewportGeometry) -> i32 {
    content_height
        .saturating_sub(viewport.scroll_window_height())
        .max(0)
}

/// Tracks `max_scroll_y` across layout passes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollBoundsTracker {
    max_scroll_y: i32,
}

impl ScrollBoundsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_scroll_y(&self) -> i32 {
        self.max_scroll_y
    }

    /// Recomputes the bound. Without content there is nothing to scroll.
    pub fn recompute(&mut self, content: Option<ContentGeometry>, viewport: &ViewportGeometry) -> i32 {
        self.max_scroll_y = match content {
            Some(c) => max_scroll_y(c.height, viewport),
            None => 0,
        };
        self.max_scroll_y
    }

    /// Returns the offset to force-scroll to when `current_y` lies past the bound.
    pub fn reclamp(&self, current_y: i32) -> Option<i32> {
        (current_y > self.max_scroll_y).then_some(self.max_scroll_y)
    }

    pub fn clamp(&self, y: i32) -> i32 {
        y.clamp(0, self.max_scroll_y)
    }
}

/// Geometry of the scroll container, supplied by the host on every layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportGeometry {
    pub width: i32,
    pub height: i32,
    pub padding_top: i32,
    pub padding_bottom: i32,
}

impl ViewportGeometry {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            padding_top: 0,
            padding_bottom: 0,
        }
    }

    pub fn with_padding(mut self, padding_top: i32, padding_bottom: i32) -> Self {
        self.padding_top = padding_top;
        self.padding_bottom = padding_bottom;
        self
    }

    /// Height available to content once vertical padding is removed.
    pub fn scroll_window_height(&self) -> i32 {
        self.height - self.padding_top - self.padding_bottom
    }
}

/// Geometry of the single content child.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentGeometry {
    pub width: i32,
    pub height: i32,
}

impl ContentGeometry {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// A lightweight, serializable snapshot of the current scroll state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub offset_x: i32,
    pub offset_y: i32,
    pub is_dragging: bool,
    pub is_flinging: bool,
    /// Set by every coalesced position change, consumed by the momentum poll.
    pub is_actively_scrolling: bool,
}

/// Combined snapshot of geometry and scroll state, useful for debugging overlays and
/// persisting state across sessions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameState {
    pub viewport: ViewportGeometry,
    pub content: Option<ContentGeometry>,
    pub scroll: ScrollState,
    pub max_scroll_y: i32,
}

use crate::{ContentGeometry, ViewportGeometry};

/// A two-component velocity in pixels per millisecond.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollEventKind {
    BeginDrag,
    Scroll,
    EndDrag,
    MomentumBegin,
    MomentumEnd,
}

/// An event emitted to the host bridge.
///
/// `velocity` is the coalesced fling estimate for [`ScrollEventKind::Scroll`], the release
/// velocity for [`ScrollEventKind::EndDrag`], and zero otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollEvent {
    pub kind: ScrollEventKind,
    pub offset_x: i32,
    pub offset_y: i32,
    pub velocity: Velocity,
    pub content_width: i32,
    pub content_height: i32,
    pub layout_width: i32,
    pub layout_height: i32,
}

impl ScrollEvent {
    pub(crate) fn new(
        kind: ScrollEventKind,
        offset: (i32, i32),
        velocity: Velocity,
        content: Option<ContentGeometry>,
        viewport: ViewportGeometry,
    ) -> Self {
        let content = content.unwrap_or_default();
        Self {
            kind,
            offset_x: offset.0,
            offset_y: offset.1,
            velocity,
            content_width: content.width,
            content_height: content.height,
            layout_width: viewport.width,
            layout_height: viewport.height,
        }
    }
}

/// Work the engine asks the host to perform on its native scroll container.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HostCommand {
    /// Move the container to this position immediately. The engine has already accounted for it.
    ScrollTo { x: i32, y: i32 },
    /// Animate the container to this position and report progress via `on_scroll_changed`.
    SmoothScrollTo { x: i32, y: i32 },
    /// Run the host's stock fling. Issued when no patched physics primitive is available.
    Fling { velocity_y: i32 },
    /// Briefly show the scroll indicators.
    AwakenScrollBars,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single touch sample forwarded by the host's touch dispatch.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TouchSample {
    pub action: TouchAction,
    pub x: f32,
    pub y: f32,
    pub time_ms: u64,
}

/// Host facts resolved once when the engine is created.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostEnvironment {
    /// Platform/API version of the host.
    pub platform_version: u32,
    /// Vertical scale applied to the scroll container. Negative when the content is mirrored.
    pub scale_y: f32,
}

impl Default for HostEnvironment {
    fn default() -> Self {
        Self {
            platform_version: 0,
            scale_y: 1.0,
        }
    }
}

impl HostEnvironment {
    pub fn is_mirrored(&self) -> bool {
        self.scale_y < 0.0
    }
}

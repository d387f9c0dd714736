use alloc::rc::Weak;
use core::cell::RefCell;

use crate::EngineError;

/// An axis-aligned rectangle in pixels. `right`/`bottom` are exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClipRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ClipRect {
    pub const EMPTY: Self = Self {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Overlap of two rectangles, or `None` when they do not overlap.
    pub fn intersect(&self, other: &ClipRect) -> Option<ClipRect> {
        let r = ClipRect {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        };
        (!r.is_empty()).then_some(r)
    }

    pub fn offset(&self, dx: i32, dy: i32) -> ClipRect {
        ClipRect {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }
}

/// How the scroll container's parent constrains what is visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AncestorClip {
    /// Not attached to a window: nothing is visible.
    #[default]
    Detached,
    /// The parent does not clip; the whole viewport is visible.
    Unclipped,
    /// The parent clips its subviews.
    Clipped {
        /// The parent's own clipping rect, in the parent's coordinate space.
        parent_clip: ClipRect,
        /// This container's bounds (translation included) in the parent's coordinate space.
        frame: ClipRect,
    },
}

/// Implemented by content that culls its own offscreen descendants.
///
/// The scroll container hands down its clipping rect, expressed in its scrolled coordinate space
/// (the content's parent space); the content recomputes and propagates further.
pub trait ClippingView {
    fn update_clipping_rect(&mut self, parent_clip: ClipRect);
}

/// Maintains the visible sub-rectangle of the viewport.
///
/// The rect only exists while clipping is enabled. The content child is held weakly: the host
/// owns it and may drop it at any time.
#[derive(Default)]
pub struct ClippingRectManager {
    rect: Option<ClipRect>,
    content: Option<Weak<RefCell<dyn ClippingView>>>,
}

impl core::fmt::Debug for ClippingRectManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClippingRectManager")
            .field("rect", &self.rect)
            .field("has_content", &self.content.is_some())
            .finish()
    }
}

impl ClippingRectManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.rect.is_some()
    }

    /// Allocates or frees the rect. Returns `true` when the state changed.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        match (enabled, self.rect.is_some()) {
            (true, false) => {
                self.rect = Some(ClipRect::EMPTY);
                true
            }
            (false, true) => {
                self.rect = None;
                true
            }
            _ => false,
        }
    }

    pub fn set_content(&mut self, content: Option<Weak<RefCell<dyn ClippingView>>>) {
        self.content = content;
    }

    pub fn clipping_rect(&self) -> Result<ClipRect, EngineError> {
        self.rect.ok_or(EngineError::ClippingDisabled)
    }

    /// Recomputes the rect and pushes it to the content. No-op while disabled.
    pub fn update(&mut self, ancestor: AncestorClip, scroll: (i32, i32), size: (i32, i32)) {
        let Some(rect) = self.rect.as_mut() else {
            return;
        };
        *rect = visible_rect(ancestor, scroll, size);
        let rect = *rect;
        vtrace!(
            left = rect.left,
            top = rect.top,
            right = rect.right,
            bottom = rect.bottom,
            "clipping rect"
        );

        let Some(weak) = &self.content else {
            return;
        };
        match weak.upgrade() {
            Some(content) => content.borrow_mut().update_clipping_rect(rect),
            None => self.content = None,
        }
    }
}

/// The part of the container that is visible, in its scrolled coordinate space.
fn visible_rect(ancestor: AncestorClip, scroll: (i32, i32), size: (i32, i32)) -> ClipRect {
    let (sx, sy) = scroll;
    match ancestor {
        AncestorClip::Detached => ClipRect::EMPTY,
        AncestorClip::Unclipped => ClipRect::new(sx, sy, sx + size.0, sy + size.1),
        AncestorClip::Clipped { parent_clip, frame } => match parent_clip.intersect(&frame) {
            Some(r) => r.offset(-frame.left, -frame.top).offset(sx, sy),
            None => ClipRect::EMPTY,
        },
    }
}

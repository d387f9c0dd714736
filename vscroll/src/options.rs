use alloc::string::String;
use alloc::sync::Arc;

use crate::{MirroredFlingPolicy, ScrollEvent};

/// A callback receiving every event the engine emits, in emission order.
pub type OnScrollEventCallback = Arc<dyn Fn(&ScrollEvent) + Send + Sync>;

/// Poll delay of the momentum state machine, in milliseconds.
pub const MOMENTUM_DELAY_MS: u64 = 20;

/// Fully transparent ARGB color: no end fill is drawn.
pub const TRANSPARENT: u32 = 0;

/// Configuration for [`crate::ScrollEngine`].
///
/// Options are replaced as a whole by the host bridge; use
/// [`crate::ScrollEngine::set_options`] or [`crate::ScrollEngine::update_options`] so the engine
/// can react to what changed.
pub struct ScrollViewOptions {
    /// Gates every touch-driven position change.
    pub scroll_enabled: bool,
    /// Snap to a page boundary after touch release and after a fling.
    pub paging_enabled: bool,
    /// Page size in pixels. `0` means one page per viewport height.
    pub snap_interval: u32,
    pub send_momentum_events: bool,
    /// Maintain a clipping rect so content can cull offscreen descendants.
    pub remove_clipped_subviews: bool,
    /// ARGB color filling the area below content shorter than the viewport.
    pub end_fill_color: u32,
    /// Tag under which frame-rate instrumentation is reported. Empty disables it.
    pub scroll_perf_tag: Option<String>,
    pub momentum_delay_ms: u64,
    pub mirrored_fling_policy: MirroredFlingPolicy,
    pub on_event: Option<OnScrollEventCallback>,
}

impl Default for ScrollViewOptions {
    fn default() -> Self {
        Self {
            scroll_enabled: true,
            paging_enabled: false,
            snap_interval: 0,
            send_momentum_events: false,
            remove_clipped_subviews: false,
            end_fill_color: TRANSPARENT,
            scroll_perf_tag: None,
            momentum_delay_ms: MOMENTUM_DELAY_MS,
            mirrored_fling_policy: MirroredFlingPolicy::default(),
            on_event: None,
        }
    }
}

impl Clone for ScrollViewOptions {
    fn clone(&self) -> Self {
        Self {
            scroll_enabled: self.scroll_enabled,
            paging_enabled: self.paging_enabled,
            snap_interval: self.snap_interval,
            send_momentum_events: self.send_momentum_events,
            remove_clipped_subviews: self.remove_clipped_subviews,
            end_fill_color: self.end_fill_color,
            scroll_perf_tag: self.scroll_perf_tag.clone(),
            momentum_delay_ms: self.momentum_delay_ms,
            mirrored_fling_policy: self.mirrored_fling_policy,
            on_event: self.on_event.clone(),
        }
    }
}

impl ScrollViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scroll_enabled(mut self, scroll_enabled: bool) -> Self {
        self.scroll_enabled = scroll_enabled;
        self
    }

    pub fn with_paging_enabled(mut self, paging_enabled: bool) -> Self {
        self.paging_enabled = paging_enabled;
        self
    }

    pub fn with_snap_interval(mut self, snap_interval: u32) -> Self {
        self.snap_interval = snap_interval;
        self
    }

    pub fn with_send_momentum_events(mut self, send_momentum_events: bool) -> Self {
        self.send_momentum_events = send_momentum_events;
        self
    }

    pub fn with_remove_clipped_subviews(mut self, remove_clipped_subviews: bool) -> Self {
        self.remove_clipped_subviews = remove_clipped_subviews;
        self
    }

    pub fn with_end_fill_color(mut self, end_fill_color: u32) -> Self {
        self.end_fill_color = end_fill_color;
        self
    }

    pub fn with_scroll_perf_tag(mut self, tag: impl Into<String>) -> Self {
        self.scroll_perf_tag = Some(tag.into());
        self
    }

    pub fn with_momentum_delay_ms(mut self, delay_ms: u64) -> Self {
        self.momentum_delay_ms = delay_ms;
        self
    }

    pub fn with_mirrored_fling_policy(mut self, policy: MirroredFlingPolicy) -> Self {
        self.mirrored_fling_policy = policy;
        self
    }

    pub fn with_on_event(
        mut self,
        on_event: Option<impl Fn(&ScrollEvent) + Send + Sync + 'static>,
    ) -> Self {
        self.on_event = on_event.map(|f| Arc::new(f) as _);
        self
    }

    /// Whether touch release or fling should land on a page boundary.
    pub fn snaps_to_pages(&self) -> bool {
        self.paging_enabled || self.snap_interval != 0
    }

    pub(crate) fn perf_tag(&self) -> Option<&str> {
        self.scroll_perf_tag.as_deref().filter(|t| !t.is_empty())
    }
}

impl core::fmt::Debug for ScrollViewOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollViewOptions")
            .field("scroll_enabled", &self.scroll_enabled)
            .field("paging_enabled", &self.paging_enabled)
            .field("snap_interval", &self.snap_interval)
            .field("send_momentum_events", &self.send_momentum_events)
            .field("remove_clipped_subviews", &self.remove_clipped_subviews)
            .field("end_fill_color", &self.end_fill_color)
            .field("scroll_perf_tag", &self.scroll_perf_tag)
            .field("momentum_delay_ms", &self.momentum_delay_ms)
            .field("mirrored_fling_policy", &self.mirrored_fling_policy)
            .finish_non_exhaustive()
    }
}

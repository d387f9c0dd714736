//! A headless vertical scroll engine for touch-driven UIs.
//!
//! For a reference host loop (decay scroller, smooth-scroll tweens), see the `vscroll-adapter`
//! crate.
//!
//! This crate owns what happens between "the finger lifted" and "the list is at rest": fling
//! physics with a fix for bounce-back at a growing content end, paging/snap targets, scroll
//! event coalescing, momentum begin/end detection and clipping-rect bookkeeping for one
//! container with one content child.
//!
//! It is UI-agnostic. A host is expected to provide:
//! - viewport and content geometry on every layout pass
//! - touch samples and the release velocity
//! - native scroll position changes
//! - a display-frame tick
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod bounds;
mod clipping;
mod coalescer;
mod engine;
mod error;
mod fling;
mod host;
mod momentum;
mod options;
mod scheduler;
mod snap;
mod state;
mod types;


pub use bounds::{ScrollBoundsTracker, max_scroll_y};
pub use clipping::{AncestorClip, ClipRect, ClippingRectManager, ClippingView};
pub use coalescer::{ScrollEventCoalescer, ScrollSample};
pub use engine::ScrollEngine;
pub use error::EngineError;
pub use fling::{
    AnimationFrame, FlingContext, FlingController, FlingPlan, FlingRequest, MirroredFlingPolicy,
    Scroller, UNBOUNDED_MAX_Y,
};
pub use host::{FpsListener, VelocityEstimator};
pub use momentum::{MomentumEventStateMachine, MomentumPollState, PollDecision, SettleOrigin};
pub use options::{MOMENTUM_DELAY_MS, OnScrollEventCallback, ScrollViewOptions, TRANSPARENT};
pub use scheduler::{FrameQueue, FrameTask};
pub use snap::{compute_snap_target, resolve_snap_interval};
pub use state::{ContentGeometry, FrameState, ScrollState, ViewportGeometry};
pub use types::{
    HostCommand, HostEnvironment, ScrollEvent, ScrollEventKind, TouchAction, TouchSample,
    Velocity,
};

//! Host-side utilities for the `vscroll` crate.
//!
//! The `vscroll` crate is UI-agnostic and only decides *what* should happen to the scroll
//! position. This crate provides small, framework-neutral pieces a host needs to make it
//! happen:
//!
//! - [`DecayScroller`], a physics primitive the engine can run its patched fling on
//! - [`Tween`]/[`Easing`] for smooth scrolls and spring-back
//! - [`Controller`], a reference host loop that executes engine commands frame by frame
//!
//! This crate is intentionally framework-agnostic (no windowing or widget bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod scroller;
mod tween;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use scroller::{
    DEFAULT_FRICTION_PER_MS, DecayScroller, MIN_FLING_VELOCITY, SMOOTH_SCROLL_MS, SPRING_BACK_MS,
};
pub use tween::{Easing, Tween};

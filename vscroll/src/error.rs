use thiserror::Error;

/// Errors surfaced by [`crate::ScrollEngine`].
///
/// `ScrollerMissing` and `ScrollerIncompatible` are never returned to callers; they describe why
/// the engine fell back to the host's stock fling and are only logged.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// The clipping rectangle was read while `remove_clipped_subviews` is off.
    #[error("clipping rect requested but clipped subview removal is disabled")]
    ClippingDisabled,

    /// No physics primitive was injected.
    #[error("no scroller available; fling bounce-back fix is disabled")]
    ScrollerMissing,

    /// The injected physics primitive cannot run a fling with overridden bounds.
    #[error("scroller cannot override fling bounds; fling bounce-back fix is disabled")]
    ScrollerIncompatible,
}

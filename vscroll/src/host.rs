use crate::{TouchSample, Velocity};

/// Produces drag velocity from the touch stream. Supplied by the host; the engine only feeds it
/// samples and reads the result when a drag ends.
pub trait VelocityEstimator {
    fn add_sample(&mut self, sample: &TouchSample);

    /// Current velocity in px/ms.
    fn velocity(&self) -> Velocity;

    fn clear(&mut self);
}

/// Frame-rate instrumentation toggled around active scrolling and flinging.
///
/// Instrumentation is on only when a listener is installed *and* a non-empty
/// `scroll_perf_tag` is configured.
pub trait FpsListener {
    fn enable(&mut self, tag: &str);

    fn disable(&mut self, tag: &str);
}

use descent_core::Point2;

/// Scalar readouts for the current iterate.
///
/// `converged` is monotone: once set it stays set until the session is
/// reset or restarted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationState {
    /// The current iterate.
    pub iterate: Point2,

    /// Number of accepted steps since the last reset.
    pub iteration_count: usize,

    /// Gradient norm at the iterate, or zero before the first step.
    pub gradient_norm: f64,

    /// Whether the gradient norm has reached the threshold.
    pub converged: bool,
}

impl IterationState {
    /// Returns the state at a fresh start point.
    #[must_use]
    pub fn start(iterate: Point2) -> Self {
        Self {
            iterate,
            iteration_count: 0,
            gradient_norm: 0.0,
            converged: false,
        }
    }
}

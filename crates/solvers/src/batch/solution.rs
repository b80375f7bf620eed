use descent_core::Point2;

/// Indicates how a batch descent terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The gradient norm reached the session's threshold.
    Converged,

    /// Reached the step limit without converging.
    MaxSteps,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a batch descent.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// How the descent terminated.
    pub status: Status,

    /// The iterate when the descent finished.
    pub point: Point2,

    /// Objective value at `point`.
    pub objective: f64,

    /// Gradient norm recorded at `point`.
    pub gradient_norm: f64,

    /// Number of steps taken by this call.
    pub steps: usize,
}

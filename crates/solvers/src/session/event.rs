use descent_core::Point2;

/// Emitted once per accepted step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Step number, starting at 1 after a reset.
    pub iteration: usize,

    /// The unconstrained point proposed by the step strategy.
    pub trial: Point2,

    /// The projected point that became the new iterate.
    pub point: Point2,

    /// Objective value at `point`.
    pub objective: f64,

    /// Norm of the (unprojected) gradient at `point`.
    pub gradient_norm: f64,

    /// Whether this step reached the convergence threshold.
    pub converged: bool,
}

impl Event {
    /// Returns true if the constraint moved the trial point.
    #[must_use]
    pub fn was_projected(&self) -> bool {
        self.trial != self.point
    }
}

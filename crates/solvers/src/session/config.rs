use crate::{ConfigError, ConstraintSet, StepStrategy};

/// Default convergence threshold on the gradient norm.
pub const DEFAULT_THRESHOLD: f64 = 1e-6;

/// The knobs a learner can change at any time.
///
/// Only the active strategy's parameters are used. Switching strategies
/// keeps the other one's parameters out of play until it is selected again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    strategy: StepStrategy,
    constraint: ConstraintSet,
    convergence_threshold: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(
            StepStrategy::default(),
            ConstraintSet::default(),
            DEFAULT_THRESHOLD,
        )
        .unwrap()
    }
}

impl SessionConfig {
    /// Creates a validated config.
    ///
    /// # Errors
    ///
    /// Returns an error if the strategy or constraint parameters are invalid,
    /// or if the threshold is not finite and positive.
    pub fn new(
        strategy: StepStrategy,
        constraint: ConstraintSet,
        convergence_threshold: f64,
    ) -> Result<Self, ConfigError> {
        strategy.validate()?;
        constraint.validate()?;
        validate_threshold(convergence_threshold)?;

        Ok(Self {
            strategy,
            constraint,
            convergence_threshold,
        })
    }

    /// Returns the active step strategy.
    #[must_use]
    pub fn strategy(&self) -> StepStrategy {
        self.strategy
    }

    /// Returns the active constraint set.
    #[must_use]
    pub fn constraint(&self) -> ConstraintSet {
        self.constraint
    }

    /// Returns the gradient-norm convergence threshold.
    #[must_use]
    pub fn convergence_threshold(&self) -> f64 {
        self.convergence_threshold
    }

    /// Replaces the step strategy.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the config unchanged, if the strategy's
    /// parameters are invalid.
    pub fn set_strategy(&mut self, strategy: StepStrategy) -> Result<(), ConfigError> {
        strategy.validate()?;
        self.strategy = strategy;
        Ok(())
    }

    /// Replaces the constraint set.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the config unchanged, if the constraint's
    /// parameters are invalid.
    pub fn set_constraint(&mut self, constraint: ConstraintSet) -> Result<(), ConfigError> {
        constraint.validate()?;
        self.constraint = constraint;
        Ok(())
    }

    /// Replaces the convergence threshold.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the config unchanged, if the threshold is
    /// not finite and positive.
    pub fn set_convergence_threshold(&mut self, threshold: f64) -> Result<(), ConfigError> {
        validate_threshold(threshold)?;
        self.convergence_threshold = threshold;
        Ok(())
    }
}

fn validate_threshold(threshold: f64) -> Result<(), ConfigError> {
    if threshold.is_finite() && threshold > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Threshold(threshold))
    }
}

//! Step strategies that produce the next unconstrained trial point.
//!
//! A strategy never projects. The session applies the active
//! [`ConstraintSet`](crate::ConstraintSet) to the trial point afterward.

use descent_core::{Objective, Point2, StepIntegrable};

use crate::ConfigError;

/// Determinant magnitude below which the Hessian is treated as singular.
pub const SINGULAR_TOL: f64 = 1e-10;

/// Step size used when Newton falls back to a gradient step.
pub const FALLBACK_STEP_SIZE: f64 = 1.0;

/// The update rule applied on each step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepStrategy {
    /// `next = current − α·∇f(current)`.
    ///
    /// Step sizes beyond the stability limit `2/L` are accepted; the
    /// resulting divergence is part of what the learner is meant to see.
    GradientDescent { step_size: f64 },

    /// `next = current − η·H⁻¹·∇f(current)`.
    ///
    /// Falls back to a gradient step of [`FALLBACK_STEP_SIZE`] when the
    /// Hessian is singular.
    DampedNewton { damping: f64 },
}

impl Default for StepStrategy {
    fn default() -> Self {
        Self::GradientDescent { step_size: 1.0 }
    }
}

impl StepStrategy {
    /// Creates a validated gradient descent strategy.
    ///
    /// # Errors
    ///
    /// Returns an error if `step_size` is not finite and positive.
    pub fn gradient_descent(step_size: f64) -> Result<Self, ConfigError> {
        let strategy = Self::GradientDescent { step_size };
        strategy.validate()?;
        Ok(strategy)
    }

    /// Creates a validated damped Newton strategy.
    ///
    /// # Errors
    ///
    /// Returns an error if `damping` is not in `(0, 1]`.
    pub fn damped_newton(damping: f64) -> Result<Self, ConfigError> {
        let strategy = Self::DampedNewton { damping };
        strategy.validate()?;
        Ok(strategy)
    }

    /// Checks the variant's parameters.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive or non-finite step size, or a
    /// damping factor outside `(0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::GradientDescent { step_size } if step_size.is_finite() && step_size > 0.0 => {
                Ok(())
            }
            Self::GradientDescent { step_size } => Err(ConfigError::StepSize(step_size)),
            Self::DampedNewton { damping } if damping > 0.0 && damping <= 1.0 => Ok(()),
            Self::DampedNewton { damping } => Err(ConfigError::Damping(damping)),
        }
    }

    /// Returns the unconstrained trial point after one step from `current`.
    #[must_use]
    pub fn next_point<O: Objective>(&self, current: Point2, objective: &O) -> Point2 {
        let gradient = objective.gradient(current);
        match *self {
            Self::GradientDescent { step_size } => current.step(-gradient, step_size),
            Self::DampedNewton { damping } => {
                match objective.hessian().inverse(SINGULAR_TOL) {
                    Some(inverse) => current.step(-inverse.mul_vec(gradient), damping),
                    None => {
                        log::warn!(
                            "singular Hessian (|det| < {SINGULAR_TOL}); taking a gradient step of {FALLBACK_STEP_SIZE}"
                        );
                        current.step(-gradient, FALLBACK_STEP_SIZE)
                    }
                }
            }
        }
    }

    /// Returns a short human-readable name for the strategy.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::GradientDescent { .. } => "gradient descent",
            Self::DampedNewton { .. } => "damped Newton",
        }
    }
}

/// Returns the gradient descent stability limit `2/L`.
///
/// `L` is the largest Hessian eigenvalue. Step sizes in `(0, 2/L)` contract
/// toward the minimizer; larger ones diverge. Returns `f64::INFINITY` when
/// the largest eigenvalue is not positive.
#[must_use]
pub fn stability_limit<O: Objective>(objective: &O) -> f64 {
    let (_, largest) = objective.hessian().eigenvalues();
    if largest > 0.0 {
        2.0 / largest
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use descent_core::{Matrix2, QuadraticForm, Vector2};

    /// `f(x, y) = x²`, whose Hessian `[[2, 0], [0, 0]]` is singular.
    struct Trough;

    impl Objective for Trough {
        fn evaluate(&self, p: Point2) -> f64 {
            p.x * p.x
        }

        fn gradient(&self, p: Point2) -> Vector2 {
            Vector2::new(2.0 * p.x, 0.0)
        }

        fn hessian(&self) -> Matrix2 {
            Matrix2::symmetric(2.0, 0.0, 0.0)
        }
    }

    #[test]
    fn gradient_step_moves_against_gradient() {
        let f = QuadraticForm::default();
        let p = Point2::new(25.0, 15.0);
        let g = f.gradient(p);

        let next = StepStrategy::gradient_descent(0.5).unwrap().next_point(p, &f);

        assert_relative_eq!(next.x, p.x - 0.5 * g.x, epsilon = 1e-12);
        assert_relative_eq!(next.y, p.y - 0.5 * g.y, epsilon = 1e-12);
        assert!(f.evaluate(next) < f.evaluate(p));
    }

    #[test]
    fn full_newton_step_reaches_minimizer() {
        let f = QuadraticForm::default();
        let next = StepStrategy::damped_newton(1.0)
            .unwrap()
            .next_point(Point2::new(25.0, 15.0), &f);

        assert_relative_eq!(next.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(next.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn damped_newton_step_covers_a_fraction_of_the_way() {
        let f = QuadraticForm::default();
        let p = Point2::new(25.0, 15.0);
        let next = StepStrategy::damped_newton(0.25).unwrap().next_point(p, &f);

        // For a quadratic, the full Newton step lands on the origin.
        assert_relative_eq!(next.x, 0.75 * p.x, epsilon = 1e-9);
        assert_relative_eq!(next.y, 0.75 * p.y, epsilon = 1e-9);
    }

    #[test]
    fn singular_hessian_falls_back_to_gradient_step() {
        let p = Point2::new(3.0, 4.0);
        let next = StepStrategy::damped_newton(1.0).unwrap().next_point(p, &Trough);

        assert!(next.is_finite());
        assert_relative_eq!(next.x, 3.0 - FALLBACK_STEP_SIZE * 6.0);
        assert_relative_eq!(next.y, 4.0);
    }

    #[test]
    fn bundled_stability_limit() {
        let f = QuadraticForm::default();
        let (_, largest) = f.hessian().eigenvalues();
        let limit = stability_limit(&f);

        assert_relative_eq!(limit, 2.0 / largest);
        assert!(limit > 20.0 && limit < 24.0, "limit = {limit}");
    }

    #[test]
    fn strategy_names() {
        assert_eq!(StepStrategy::default().name(), "gradient descent");
        assert_eq!(
            StepStrategy::damped_newton(0.5).unwrap().name(),
            "damped Newton"
        );
    }

    #[test]
    fn large_step_sizes_are_accepted() {
        assert!(StepStrategy::gradient_descent(1_000.0).is_ok());
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert_eq!(
            StepStrategy::gradient_descent(0.0),
            Err(ConfigError::StepSize(0.0))
        );
        assert!(StepStrategy::gradient_descent(f64::NAN).is_err());
        assert_eq!(
            StepStrategy::damped_newton(1.5),
            Err(ConfigError::Damping(1.5))
        );
        assert!(StepStrategy::damped_newton(0.0).is_err());
        assert!(StepStrategy::damped_newton(f64::NAN).is_err());
    }
}

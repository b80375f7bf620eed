//! Quadratic objectives over the 2-D decision space.

use thiserror::Error;

use crate::{Matrix2, Point2, Vector2};

/// A smooth objective with a constant Hessian.
///
/// Implementations must keep [`gradient`](Objective::gradient) in exact
/// algebraic agreement with [`evaluate`](Objective::evaluate), and
/// [`hessian`](Objective::hessian) must be the derivative of the gradient.
pub trait Objective {
    /// Returns the objective value at `p`.
    fn evaluate(&self, p: Point2) -> f64;

    /// Returns the gradient at `p`.
    fn gradient(&self, p: Point2) -> Vector2;

    /// Returns the (constant) Hessian.
    fn hessian(&self) -> Matrix2;
}

impl<T: Objective + ?Sized> Objective for &T {
    fn evaluate(&self, p: Point2) -> f64 {
        (**self).evaluate(p)
    }

    fn gradient(&self, p: Point2) -> Vector2 {
        (**self).gradient(p)
    }

    fn hessian(&self) -> Matrix2 {
        (**self).hessian()
    }
}

/// The quadratic form `f(x, y) = a·x² + b·x·y + c·y²`.
///
/// Equivalently `f(p) = pᵀAp` with `A = [[a, b/2], [b/2, c]]`. The form is
/// always positive definite, so it has a unique global minimizer at the
/// origin and an affine gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticForm {
    a: f64,
    b: f64,
    c: f64,
}

/// Errors that can occur when constructing a [`QuadraticForm`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ObjectiveError {
    #[error("coefficients must be finite")]
    NonFinite,

    #[error("form is not positive definite (a = {a}, discriminant 4ac - b² = {discriminant})")]
    NotPositiveDefinite { a: f64, discriminant: f64 },
}

impl Default for QuadraticForm {
    /// The bundled teaching instance, `0.01·x² + 0.02·x·y + 0.04·y²`.
    fn default() -> Self {
        // Known-good coefficients, unwrap is safe
        Self::new(0.01, 0.02, 0.04).unwrap()
    }
}

impl QuadraticForm {
    /// Creates a positive-definite quadratic form.
    ///
    /// # Errors
    ///
    /// Returns an error if any coefficient is non-finite or if the form is
    /// not positive definite (`a > 0` and `4ac − b² > 0`).
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, ObjectiveError> {
        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return Err(ObjectiveError::NonFinite);
        }
        let discriminant = 4.0 * a * c - b * b;
        if a <= 0.0 || discriminant <= 0.0 {
            return Err(ObjectiveError::NotPositiveDefinite { a, discriminant });
        }
        Ok(Self { a, b, c })
    }

    /// Returns the coefficients `(a, b, c)`.
    #[must_use]
    pub fn coefficients(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    /// Returns the unique minimizer, which is always the origin.
    #[must_use]
    pub fn minimizer(&self) -> Point2 {
        Point2::ORIGIN
    }
}

impl Objective for QuadraticForm {
    fn evaluate(&self, p: Point2) -> f64 {
        self.a * p.x * p.x + self.b * p.x * p.y + self.c * p.y * p.y
    }

    fn gradient(&self, p: Point2) -> Vector2 {
        Vector2::new(
            2.0 * self.a * p.x + self.b * p.y,
            self.b * p.x + 2.0 * self.c * p.y,
        )
    }

    fn hessian(&self) -> Matrix2 {
        Matrix2::symmetric(2.0 * self.a, self.b, 2.0 * self.c)
    }
}

use crate::{Point2, Vector2};

/// A trait for types that can be stepped along a direction.
///
/// Descent strategies move a point by `direction * delta`, where `delta` is
/// a step size or damping factor. `Delta` is usually a plain `f64`.
pub trait StepIntegrable<Delta> {
    /// The direction type the value is stepped along.
    type Direction;

    /// Returns the value after stepping along `direction` scaled by `delta`.
    #[must_use]
    fn step(&self, direction: Self::Direction, delta: Delta) -> Self;
}

/// Type alias for the direction of a `StepIntegrable` type.
pub type DirectionOf<T, Delta> = <T as StepIntegrable<Delta>>::Direction;

impl StepIntegrable<f64> for Point2 {
    type Direction = Vector2;

    fn step(&self, direction: Vector2, delta: f64) -> Self {
        *self + direction * delta
    }
}

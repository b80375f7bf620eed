use std::ops::{Add, Mul, Neg, Sub};

/// A location in the 2-D decision space.
///
/// Points are plain values. Solvers replace them wholesale on every step
/// rather than mutating them in place.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

/// A displacement in the 2-D decision space, such as a gradient or a step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    /// The origin, `(0, 0)`.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the Euclidean distance from the origin.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Returns the Euclidean distance to `other`.
    #[must_use]
    pub fn distance(&self, other: Point2) -> f64 {
        (*self - other).norm()
    }

    /// Returns this point scaled about the origin.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Returns true if both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Vector2 {
    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the Euclidean length.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Returns the dot product with `other`.
    #[must_use]
    pub fn dot(&self, other: Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }
}

impl From<[f64; 2]> for Point2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point2> for [f64; 2] {
    fn from(p: Point2) -> Self {
        [p.x, p.y]
    }
}

impl From<Point2> for Vector2 {
    fn from(p: Point2) -> Self {
        Self::new(p.x, p.y)
    }
}

impl Add<Vector2> for Point2 {
    type Output = Point2;

    fn add(self, rhs: Vector2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Vector2> for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Vector2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Vector2;

    fn sub(self, rhs: Point2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn point_minus_point_is_vector() {
        let v = Point2::new(4.0, 6.0) - Point2::new(1.0, 2.0);
        assert_eq!(v, Vector2::new(3.0, 4.0));
        assert_relative_eq!(v.norm(), 5.0);
    }

    #[test]
    fn point_plus_scaled_vector() {
        let p = Point2::new(1.0, 1.0) + Vector2::new(0.5, -0.25) * 4.0;
        assert_eq!(p, Point2::new(3.0, 0.0));
    }

    #[test]
    fn distance_and_scale() {
        let p = Point2::new(3.0, -4.0);
        assert_relative_eq!(p.norm(), 5.0);
        assert_relative_eq!(p.distance(Point2::ORIGIN), 5.0);
        assert_eq!(p.scale(0.5), Point2::new(1.5, -2.0));
    }

    #[test]
    fn array_conversions() {
        let p = Point2::from([2.0, -1.0]);
        let arr: [f64; 2] = p.into();
        assert_eq!(arr, [2.0, -1.0]);
    }
}

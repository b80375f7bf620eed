use crate::Vector2;

/// A 2×2 matrix stored in row-major order.
///
/// ```text
/// | a  b |
/// | c  d |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2 {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Matrix2 {
    /// Creates a matrix from its entries in row-major order.
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Creates a symmetric matrix with `off` on both off-diagonal entries.
    #[must_use]
    pub const fn symmetric(a: f64, off: f64, d: f64) -> Self {
        Self::new(a, off, off, d)
    }

    /// Returns the determinant, `ad − bc`.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Returns the trace, `a + d`.
    #[must_use]
    pub fn trace(&self) -> f64 {
        self.a + self.d
    }

    /// Returns true if the off-diagonal entries agree within `tol`.
    #[must_use]
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (self.b - self.c).abs() <= tol
    }

    /// Returns the closed-form inverse `[[d, −b], [−c, a]] / det`.
    ///
    /// Returns `None` when `|det| < singular_tol`.
    #[must_use]
    pub fn inverse(&self, singular_tol: f64) -> Option<Self> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < singular_tol {
            return None;
        }
        Some(Self::new(
            self.d / det,
            -self.b / det,
            -self.c / det,
            self.a / det,
        ))
    }

    /// Returns the eigenvalues `(min, max)` of a symmetric matrix.
    ///
    /// Only the upper triangle is read.
    #[must_use]
    pub fn eigenvalues(&self) -> (f64, f64) {
        let mean = 0.5 * self.trace();
        let half_gap = (0.5 * (self.a - self.d)).hypot(self.b);
        (mean - half_gap, mean + half_gap)
    }

    /// Returns the matrix-vector product.
    #[must_use]
    pub fn mul_vec(&self, v: Vector2) -> Vector2 {
        Vector2::new(self.a * v.x + self.b * v.y, self.c * v.x + self.d * v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn inverse_times_matrix_is_identity() {
        let m = Matrix2::new(4.0, 7.0, 2.0, 6.0);
        let inv = m.inverse(1e-10).expect("non-singular");

        let e1 = m.mul_vec(inv.mul_vec(Vector2::new(1.0, 0.0)));
        let e2 = m.mul_vec(inv.mul_vec(Vector2::new(0.0, 1.0)));

        assert_relative_eq!(e1.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(e1.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(e2.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(e2.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let m = Matrix2::new(1.0, 2.0, 2.0, 4.0);
        assert!(m.inverse(1e-10).is_none());
    }

    #[test]
    fn symmetric_eigenvalues() {
        // Eigenvalues of [[2, 1], [1, 2]] are 1 and 3.
        let (lo, hi) = Matrix2::symmetric(2.0, 1.0, 2.0).eigenvalues();
        assert_relative_eq!(lo, 1.0, epsilon = 1e-12);
        assert_relative_eq!(hi, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn diagonal_eigenvalues_are_sorted() {
        let (lo, hi) = Matrix2::symmetric(5.0, 0.0, -1.0).eigenvalues();
        assert_relative_eq!(lo, -1.0);
        assert_relative_eq!(hi, 5.0);
    }
}

//! Rejection sampling of feasible starting points.

use std::f64::consts::TAU;

use descent_core::Point2;
use rand::Rng;

use crate::{ConfigError, ConstraintSet};

/// Maximum number of candidates drawn before falling back.
pub const MAX_ATTEMPTS: usize = 100;

/// Half-width of the default visualization domain, `[-50, 50]²`.
pub const DOMAIN_HALF_WIDTH: f64 = 50.0;

/// Fraction of the domain that samples are drawn from, keeping them off the edge.
pub const SAMPLING_FRACTION: f64 = 0.95;

/// An axis-aligned rectangle in the decision space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: Point2,
    max: Point2,
}

impl Bounds {
    /// Creates bounds from opposite corners.
    ///
    /// # Errors
    ///
    /// Returns an error if any coordinate is non-finite or if `min` is not
    /// strictly below `max` on both axes.
    pub fn new(min: Point2, max: Point2) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() || min.x >= max.x || min.y >= max.y {
            return Err(ConfigError::Bounds);
        }
        Ok(Self { min, max })
    }

    /// The visualization domain, `[-50, 50]²`.
    #[must_use]
    pub fn domain() -> Self {
        let h = DOMAIN_HALF_WIDTH;
        Self {
            min: Point2::new(-h, -h),
            max: Point2::new(h, h),
        }
    }

    /// The domain shrunk to [`SAMPLING_FRACTION`], where random starts are drawn.
    #[must_use]
    pub fn sampling() -> Self {
        Self::domain().scaled(SAMPLING_FRACTION)
    }

    /// Returns these bounds scaled about their center.
    ///
    /// Non-positive or non-finite factors leave the bounds unchanged.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return *self;
        }
        let cx = 0.5 * (self.min.x + self.max.x);
        let cy = 0.5 * (self.min.y + self.max.y);
        let hx = 0.5 * (self.max.x - self.min.x) * factor;
        let hy = 0.5 * (self.max.y - self.min.y) * factor;
        Self {
            min: Point2::new(cx - hx, cy - hy),
            max: Point2::new(cx + hx, cy + hy),
        }
    }

    /// Returns the lower-left corner.
    #[must_use]
    pub fn min(&self) -> Point2 {
        self.min
    }

    /// Returns the upper-right corner.
    #[must_use]
    pub fn max(&self) -> Point2 {
        self.max
    }

    /// Returns true if `p` lies inside the closed rectangle.
    #[must_use]
    pub fn contains(&self, p: Point2) -> bool {
        (self.min.x..=self.max.x).contains(&p.x) && (self.min.y..=self.max.y).contains(&p.y)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::sampling()
    }
}

/// Draws a feasible point for `constraint` from within `bounds`.
///
/// Candidates are drawn uniformly and tested for membership, up to
/// [`MAX_ATTEMPTS`] times:
///
/// - Unconstrained: the first candidate is accepted.
/// - Disk: a candidate is accepted if it lies inside the disk.
/// - Parabola: `t` is drawn within the y-bound and the candidate is
///   `(k·t², t)`, accepted if `k·t²` is within the x-bound.
///
/// If every attempt is rejected, a disk falls back to a uniform interior
/// point `r·√U` at angle `2π·V`, and a parabola falls back to the origin.
/// The result is always feasible.
pub fn sample<R>(constraint: &ConstraintSet, bounds: &Bounds, rng: &mut R) -> Point2
where
    R: Rng + ?Sized,
{
    let (min, max) = (bounds.min, bounds.max);

    for _ in 0..MAX_ATTEMPTS {
        match *constraint {
            ConstraintSet::Unconstrained => {
                return Point2::new(rng.gen_range(min.x..=max.x), rng.gen_range(min.y..=max.y));
            }
            ConstraintSet::Disk { radius } => {
                let candidate =
                    Point2::new(rng.gen_range(min.x..=max.x), rng.gen_range(min.y..=max.y));
                if candidate.norm() <= radius {
                    return candidate;
                }
            }
            ConstraintSet::Parabola { curvature } => {
                let t = rng.gen_range(min.y..=max.y);
                let x = curvature * t * t;
                if (min.x..=max.x).contains(&x) {
                    return Point2::new(x, t);
                }
            }
        }
    }

    log::warn!("no feasible sample after {MAX_ATTEMPTS} attempts for {constraint:?}; using fallback");
    fallback(constraint, rng)
}

fn fallback<R>(constraint: &ConstraintSet, rng: &mut R) -> Point2
where
    R: Rng + ?Sized,
{
    match *constraint {
        ConstraintSet::Disk { radius } => {
            let r = radius * rng.gen_range(0.0..=1.0_f64).sqrt();
            let theta = TAU * rng.gen_range(0.0..1.0_f64);
            Point2::new(r * theta.cos(), r * theta.sin())
        }
        ConstraintSet::Unconstrained | ConstraintSet::Parabola { .. } => Point2::ORIGIN,
    }
}

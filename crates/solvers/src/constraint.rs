//! Feasible sets and their projection operators.
//!
//! A [`ConstraintSet`] maps any point to the nearest feasible point.
//! Projection never fails: degenerate cases fall back to the best bounded
//! approximation available, and the result is never NaN for finite input.
//!
//! # Parabola projection
//!
//! The nearest point on `x = k·y²` to `p` is `(k·t², t)` where `t` minimizes
//! `‖p − (k·t², t)‖²`. Setting the derivative to zero gives the cubic
//!
//! ```text
//! g(t) = 4k²·t³ + (2 − 4k·pₓ)·t − 2·p_y = 0
//! ```
//!
//! which is solved with Newton–Raphson seeded at `t₀ = p_y`, for at most
//! [`PROJECTION_MAX_ITERS`] iterations. The iteration stops early if
//! `|g'(t)|` falls below [`DERIVATIVE_TOL`]. The best `t` seen (by distance)
//! is returned, so the fixed budget is a heuristic tuned to the visualization
//! range rather than a guaranteed root finder.

use descent_core::Point2;

use crate::ConfigError;

/// Newton–Raphson budget for the parabola projection.
pub const PROJECTION_MAX_ITERS: usize = 10;

/// Derivative magnitude below which the parabola projection stops iterating.
pub const DERIVATIVE_TOL: f64 = 1e-10;

/// The geometric constraint applied after every step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ConstraintSet {
    /// Every point is feasible.
    #[default]
    Unconstrained,

    /// The closed disk `‖p‖ ≤ radius`, centered at the origin.
    Disk { radius: f64 },

    /// The 1-D manifold `x = curvature · y²`.
    Parabola { curvature: f64 },
}

impl ConstraintSet {
    /// Creates a validated disk constraint.
    ///
    /// # Errors
    ///
    /// Returns an error if `radius` is not finite and positive.
    pub fn disk(radius: f64) -> Result<Self, ConfigError> {
        let set = Self::Disk { radius };
        set.validate()?;
        Ok(set)
    }

    /// Creates a validated parabola constraint.
    ///
    /// # Errors
    ///
    /// Returns an error if `curvature` is not finite.
    pub fn parabola(curvature: f64) -> Result<Self, ConfigError> {
        let set = Self::Parabola { curvature };
        set.validate()?;
        Ok(set)
    }

    /// Checks the variant's parameters.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive or non-finite radius, or a
    /// non-finite curvature.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Unconstrained => Ok(()),
            Self::Disk { radius } if radius.is_finite() && radius > 0.0 => Ok(()),
            Self::Disk { radius } => Err(ConfigError::Radius(radius)),
            Self::Parabola { curvature } if curvature.is_finite() => Ok(()),
            Self::Parabola { curvature } => Err(ConfigError::Curvature(curvature)),
        }
    }

    /// Returns the nearest feasible point to `p`.
    ///
    /// Idempotent on feasible points. For the disk and parabola, a
    /// non-finite `p` maps to the origin, which is feasible for both.
    #[must_use]
    pub fn project(&self, p: Point2) -> Point2 {
        match *self {
            Self::Unconstrained => p,
            Self::Disk { .. } | Self::Parabola { .. } if !p.is_finite() => {
                log::warn!("projecting non-finite point {p:?}; falling back to the origin");
                Point2::ORIGIN
            }
            Self::Disk { radius } => project_onto_disk(p, radius),
            Self::Parabola { curvature } => project_onto_parabola(p, curvature),
        }
    }

    /// Returns true if `p` is feasible within `tol`.
    #[must_use]
    pub fn contains(&self, p: Point2, tol: f64) -> bool {
        match *self {
            Self::Unconstrained => true,
            Self::Disk { radius } => p.norm() <= radius + tol,
            Self::Parabola { curvature } => (p.x - curvature * p.y * p.y).abs() <= tol,
        }
    }
}

fn project_onto_disk(p: Point2, radius: f64) -> Point2 {
    let norm = p.norm();
    if norm <= radius || norm == 0.0 {
        return p;
    }
    p.scale(radius / norm)
}

fn project_onto_parabola(p: Point2, k: f64) -> Point2 {
    let on_curve = |t: f64| Point2::new(k * t * t, t);
    let dist_sq = |t: f64| {
        let d = p - on_curve(t);
        d.dot(d)
    };

    // g(t) = c3·t³ + c1·t + c0, g'(t) = 3·c3·t² + c1
    let c3 = 4.0 * k * k;
    let c1 = 2.0 - 4.0 * k * p.x;
    let c0 = -2.0 * p.y;

    let mut t = p.y;
    let mut best_t = t;
    let mut best_dist = dist_sq(t);

    for _ in 0..PROJECTION_MAX_ITERS {
        let slope = 3.0 * c3 * t * t + c1;
        if slope.abs() < DERIVATIVE_TOL {
            break;
        }

        let next = t - (c3 * t * t * t + c1 * t + c0) / slope;
        if !next.is_finite() {
            break;
        }
        t = next;

        let dist = dist_sq(t);
        if dist < best_dist {
            best_t = t;
            best_dist = dist;
        }
    }

    on_curve(best_t)
}

use std::time::Duration;

use thiserror::Error;

/// Errors raised when a configuration value is rejected.
///
/// Every setter validates before mutating, so a rejected value leaves the
/// receiver unchanged.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("step size must be finite and positive (got {0})")]
    StepSize(f64),

    #[error("damping factor must be in (0, 1] (got {0})")]
    Damping(f64),

    #[error("disk radius must be finite and positive (got {0})")]
    Radius(f64),

    #[error("parabola curvature must be finite (got {0})")]
    Curvature(f64),

    #[error("convergence threshold must be finite and positive (got {0})")]
    Threshold(f64),

    #[error("initial point must be finite (got ({x}, {y}))")]
    InitialPoint { x: f64, y: f64 },

    #[error("bounds must be finite with min < max")]
    Bounds,

    #[error("run interval must be positive (got {0:?})")]
    Interval(Duration),
}

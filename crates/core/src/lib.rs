//! Core types and traits for descent visualization.
//!
//! This crate defines the shared abstractions that step strategies,
//! constraint sets, and sessions build on:
//!
//! - [`Point2`], [`Vector2`], [`Matrix2`] — 2-D values for iterates,
//!   gradients, and Hessians
//! - [`Objective`] — a smooth objective with a constant Hessian, and
//!   [`QuadraticForm`], the positive-definite quadratic used for teaching
//! - [`StepIntegrable`] — values that can be stepped along a direction
//! - [`Observer`] — receives solver events and optionally returns control actions

mod matrix;
mod observer;
mod point;
mod step;

pub mod objective;

pub use matrix::Matrix2;
pub use objective::{Objective, ObjectiveError, QuadraticForm};
pub use observer::Observer;
pub use point::{Point2, Vector2};
pub use step::{DirectionOf, StepIntegrable};

//! Descent solvers for interactive visualization.
//!
//! The pieces compose leaves-first:
//!
//! - [`constraint`] — feasible sets and their projections
//! - [`sampler`] — feasible random starting points
//! - [`strategy`] — gradient descent and damped Newton update rules
//! - [`session`] — the stateful, schedulable descent a learner drives
//! - [`batch`] — stepping a session to completion without a scheduler

mod error;

pub mod batch;
pub mod constraint;
pub mod sampler;
pub mod session;
pub mod strategy;

pub use constraint::ConstraintSet;
pub use error::ConfigError;
pub use sampler::Bounds;
pub use session::{Mode, OptimizationSession, SessionConfig};
pub use strategy::StepStrategy;

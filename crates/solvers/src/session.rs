//! An interactive descent session with an explicit state machine.
//!
//! # Lifecycle
//!
//! A session starts in [`Mode::Idle`] with a one-point trajectory. Each step
//! runs the same pipeline:
//!
//! 1. The active [`StepStrategy`] proposes an unconstrained trial point.
//! 2. The active [`ConstraintSet`] projects it.
//! 3. The projected point is appended to the trajectory and becomes the iterate.
//! 4. The gradient norm at the projected point is compared with the threshold.
//!
//! Once the threshold is met the session enters [`Mode::Converged`] and stays
//! there until [`reset`](OptimizationSession::reset) or
//! [`random_start`](OptimizationSession::random_start).
//!
//! The convergence test uses the unconstrained gradient even under a
//! constraint. It is a simplified check, not a constrained-optimality
//! condition, so a constrained run may never report convergence.
//!
//! # Running
//!
//! [`run`](OptimizationSession::run) schedules one tick through the session's
//! [`Scheduler`]. The host calls [`tick`](OptimizationSession::tick) when it
//! fires; the session steps once and schedules the next tick. At most one
//! timer is outstanding, and a tick for a cancelled timer is ignored.
//!
//! # Illegal transitions
//!
//! Calls that do not apply to the current mode (stepping while running or
//! converged, pausing while not running) are no-ops, not errors.

mod config;
mod event;
mod mode;
mod state;

pub mod scheduler;


pub use config::{DEFAULT_THRESHOLD, SessionConfig};
pub use event::Event;
pub use mode::Mode;
pub use scheduler::{ManualScheduler, NoopScheduler, Scheduler, TimerId};
pub use state::IterationState;

use std::time::Duration;

use descent_core::{Objective, Point2, QuadraticForm};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

use crate::{
    ConfigError, ConstraintSet, StepStrategy,
    sampler::{self, Bounds},
};

/// Owns all solver state for one learner-facing descent run.
///
/// Every mutation happens through `&mut self`, and each step completes
/// before returning, so readers never see a partially-updated state.
#[derive(Debug)]
pub struct OptimizationSession<O = QuadraticForm, S = ManualScheduler> {
    objective: O,
    config: SessionConfig,
    scheduler: S,
    rng: Xoshiro256Plus,
    bounds: Bounds,
    mode: Mode,
    start: Point2,
    trajectory: Vec<Point2>,
    state: IterationState,
    timer: Option<TimerId>,
    interval: Duration,
}

impl<O: Objective, S: Scheduler> OptimizationSession<O, S> {
    /// Creates an idle session at `initial`.
    ///
    /// The initial point is not projected, so a run may start outside the
    /// feasible set; the first step brings it back.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid or the initial
    /// point is not finite.
    pub fn new(
        objective: O,
        constraint: ConstraintSet,
        strategy: StepStrategy,
        convergence_threshold: f64,
        initial: Point2,
        scheduler: S,
    ) -> Result<Self, ConfigError> {
        let config = SessionConfig::new(strategy, constraint, convergence_threshold)?;
        Self::with_config(objective, config, initial, scheduler)
    }

    /// Creates an idle session from an existing config.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial point is not finite.
    pub fn with_config(
        objective: O,
        config: SessionConfig,
        initial: Point2,
        scheduler: S,
    ) -> Result<Self, ConfigError> {
        if !initial.is_finite() {
            return Err(ConfigError::InitialPoint {
                x: initial.x,
                y: initial.y,
            });
        }

        Ok(Self {
            objective,
            config,
            scheduler,
            rng: Xoshiro256Plus::from_entropy(),
            bounds: Bounds::sampling(),
            mode: Mode::Idle,
            start: initial,
            trajectory: vec![initial],
            state: IterationState::start(initial),
            timer: None,
            interval: Duration::ZERO,
        })
    }

    /// Reseeds the random-start generator for reproducible sessions.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(Xoshiro256Plus::seed_from_u64(seed))
    }

    /// Replaces the random-start generator.
    #[must_use]
    pub fn with_rng(mut self, rng: Xoshiro256Plus) -> Self {
        self.rng = rng;
        self
    }

    /// Sets the rectangle that random starts are drawn from.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    // ------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------

    /// Takes one step from the current iterate.
    ///
    /// Allowed in [`Mode::Idle`] and [`Mode::Paused`]; returns `None` without
    /// changing anything while running or converged.
    pub fn step(&mut self) -> Option<Event> {
        if !self.mode.accepts_manual_step() {
            debug!("step ignored while {}", self.mode);
            return None;
        }
        Some(self.advance())
    }

    /// Starts stepping every `interval` until converged or paused.
    ///
    /// Allowed in [`Mode::Idle`] and [`Mode::Paused`]; ignored otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the session unchanged, if `interval` is zero.
    pub fn run(&mut self, interval: Duration) -> Result<(), ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::Interval(interval));
        }
        if !self.mode.accepts_manual_step() {
            debug!("run ignored while {}", self.mode);
            return Ok(());
        }
        info!("running every {interval:?} from {:?}", self.state.iterate);
        self.interval = interval;
        self.mode = Mode::Running;
        self.timer = Some(self.scheduler.schedule(interval));
        Ok(())
    }

    /// Handles a fired timer.
    ///
    /// Steps once and schedules the next tick if `timer` is the pending one
    /// and the session is running. Any other tick is stale and ignored.
    pub fn tick(&mut self, timer: TimerId) -> Option<Event> {
        if self.mode != Mode::Running || self.timer != Some(timer) {
            debug!("stale tick {timer:?} ignored while {}", self.mode);
            return None;
        }
        self.timer = None;

        let event = self.advance();
        if self.mode == Mode::Running {
            self.timer = Some(self.scheduler.schedule(self.interval));
        }
        Some(event)
    }

    /// Pauses a running session, keeping the iterate and trajectory.
    ///
    /// Ignored unless the session is running.
    pub fn pause(&mut self) {
        if self.mode != Mode::Running {
            debug!("pause ignored while {}", self.mode);
            return;
        }
        self.cancel_timer();
        self.mode = Mode::Paused;
        info!("paused after {} steps", self.state.iteration_count);
    }

    /// Returns to the last start point and clears the run.
    ///
    /// The start point is the one given at construction or drawn by the most
    /// recent [`random_start`](Self::random_start), not the origin.
    pub fn reset(&mut self) {
        self.cancel_timer();
        self.restart_at(self.start);
        info!("reset to {:?}", self.start);
    }

    /// Draws a new feasible start point and clears the run around it.
    pub fn random_start(&mut self) {
        self.cancel_timer();
        let start = sampler::sample(&self.config.constraint(), &self.bounds, &mut self.rng);
        self.start = start;
        self.restart_at(start);
        info!("random start at {start:?}");
    }

    /// Selects the step strategy used by the next step.
    ///
    /// The iterate and trajectory are kept.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the session unchanged, if the strategy's
    /// parameters are invalid.
    pub fn set_step_strategy(&mut self, strategy: StepStrategy) -> Result<(), ConfigError> {
        self.config.set_strategy(strategy)?;
        debug!("step strategy set to {}: {strategy:?}", strategy.name());
        Ok(())
    }

    /// Selects the constraint applied from the next step on.
    ///
    /// The current iterate is not re-projected.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the session unchanged, if the constraint's
    /// parameters are invalid.
    pub fn set_constraint_set(&mut self, constraint: ConstraintSet) -> Result<(), ConfigError> {
        self.config.set_constraint(constraint)?;
        debug!("constraint set to {constraint:?}");
        Ok(())
    }

    /// Sets the gradient-norm threshold checked by the next step.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the session unchanged, if the threshold is
    /// not finite and positive.
    pub fn set_convergence_threshold(&mut self, threshold: f64) -> Result<(), ConfigError> {
        self.config.set_convergence_threshold(threshold)?;
        debug!("convergence threshold set to {threshold:e}");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Readers
    // ------------------------------------------------------------------

    /// Returns the current iterate.
    #[must_use]
    pub fn iterate(&self) -> Point2 {
        self.state.iterate
    }

    /// Returns every accepted iterate, starting with the start point.
    #[must_use]
    pub fn trajectory(&self) -> &[Point2] {
        &self.trajectory
    }

    /// Returns the number of steps since the last reset.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        self.state.iteration_count
    }

    /// Returns the objective value at the current iterate.
    #[must_use]
    pub fn function_value(&self) -> f64 {
        self.objective.evaluate(self.state.iterate)
    }

    /// Returns the gradient norm recorded by the last step.
    #[must_use]
    pub fn gradient_norm(&self) -> f64 {
        self.state.gradient_norm
    }

    /// Returns true once the threshold has been met.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.state.converged
    }

    /// Returns the current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns a copy of the scalar readouts.
    #[must_use]
    pub fn state(&self) -> IterationState {
        self.state
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the point that [`reset`](Self::reset) returns to.
    #[must_use]
    pub fn start_point(&self) -> Point2 {
        self.start
    }

    /// Returns the objective being minimized.
    #[must_use]
    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Returns the pending timer, if running.
    #[must_use]
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Returns the scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// The only writer of iterate, trajectory, and readouts.
    fn advance(&mut self) -> Event {
        let current = self.state.iterate;
        let trial = self.config.strategy().next_point(current, &self.objective);
        let point = self.config.constraint().project(trial);

        self.trajectory.push(point);

        let gradient_norm = self.objective.gradient(point).norm();
        let converged = gradient_norm <= self.config.convergence_threshold();
        let iteration = self.state.iteration_count + 1;

        self.state = IterationState {
            iterate: point,
            iteration_count: iteration,
            gradient_norm,
            converged,
        };

        debug!("step {iteration}: {current:?} → {point:?}, |∇f| = {gradient_norm:e}");

        if converged {
            self.cancel_timer();
            self.mode = Mode::Converged;
            info!("converged after {iteration} steps at {point:?}");
        }

        Event {
            iteration,
            trial,
            point,
            objective: self.objective.evaluate(point),
            gradient_norm,
            converged,
        }
    }

    fn restart_at(&mut self, start: Point2) {
        self.mode = Mode::Idle;
        self.trajectory.clear();
        self.trajectory.push(start);
        self.state = IterationState::start(start);
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            self.scheduler.cancel(timer);
        }
    }
}

/// Upper bound on ticks delivered by one [`OptimizationSession::advance_clock`].
pub const MAX_TICKS_PER_ADVANCE: usize = 10_000;

impl<O: Objective> OptimizationSession<O, ManualScheduler> {
    /// Advances the virtual clock by `elapsed`, delivering every due tick.
    ///
    /// Ticks scheduled while advancing fire too if they fall inside the
    /// window. Returns the events produced, in order.
    ///
    /// The deadline saturates at `Duration::MAX`. At most
    /// [`MAX_TICKS_PER_ADVANCE`] ticks fire per call; if the limit is hit the
    /// clock stops at the last fired tick, and the rest are delivered by the
    /// next call.
    pub fn advance_clock(&mut self, elapsed: Duration) -> Vec<Event> {
        let deadline = self.scheduler.now().saturating_add(elapsed);
        let mut events = Vec::new();
        for _ in 0..MAX_TICKS_PER_ADVANCE {
            let Some(timer) = self.scheduler.pop_due(deadline) else {
                self.scheduler.advance_to(deadline);
                return events;
            };
            events.extend(self.tick(timer));
        }
        warn!(
            "advance_clock stopped after {MAX_TICKS_PER_ADVANCE} ticks at {:?}",
            self.scheduler.now()
        );
        events
    }
}

impl OptimizationSession {
    /// Creates an idle session for the bundled objective with a manual scheduler.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid or the initial
    /// point is not finite.
    pub fn bundled(config: SessionConfig, initial: Point2) -> Result<Self, ConfigError> {
        Self::with_config(
            QuadraticForm::default(),
            config,
            initial,
            ManualScheduler::new(),
        )
    }
}

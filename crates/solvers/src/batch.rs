//! Headless descent: step a session to completion without a scheduler.
//!
//! Useful for replaying a configuration, precomputing a trajectory, or
//! checking how many steps a strategy needs.
//!
//! # Observer Events
//!
//! The observer receives the session's [`Event`] after each step and may
//! return [`Action::StopEarly`] to halt. The step that triggered the stop is
//! kept in the trajectory.

mod action;
mod solution;

pub use action::Action;
pub use solution::{Solution, Status};

use descent_core::{Objective, Observer};

use crate::session::{Event, Mode, OptimizationSession, Scheduler};

/// Steps `session` until it converges, `max_steps` is reached, or the
/// observer stops it.
///
/// A running session is paused first. A session that has already converged
/// returns immediately with zero steps.
pub fn descend<O, S, Obs>(
    session: &mut OptimizationSession<O, S>,
    max_steps: usize,
    mut observer: Obs,
) -> Solution
where
    O: Objective,
    S: Scheduler,
    Obs: Observer<Event, Action>,
{
    session.pause();

    let mut steps = 0;
    let status = loop {
        if session.mode() == Mode::Converged {
            break Status::Converged;
        }
        if steps == max_steps {
            break Status::MaxSteps;
        }

        let Some(event) = session.step() else {
            break Status::MaxSteps;
        };
        steps += 1;

        if let Some(Action::StopEarly) = observer.observe(&event) {
            break Status::StoppedByObserver;
        }
    };

    Solution {
        status,
        point: session.iterate(),
        objective: session.function_value(),
        gradient_norm: session.gradient_norm(),
        steps,
    }
}

/// Steps `session` without observer support.
///
/// This is a convenience wrapper around [`descend`] that uses a no-op observer.
pub fn descend_unobserved<O, S>(session: &mut OptimizationSession<O, S>, max_steps: usize) -> Solution
where
    O: Objective,
    S: Scheduler,
{
    descend(session, max_steps, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use approx::assert_relative_eq;
    use descent_core::{Point2, QuadraticForm};

    use crate::{ConstraintSet, StepStrategy, session::ManualScheduler};

    fn session(strategy: StepStrategy) -> OptimizationSession {
        OptimizationSession::new(
            QuadraticForm::default(),
            ConstraintSet::Unconstrained,
            strategy,
            1e-6,
            Point2::new(25.0, 15.0),
            ManualScheduler::new(),
        )
        .expect("valid session")
    }

    #[test]
    fn descends_to_convergence() {
        let mut s = session(StepStrategy::gradient_descent(20.0).unwrap());

        let solution = descend_unobserved(&mut s, 1_000);

        assert_eq!(solution.status, Status::Converged);
        assert!(solution.gradient_norm <= 1e-6);
        assert_eq!(solution.steps, s.iteration_count());
        assert_relative_eq!(solution.point.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(solution.point.y, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn stops_at_step_limit() {
        let mut s = session(StepStrategy::gradient_descent(0.5).unwrap());

        let solution = descend_unobserved(&mut s, 10);

        assert_eq!(solution.status, Status::MaxSteps);
        assert_eq!(solution.steps, 10);
        assert_eq!(s.trajectory().len(), 11);
    }

    #[test]
    fn observer_can_stop_early() {
        let mut s = session(StepStrategy::gradient_descent(0.5).unwrap());

        let mut seen = Vec::new();
        let observer = |event: &Event| {
            seen.push(event.iteration);
            (event.iteration == 3).then_some(Action::StopEarly)
        };

        let solution = descend(&mut s, 100, observer);

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 3);
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(s.iteration_count(), 3);
    }

    #[test]
    fn pauses_a_running_session() {
        let mut s = session(StepStrategy::damped_newton(1.0).unwrap());
        s.run(Duration::from_millis(50)).unwrap();

        let solution = descend_unobserved(&mut s, 5);

        assert_eq!(solution.status, Status::Converged);
        assert_eq!(solution.steps, 1);
        assert!(s.pending_timer().is_none());
    }

    #[test]
    fn converged_session_takes_no_steps() {
        let mut s = session(StepStrategy::damped_newton(1.0).unwrap());
        s.step();

        let solution = descend_unobserved(&mut s, 5);

        assert_eq!(solution.status, Status::Converged);
        assert_eq!(solution.steps, 0);
    }
}

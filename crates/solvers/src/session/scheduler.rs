//! Timers that drive a running session.
//!
//! The session never sleeps or spawns. It asks a [`Scheduler`] for a single
//! timer, and the host calls [`OptimizationSession::tick`] with that timer's
//! id when it fires. Cancelled or superseded timers are recognized by id, so a
//! late tick is a no-op.
//!
//! [`OptimizationSession::tick`]: super::OptimizationSession::tick

use std::time::Duration;

/// Identifies one scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Creates a timer id from a raw value.
    ///
    /// Schedulers are responsible for keeping ids unique.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Schedules one-shot ticks on behalf of a session.
pub trait Scheduler {
    /// Schedules a tick after `delay` and returns its id.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancels a pending tick. Unknown or already-fired ids are ignored.
    fn cancel(&mut self, timer: TimerId);
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        (**self).schedule(delay)
    }

    fn cancel(&mut self, timer: TimerId) {
        (**self).cancel(timer);
    }
}

/// A deterministic scheduler backed by a virtual clock.
///
/// Time only moves when the host calls [`advance`](Self::advance) or
/// [`advance_to`](Self::advance_to), or pops due timers with
/// [`pop_due`](Self::pop_due). Useful for headless hosts and replays.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<(Duration, TimerId)>,
}

impl ManualScheduler {
    /// Creates a scheduler with the clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if `timer` is still pending.
    #[must_use]
    pub fn is_pending(&self, timer: TimerId) -> bool {
        self.pending.iter().any(|&(_, id)| id == timer)
    }

    /// Removes and returns the earliest timer due at or before `deadline`.
    ///
    /// The clock moves to that timer's due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<TimerId> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (due, _))| *due <= deadline)
            .min_by_key(|(_, (due, id))| (*due, *id))
            .map(|(index, _)| index)?;

        let (due, id) = self.pending.remove(index);
        self.now = self.now.max(due);
        Some(id)
    }

    /// Moves the clock forward by `dt` and returns every timer that came due,
    /// in firing order.
    ///
    /// The clock saturates at `Duration::MAX`.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerId> {
        let deadline = self.now.saturating_add(dt);
        let mut fired = Vec::new();
        while let Some(timer) = self.pop_due(deadline) {
            fired.push(timer);
        }
        self.advance_to(deadline);
        fired
    }

    /// Moves the clock forward to `deadline` without firing anything.
    ///
    /// The clock never moves backward.
    pub fn advance_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push((self.now.saturating_add(delay), id));
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        self.pending.retain(|&(_, id)| id != timer);
    }
}

/// A scheduler that only hands out ids.
///
/// For hosts that own their own timers: read the id from
/// [`pending_timer`](super::OptimizationSession::pending_timer) and pass it to
/// [`tick`](super::OptimizationSession::tick) when the host's timer fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopScheduler {
    next_id: u64,
}

impl NoopScheduler {
    /// Creates a scheduler whose first id is zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for NoopScheduler {
    fn schedule(&mut self, _delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn cancel(&mut self, _timer: TimerId) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn timers_fire_in_due_order() {
        let mut scheduler = ManualScheduler::new();
        let late = scheduler.schedule(30 * MS);
        let early = scheduler.schedule(10 * MS);

        assert_eq!(scheduler.pop_due(5 * MS), None);
        assert_eq!(scheduler.pop_due(100 * MS), Some(early));
        assert_eq!(scheduler.now(), 10 * MS);
        assert_eq!(scheduler.pop_due(100 * MS), Some(late));
        assert_eq!(scheduler.now(), 30 * MS);
        assert_eq!(scheduler.pop_due(100 * MS), None);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut scheduler = ManualScheduler::new();
        let timer = scheduler.schedule(10 * MS);
        assert!(scheduler.is_pending(timer));

        scheduler.cancel(timer);

        assert!(!scheduler.is_pending(timer));
        assert_eq!(scheduler.pop_due(100 * MS), None);
    }

    #[test]
    fn delays_are_relative_to_the_clock() {
        let mut scheduler = ManualScheduler::new();
        scheduler.advance_to(50 * MS);
        let timer = scheduler.schedule(10 * MS);

        assert_eq!(scheduler.pop_due(59 * MS), None);
        assert_eq!(scheduler.pop_due(60 * MS), Some(timer));
    }

    #[test]
    fn advance_returns_due_timers_in_order() {
        let mut scheduler = ManualScheduler::new();
        let late = scheduler.schedule(30 * MS);
        let early = scheduler.schedule(10 * MS);
        let later = scheduler.schedule(90 * MS);

        assert_eq!(scheduler.advance(50 * MS), vec![early, late]);
        assert_eq!(scheduler.now(), 50 * MS);
        assert!(scheduler.is_pending(later));
        assert!(scheduler.advance(MS).is_empty());
        assert_eq!(scheduler.now(), 51 * MS);
    }

    #[test]
    fn clock_saturates_instead_of_overflowing() {
        let mut scheduler = ManualScheduler::new();
        let first = scheduler.schedule(10 * MS);

        assert_eq!(scheduler.advance(Duration::MAX), vec![first]);
        assert_eq!(scheduler.now(), Duration::MAX);

        let second = scheduler.schedule(Duration::MAX);
        assert_eq!(scheduler.advance(Duration::MAX), vec![second]);
        assert_eq!(scheduler.now(), Duration::MAX);
    }

    #[test]
    fn noop_scheduler_hands_out_fresh_ids() {
        let mut scheduler = NoopScheduler::new();
        let a = scheduler.schedule(MS);
        scheduler.cancel(a);
        let b = scheduler.schedule(MS);
        assert_ne!(a, b);
    }

    #[test]
    fn ids_are_unique() {
        let mut scheduler = ManualScheduler::new();
        let a = scheduler.schedule(MS);
        scheduler.cancel(a);
        let b = scheduler.schedule(MS);
        assert_ne!(a, b);
    }
}

/// Receives solver events and optionally returns a control action.
///
/// Solvers call [`observe`](Observer::observe) once per event. Returning
/// `None` lets the solver continue on its own; returning `Some(action)`
/// steers it (for example, stopping early).
///
/// `()` is the no-op observer, and any `FnMut(&E) -> Option<A>` closure is an
/// observer.
pub trait Observer<E, A> {
    /// Observes an event and optionally returns an action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

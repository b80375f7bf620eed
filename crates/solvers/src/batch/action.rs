/// Actions an observer can take during a batch descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the descent and return the current iterate.
    StopEarly,
}

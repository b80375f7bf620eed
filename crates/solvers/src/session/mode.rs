use std::fmt;

/// The session's position in its state machine.
///
/// ```text
///            run             pause
///   Idle ──────────▶ Running ──────▶ Paused
///    ▲                  │    ◀──────   │
///    │                  │      run     │
///    │     converged    ▼              │
///    └──────────── Converged ◀─────────┘
///     reset / random_start       step
/// ```
///
/// `reset` and `random_start` return to `Idle` from every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Initial mode, and the mode after a reset.
    #[default]
    Idle,

    /// Steps are being driven by the scheduler.
    Running,

    /// A run was paused; manual steps are allowed.
    Paused,

    /// The gradient norm fell to the threshold. Terminal until reset.
    Converged,
}

impl Mode {
    /// Returns true if a manual `step()` is allowed in this mode.
    #[must_use]
    pub fn accepts_manual_step(self) -> bool {
        matches!(self, Self::Idle | Self::Paused)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Converged => "converged",
        };
        f.write_str(name)
    }
}

//! Per-droid movement state.

/// Where a droid is in its movement state machine.
///
/// ```text
///            move / follow                claim ok
///   Idle ─────────────────▶ Moving ─────────────────▶ Idle
///                             │ claim refused
///                             ▼
///                          Blocked  (retry with any move command)
///
///   any ── malformed command ──▶ Error ── reset ──▶ Idle
/// ```
///
/// Only the command methods on [`Droid`][crate::Droid] change it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum MovementState {
    /// Resting, no step in progress.
    #[default]
    Idle,
    /// Executing a step or a route.
    Moving,
    /// The last step could not claim its target cell.
    Blocked,
    /// A command was malformed.  Further moves are refused until reset.
    Error,
}

impl MovementState {
    #[inline]
    pub fn is_faulted(self) -> bool {
        matches!(self, MovementState::Error)
    }

    /// Human-readable label.
    pub fn as_str(self) -> &'static str {
        match self {
            MovementState::Idle    => "idle",
            MovementState::Moving  => "moving",
            MovementState::Blocked => "blocked",
            MovementState::Error   => "error",
        }
    }
}

impl std::fmt::Display for MovementState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

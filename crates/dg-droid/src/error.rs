use dg_core::{Coordinate, DroidId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("invalid step target {} from {from}", describe(.to))]
    InvalidTarget { from: Coordinate, to: Option<Coordinate> },

    #[error("no route supplied")]
    InvalidRoute,

    #[error("step from {at} to {target} is blocked")]
    Blocked { at: Coordinate, target: Coordinate },

    #[error("droid {0} is in the error state and must be reset")]
    Faulted(DroidId),
}

impl MoveError {
    /// `false` for [`MoveError::Blocked`]: contention is retried, not
    /// repaired.
    pub fn is_fault(&self) -> bool {
        !matches!(self, MoveError::Blocked { .. })
    }
}

fn describe(target: &Option<Coordinate>) -> String {
    match target {
        Some(c) => c.to_string(),
        None    => "<none>".to_owned(),
    }
}

pub type MoveResult<T> = Result<T, MoveError>;

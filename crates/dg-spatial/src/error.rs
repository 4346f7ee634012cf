//! Spatial-subsystem error type.

use thiserror::Error;

use dg_core::Coordinate;

/// Errors produced by `dg-spatial`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpatialError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("coordinate {0} lies outside the grid")]
    OutOfBounds(Coordinate),

    #[error("cell {0} is occupied")]
    CellOccupied(Coordinate),

    #[error("no path from {from} to {to}")]
    NotFound { from: Coordinate, to: Coordinate },
}

impl SpatialError {
    /// `false` for [`SpatialError::NotFound`], which is an ordinary outcome
    /// (the goal is unreachable) rather than a malformed request.
    pub fn is_fault(&self) -> bool {
        !matches!(self, SpatialError::NotFound { .. })
    }
}

pub type SpatialResult<T> = Result<T, SpatialError>;

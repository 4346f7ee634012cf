use dg_core::{Coordinate, DroidId};
use dg_droid::MoveError;
use dg_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("session configuration error: {0}")]
    Config(String),

    #[error("cannot spawn at {0}: cell is an obstacle or already occupied")]
    SpawnBlocked(Coordinate),

    #[error("no droid with id {0}")]
    UnknownDroid(DroidId),

    #[error("layout parse error: {0}")]
    Layout(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("spatial error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("movement error: {0}")]
    Move(#[from] MoveError),
}

pub type SimResult<T> = Result<T, SimError>;

//! Terrain error type.

use thiserror::Error;

/// Errors produced by `park-terrain`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TerrainError {
    #[error("malformed grid: {0}")]
    MalformedGrid(String),

    #[error("terrain {width}x{height} is too small (need at least 3x3)")]
    TooSmall { width: usize, height: usize },

    #[error("no free interior cell left on the map")]
    NoFreeCell,

    #[error("terrain has no {0} points")]
    EmptyPointList(&'static str),
}

pub type TerrainResult<T> = Result<T, TerrainError>;

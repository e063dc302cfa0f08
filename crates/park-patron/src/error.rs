use park_core::{PatronId, RideId};
use park_terrain::TerrainError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatronError {
    #[error("terrain query failed: {0}")]
    Terrain(#[from] TerrainError),

    #[error("patron {patron} is not queued for {ride}")]
    NotQueued { patron: PatronId, ride: RideId },

    #[error("invalid behaviour tuning: {0}")]
    InvalidTuning(String),
}

pub type PatronResult<T> = Result<T, PatronError>;

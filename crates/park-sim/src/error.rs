use park_core::ParkError;
use park_patron::PatronError;
use park_ride::RideError;
use park_terrain::TerrainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("park configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match patron count {expected}")]
    PatronCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("ride name {0:?} is used more than once")]
    DuplicateRideName(String),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("illegal transition: {0}")]
    IllegalTransition(String),

    #[error(transparent)]
    Park(#[from] ParkError),

    #[error("terrain error: {0}")]
    Terrain(#[from] TerrainError),

    #[error("ride error: {0}")]
    Ride(#[from] RideError),

    #[error("patron error: {0}")]
    Patron(#[from] PatronError),
}

pub type SimResult<T> = Result<T, SimError>;

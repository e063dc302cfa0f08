use park_core::{PatronId, RideId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RideError {
    #[error("invalid ride configuration: {0}")]
    InvalidConfig(String),

    #[error("patron {patron} is already queued for or riding {ride}")]
    AlreadyMember { ride: RideId, patron: PatronId },
}

pub type RideResult<T> = Result<T, RideError>;

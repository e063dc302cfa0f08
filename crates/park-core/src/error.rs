//! Shared error type.
//!
//! Sub-crates define their own error enums and convert into each other via
//! `From` impls; `ParkError` is the common base for lookups and parsing.

use thiserror::Error;

use crate::{PatronId, RideId};

/// The top-level error type for `park-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParkError {
    #[error("patron {0} not found")]
    PatronNotFound(PatronId),

    #[error("ride {0} not found")]
    RideNotFound(RideId),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `park-core`.
pub type ParkResult<T> = Result<T, ParkError>;

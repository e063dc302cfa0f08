//! Ride → patron events.

use park_core::{PatronId, RideId};

use crate::RideState;

/// Something a ride did during [`Ride::step`](crate::Ride::step) that the
/// patron side must mirror.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RideEvent {
    /// `patron` left the queue front and is now aboard.
    Boarded { ride: RideId, patron: PatronId },
    /// `patron` got off.  Their ride is complete.
    Ejected { ride: RideId, patron: PatronId },
    StateChanged { ride: RideId, from: RideState, to: RideState },
}

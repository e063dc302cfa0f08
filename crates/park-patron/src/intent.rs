//! Patron intents.

use park_core::RideId;

/// A ride-side change a patron asks for during its step.
///
/// Applied immediately by the park, so patrons stepped later in the same
/// tick already see the updated queue.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PatronIntent {
    /// Append me to the back of this ride's queue.
    JoinQueue(RideId),
    /// Take me out of this ride's queue.
    AbandonQueue(RideId),
}

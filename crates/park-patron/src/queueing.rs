//! Queue-join and abandonment policies.

use park_ride::Ride;

use crate::profile::patience_ratio;
use crate::{BehaviorTuning, PatronProfile};

/// A patron joins only while the queue is no longer than their tolerance.
#[inline]
pub fn will_join(profile: &PatronProfile, ride: &Ride) -> bool {
    ride.queue_len() <= profile.queue_tolerance
}

/// Patience ratio below which a patron at 1-based `position` gives up.
/// Grows with the position, capped at `abandon_base + abandon_queue_cap`.
#[inline]
pub fn abandon_threshold(position: usize, tuning: &BehaviorTuning) -> f64 {
    tuning.abandon_base
        + (position as f64 / tuning.abandon_queue_divisor).min(tuning.abandon_queue_cap)
}

#[inline]
pub fn should_abandon(
    patience: u32,
    max_patience: u32,
    position: usize,
    tuning: &BehaviorTuning,
) -> bool {
    patience_ratio(patience, max_patience) < abandon_threshold(position, tuning)
}

/// Patience left after walking out of a queue.
#[inline]
pub fn patience_after_abandon(patience: u32, tuning: &BehaviorTuning) -> u32 {
    (patience as f64 * tuning.abandon_patience_penalty).floor() as u32
}

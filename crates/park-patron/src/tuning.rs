//! Behavioural constants.

use crate::{PatronError, PatronResult};

/// Every constant the patron policies use.  `Default` gives the stock park.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BehaviorTuning {
    // ── Target selection ──────────────────────────────────────────────────
    /// Chance of wandering to a random free point instead of a ride.
    pub explore_probability:  f64,
    /// Minimum score for a ride to be considered as a target.
    pub attractive_threshold: f64,
    /// Score lost per patron already in the queue.
    pub queue_penalty:        f64,
    /// Upper bound on the queue penalty when choosing a target.
    pub queue_penalty_cap:    f64,
    /// Targets are drawn uniformly from this many best-scoring rides.
    pub top_k:                usize,
    /// Distance below the footprint of the queue entrance.
    pub approach_offset:      f64,

    // ── Proximity ─────────────────────────────────────────────────────────
    /// Minimum score for joining a ride the patron is standing next to.
    pub nearby_min_score:    f64,
    /// How far outside a footprint still counts as "next to" it.
    pub near_tolerance:      f64,
    /// Squared distance under which a target counts as reached.
    pub at_target_epsilon_sq: f64,

    // ── Movement ──────────────────────────────────────────────────────────
    /// Sideways deflection tried when the straight path is blocked.
    pub deflection_degrees: f64,

    // ── Queueing ──────────────────────────────────────────────────────────
    pub abandon_base:                f64,
    pub abandon_queue_divisor:       f64,
    pub abandon_queue_cap:           f64,
    /// Patience multiplier applied on abandoning a queue (result floored).
    pub abandon_patience_penalty:    f64,
    pub impatient_leave_ratio:       f64,
    pub impatient_leave_probability: f64,

    // ── Riding and leaving ────────────────────────────────────────────────
    /// Fraction of `max_patience` restored after a ride.
    pub ride_patience_restore: f64,
    /// Weight of eroded patience in the exit probability.
    pub exit_patience_weight:  f64,

    // ── Spawning ──────────────────────────────────────────────────────────
    pub spawn_delay_min: u32,
    pub spawn_delay_max: u32,
}

impl Default for BehaviorTuning {
    fn default() -> Self {
        Self {
            explore_probability:  0.3,
            attractive_threshold: 0.4,
            queue_penalty:        0.1,
            queue_penalty_cap:    0.5,
            top_k:                3,
            approach_offset:      0.25,

            nearby_min_score:     0.2,
            near_tolerance:       1.2,
            at_target_epsilon_sq: 0.9,

            deflection_degrees: 30.0,

            abandon_base:                0.1,
            abandon_queue_divisor:       10.0,
            abandon_queue_cap:           0.5,
            abandon_patience_penalty:    0.7,
            impatient_leave_ratio:       0.2,
            impatient_leave_probability: 0.5,

            ride_patience_restore: 0.3,
            exit_patience_weight:  0.2,

            spawn_delay_min: 3,
            spawn_delay_max: 8,
        }
    }
}

impl BehaviorTuning {
    /// Reject values the policies cannot work with.
    pub fn validate(&self) -> PatronResult<()> {
        let probabilities = [
            ("explore_probability", self.explore_probability),
            ("abandon_patience_penalty", self.abandon_patience_penalty),
            ("impatient_leave_ratio", self.impatient_leave_ratio),
            ("impatient_leave_probability", self.impatient_leave_probability),
            ("ride_patience_restore", self.ride_patience_restore),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(PatronError::InvalidTuning(format!("{name} = {p} is outside [0, 1]")));
            }
        }
        if self.top_k == 0 {
            return Err(PatronError::InvalidTuning("top_k must be at least 1".into()));
        }
        if self.abandon_queue_divisor <= 0.0 {
            return Err(PatronError::InvalidTuning("abandon_queue_divisor must be positive".into()));
        }
        if self.near_tolerance < 0.0 || self.at_target_epsilon_sq <= 0.0 {
            return Err(PatronError::InvalidTuning(
                "near_tolerance must be non-negative and at_target_epsilon_sq positive".into(),
            ));
        }
        if self.spawn_delay_min == 0 || self.spawn_delay_min > self.spawn_delay_max {
            return Err(PatronError::InvalidTuning(format!(
                "spawn delay range {}..={} is empty or starts at zero",
                self.spawn_delay_min, self.spawn_delay_max
            )));
        }
        Ok(())
    }
}

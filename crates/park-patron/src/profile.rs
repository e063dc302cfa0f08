//! Per-kind behaviour bundles.

use park_core::{PatronKind, PatronRng, RideKind};

use crate::BehaviorTuning;

/// Exit probability when no row of the exit table applies.
pub const BASE_EXIT_PROBABILITY: f64 = 0.1;

/// Static traits of one [`PatronKind`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PatronProfile {
    /// Cells moved per tick.
    pub speed: f64,
    /// Patience budget, rolled uniformly per patron.  Equal bounds mean a
    /// fixed budget.
    pub patience_range: (u32, u32),
    /// Preference for pirate ship, ferris wheel, roller coaster.
    pub preferences: [f64; 3],
    /// Longest queue this kind will still join.
    pub queue_tolerance: usize,
    /// `(min rides completed, exit probability)`, highest threshold first.
    pub exit_table: [(u32, f64); 2],
}

impl PatronProfile {
    pub const fn for_kind(kind: PatronKind) -> Self {
        match kind {
            PatronKind::Adventurous => Self {
                speed:           0.8,
                patience_range:  (25, 25),
                preferences:     [0.9, 0.3, 0.95],
                queue_tolerance: 8,
                exit_table:      [(6, 0.8), (4, 0.4)],
            },
            PatronKind::Family => Self {
                speed:           0.6,
                patience_range:  (18, 18),
                preferences:     [0.2, 0.8, 0.15],
                queue_tolerance: 6,
                exit_table:      [(6, 0.8), (4, 0.4)],
            },
            PatronKind::Impatient => Self {
                speed:           1.0,
                patience_range:  (10, 10),
                preferences:     [0.7, 0.6, 0.8],
                queue_tolerance: 3,
                exit_table:      [(5, 0.9), (3, 0.6)],
            },
            PatronKind::Explorer => Self {
                speed:           0.7,
                patience_range:  (12, 22),
                preferences:     [0.6, 0.6, 0.6],
                queue_tolerance: 5,
                exit_table:      [(6, 0.7), (4, 0.3)],
            },
        }
    }

    #[inline]
    pub fn preference(&self, ride: RideKind) -> f64 {
        match ride {
            RideKind::PirateShip    => self.preferences[0],
            RideKind::FerrisWheel   => self.preferences[1],
            RideKind::RollerCoaster => self.preferences[2],
        }
    }

    /// Draw this patron's patience budget.
    pub fn roll_patience(&self, rng: &mut PatronRng) -> u32 {
        let (lo, hi) = self.patience_range;
        if lo >= hi { lo } else { rng.gen_range(lo..=hi) }
    }

    /// Probability of leaving the park after a ride.
    ///
    /// The table row for the number of rides completed sets the base, and
    /// eroded patience adds `exit_patience_weight × (1 − patience / max)`.
    pub fn exit_probability(
        &self,
        rides_completed: u32,
        patience: u32,
        max_patience: u32,
        tuning: &BehaviorTuning,
    ) -> f64 {
        let base = self
            .exit_table
            .iter()
            .find(|&&(min_rides, _)| rides_completed >= min_rides)
            .map_or(BASE_EXIT_PROBABILITY, |&(_, p)| p);
        let eroded = 1.0 - patience_ratio(patience, max_patience);
        (base + tuning.exit_patience_weight * eroded).clamp(0.0, 1.0)
    }
}

/// `patience / max_patience`, zero when the budget is zero.
#[inline]
pub fn patience_ratio(patience: u32, max_patience: u32) -> f64 {
    if max_patience == 0 { 0.0 } else { patience as f64 / max_patience as f64 }
}

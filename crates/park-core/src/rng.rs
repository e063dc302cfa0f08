//! Deterministic per-patron and park-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! There is no process-wide RNG.  Every probabilistic decision draws from an
//! explicitly owned stream:
//!
//! - [`ParkRng`] is seeded from the run seed and used for setup decisions
//!   (e.g. drawing patron kinds from a weighted mix).
//! - Each patron owns a [`PatronRng`] seeded by
//!
//!   seed = global_seed XOR (patron_id * MIXING_CONSTANT)
//!
//!   and uses it for target choice, deflection side, abandonment and exit
//!   decisions.
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive ids across the seed space.  Adding patrons at
//! the end of the list does not disturb the streams of existing ones.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::PatronId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── PatronRng ─────────────────────────────────────────────────────────────────

/// Per-patron deterministic RNG.
///
/// One per patron, stored in a parallel `Vec` next to the patron registry so
/// a patron can be borrowed mutably together with its stream.
#[derive(Clone, Debug)]
pub struct PatronRng(SmallRng);

impl PatronRng {
    /// Seed deterministically from the run's global seed and a patron id.
    pub fn new(global_seed: u64, patron: PatronId) -> Self {
        let seed = global_seed ^ (patron.0 as u64).wrapping_mul(MIXING_CONSTANT);
        PatronRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

// ── ParkRng ───────────────────────────────────────────────────────────────────

/// Park-level RNG for setup decisions.
///
/// Used only while building or resetting a park.  Runtime decisions belong to
/// the acting patron's [`PatronRng`].
#[derive(Clone, Debug)]
pub struct ParkRng(SmallRng);

impl ParkRng {
    pub fn new(seed: u64) -> Self {
        ParkRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}

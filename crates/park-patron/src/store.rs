//! Patron registry and per-patron RNG streams.
//!
//! Kept as two structs for the same reason as the agent store it mirrors:
//! the park needs `&mut PatronRng` for one patron while it also holds
//! `&mut Patron` for that patron and `&` views of everything else.

use park_core::{PatronId, PatronKind, PatronRng};

use crate::{BehaviorTuning, Patron, PatronState};

// ── PatronRngs ────────────────────────────────────────────────────────────────

/// One deterministic stream per patron, indexed by `PatronId`.
#[derive(Clone, Debug)]
pub struct PatronRngs {
    pub inner: Vec<PatronRng>,
}

impl PatronRngs {
    /// Seed `count` streams from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| PatronRng::new(global_seed, PatronId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, patron: PatronId) -> &mut PatronRng {
        &mut self.inner[patron.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── PatronStore ───────────────────────────────────────────────────────────────

/// Every patron of the run, indexed by `PatronId`.  Patrons are never
/// removed; `Left` ones stay for reporting.
#[derive(Clone, Debug, Default)]
pub struct PatronStore {
    patrons: Vec<Patron>,
}

impl PatronStore {
    /// Create one `Spawning` patron per entry of `kinds`, ids in order, and
    /// the matching RNG streams.  Each patron's patience and spawn delay are
    /// drawn from its own stream.
    pub fn populate(
        kinds: &[PatronKind],
        global_seed: u64,
        tuning: &BehaviorTuning,
    ) -> (PatronStore, PatronRngs) {
        let mut rngs = PatronRngs::new(kinds.len(), global_seed);
        let patrons = kinds
            .iter()
            .zip(rngs.inner.iter_mut())
            .enumerate()
            .map(|(i, (&kind, rng))| Patron::new(PatronId(i as u32), kind, tuning, rng))
            .collect();
        (PatronStore { patrons }, rngs)
    }

    #[inline]
    pub fn get(&self, id: PatronId) -> Option<&Patron> {
        self.patrons.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: PatronId) -> Option<&mut Patron> {
        self.patrons.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Patron> {
        self.patrons.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Patron> {
        self.patrons.iter_mut()
    }

    /// All ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = PatronId> + '_ {
        (0..self.patrons.len() as u32).map(PatronId)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.patrons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patrons.is_empty()
    }

    /// Number of patrons currently in `state`.
    pub fn count_in(&self, state: PatronState) -> usize {
        self.patrons.iter().filter(|p| p.state == state).count()
    }
}

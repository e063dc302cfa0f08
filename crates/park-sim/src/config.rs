//! Typed park configuration.
//!
//! Loading from files is left to the caller.  With the `serde` feature every
//! type here (de)serialises, so any format works.

use rand::distributions::{Distribution, WeightedIndex};

use park_core::{BBox, ParkRng, PatronKind, Point, RideKind};
use park_patron::BehaviorTuning;
use park_ride::RideTiming;

use crate::{SimError, SimResult};

/// Seed used when the configuration does not name one.
pub const DEFAULT_SEED: u64 = 0x5eed_2025;

// ── Terrain ───────────────────────────────────────────────────────────────────

/// Where the grid comes from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TerrainLayout {
    /// Open park with a walled border.
    Size { width: usize, height: usize },
    /// Explicit rows of `0` (free) and `1` (obstacle).
    Grid(Vec<Vec<u8>>),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainSpec {
    pub layout: TerrainLayout,
    /// Replaces the default spawn points.
    pub spawns: Option<Vec<Point>>,
    /// Replaces the default exit points.
    pub exits:  Option<Vec<Point>>,
}

impl TerrainSpec {
    pub fn size(width: usize, height: usize) -> Self {
        Self { layout: TerrainLayout::Size { width, height }, spawns: None, exits: None }
    }

    pub fn grid(rows: Vec<Vec<u8>>) -> Self {
        Self { layout: TerrainLayout::Grid(rows), spawns: None, exits: None }
    }

    pub fn with_spawns(mut self, spawns: Vec<Point>) -> Self {
        self.spawns = Some(spawns);
        self
    }

    pub fn with_exits(mut self, exits: Vec<Point>) -> Self {
        self.exits = Some(exits);
        self
    }
}

// ── Rides ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RideSpec {
    pub kind:            RideKind,
    pub capacity:        usize,
    /// Ticks the running phase lasts.
    pub duration:        u32,
    pub bbox:            BBox,
    /// Defaults to `Ride{n}`, counted from 1.
    pub name:            Option<String>,
    pub loading_ticks:   Option<u32>,
    pub unloading_ticks: Option<u32>,
}

impl RideSpec {
    pub fn new(kind: RideKind, bbox: BBox, capacity: usize, duration: u32) -> Self {
        Self {
            kind,
            capacity,
            duration,
            bbox,
            name: None,
            loading_ticks: None,
            unloading_ticks: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn loading_ticks(mut self, ticks: u32) -> Self {
        self.loading_ticks = Some(ticks);
        self
    }

    pub fn unloading_ticks(mut self, ticks: u32) -> Self {
        self.unloading_ticks = Some(ticks);
        self
    }

    /// Kind defaults with this ride's overrides applied.
    pub fn timing(&self) -> RideTiming {
        RideTiming::for_kind(self.kind).with_overrides(self.loading_ticks, self.unloading_ticks)
    }
}

// ── Patron mix ────────────────────────────────────────────────────────────────

/// How patron kinds are assigned.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PatronMix {
    /// Patron `i` gets `PatronKind::ALL[i % 4]`: an even split.
    #[default]
    RoundRobin,
    /// Independent draws weighted per kind, in `PatronKind::ALL` order.
    Weighted([f64; 4]),
    /// One kind per patron.  Length must equal `patron_count`.
    Explicit(Vec<PatronKind>),
}

impl PatronMix {
    /// Resolve to one kind per patron.  Weighted draws come from `rng`.
    pub fn resolve(&self, count: usize, rng: &mut ParkRng) -> SimResult<Vec<PatronKind>> {
        match self {
            PatronMix::RoundRobin => {
                Ok((0..count).map(|i| PatronKind::ALL[i % PatronKind::ALL.len()]).collect())
            }
            PatronMix::Weighted(weights) => {
                let dist = WeightedIndex::new(weights.iter().copied()).map_err(|e| {
                    SimError::Config(format!("patron mix weights {weights:?}: {e}"))
                })?;
                Ok((0..count).map(|_| PatronKind::ALL[dist.sample(rng.inner())]).collect())
            }
            PatronMix::Explicit(kinds) => {
                if kinds.len() != count {
                    return Err(SimError::PatronCountMismatch {
                        expected: count,
                        got:      kinds.len(),
                        what:     "explicit patron mix",
                    });
                }
                Ok(kinds.clone())
            }
        }
    }
}

// ── ParkConfig ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParkConfig {
    pub terrain:      TerrainSpec,
    pub rides:        Vec<RideSpec>,
    pub patron_count: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub patron_mix:   PatronMix,
    /// `None` runs with [`DEFAULT_SEED`].
    pub seed:         Option<u64>,
    /// Ticks [`Park::run`](crate::Park::run) executes.
    pub total_ticks:  u64,
    /// Emit a snapshot every this many ticks.  `0` disables snapshots.
    pub snapshot_interval_ticks: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tuning:       BehaviorTuning,
}

impl ParkConfig {
    /// The stock scenario: a 100×70 park with a pirate ship and a ferris
    /// wheel, 60 patrons, 300 ticks.
    pub fn default_park() -> Self {
        Self {
            terrain: TerrainSpec::size(100, 70),
            rides: vec![
                RideSpec::new(RideKind::PirateShip, BBox::new(10, 10, 20, 12), 12, 40),
                RideSpec::new(RideKind::FerrisWheel, BBox::new(45, 15, 20, 20), 20, 70),
            ],
            patron_count: 60,
            patron_mix: PatronMix::RoundRobin,
            seed: None,
            total_ticks: 300,
            snapshot_interval_ticks: 10,
            tuning: BehaviorTuning::default(),
        }
    }

    #[inline]
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }
}

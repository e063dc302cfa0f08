//! Read-only park state passed to every patron step.

use park_core::{RideId, Tick};
use park_ride::Ride;
use park_terrain::Terrain;

use crate::BehaviorTuning;

/// What a patron may look at while deciding.
///
/// Rebuilt for every patron from the park's current state, so a patron
/// stepped later in a tick sees the queue changes made by earlier ones.
#[derive(Copy, Clone)]
pub struct PatronContext<'a> {
    pub tick:    Tick,
    pub terrain: &'a Terrain,
    /// Every ride, indexed by `RideId`.
    pub rides:   &'a [Ride],
    pub tuning:  &'a BehaviorTuning,
}

impl<'a> PatronContext<'a> {
    #[inline]
    pub fn new(
        tick:    Tick,
        terrain: &'a Terrain,
        rides:   &'a [Ride],
        tuning:  &'a BehaviorTuning,
    ) -> Self {
        Self { tick, terrain, rides, tuning }
    }

    #[inline]
    pub fn ride(&self, id: RideId) -> Option<&'a Ride> {
        self.rides.get(id.index())
    }
}

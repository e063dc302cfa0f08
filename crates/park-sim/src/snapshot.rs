//! Per-tick counters and full-state snapshots.

use park_core::{BBox, PatronId, PatronKind, Point, RideId, RideKind, Tick};
use park_patron::{Patron, PatronState};
use park_ride::{Ride, RideState};

/// Aggregates recorded at the end of every tick.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickCounters {
    pub tick:                  Tick,
    pub riders_now:            usize,
    pub queued_now:            usize,
    pub departed_total:        usize,
    pub abandoned_total:       u64,
    pub rides_completed_total: u64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatronSnapshot {
    pub id:               PatronId,
    pub name:             String,
    pub kind:             PatronKind,
    pub state:            PatronState,
    pub position:         Point,
    pub current_ride:     Option<RideId>,
    pub rides_completed:  u32,
    pub abandoned_queues: u32,
    pub patience:         u32,
}

impl From<&Patron> for PatronSnapshot {
    fn from(p: &Patron) -> Self {
        Self {
            id:               p.id,
            name:             p.name.clone(),
            kind:             p.kind,
            state:            p.state,
            position:         p.position,
            current_ride:     p.current_ride,
            rides_completed:  p.rides_completed,
            abandoned_queues: p.abandoned_queues,
            patience:         p.patience,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RideSnapshot {
    pub id:          RideId,
    pub name:        String,
    pub kind:        RideKind,
    pub state:       RideState,
    pub capacity:    usize,
    pub rider_count: usize,
    pub queue_len:   usize,
    pub bbox:        BBox,
    /// Queue in FIFO order.
    pub queue:       Vec<PatronId>,
    pub riders:      Vec<PatronId>,
}

impl From<&Ride> for RideSnapshot {
    fn from(r: &Ride) -> Self {
        Self {
            id:          r.id(),
            name:        r.name().to_owned(),
            kind:        r.kind(),
            state:       r.state(),
            capacity:    r.capacity(),
            rider_count: r.rider_count(),
            queue_len:   r.queue_len(),
            bbox:        r.bbox(),
            queue:       r.queue().iter().copied().collect(),
            riders:      r.riders().iter().copied().collect(),
        }
    }
}

/// Everything a renderer or exporter needs for one frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParkSnapshot {
    pub tick:     Tick,
    pub counters: TickCounters,
    pub patrons:  Vec<PatronSnapshot>,
    pub rides:    Vec<RideSnapshot>,
}

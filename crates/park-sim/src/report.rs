//! End-of-run visitor report.

use std::fmt;

use park_core::{PatronKind, RideKind, Tick};
use park_patron::{PatronState, PatronStore};
use park_ride::Ride;

/// Totals for one patron kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KindStats {
    pub kind:            PatronKind,
    pub count:           usize,
    pub total_rides:     u64,
    pub total_abandoned: u64,
    pub departed:        usize,
}

impl KindStats {
    pub fn avg_rides(&self) -> f64 {
        self.total_rides as f64 / self.count.max(1) as f64
    }

    pub fn avg_abandoned(&self) -> f64 {
        self.total_abandoned as f64 / self.count.max(1) as f64
    }
}

/// Lifetime totals for one ride.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RideStats {
    pub name:             String,
    pub kind:             RideKind,
    pub cycles_completed: u64,
    pub riders_served:    u64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParkReport {
    pub tick:            Tick,
    pub patron_count:    usize,
    /// One entry per kind, in `PatronKind::ALL` order.
    pub kinds:           Vec<KindStats>,
    pub rides:           Vec<RideStats>,
    pub total_rides:     u64,
    pub total_abandoned: u64,
    pub departed:        usize,
}

impl ParkReport {
    pub(crate) fn collect(tick: Tick, patrons: &PatronStore, rides: &[Ride]) -> Self {
        let mut kinds: Vec<KindStats> = PatronKind::ALL
            .into_iter()
            .map(|kind| KindStats { kind, count: 0, total_rides: 0, total_abandoned: 0, departed: 0 })
            .collect();
        for p in patrons.iter() {
            let stats = &mut kinds[p.kind.index()];
            stats.count += 1;
            stats.total_rides += p.rides_completed as u64;
            stats.total_abandoned += p.abandoned_queues as u64;
            if p.state == PatronState::Left {
                stats.departed += 1;
            }
        }

        let rides = rides
            .iter()
            .map(|r| RideStats {
                name:             r.name().to_owned(),
                kind:             r.kind(),
                cycles_completed: r.cycles_completed(),
                riders_served:    r.riders_served(),
            })
            .collect();

        ParkReport {
            tick,
            patron_count:    patrons.len(),
            total_rides:     kinds.iter().map(|k| k.total_rides).sum(),
            total_abandoned: kinds.iter().map(|k| k.total_abandoned).sum(),
            departed:        kinds.iter().map(|k| k.departed).sum(),
            kinds,
            rides,
        }
    }

    /// Abandonments as a percentage of all queue outcomes.  `None` until at
    /// least one ride has been completed.
    pub fn abandonment_rate(&self) -> Option<f64> {
        (self.total_rides > 0).then(|| {
            self.total_abandoned as f64 / (self.total_rides + self.total_abandoned) as f64 * 100.0
        })
    }
}

impl fmt::Display for ParkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "visitor report at {}", self.tick)?;
        for k in &self.kinds {
            writeln!(
                f,
                "  {:<12} {:>3} patrons  avg rides {:>4.1}  avg abandoned {:>4.1}  departed {}",
                k.kind.as_str(),
                k.count,
                k.avg_rides(),
                k.avg_abandoned(),
                k.departed,
            )?;
        }
        for r in &self.rides {
            writeln!(
                f,
                "  {:<12} {:<8} {:>3} cycles  {:>4} riders",
                r.name, r.kind.as_str(), r.cycles_completed, r.riders_served,
            )?;
        }
        write!(
            f,
            "  rides completed {}  queues abandoned {}  departed {}/{}",
            self.total_rides, self.total_abandoned, self.departed, self.patron_count,
        )?;
        if let Some(rate) = self.abandonment_rate() {
            write!(f, "  abandonment rate {rate:.1}%")?;
        }
        Ok(())
    }
}

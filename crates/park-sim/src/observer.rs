//! Park observer trait for progress reporting and data collection.

use park_core::{PatronId, RideId, Tick};
use park_patron::PatronState;
use park_ride::RideState;

use crate::{ParkSnapshot, TickCounters};

/// Callbacks invoked by [`Park::step`][crate::Park::step] and friends.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: transition log
///
/// ```rust,ignore
/// struct Transitions(Vec<(Tick, PatronId, PatronState, PatronState)>);
///
/// impl ParkObserver for Transitions {
///     fn on_patron_transition(&mut self, tick: Tick, p: PatronId, from: PatronState, to: PatronState) {
///         self.0.push((tick, p, from, to));
///     }
/// }
/// ```
pub trait ParkObserver {
    /// Called at the very start of each tick, before any ride moves.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called whenever a patron changes state, in the order the changes
    /// happen within the tick.
    fn on_patron_transition(
        &mut self,
        _tick:   Tick,
        _patron: PatronId,
        _from:   PatronState,
        _to:     PatronState,
    ) {}

    /// Called whenever a ride changes state.
    fn on_ride_transition(&mut self, _tick: Tick, _ride: RideId, _from: RideState, _to: RideState) {}

    /// Called at the end of each tick with that tick's aggregate counters.
    fn on_tick_end(&mut self, _tick: Tick, _counters: &TickCounters) {}

    /// Called every `config.snapshot_interval_ticks` ticks with the full park
    /// state.
    fn on_snapshot(&mut self, _tick: Tick, _snapshot: &ParkSnapshot) {}

    /// Called once when [`Park::run`][crate::Park::run] finishes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`ParkObserver`] that does nothing.
pub struct NoopObserver;

impl ParkObserver for NoopObserver {}

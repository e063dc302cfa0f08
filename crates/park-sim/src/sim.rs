//! The `Park` struct and its tick loop.

use tracing::{debug, info};

use park_core::{ParkError, PatronId, Point, RideId, Tick};
use park_patron::{PatronContext, PatronIntent, PatronRngs, PatronState, PatronStore};
use park_ride::{Ride, RideEvent};
use park_terrain::Terrain;

use crate::report::ParkReport;
use crate::{
    Controls, ParkBuilder, ParkConfig, ParkObserver, ParkSnapshot, PatronSnapshot, RideSnapshot,
    SimError, SimResult, TickCounters,
};

// ── Park ──────────────────────────────────────────────────────────────────────

/// The simulation runner.
///
/// One tick:
///
/// 1. **Rides**, in list order: [`Ride::step`], each returned
///    [`RideEvent`] applied to the patron registry at once.
/// 2. **Patrons**, in ascending `PatronId` order: [`Patron::step`] with a
///    fresh [`PatronContext`], the returned [`PatronIntent`] applied to both
///    the patron and the ride at once.
/// 3. **Bookkeeping**: counters aggregated and pushed onto `history`,
///    invariants checked in debug builds, clock advanced.
///
/// Because rides move before patrons, a patron that joins a queue during
/// tick *t* is first considered for boarding during tick *t + 1*.
///
/// Create via [`ParkBuilder`].
///
/// [`Patron::step`]: park_patron::Patron::step
pub struct Park {
    /// The configuration the park was built from.  [`reset`](Self::reset)
    /// rebuilds from it.
    pub config: ParkConfig,

    /// Current tick: the next one to be processed.
    pub clock: Tick,

    pub controls: Controls,

    /// Terrain with every ride footprint stamped in.
    pub terrain: Terrain,

    /// Indexed by `RideId`.
    pub rides: Vec<Ride>,

    pub patrons: PatronStore,

    /// Per-patron deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: PatronRngs,

    /// Counters for every processed tick, oldest first.
    pub history: Vec<TickCounters>,
}

impl Park {
    // ── Running ───────────────────────────────────────────────────────────

    /// Step until `config.total_ticks` or until [`quit`](Self::quit).
    pub fn run<O: ParkObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.0 < self.config.total_ticks && !self.controls.quit {
            self.step(observer)?;
        }
        let counters = self.counters();
        info!(
            tick = self.clock.0,
            departed = counters.departed_total,
            rides_completed = counters.rides_completed_total,
            abandoned = counters.abandoned_total,
            "run finished"
        );
        observer.on_sim_end(self.clock);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position, ignoring
    /// `total_ticks` and the controls.
    pub fn run_ticks<O: ParkObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// One render frame: nothing while paused or quit, otherwise
    /// `speed_multiplier` ticks (fewer if `total_ticks` is reached).
    /// Returns the number of ticks executed.
    pub fn frame<O: ParkObserver>(&mut self, observer: &mut O) -> SimResult<usize> {
        if self.controls.paused || self.controls.quit {
            return Ok(0);
        }
        let mut executed = 0;
        for _ in 0..self.controls.speed_multiplier {
            if self.clock.0 >= self.config.total_ticks {
                break;
            }
            self.step(observer)?;
            executed += 1;
        }
        Ok(executed)
    }

    /// Process one tick and return its counters.
    pub fn step<O: ParkObserver>(&mut self, observer: &mut O) -> SimResult<TickCounters> {
        let now = self.clock;
        observer.on_tick_start(now);

        self.step_rides(now, observer)?;
        self.step_patrons(now, observer)?;

        #[cfg(debug_assertions)]
        self.check_invariants()?;

        let counters = self.counters();
        observer.on_tick_end(now, &counters);
        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.snapshot());
        }
        self.history.push(counters.clone());
        self.clock = now.next();
        Ok(counters)
    }

    // ── Controls ──────────────────────────────────────────────────────────

    pub fn toggle_pause(&mut self) -> bool {
        self.controls.paused = !self.controls.paused;
        self.controls.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.controls.paused = paused;
    }

    /// Ticks per frame.  Must be at least 1.
    pub fn set_speed(&mut self, multiplier: u32) -> SimResult<()> {
        if multiplier == 0 {
            return Err(SimError::Config("speed multiplier must be at least 1".into()));
        }
        self.controls.speed_multiplier = multiplier;
        Ok(())
    }

    /// Stop [`run`](Self::run) after the current tick; [`frame`](Self::frame)
    /// does nothing from now on.
    pub fn quit(&mut self) {
        self.controls.quit = true;
    }

    /// Rebuild every ride, patron, RNG stream, the clock, the history and
    /// the controls from the stored configuration.
    pub fn reset(&mut self) -> SimResult<()> {
        *self = ParkBuilder::new(self.config.clone()).build()?;
        info!(seed = self.config.effective_seed(), "park reset");
        Ok(())
    }

    // ── Explicit operations ───────────────────────────────────────────────

    /// Put a roaming patron at the back of `ride`'s queue, updating both
    /// sides.
    pub fn join_queue<O: ParkObserver>(
        &mut self,
        patron: PatronId,
        ride: RideId,
        observer: &mut O,
    ) -> SimResult<()> {
        let now = self.clock;
        let r = self.rides.get_mut(ride.index()).ok_or(ParkError::RideNotFound(ride))?;
        let p = self.patrons.get_mut(patron).ok_or(ParkError::PatronNotFound(patron))?;
        if p.state != PatronState::Roaming {
            return Err(SimError::IllegalTransition(format!(
                "{patron} cannot join a queue while {}",
                p.state
            )));
        }
        r.enqueue(patron)?;
        p.enter_queue(ride, now);
        observer.on_patron_transition(now, patron, PatronState::Roaming, PatronState::Queueing);
        Ok(())
    }

    /// Teleport a patron onto a free point.  A still-spawning patron becomes
    /// `Roaming` there.  Queued, riding and departed patrons cannot be
    /// placed.
    pub fn place_patron<O: ParkObserver>(
        &mut self,
        patron: PatronId,
        at: Point,
        observer: &mut O,
    ) -> SimResult<()> {
        if !self.terrain.is_free(at) {
            return Err(SimError::Config(format!("cannot place {patron} on blocked point {at}")));
        }
        let p = self.patrons.get_mut(patron).ok_or(ParkError::PatronNotFound(patron))?;
        match p.state {
            PatronState::Spawning | PatronState::Roaming | PatronState::Leaving => {}
            other => {
                return Err(SimError::IllegalTransition(format!(
                    "{patron} cannot be placed while {other}"
                )));
            }
        }
        if p.state == PatronState::Spawning {
            p.state = PatronState::Roaming;
            p.spawn_delay = 0;
            observer.on_patron_transition(
                self.clock,
                patron,
                PatronState::Spawning,
                PatronState::Roaming,
            );
        }
        p.position = at;
        if p.state == PatronState::Roaming {
            p.target = None;
        }
        Ok(())
    }

    // ── Observation ───────────────────────────────────────────────────────

    /// Aggregates for the current state, stamped with the current tick.
    pub fn counters(&self) -> TickCounters {
        let mut c = TickCounters { tick: self.clock, ..TickCounters::default() };
        for p in self.patrons.iter() {
            match p.state {
                PatronState::Riding   => c.riders_now += 1,
                PatronState::Queueing => c.queued_now += 1,
                PatronState::Left     => c.departed_total += 1,
                _ => {}
            }
            c.abandoned_total += p.abandoned_queues as u64;
            c.rides_completed_total += p.rides_completed as u64;
        }
        c
    }

    pub fn snapshot(&self) -> ParkSnapshot {
        ParkSnapshot {
            tick:     self.clock,
            counters: self.counters(),
            patrons:  self.patrons.iter().map(PatronSnapshot::from).collect(),
            rides:    self.rides.iter().map(RideSnapshot::from).collect(),
        }
    }

    pub fn report(&self) -> ParkReport {
        ParkReport::collect(self.clock, &self.patrons, &self.rides)
    }

    /// Verify capacity bounds, exclusive membership and that every patron's
    /// state agrees with the ride lists.
    pub fn check_invariants(&self) -> SimResult<()> {
        let violation = |msg: String| Err(SimError::InvariantViolation(msg));
        let mut membership: Vec<Option<RideId>> = vec![None; self.patrons.len()];

        for ride in &self.rides {
            if ride.rider_count() > ride.capacity() {
                return violation(format!(
                    "ride {:?} carries {} riders over capacity {}",
                    ride.name(),
                    ride.rider_count(),
                    ride.capacity()
                ));
            }
            let lists = [(PatronState::Queueing, ride.queue()), (PatronState::Riding, ride.riders())];
            for (expected, list) in lists {
                for &id in list {
                    let Some(p) = self.patrons.get(id) else {
                        return violation(format!("ride {:?} lists unknown {id}", ride.name()));
                    };
                    if let Some(other) = membership[id.index()].replace(ride.id()) {
                        return violation(format!(
                            "{id} is listed by {other} and again by {}",
                            ride.id()
                        ));
                    }
                    if p.state != expected || p.current_ride != Some(ride.id()) {
                        return violation(format!(
                            "{id} is {expected} on ride {:?} but its state is {} for {:?}",
                            ride.name(),
                            p.state,
                            p.current_ride
                        ));
                    }
                }
            }
        }

        for p in self.patrons.iter() {
            let listed = membership[p.id.index()].is_some();
            let member_state = matches!(p.state, PatronState::Queueing | PatronState::Riding);
            if member_state != listed || (!member_state && p.current_ride.is_some()) {
                return violation(format!(
                    "{} is {} but ride membership is {:?}",
                    p.id, p.state, p.current_ride
                ));
            }
            if p.patience > p.max_patience {
                return violation(format!(
                    "{} has patience {} above its maximum {}",
                    p.id, p.patience, p.max_patience
                ));
            }
            if p.state != PatronState::Spawning && !self.terrain.is_free(p.position) {
                return violation(format!("{} stands on blocked point {}", p.id, p.position));
            }
        }
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step_rides<O: ParkObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        for i in 0..self.rides.len() {
            let events = self.rides[i].step(now);
            for event in events {
                self.apply_ride_event(now, event, observer)?;
            }
        }
        Ok(())
    }

    fn apply_ride_event<O: ParkObserver>(
        &mut self,
        now: Tick,
        event: RideEvent,
        observer: &mut O,
    ) -> SimResult<()> {
        match event {
            RideEvent::Boarded { ride, patron } => {
                let p = self.patrons.get_mut(patron).ok_or(ParkError::PatronNotFound(patron))?;
                let from = p.state;
                p.board(ride, now);
                observer.on_patron_transition(now, patron, from, PatronState::Riding);
            }
            RideEvent::Ejected { patron, .. } => {
                let p = self.patrons.get_mut(patron).ok_or(ParkError::PatronNotFound(patron))?;
                let from = p.state;
                p.finish_ride(&self.config.tuning);
                observer.on_patron_transition(now, patron, from, PatronState::Roaming);
            }
            RideEvent::StateChanged { ride, from, to } => {
                observer.on_ride_transition(now, ride, from, to);
            }
        }
        Ok(())
    }

    fn step_patrons<O: ParkObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        for i in 0..self.patrons.len() {
            let id = PatronId(i as u32);
            let Some(patron) = self.patrons.get_mut(id) else { continue };
            if !patron.state.is_active() {
                continue;
            }

            let from = patron.state;
            let ctx = PatronContext::new(now, &self.terrain, &self.rides, &self.config.tuning);
            let intent = patron.step(&ctx, self.rngs.get_mut(id))?;
            let to = patron.state;
            if from != to {
                observer.on_patron_transition(now, id, from, to);
            }

            match intent {
                Some(PatronIntent::JoinQueue(ride)) => self.join_queue(id, ride, observer)?,
                Some(PatronIntent::AbandonQueue(ride)) => self.abandon_queue(id, ride, observer)?,
                None => {}
            }
        }
        Ok(())
    }

    fn abandon_queue<O: ParkObserver>(
        &mut self,
        patron: PatronId,
        ride: RideId,
        observer: &mut O,
    ) -> SimResult<()> {
        let now = self.clock;
        let r = self.rides.get_mut(ride.index()).ok_or(ParkError::RideNotFound(ride))?;
        if !r.remove_from_queue(patron) {
            return Err(SimError::InvariantViolation(format!(
                "{patron} abandoned {ride} without being in its queue"
            )));
        }
        let p = self.patrons.get_mut(patron).ok_or(ParkError::PatronNotFound(patron))?;
        p.abandon_queue(ride, now, &self.terrain, &self.config.tuning, self.rngs.get_mut(patron))?;
        debug!(tick = now.0, %patron, %ride, next = %p.state, "queue abandoned");
        observer.on_patron_transition(now, patron, PatronState::Queueing, p.state);
        Ok(())
    }
}

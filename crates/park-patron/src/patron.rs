//! The patron state machine.
//!
//! [`Patron::step`] advances one patron by one tick and may return a
//! [`PatronIntent`].  The `enter_queue` / `abandon_queue` / `board` /
//! `finish_ride` transitions are called by the park when it applies an
//! intent or a ride event, together with the matching change on the ride.

use tracing::{debug, trace};

use park_core::{PatronId, PatronKind, PatronRng, Point, RideId, Tick};
use park_terrain::{Terrain, TerrainError};

use crate::movement::{self, Step};
use crate::{
    BehaviorTuning, PatronContext, PatronError, PatronIntent, PatronProfile, PatronResult,
    PatronState, decision, queueing,
};

#[derive(Clone, Debug)]
pub struct Patron {
    pub id:      PatronId,
    /// `P000`, `P001`, …
    pub name:    String,
    pub kind:    PatronKind,
    pub profile: PatronProfile,
    pub state:   PatronState,

    // ── Movement ──────────────────────────────────────────────────────────
    /// Meaningless while `Spawning`.
    pub position: Point,
    pub target:   Option<Point>,

    // ── Patience ──────────────────────────────────────────────────────────
    /// Always within `0..=max_patience`.
    pub patience:     u32,
    pub max_patience: u32,
    /// Ticks left before the patron appears at a spawn point.
    pub spawn_delay:  u32,

    // ── Counters ──────────────────────────────────────────────────────────
    pub rides_completed:   u32,
    pub abandoned_queues:  u32,
    pub total_queue_ticks: u64,

    // ── Ride membership ───────────────────────────────────────────────────
    /// The ride this patron is queued for or riding.  Mirrors the ride's
    /// `queue` / `riders` lists.
    pub current_ride:       Option<RideId>,
    pub queue_joined_at:    Tick,
    /// Set by `finish_ride`; the exit roll happens on the next roaming step.
    pub exit_check_pending: bool,
}

impl Patron {
    /// A fresh `Spawning` patron with patience and spawn delay drawn from
    /// `rng`.
    pub fn new(id: PatronId, kind: PatronKind, tuning: &BehaviorTuning, rng: &mut PatronRng) -> Self {
        let profile = PatronProfile::for_kind(kind);
        let max_patience = profile.roll_patience(rng);
        let spawn_delay = rng.gen_range(tuning.spawn_delay_min..=tuning.spawn_delay_max);
        Patron {
            id,
            name: format!("P{:03}", id.0),
            kind,
            profile,
            state: PatronState::Spawning,
            position: Point::default(),
            target: None,
            patience: max_patience,
            max_patience,
            spawn_delay,
            rides_completed: 0,
            abandoned_queues: 0,
            total_queue_ticks: 0,
            current_ride: None,
            queue_joined_at: Tick::ZERO,
            exit_check_pending: false,
        }
    }

    /// Override the patience budget and refill patience.
    pub fn with_max_patience(mut self, max_patience: u32) -> Self {
        self.max_patience = max_patience;
        self.patience = max_patience;
        self
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    pub fn step(
        &mut self,
        ctx: &PatronContext<'_>,
        rng: &mut PatronRng,
    ) -> PatronResult<Option<PatronIntent>> {
        match self.state {
            PatronState::Spawning => {
                self.step_spawning(ctx.terrain, rng)?;
                Ok(None)
            }
            PatronState::Roaming => self.step_roaming(ctx, rng),
            PatronState::Queueing => self.step_queueing(ctx),
            PatronState::Leaving => {
                self.step_leaving(ctx, rng)?;
                Ok(None)
            }
            PatronState::Riding | PatronState::Left => Ok(None),
        }
    }

    fn step_spawning(&mut self, terrain: &Terrain, rng: &mut PatronRng) -> PatronResult<()> {
        self.spawn_delay = self.spawn_delay.saturating_sub(1);
        if self.spawn_delay > 0 {
            return Ok(());
        }
        let spawn = rng
            .choose(terrain.spawn_points())
            .copied()
            .ok_or(TerrainError::EmptyPointList("spawn"))?;
        self.position = spawn;
        self.target = None;
        self.state = PatronState::Roaming;
        Ok(())
    }

    fn step_roaming(
        &mut self,
        ctx: &PatronContext<'_>,
        rng: &mut PatronRng,
    ) -> PatronResult<Option<PatronIntent>> {
        let tuning = ctx.tuning;
        if std::mem::take(&mut self.exit_check_pending)
            && decision::wants_to_exit(
                &self.profile,
                self.rides_completed,
                self.patience,
                self.max_patience,
                tuning,
                rng,
            )
        {
            self.start_leaving(ctx.terrain, rng)?;
            return Ok(None);
        }

        let target = self.target;
        match target {
            Some(t) if !self.reached(t, tuning) => self.move_toward(t, ctx, rng),
            _ => self.target = Some(decision::choose_target(&self.profile, ctx, rng)?),
        }

        Ok(decision::best_nearby_ride(&self.profile, self.position, ctx)
            .filter(|ride| queueing::will_join(&self.profile, ride))
            .map(|ride| PatronIntent::JoinQueue(ride.id())))
    }

    fn step_queueing(&mut self, ctx: &PatronContext<'_>) -> PatronResult<Option<PatronIntent>> {
        let not_queued = |ride| PatronError::NotQueued { patron: self.id, ride };
        let ride_id = self.current_ride.ok_or(not_queued(RideId::INVALID))?;
        let position = ctx
            .ride(ride_id)
            .and_then(|ride| ride.queue_position(self.id))
            .ok_or(not_queued(ride_id))?;

        self.patience = self.patience.saturating_sub(1);
        if queueing::should_abandon(self.patience, self.max_patience, position, ctx.tuning) {
            return Ok(Some(PatronIntent::AbandonQueue(ride_id)));
        }
        Ok(None)
    }

    fn step_leaving(&mut self, ctx: &PatronContext<'_>, rng: &mut PatronRng) -> PatronResult<()> {
        let Some(exit) = self.target else {
            return self.start_leaving(ctx.terrain, rng);
        };
        if self.reached(exit, ctx.tuning) {
            trace!(tick = ctx.tick.0, patron = %self.id, "left the park");
            self.state = PatronState::Left;
            self.target = None;
        } else {
            self.move_toward(exit, ctx, rng);
        }
        Ok(())
    }

    fn move_toward(&mut self, target: Point, ctx: &PatronContext<'_>, rng: &mut PatronRng) {
        let step = movement::step_toward(
            self.position,
            target,
            self.profile.speed,
            ctx.tuning.deflection_degrees,
            ctx.terrain,
            rng,
        );
        let next = step.resolve(self.position);
        if matches!(step, Step::Blocked) {
            trace!(tick = ctx.tick.0, patron = %self.id, at = %self.position, "blocked");
        } else {
            trace!(tick = ctx.tick.0, patron = %self.id, from = %self.position, to = %next, "moved");
        }
        self.position = next;
    }

    #[inline]
    fn reached(&self, target: Point, tuning: &BehaviorTuning) -> bool {
        self.position.distance_sq(target) < tuning.at_target_epsilon_sq
    }

    // ── Transitions applied by the park ───────────────────────────────────

    /// Now waiting in `ride`'s queue.
    pub fn enter_queue(&mut self, ride: RideId, now: Tick) {
        self.state = PatronState::Queueing;
        self.current_ride = Some(ride);
        self.queue_joined_at = now;
        self.target = None;
    }

    /// Walked out of `ride`'s queue.  Patience takes a hit, and an impatient
    /// patron who is nearly out of it may head for the exit instead of
    /// roaming on.
    pub fn abandon_queue(
        &mut self,
        ride: RideId,
        now: Tick,
        terrain: &Terrain,
        tuning: &BehaviorTuning,
        rng: &mut PatronRng,
    ) -> PatronResult<()> {
        if self.state != PatronState::Queueing || self.current_ride != Some(ride) {
            return Err(PatronError::NotQueued { patron: self.id, ride });
        }
        self.abandoned_queues += 1;
        self.patience = queueing::patience_after_abandon(self.patience, tuning);
        self.total_queue_ticks += now.since(self.queue_joined_at);
        self.current_ride = None;
        self.target = None;

        debug!(
            tick = now.0, patron = %self.id, kind = %self.kind, %ride,
            patience = self.patience, "abandoned queue"
        );

        if self.kind == PatronKind::Impatient
            && decision::impatient_gives_up(self.patience, self.max_patience, tuning, rng)
        {
            return self.start_leaving(terrain, rng);
        }
        self.state = PatronState::Roaming;
        Ok(())
    }

    /// Moved from the queue front onto `ride`.
    pub fn board(&mut self, ride: RideId, now: Tick) {
        self.state = PatronState::Riding;
        self.current_ride = Some(ride);
        self.total_queue_ticks += now.since(self.queue_joined_at);
        self.target = None;
    }

    /// Got off a ride.  Some patience comes back and the exit decision is
    /// deferred to the next roaming step.
    pub fn finish_ride(&mut self, tuning: &BehaviorTuning) {
        let restore = (self.max_patience as f64 * tuning.ride_patience_restore).round() as u32;
        self.state = PatronState::Roaming;
        self.rides_completed += 1;
        self.patience = self.patience.saturating_add(restore).min(self.max_patience);
        self.current_ride = None;
        self.target = None;
        self.exit_check_pending = true;
    }

    /// Head for a random exit.
    pub fn start_leaving(&mut self, terrain: &Terrain, rng: &mut PatronRng) -> PatronResult<()> {
        let exit = rng
            .choose(terrain.exit_points())
            .copied()
            .ok_or(TerrainError::EmptyPointList("exit"))?;
        self.state = PatronState::Leaving;
        self.current_ride = None;
        self.target = Some(exit);
        Ok(())
    }

    /// Ratio of remaining patience in `[0, 1]`.
    #[inline]
    pub fn patience_ratio(&self) -> f64 {
        crate::profile::patience_ratio(self.patience, self.max_patience)
    }
}

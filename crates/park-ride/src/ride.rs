//! The ride state machine.
//!
//! # Countdown
//!
//! Every [`Ride::step`] first decrements the countdown.  While it is still
//! positive the ride does its progressive phase work (one boarding or one
//! ejection on every other tick) and stops.  When it reaches zero the
//! transition for the current state fires.  A phase of `n` ticks therefore
//! spans exactly `n` calls to `step`.
//!
//! # Membership
//!
//! `queue` and `riders` hold `PatronId`s only.  A patron id appears at most
//! once across both lists; `enqueue` refuses duplicates.

use std::collections::VecDeque;

use tracing::{debug, trace};

use park_core::{BBox, PatronId, RideId, RideKind, Tick};

use crate::{RideError, RideEvent, RideResult, RideState, RideTiming};

#[derive(Clone, Debug)]
pub struct Ride {
    id:       RideId,
    name:     String,
    kind:     RideKind,
    bbox:     BBox,
    capacity: usize,
    duration: u32,
    timing:   RideTiming,

    // ── Cycle state ───────────────────────────────────────────────────────
    state: RideState,
    timer: u32,
    phase: u32,

    // ── Membership ────────────────────────────────────────────────────────
    queue:  VecDeque<PatronId>,
    riders: VecDeque<PatronId>,

    // ── Lifetime counters ─────────────────────────────────────────────────
    cycles_completed: u64,
    riders_served:    u64,
}

impl Ride {
    /// A ride with the default timing for `kind`.
    pub fn new(
        id: RideId,
        name: impl Into<String>,
        kind: RideKind,
        bbox: BBox,
        capacity: usize,
        duration: u32,
    ) -> RideResult<Self> {
        Self::with_timing(id, name, kind, bbox, capacity, duration, RideTiming::for_kind(kind))
    }

    pub fn with_timing(
        id: RideId,
        name: impl Into<String>,
        kind: RideKind,
        bbox: BBox,
        capacity: usize,
        duration: u32,
        timing: RideTiming,
    ) -> RideResult<Self> {
        let name = name.into();
        let invalid = |what: &str| Err(RideError::InvalidConfig(format!("ride {name:?}: {what}")));
        if capacity == 0 {
            return invalid("capacity must be positive");
        }
        if duration == 0 {
            return invalid("duration must be positive");
        }
        if timing.loading_ticks == 0 || timing.unloading_ticks == 0 {
            return invalid("loading and unloading ticks must be positive");
        }
        if !bbox.is_valid() {
            return invalid("footprint must have positive width and height");
        }

        Ok(Ride {
            id,
            name,
            kind,
            bbox,
            capacity,
            duration,
            timing,
            state: RideState::Idle,
            timer: 0,
            phase: 0,
            queue: VecDeque::new(),
            riders: VecDeque::with_capacity(capacity),
            cycles_completed: 0,
            riders_served: 0,
        })
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the ride by one tick and report what happened.
    pub fn step(&mut self, now: Tick) -> Vec<RideEvent> {
        let mut events = Vec::new();

        self.timer = self.timer.saturating_sub(1);
        if self.timer > 0 {
            self.phase_work(now, &mut events);
            return events;
        }

        match self.state {
            RideState::Idle => {
                if !self.queue.is_empty() && self.has_capacity() {
                    self.timer = self.timing.loading_ticks;
                    self.phase = 0;
                    self.transition(RideState::Loading, now, &mut events);
                }
            }
            RideState::Loading => {
                while self.has_capacity() && !self.queue.is_empty() {
                    self.board_front(now, &mut events);
                }
                if self.riders.is_empty() {
                    self.transition(RideState::Idle, now, &mut events);
                } else {
                    debug!(
                        tick = now.0, ride = %self.name,
                        "ride starting with {}/{} passengers", self.riders.len(), self.capacity
                    );
                    self.timer = self.duration;
                    self.transition(RideState::Running, now, &mut events);
                }
            }
            RideState::Running => {
                debug!(tick = now.0, ride = %self.name, "ending cycle");
                self.timer = self.timing.unloading_ticks;
                self.phase = 0;
                self.transition(RideState::Unloading, now, &mut events);
            }
            RideState::Unloading => {
                while !self.riders.is_empty() {
                    self.eject_front(now, &mut events);
                }
                self.cycles_completed += 1;
                debug!(tick = now.0, ride = %self.name, "ready for new passengers");
                self.transition(RideState::Idle, now, &mut events);
            }
        }
        events
    }

    fn phase_work(&mut self, now: Tick, events: &mut Vec<RideEvent>) {
        match self.state {
            RideState::Loading => {
                self.phase += 1;
                if self.phase % 2 == 0 && self.has_capacity() && !self.queue.is_empty() {
                    self.board_front(now, events);
                }
            }
            RideState::Unloading => {
                self.phase += 1;
                if self.phase % 2 == 0 && !self.riders.is_empty() {
                    self.eject_front(now, events);
                }
            }
            RideState::Idle | RideState::Running => {}
        }
    }

    fn board_front(&mut self, now: Tick, events: &mut Vec<RideEvent>) {
        if let Some(patron) = self.queue.pop_front() {
            trace!(tick = now.0, ride = %self.name, %patron, "boarded");
            self.riders.push_back(patron);
            self.riders_served += 1;
            events.push(RideEvent::Boarded { ride: self.id, patron });
        }
    }

    fn eject_front(&mut self, now: Tick, events: &mut Vec<RideEvent>) {
        if let Some(patron) = self.riders.pop_front() {
            trace!(tick = now.0, ride = %self.name, %patron, "ejected");
            events.push(RideEvent::Ejected { ride: self.id, patron });
        }
    }

    fn transition(&mut self, to: RideState, now: Tick, events: &mut Vec<RideEvent>) {
        let from = self.state;
        self.state = to;
        debug!(tick = now.0, ride = %self.name, %from, %to, "ride state change");
        events.push(RideEvent::StateChanged { ride: self.id, from, to });
    }

    // ── Queue operations ──────────────────────────────────────────────────

    /// Append `patron` to the back of the queue.
    pub fn enqueue(&mut self, patron: PatronId) -> RideResult<()> {
        if self.is_member(patron) {
            return Err(RideError::AlreadyMember { ride: self.id, patron });
        }
        self.queue.push_back(patron);
        Ok(())
    }

    /// Remove `patron` from the queue.  Returns `false` if they were not in it.
    pub fn remove_from_queue(&mut self, patron: PatronId) -> bool {
        match self.queue.iter().position(|&p| p == patron) {
            Some(i) => {
                self.queue.remove(i);
                true
            }
            None => false,
        }
    }

    /// 1-based position of `patron` in the queue.
    pub fn queue_position(&self, patron: PatronId) -> Option<usize> {
        self.queue.iter().position(|&p| p == patron).map(|i| i + 1)
    }

    /// `true` if `patron` is queued for or riding this ride.
    pub fn is_member(&self, patron: PatronId) -> bool {
        self.queue.contains(&patron) || self.riders.contains(&patron)
    }

    #[inline]
    pub fn has_capacity(&self) -> bool {
        self.riders.len() < self.capacity
    }

    /// Back to a fresh `Idle` ride: lists cleared, counters zeroed.
    pub fn reset(&mut self) {
        self.state = RideState::Idle;
        self.timer = 0;
        self.phase = 0;
        self.queue.clear();
        self.riders.clear();
        self.cycles_completed = 0;
        self.riders_served = 0;
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline] pub fn id(&self) -> RideId { self.id }
    #[inline] pub fn name(&self) -> &str { &self.name }
    #[inline] pub fn kind(&self) -> RideKind { self.kind }
    #[inline] pub fn bbox(&self) -> BBox { self.bbox }
    #[inline] pub fn capacity(&self) -> usize { self.capacity }
    #[inline] pub fn duration(&self) -> u32 { self.duration }
    #[inline] pub fn timing(&self) -> RideTiming { self.timing }
    #[inline] pub fn state(&self) -> RideState { self.state }
    #[inline] pub fn timer(&self) -> u32 { self.timer }
    #[inline] pub fn queue(&self) -> &VecDeque<PatronId> { &self.queue }
    #[inline] pub fn riders(&self) -> &VecDeque<PatronId> { &self.riders }
    #[inline] pub fn queue_len(&self) -> usize { self.queue.len() }
    #[inline] pub fn rider_count(&self) -> usize { self.riders.len() }
    #[inline] pub fn cycles_completed(&self) -> u64 { self.cycles_completed }
    #[inline] pub fn riders_served(&self) -> u64 { self.riders_served }
}

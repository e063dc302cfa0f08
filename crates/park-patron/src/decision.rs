//! Where to go next, which ride to join, whether to go home.

use park_core::{PatronRng, Point};
use park_ride::Ride;

use crate::{BehaviorTuning, PatronContext, PatronProfile, PatronResult};
use crate::profile::patience_ratio;

// ── Scoring ───────────────────────────────────────────────────────────────────

/// Attractiveness of `ride` when picking a distant target.  The queue
/// penalty is capped so a popular ride never drops below
/// `preference − queue_penalty_cap`.
#[inline]
pub fn target_score(profile: &PatronProfile, ride: &Ride, tuning: &BehaviorTuning) -> f64 {
    let penalty = (ride.queue_len() as f64 * tuning.queue_penalty).min(tuning.queue_penalty_cap);
    profile.preference(ride.kind()) - penalty
}

/// Attractiveness of a ride the patron is standing next to.  Uncapped.
#[inline]
pub fn nearby_score(profile: &PatronProfile, ride: &Ride, tuning: &BehaviorTuning) -> f64 {
    profile.preference(ride.kind()) - ride.queue_len() as f64 * tuning.queue_penalty
}

// ── Target selection ──────────────────────────────────────────────────────────

/// Pick a new roaming target.
///
/// With probability `explore_probability` a random free point.  Otherwise
/// the approach point of a ride drawn uniformly from the `top_k` best rides
/// scoring above `attractive_threshold`, falling back to a random free
/// point when no ride qualifies.
pub fn choose_target(
    profile: &PatronProfile,
    ctx: &PatronContext<'_>,
    rng: &mut PatronRng,
) -> PatronResult<Point> {
    let tuning = ctx.tuning;
    if !rng.gen_bool(tuning.explore_probability) {
        let mut attractive: Vec<(f64, &Ride)> = ctx
            .rides
            .iter()
            .map(|r| (target_score(profile, r, tuning), r))
            .filter(|&(score, _)| score > tuning.attractive_threshold)
            .collect();
        // Stable: equal scores keep ride order.
        attractive.sort_by(|a, b| b.0.total_cmp(&a.0));
        attractive.truncate(tuning.top_k);
        if let Some(&(_, ride)) = rng.choose(&attractive) {
            return Ok(ride.bbox().approach_point(tuning.approach_offset));
        }
    }
    Ok(ctx.terrain.random_free_point(rng.inner())?)
}

/// The best ride the patron at `position` is standing next to, provided it
/// clears `nearby_min_score`.  Ties go to the lower `RideId`.
pub fn best_nearby_ride<'a>(
    profile: &PatronProfile,
    position: Point,
    ctx: &PatronContext<'a>,
) -> Option<&'a Ride> {
    let tuning = ctx.tuning;
    let mut best: Option<(f64, &'a Ride)> = None;
    for ride in ctx.rides {
        if !ctx.terrain.near(position, ride.bbox(), tuning.near_tolerance) {
            continue;
        }
        let score = nearby_score(profile, ride, tuning);
        if score <= tuning.nearby_min_score {
            continue;
        }
        if best.is_none_or(|(s, _)| score > s) {
            best = Some((score, ride));
        }
    }
    best.map(|(_, r)| r)
}

// ── Exit ──────────────────────────────────────────────────────────────────────

/// Roll the post-ride exit decision.
pub fn wants_to_exit(
    profile: &PatronProfile,
    rides_completed: u32,
    patience: u32,
    max_patience: u32,
    tuning: &BehaviorTuning,
    rng: &mut PatronRng,
) -> bool {
    rng.gen_bool(profile.exit_probability(rides_completed, patience, max_patience, tuning))
}

/// `true` if an abandoning impatient patron gives up on the park.
pub fn impatient_gives_up(
    patience: u32,
    max_patience: u32,
    tuning: &BehaviorTuning,
    rng: &mut PatronRng,
) -> bool {
    patience_ratio(patience, max_patience) < tuning.impatient_leave_ratio
        && rng.gen_bool(tuning.impatient_leave_probability)
}

//! Unit tests for park-patron.

#[cfg(test)]
mod fixtures {
    use park_core::{BBox, PatronId, PatronKind, PatronRng, RideId, RideKind};
    use park_ride::Ride;
    use park_terrain::Terrain;

    use crate::{BehaviorTuning, Patron};

    pub const COASTER_BOX: BBox = BBox::new(8, 4, 4, 3);
    pub const FERRIS_BOX: BBox = BBox::new(13, 4, 3, 3);

    pub fn terrain() -> Terrain {
        let mut t = Terrain::from_size(20, 20).unwrap();
        t.stamp_barrier(COASTER_BOX);
        t.stamp_barrier(FERRIS_BOX);
        t
    }

    pub fn rides() -> Vec<Ride> {
        vec![
            Ride::new(RideId(0), "Coaster", RideKind::RollerCoaster, COASTER_BOX, 4, 5).unwrap(),
            Ride::new(RideId(1), "Wheel", RideKind::FerrisWheel, FERRIS_BOX, 4, 5).unwrap(),
        ]
    }

    pub fn calm_tuning() -> BehaviorTuning {
        BehaviorTuning { explore_probability: 0.0, ..BehaviorTuning::default() }
    }

    pub fn patron(kind: PatronKind, id: u32) -> (Patron, PatronRng) {
        let mut rng = PatronRng::new(42, PatronId(id));
        let p = Patron::new(PatronId(id), kind, &BehaviorTuning::default(), &mut rng);
        (p, rng)
    }
}

#[cfg(test)]
mod profile {
    use park_core::{PatronId, PatronKind, PatronRng, RideKind};

    use crate::{BehaviorTuning, PatronProfile};

    #[test]
    fn kind_table() {
        let a = PatronProfile::for_kind(PatronKind::Adventurous);
        assert_eq!(a.speed, 0.8);
        assert_eq!(a.preference(RideKind::RollerCoaster), 0.95);
        assert_eq!(a.queue_tolerance, 8);
        let f = PatronProfile::for_kind(PatronKind::Family);
        assert_eq!(f.preference(RideKind::FerrisWheel), 0.8);
        assert_eq!(PatronProfile::for_kind(PatronKind::Impatient).patience_range, (10, 10));
    }

    #[test]
    fn explorer_patience_is_rolled_within_range() {
        let profile = PatronProfile::for_kind(PatronKind::Explorer);
        for i in 0..50 {
            let mut rng = PatronRng::new(3, PatronId(i));
            let p = profile.roll_patience(&mut rng);
            assert!((12..=22).contains(&p));
        }
    }

    #[test]
    fn exit_table_checks_highest_threshold_first() {
        let tuning = BehaviorTuning::default();
        let a = PatronProfile::for_kind(PatronKind::Adventurous);
        assert!((a.exit_probability(7, 25, 25, &tuning) - 0.8).abs() < 1e-12);
        assert!((a.exit_probability(4, 25, 25, &tuning) - 0.4).abs() < 1e-12);
        assert!((a.exit_probability(0, 25, 25, &tuning) - 0.1).abs() < 1e-12);

        let i = PatronProfile::for_kind(PatronKind::Impatient);
        assert!((i.exit_probability(5, 10, 10, &tuning) - 0.9).abs() < 1e-12);
        assert!((i.exit_probability(3, 10, 10, &tuning) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn eroded_patience_raises_exit_probability() {
        let tuning = BehaviorTuning::default();
        let a = PatronProfile::for_kind(PatronKind::Adventurous);
        assert!((a.exit_probability(0, 0, 25, &tuning) - 0.3).abs() < 1e-12);
        let i = PatronProfile::for_kind(PatronKind::Impatient);
        assert_eq!(i.exit_probability(5, 0, 10, &tuning), 1.0);
    }

    #[test]
    fn default_tuning_validates() {
        assert!(BehaviorTuning::default().validate().is_ok());
        let bad = BehaviorTuning { top_k: 0, ..BehaviorTuning::default() };
        assert!(bad.validate().is_err());
        let bad = BehaviorTuning { spawn_delay_min: 9, ..BehaviorTuning::default() };
        assert!(bad.validate().is_err());
        let bad = BehaviorTuning { explore_probability: 1.5, ..BehaviorTuning::default() };
        assert!(bad.validate().is_err());
    }
}

#[cfg(test)]
mod movement {
    use park_core::{BBox, PatronId, PatronRng, Point};
    use park_terrain::Terrain;

    use crate::movement::{Step, step_toward};

    #[test]
    fn open_field_advances_by_speed() {
        let t = Terrain::from_size(20, 20).unwrap();
        let mut rng = PatronRng::new(0, PatronId(0));
        let from = Point::new(5.0, 5.0);
        match step_toward(from, Point::new(15.0, 5.0), 0.8, 30.0, &t, &mut rng) {
            Step::Direct(p) => assert!((p.distance(from) - 0.8).abs() < 1e-12 && p.y == 5.0),
            other => panic!("expected a direct step, got {other:?}"),
        }
    }

    #[test]
    fn snaps_onto_close_target() {
        let t = Terrain::from_size(20, 20).unwrap();
        let mut rng = PatronRng::new(0, PatronId(0));
        let target = Point::new(5.3, 5.4);
        let next = step_toward(Point::new(5.0, 5.0), target, 1.0, 30.0, &t, &mut rng);
        assert_eq!(next, Step::Direct(target));
    }

    #[test]
    fn deflects_around_single_obstacle() {
        let mut t = Terrain::from_size(20, 20).unwrap();
        t.stamp_barrier(BBox::new(6, 10, 1, 1));
        let mut rng = PatronRng::new(0, PatronId(0));
        let from = Point::new(5.0, 10.0);
        match step_toward(from, Point::new(15.0, 10.0), 1.0, 90.0, &t, &mut rng) {
            Step::Deflected(p) => {
                assert!((p.x - 5.0).abs() < 1e-9);
                assert!(((p.y - 10.0).abs() - 1.0).abs() < 1e-9);
                assert!(t.is_free(p));
            }
            other => panic!("expected a deflection, got {other:?}"),
        }
    }

    #[test]
    fn stays_put_when_fully_blocked() {
        let mut t = Terrain::from_size(20, 20).unwrap();
        t.stamp_barrier(BBox::new(6, 8, 2, 5));
        for seed in 0..8 {
            let mut rng = PatronRng::new(seed, PatronId(0));
            let from = Point::new(5.0, 10.0);
            let step = step_toward(from, Point::new(15.0, 10.0), 1.0, 30.0, &t, &mut rng);
            assert_eq!(step, Step::Blocked);
            assert_eq!(step.resolve(from), from);
        }
    }
}

#[cfg(test)]
mod decision {
    use park_core::{PatronId, PatronKind, PatronRng, Point, Tick};

    use super::fixtures::{calm_tuning, rides, terrain, COASTER_BOX};
    use crate::decision::{best_nearby_ride, choose_target, target_score};
    use crate::{BehaviorTuning, PatronContext, PatronProfile};

    #[test]
    fn queue_penalty_is_capped_for_targets() {
        let mut rs = rides();
        for i in 0..20 {
            rs[0].enqueue(PatronId(100 + i)).unwrap();
        }
        let profile = PatronProfile::for_kind(PatronKind::Adventurous);
        let score = target_score(&profile, &rs[0], &BehaviorTuning::default());
        assert!((score - 0.45).abs() < 1e-12);
    }

    #[test]
    fn attractive_ride_becomes_target() {
        let (t, rs, tuning) = (terrain(), rides(), calm_tuning());
        let ctx = PatronContext::new(Tick(0), &t, &rs[..1], &tuning);
        let profile = PatronProfile::for_kind(PatronKind::Adventurous);
        let mut rng = PatronRng::new(1, PatronId(0));
        let target = choose_target(&profile, &ctx, &mut rng).unwrap();
        assert_eq!(target, COASTER_BOX.approach_point(0.25));
        assert!(t.is_free(target));
    }

    #[test]
    fn unattractive_rides_fall_back_to_free_point() {
        let (t, rs, tuning) = (terrain(), rides(), calm_tuning());
        let ctx = PatronContext::new(Tick(0), &t, &rs[..1], &tuning);
        let profile = PatronProfile::for_kind(PatronKind::Family);
        for seed in 0..10 {
            let mut rng = PatronRng::new(seed, PatronId(0));
            let target = choose_target(&profile, &ctx, &mut rng).unwrap();
            assert!(t.is_free(target));
            assert_ne!(target, COASTER_BOX.approach_point(0.25));
        }
    }

    #[test]
    fn nearby_prefers_best_score() {
        let (t, mut rs, tuning) = (terrain(), rides(), calm_tuning());
        // Between the two footprints: near both.
        let at = Point::new(12.5, 6.0);
        let adventurous = PatronProfile::for_kind(PatronKind::Adventurous);
        let family = PatronProfile::for_kind(PatronKind::Family);
        {
            let ctx = PatronContext::new(Tick(0), &t, &rs, &tuning);
            assert_eq!(best_nearby_ride(&adventurous, at, &ctx).map(|r| r.name()), Some("Coaster"));
            assert_eq!(best_nearby_ride(&family, at, &ctx).map(|r| r.name()), Some("Wheel"));
        }
        for i in 0..7 {
            rs[0].enqueue(PatronId(100 + i)).unwrap();
        }
        let ctx = PatronContext::new(Tick(0), &t, &rs, &tuning);
        assert_eq!(best_nearby_ride(&adventurous, at, &ctx).map(|r| r.name()), Some("Wheel"));
    }

    #[test]
    fn nothing_nearby_far_away() {
        let (t, rs, tuning) = (terrain(), rides(), calm_tuning());
        let ctx = PatronContext::new(Tick(0), &t, &rs, &tuning);
        let profile = PatronProfile::for_kind(PatronKind::Adventurous);
        assert!(best_nearby_ride(&profile, Point::new(3.0, 16.0), &ctx).is_none());
    }
}

#[cfg(test)]
mod queueing {
    use crate::BehaviorTuning;
    use crate::queueing::{abandon_threshold, patience_after_abandon, should_abandon};

    #[test]
    fn threshold_grows_with_position_and_caps() {
        let t = BehaviorTuning::default();
        assert!((abandon_threshold(1, &t) - 0.2).abs() < 1e-12);
        assert!((abandon_threshold(5, &t) - 0.6).abs() < 1e-12);
        assert!((abandon_threshold(50, &t) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn abandon_decision() {
        let t = BehaviorTuning::default();
        assert!(!should_abandon(3, 5, 5, &t));
        assert!(should_abandon(2, 5, 5, &t));
        assert!(!should_abandon(2, 5, 1, &t));
    }

    #[test]
    fn abandon_penalty_floors() {
        let t = BehaviorTuning::default();
        assert_eq!(patience_after_abandon(10, &t), 7);
        assert_eq!(patience_after_abandon(5, &t), 3);
        assert_eq!(patience_after_abandon(1, &t), 0);
    }
}

#[cfg(test)]
mod patron {
    use park_core::{PatronId, PatronKind, Point, RideId, Tick};

    use super::fixtures::{calm_tuning, patron, rides, terrain};
    use crate::{BehaviorTuning, PatronContext, PatronError, PatronIntent, PatronState};

    #[test]
    fn new_patron_is_spawning() {
        let (p, _) = patron(PatronKind::Family, 7);
        assert_eq!(p.name, "P007");
        assert_eq!(p.state, PatronState::Spawning);
        assert_eq!(p.patience, 18);
        assert!((3..=8).contains(&p.spawn_delay));
    }

    #[test]
    fn spawns_after_delay_at_spawn_point() {
        let (t, rs, tuning) = (terrain(), rides(), calm_tuning());
        let ctx = PatronContext::new(Tick(0), &t, &rs, &tuning);
        let (mut p, mut rng) = patron(PatronKind::Adventurous, 0);
        let delay = p.spawn_delay;
        for _ in 1..delay {
            p.step(&ctx, &mut rng).unwrap();
            assert_eq!(p.state, PatronState::Spawning);
        }
        p.step(&ctx, &mut rng).unwrap();
        assert_eq!(p.state, PatronState::Roaming);
        assert!(t.spawn_points().contains(&p.position));
    }

    #[test]
    fn roaming_next_to_ride_asks_to_join() {
        let (t, rs, tuning) = (terrain(), rides(), calm_tuning());
        let ctx = PatronContext::new(Tick(0), &t, &rs, &tuning);
        let (mut p, mut rng) = patron(PatronKind::Adventurous, 0);
        p.state = PatronState::Roaming;
        p.position = Point::new(10.0, 7.5);
        assert_eq!(p.step(&ctx, &mut rng).unwrap(), Some(PatronIntent::JoinQueue(RideId(0))));
    }

    #[test]
    fn long_queue_exceeds_tolerance() {
        let (t, mut rs, tuning) = (terrain(), rides(), calm_tuning());
        for i in 0..4 {
            rs[0].enqueue(PatronId(100 + i)).unwrap();
        }
        let ctx = PatronContext::new(Tick(0), &t, &rs[..1], &tuning);
        let (mut p, mut rng) = patron(PatronKind::Impatient, 0);
        p.state = PatronState::Roaming;
        p.position = Point::new(10.0, 7.5);
        assert_eq!(p.step(&ctx, &mut rng).unwrap(), None);
    }

    #[test]
    fn queueing_drains_patience_then_abandons() {
        let (t, mut rs, tuning) = (terrain(), rides(), calm_tuning());
        for i in 0..4 {
            rs[0].enqueue(PatronId(100 + i)).unwrap();
        }
        let (p0, mut rng) = patron(PatronKind::Family, 0);
        let mut p = p0.with_max_patience(5);
        rs[0].enqueue(p.id).unwrap();
        p.enter_queue(RideId(0), Tick(0));
        let ctx = PatronContext::new(Tick(1), &t, &rs, &tuning);

        assert_eq!(p.step(&ctx, &mut rng).unwrap(), None);
        assert_eq!(p.patience, 4);
        assert_eq!(p.step(&ctx, &mut rng).unwrap(), None);
        assert_eq!(p.patience, 3);
        assert_eq!(p.step(&ctx, &mut rng).unwrap(), Some(PatronIntent::AbandonQueue(RideId(0))));
        assert_eq!(p.patience, 2);
    }

    #[test]
    fn queueing_without_membership_is_an_error() {
        let (t, rs, tuning) = (terrain(), rides(), calm_tuning());
        let ctx = PatronContext::new(Tick(0), &t, &rs, &tuning);
        let (mut p, mut rng) = patron(PatronKind::Family, 0);
        p.enter_queue(RideId(1), Tick(0));
        assert!(matches!(p.step(&ctx, &mut rng), Err(PatronError::NotQueued { .. })));
    }

    #[test]
    fn ride_lifecycle_counters() {
        let tuning = BehaviorTuning::default();
        let (p0, _) = patron(PatronKind::Explorer, 3);
        let mut p = p0.with_max_patience(20);
        p.patience = 10;
        p.enter_queue(RideId(0), Tick(4));
        p.board(RideId(0), Tick(9));
        assert_eq!(p.state, PatronState::Riding);
        assert_eq!(p.total_queue_ticks, 5);
        p.finish_ride(&tuning);
        assert_eq!(p.state, PatronState::Roaming);
        assert_eq!(p.rides_completed, 1);
        assert_eq!(p.patience, 16);
        assert!(p.exit_check_pending);
        assert_eq!(p.current_ride, None);
        p.finish_ride(&tuning);
        assert_eq!(p.patience, 20);
    }

    #[test]
    fn abandon_reduces_patience() {
        let (t, tuning) = (terrain(), BehaviorTuning::default());
        let (mut p, mut rng) = patron(PatronKind::Adventurous, 0);
        assert!(matches!(
            p.abandon_queue(RideId(0), Tick(3), &t, &tuning, &mut rng),
            Err(PatronError::NotQueued { .. })
        ));
        p.enter_queue(RideId(0), Tick(0));
        p.patience = 10;
        p.abandon_queue(RideId(0), Tick(3), &t, &tuning, &mut rng).unwrap();
        assert_eq!(p.state, PatronState::Roaming);
        assert_eq!(p.patience, 7);
        assert_eq!(p.abandoned_queues, 1);
        assert_eq!(p.total_queue_ticks, 3);
    }

    #[test]
    fn exhausted_impatient_patron_may_leave() {
        let t = terrain();
        let tuning = BehaviorTuning { impatient_leave_probability: 1.0, ..BehaviorTuning::default() };
        let (mut p, mut rng) = patron(PatronKind::Impatient, 0);
        p.enter_queue(RideId(0), Tick(0));
        p.patience = 1;
        p.abandon_queue(RideId(0), Tick(2), &t, &tuning, &mut rng).unwrap();
        assert_eq!(p.state, PatronState::Leaving);
        assert!(t.exit_points().contains(&p.target.unwrap()));
    }

    #[test]
    fn exit_decision_then_leave_then_absorb() {
        let (t, rs, tuning) = (terrain(), rides(), calm_tuning());
        let (mut p, mut rng) = patron(PatronKind::Family, 0);
        p.profile.exit_table = [(0, 1.0), (0, 1.0)];
        p.position = t.exit_points()[0].offset(0.0, -2.0);
        p.enter_queue(RideId(0), Tick(0));
        p.board(RideId(0), Tick(1));
        p.finish_ride(&tuning);

        let ctx = PatronContext::new(Tick(2), &t, &rs, &tuning);
        p.step(&ctx, &mut rng).unwrap();
        assert_eq!(p.state, PatronState::Leaving);

        for _ in 0..200 {
            p.step(&ctx, &mut rng).unwrap();
            if p.state == PatronState::Left {
                break;
            }
        }
        assert_eq!(p.state, PatronState::Left);
        let frozen = p.position;
        for _ in 0..5 {
            assert_eq!(p.step(&ctx, &mut rng).unwrap(), None);
            assert_eq!(p.position, frozen);
        }
    }
}

#[cfg(test)]
mod store {
    use park_core::{PatronId, PatronKind};

    use crate::{BehaviorTuning, PatronState, PatronStore};

    #[test]
    fn populate_assigns_ids_in_order() {
        let kinds = [PatronKind::Family, PatronKind::Explorer, PatronKind::Impatient];
        let (store, rngs) = PatronStore::populate(&kinds, 5, &BehaviorTuning::default());
        assert_eq!(store.len(), 3);
        assert_eq!(rngs.len(), 3);
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![PatronId(0), PatronId(1), PatronId(2)]);
        assert_eq!(store.get(PatronId(1)).unwrap().kind, PatronKind::Explorer);
        assert!(store.get(PatronId(3)).is_none());
        assert_eq!(store.count_in(PatronState::Spawning), 3);
    }

    #[test]
    fn populate_is_deterministic() {
        let kinds = [PatronKind::Explorer; 16];
        let tuning = BehaviorTuning::default();
        let (a, _) = PatronStore::populate(&kinds, 77, &tuning);
        let (b, _) = PatronStore::populate(&kinds, 77, &tuning);
        let summary = |s: &PatronStore| {
            s.iter().map(|p| (p.max_patience, p.spawn_delay)).collect::<Vec<_>>()
        };
        assert_eq!(summary(&a), summary(&b));
    }
}

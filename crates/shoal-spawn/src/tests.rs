//! Unit tests for shoal-spawn.

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use shoal_core::Vec2;

    use crate::{SpawnError, load_roster_reader};

    const CSV: &[u8] = b"\
name,count,schooling,move_speed,random_spawn,spawn_x,spawn_y\n\
clownfish,40,true,2.0,true,,\n\
tang,12,1,2.5,0,3.0,-1.0\n\
shark,1,false,3.5,false,4.0,-2.0\n\
";

    #[test]
    fn loads_three_kinds() {
        let roster = load_roster_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.population(), 53);
    }

    #[test]
    fn parses_flags_and_spawn_points() {
        let roster = load_roster_reader(Cursor::new(CSV)).unwrap();
        let kinds: Vec<_> = roster.iter().map(|(_, k)| k.clone()).collect();
        assert!(kinds[0].schooling && kinds[0].random_spawn);
        assert!(kinds[1].schooling && !kinds[1].random_spawn);
        assert_eq!(kinds[1].spawn_point, Vec2::new(3.0, -1.0));
        assert!(!kinds[2].schooling);
        assert_eq!(kinds[2].move_speed, 3.5);
    }

    #[test]
    fn bad_bool_reports_line() {
        let csv = b"name,count,schooling,move_speed,random_spawn,spawn_x,spawn_y\n\
a,1,true,1.0,true,,\n\
b,1,maybe,1.0,true,,\n";
        let err = load_roster_reader(Cursor::new(&csv[..])).unwrap_err();
        match err {
            SpawnError::Parse(msg) => assert!(msg.contains("line 3"), "{msg}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn fixed_spawn_needs_coordinates() {
        let csv = b"name,count,schooling,move_speed,random_spawn,spawn_x,spawn_y\n\
a,1,true,1.0,false,,\n";
        assert!(matches!(
            load_roster_reader(Cursor::new(&csv[..])),
            Err(SpawnError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = crate::load_roster_csv(std::path::Path::new("/nonexistent/roster.csv")).unwrap_err();
        assert!(matches!(err, SpawnError::Io(_)));
    }
}

#[cfg(test)]
mod planner {
    use shoal_core::{AgentId, ArenaBounds, KindId, SchoolId, SimRng, Vec2};

    use crate::{KindSpec, Roster, SpawnError, SpawnPlanner, SpawnSettings};

    fn planner() -> SpawnPlanner {
        SpawnPlanner::new(SpawnSettings::default()).bounds(ArenaBounds::default())
    }

    fn roster() -> Roster {
        Roster::new(vec![
            KindSpec::new("clownfish", 40, true, 2.0),
            KindSpec::new("goby", 5, true, 1.5).at(Vec2::new(2.0, 1.0)),
            KindSpec::new("eel", 3, false, 1.0),
            KindSpec::new("crab", 2, false, 0.5).at(Vec2::new(-4.0, -3.0)),
        ])
    }

    #[test]
    fn cluster_counts() {
        let s = SpawnSettings::default();
        assert_eq!(s.cluster_count(1), 1);
        assert_eq!(s.cluster_count(14), 1);
        assert_eq!(s.cluster_count(30), 2);
        assert_eq!(s.cluster_count(40), 2);
        assert_eq!(s.cluster_count(500), 3);
    }

    #[test]
    fn agents_are_grouped_by_kind_in_roster_order() {
        let plan = planner().plan(&roster(), &mut SimRng::new(1)).unwrap();
        assert_eq!(plan.len(), 50);
        assert_eq!(plan.kind_count(), 4);
        // 40 clownfish -> 2 clusters, 5 goby -> 1 cluster.
        assert_eq!(plan.cluster_count(), 3);

        let kinds: Vec<u16> = plan.agents().iter().map(|a| a.kind.0).collect();
        assert!(kinds.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(plan.agents()[39].kind, KindId(0));
        assert_eq!(plan.agents()[40].kind, KindId(1));
    }

    #[test]
    fn empty_schooling_kind_adds_no_clusters() {
        let roster = Roster::new(vec![
            KindSpec::new("clownfish", 40, true, 2.0),
            KindSpec::new("ghost", 0, true, 1.0),
        ]);
        let plan = planner().plan(&roster, &mut SimRng::new(3)).unwrap();
        assert_eq!(plan.len(), 40);
        assert_eq!(plan.kind_count(), 2);
        assert_eq!(plan.cluster_count(), 2);
    }

    #[test]
    fn schools_alternate_between_clusters() {
        let plan = planner().plan(&roster(), &mut SimRng::new(2)).unwrap();
        assert_eq!(plan.agents()[0].school, SchoolId(0));
        assert_eq!(plan.agents()[1].school, SchoolId(1));
        assert_eq!(plan.agents()[2].school, SchoolId(0));
        // Solo kinds are all school 0.
        assert!(plan.agents()[45..].iter().all(|a| a.school == SchoolId(0)));
    }

    #[test]
    fn everything_spawns_inside_at_move_speed() {
        let bounds = ArenaBounds::default();
        for seed in 0..20 {
            let plan = planner().plan(&roster(), &mut SimRng::new(seed)).unwrap();
            for a in plan.agents() {
                assert!(bounds.contains(a.position), "{:?} outside", a.position);
                assert!((a.velocity.length() - a.max_speed).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn fixed_spawns_stay_near_spawn_point() {
        let plan = planner().plan(&roster(), &mut SimRng::new(3)).unwrap();
        for a in &plan.agents()[40..45] {
            let d = a.position.distance(Vec2::new(2.0, 1.0));
            assert!((0.3 - 1e-4..=1.5 + 1e-4).contains(&d), "goby at {d}");
        }
        for a in &plan.agents()[48..50] {
            assert!(a.position.distance(Vec2::new(-4.0, -3.0)) <= 0.5 + 1e-4);
        }
    }

    #[test]
    fn out_of_arena_spawn_point_is_clamped() {
        let roster = Roster::new(vec![KindSpec::new("lost", 4, false, 1.0).at(Vec2::new(100.0, 0.0))]);
        let plan = planner().plan(&roster, &mut SimRng::new(0)).unwrap();
        assert!(plan.agents().iter().all(|a| a.position.x == 10.0));
    }

    #[test]
    fn same_seed_same_plan() {
        let a = planner().plan(&roster(), &mut SimRng::new(77)).unwrap();
        let b = planner().plan(&roster(), &mut SimRng::new(77)).unwrap();
        assert_eq!(a.agents(), b.agents());
    }

    #[test]
    fn missing_bounds() {
        let err = SpawnPlanner::default().plan(&roster(), &mut SimRng::new(0)).unwrap_err();
        assert!(matches!(err, SpawnError::MissingBounds));
    }

    #[test]
    fn empty_roster_with_expected_population() {
        let err = planner()
            .expect_population(10)
            .plan(&Roster::default(), &mut SimRng::new(0))
            .unwrap_err();
        assert!(matches!(err, SpawnError::EmptyRoster { expected: 10 }));
    }

    #[test]
    fn empty_roster_without_population_is_fine() {
        let plan = planner().plan(&Roster::default(), &mut SimRng::new(0)).unwrap();
        assert!(plan.is_empty());
        let (store, _) = plan.into_store(0).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn population_mismatch() {
        let err = planner()
            .expect_population(49)
            .plan(&roster(), &mut SimRng::new(0))
            .unwrap_err();
        assert!(matches!(err, SpawnError::PopulationMismatch { expected: 49, got: 50 }));
    }

    #[test]
    fn rejects_bad_move_speed() {
        let roster = Roster::new(vec![KindSpec::new("stuck", 1, true, 0.0)]);
        let err = planner().plan(&roster, &mut SimRng::new(0)).unwrap_err();
        assert!(matches!(err, SpawnError::InvalidMoveSpeed { .. }));
    }

    #[test]
    fn into_store_builds_kind_ranges() {
        let (store, rngs) = planner()
            .plan(&roster(), &mut SimRng::new(5))
            .unwrap()
            .into_store(5)
            .unwrap();
        assert_eq!(store.count(), 50);
        assert_eq!(rngs.len(), 50);
        assert_eq!(store.kind_range(KindId(1)), 40..45);
        assert!(store.is_schooling(AgentId(0)));
        assert!(!store.is_schooling(AgentId(49)));
    }
}

//! Full generation-loop runs.

use canid_core::prelude::*;
use canid_runtime::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

fn wild(n: usize) -> Population {
    (0..n).map(|_| Wolf::new(0.55, 0.65, 0.85, 0.1, 0.1)).collect()
}

#[test]
fn domesticated_wolf_halts_in_its_generation() {
    let mut pop = wild(20);
    pop.wolves_mut()[7] = Wolf::new(0.9, 0.30, 0.02, 0.2, 0.4);

    let sim = SimulationLoop::resume(
        SimulationConfig::default(),
        SimulationState::new(pop.clone(), 3),
        StdRng::seed_from_u64(0),
        MemorySnapshots::new(),
    )
    .unwrap();
    let report = sim.run();

    match report.outcome {
        Outcome::Domesticated { generation, index, wolf, food } => {
            assert_eq!(generation, 3);
            assert_eq!(index, 7);
            assert_eq!(wolf.fear, 0.02);
            let model = FitnessModel::default();
            let expected = model.total_food(&pop.wolves()[7], pop.wolves(), pop.len());
            assert!((food - expected).abs() < 1e-12);
        }
        other => panic!("expected domestication, got {:?}", other),
    }
    assert_eq!(report.snapshots.written, 0);
}

#[test]
fn termination_is_first_found_not_best_found() {
    let mut pop = wild(20);
    pop.wolves_mut()[2] = Wolf::new(0.5, 0.34, 0.029, 0.1, 0.1);
    pop.wolves_mut()[5] = Wolf::new(0.5, 0.0, 0.0, 1.0, 1.0);

    let report = SimulationLoop::resume(
        SimulationConfig::default(),
        SimulationState::new(pop, 0),
        StdRng::seed_from_u64(0),
        NullSnapshots,
    )
    .unwrap()
    .run();

    assert!(matches!(report.outcome, Outcome::Domesticated { index: 2, .. }));
}

#[test]
fn end_to_end_runs_terminate_with_constant_population() {
    for seed in 0..3 {
        let mut sim = SimulationLoop::new(
            SimulationConfig::default(),
            StdRng::seed_from_u64(seed),
            MemorySnapshots::new(),
        )
        .unwrap();

        let mut summaries = 0u64;
        let outcome = sim.drive(|summary| {
            assert_eq!(summary.population, 20);
            summaries += 1;
        });

        assert!(outcome.generation() <= 5001);
        assert_eq!(summaries, outcome.generation());

        let generations = sim.sink().generations();
        assert_eq!(generations.len() as u64, outcome.generation() + 1);
        for (g, population) in generations {
            assert_eq!(population.len(), 20, "generation {} changed size", g);
            assert!(population.iter().all(Wolf::traits_in_bounds));
        }
    }
}

#[test]
fn legacy_switches_still_preserve_population_size() {
    let mut config = SimulationConfig::default();
    config.food.pack_census = PackCensus::Disabled;
    config.selection.strategy = SelectionStrategy::FirstCome;
    config.mutation.point_slots = 50;
    config.run.generation_cap = Some(200);

    let mut sim = SimulationLoop::new(config, StdRng::seed_from_u64(9), MemorySnapshots::new()).unwrap();
    let outcome = sim.drive(|summary| assert_eq!(summary.population, 20));

    assert!(outcome.generation() <= 201);
    assert!(sim
        .sink()
        .generations()
        .iter()
        .all(|(_, pop)| pop.len() == 20 && pop.iter().all(Wolf::traits_in_bounds)));
}

#[test]
fn smaller_population_settles_at_bred_size() {
    let mut config = SimulationConfig::default();
    config.population.size = 10; // E = 3, so bred generations hold 8.
    config.run.generation_cap = Some(50);

    let mut sim = SimulationLoop::new(config, StdRng::seed_from_u64(5), MemorySnapshots::new()).unwrap();
    sim.drive(|_| {});

    let generations = sim.sink().generations();
    assert_eq!(generations[0].1.len(), 10);
    assert!(generations[1..].iter().all(|(_, pop)| pop.len() == 8));
}

#[test]
fn background_snapshots_land_on_disk() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("generations");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("generation_999.json"), "{}").unwrap();
    prepare_snapshot_dir(&out).unwrap();

    let mut config = SimulationConfig::default();
    config.run.generation_cap = Some(10);
    let sink = BackgroundSnapshots::spawn(SnapshotStore::new(&out));
    let report = SimulationLoop::new(config, StdRng::seed_from_u64(1), sink)
        .unwrap()
        .run();

    let last = report.outcome.generation();
    assert_eq!(report.snapshots.written, last + 1);
    assert_eq!(report.snapshots.failed, 0);

    let store = SnapshotStore::new(&out);
    assert_eq!(store.generations().unwrap(), (0..=last).collect::<Vec<_>>());
    assert_eq!(store.load_generation(last).unwrap().len(), 20);
}

#[test]
fn unwritable_snapshot_dir_does_not_stop_the_run() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("never").join("created");

    let mut config = SimulationConfig::default();
    config.run.generation_cap = Some(30);
    let sink = BackgroundSnapshots::with_queue_depth(SnapshotStore::new(&missing), 2);
    let report = SimulationLoop::new(config, StdRng::seed_from_u64(4), sink)
        .unwrap()
        .run();

    let last = report.outcome.generation();
    assert!(last <= 31);
    if let Outcome::Exhausted { population, .. } = &report.outcome {
        assert_eq!(population.len(), 20);
    }
    assert_eq!(report.snapshots.written, 0);
    assert_eq!(report.snapshots.failed, last + 1);
    assert!(!missing.exists());
}

#[test]
fn uncapped_run_continues_past_default_cap() {
    let mut config = SimulationConfig::default();
    config.run.generation_cap = None;

    let mut sim = SimulationLoop::resume(
        config,
        SimulationState::new(wild(20), 6000),
        StdRng::seed_from_u64(2),
        NullSnapshots,
    )
    .unwrap();

    assert!(matches!(sim.step(), Step::Advanced(_)));
    assert_eq!(sim.state().generation, 6001);
}

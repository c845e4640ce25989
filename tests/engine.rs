use std::path::PathBuf;

use savanna::{
    engine::{Engine, EngineBuilder, EngineSettings},
    entity::Kind,
    scenario::{Scenario, ScenarioError, ScenarioLoader},
    systems::{LifecycleSystem, PurgeSystem, ReproductionSystem},
};

fn scenario_loader() -> ScenarioLoader {
    ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"))
}

fn build_engine(scenario: &Scenario, snapshot_dir: PathBuf, snapshot_interval: u64) -> Engine {
    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: scenario.seed,
        snapshot_interval_ticks: snapshot_interval,
        snapshot_dir,
    };
    let mut builder = EngineBuilder::new(settings).with_system(LifecycleSystem::new());
    if scenario.plant_reproduction {
        builder.push_system(ReproductionSystem::new());
    }
    builder.push_system(PurgeSystem::new());
    builder.build()
}

#[test]
fn scenario_loader_reads_meadow_fixture() {
    let scenario = scenario_loader()
        .load("scenarios/meadow.yaml")
        .expect("scenario parses");
    assert_eq!(scenario.name, "meadow");
    assert_eq!(scenario.grid_size, 10);
    assert_eq!(scenario.ticks(None), 5);
    assert!(!scenario.plant_reproduction);
    assert_eq!(scenario.entities.len(), 3);
    assert_eq!(scenario.entities[0].kind, Kind::Plant);
    assert_eq!(scenario.entities[0].position, [2, 3]);
}

#[test]
fn scenario_loader_reads_warren_fixture() {
    let scenario = scenario_loader()
        .load("scenarios/warren.yaml")
        .expect("scenario parses");
    assert_eq!(scenario.name, "warren");
    assert!(scenario.plant_reproduction);
    assert_eq!(scenario.entities.len(), 6);
    assert_eq!(scenario.entities[0].energy, Some(18));
}

#[test]
fn rejects_position_outside_the_grid() {
    let err = Scenario::from_yaml(
        "name: bad\nseed: 1\ngrid_size: 10\nentities:\n  - kind: plant\n    name: P\n    position: [10, 3]\n",
    )
    .unwrap_err();
    assert!(matches!(err, ScenarioError::Validation(_)));
}

#[test]
fn rejects_non_positive_grid_size() {
    let err = Scenario::from_yaml(
        "name: bad\nseed: 1\ngrid_size: 0\nentities:\n  - kind: plant\n    name: P\n    position: [0, 0]\n",
    )
    .unwrap_err();
    assert!(matches!(err, ScenarioError::Validation(_)));
}

#[test]
fn rejects_zero_ticks() {
    let err = Scenario::from_yaml(
        "name: bad\nseed: 1\ngrid_size: 4\nticks: 0\nentities:\n  - kind: plant\n    name: P\n    position: [0, 0]\n",
    )
    .unwrap_err();
    assert!(matches!(err, ScenarioError::Validation(_)));
}

#[test]
fn rejects_empty_seed_population() {
    let err =
        Scenario::from_yaml("name: bad\nseed: 1\ngrid_size: 4\nentities: []\n").unwrap_err();
    assert!(matches!(err, ScenarioError::Validation(_)));
}

#[test]
fn engine_runs_deterministically_for_a_seed() {
    let scenario = scenario_loader().load("scenarios/meadow.yaml").unwrap();

    let mut world_a = scenario.build_world();
    let mut engine_a = build_engine(&scenario, PathBuf::from("snapshots_test_a"), 0);
    engine_a.run(&mut world_a, 5).unwrap();

    let mut world_b = scenario.build_world();
    let mut engine_b = build_engine(&scenario, PathBuf::from("snapshots_test_b"), 0);
    engine_b.run(&mut world_b, 5).unwrap();

    assert_eq!(
        world_a.snapshot("meadow").entities,
        world_b.snapshot("meadow").entities
    );
}

#[test]
fn step_never_leaves_a_dead_survivor() {
    let scenario = scenario_loader().load("scenarios/warren.yaml").unwrap();
    let mut world = scenario.build_world();
    let mut engine = build_engine(&scenario, PathBuf::from("snapshots_unused"), 0);

    for _ in 0..20 {
        engine.step(&mut world).unwrap();
        assert!(world.entities().iter().all(|e| e.energy > 0));
    }
}

#[test]
fn survivors_keep_their_seed_order_across_steps() {
    let scenario = scenario_loader().load("scenarios/meadow.yaml").unwrap();
    let mut world = scenario.build_world();
    let seed_order: Vec<String> = world.entities().iter().map(|e| e.name.clone()).collect();
    let mut engine = build_engine(&scenario, PathBuf::from("snapshots_unused"), 0);

    for _ in 0..5 {
        engine.step(&mut world).unwrap();
        let mut expected = seed_order.iter();
        for entity in world.entities() {
            assert!(
                expected.any(|name| name == &entity.name),
                "survivor {} out of seed order",
                entity.name
            );
        }
    }
}

#[test]
fn reproduction_is_not_wired_by_default() {
    // Plant reproduction is opt-in; without the flag the plant population
    // can only shrink.
    let scenario = scenario_loader().load("scenarios/meadow.yaml").unwrap();
    let mut world = scenario.build_world();
    let mut engine = build_engine(&scenario, PathBuf::from("snapshots_unused"), 0);

    for _ in 0..10 {
        engine.step(&mut world).unwrap();
        let plants = world
            .entities()
            .iter()
            .filter(|e| e.kind == Kind::Plant)
            .count();
        assert!(plants <= 1);
    }
}

#[test]
fn reproduction_pass_appends_offspring_when_enabled() {
    let scenario = Scenario::from_yaml(
        "name: nursery\nseed: 3\ngrid_size: 5\nplant_reproduction: true\nentities:\n  - kind: plant\n    name: Clover\n    position: [2, 2]\n    energy: 18\n",
    )
    .unwrap();
    let mut world = scenario.build_world();
    let mut engine = build_engine(&scenario, PathBuf::from("snapshots_unused"), 0);

    engine.step(&mut world).unwrap();

    assert_eq!(world.entities().len(), 2);
    assert_eq!(
        world.entities()[0].energy,
        13,
        "parent grew to 23 then paid the reproduction cost"
    );
    let offspring = &world.entities()[1];
    assert_eq!(offspring.name, "Clover seedling");
    assert_eq!(
        offspring.energy, 10,
        "offspring appended mid-step is not acted on until the next step"
    );

    engine.step(&mut world).unwrap();
    assert_eq!(world.entities()[1].energy, 15, "offspring grows from the next step on");
}

#[test]
fn engine_emits_snapshots_at_the_configured_interval() {
    let scenario = scenario_loader().load("scenarios/meadow.yaml").unwrap();
    let temp_dir = tempfile::tempdir().unwrap();
    let snapshot_dir = temp_dir.path().join("snaps");

    let mut world = scenario.build_world();
    let mut engine = build_engine(&scenario, snapshot_dir.clone(), 2);
    engine.run(&mut world, 5).unwrap();

    let expected = snapshot_dir.join("meadow").join("tick_000002.json");
    assert!(
        expected.exists(),
        "expected snapshot {} to exist",
        expected.display()
    );
    assert!(snapshot_dir.join("meadow").join("tick_000004.json").exists());
    assert!(!snapshot_dir.join("meadow").join("tick_000003.json").exists());

    let data = std::fs::read_to_string(expected).unwrap();
    let value: serde_json::Value = serde_json::from_str(&data).unwrap();
    assert_eq!(value["scenario"], "meadow");
    assert_eq!(value["tick"], 2);
    assert!(value["entities"].is_array());
}

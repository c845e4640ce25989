use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use savanna::{
    engine::{EngineBuilder, EngineSettings},
    scenario::ScenarioLoader,
    systems::{LifecycleSystem, PurgeSystem, ReproductionSystem},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Grid ecosystem simulation runner")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/meadow.yaml")]
    scenario: PathBuf,

    /// Override step count (uses scenario default when omitted)
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override snapshot interval in ticks
    #[arg(long)]
    snapshot_interval: Option<u64>,

    /// Directory for snapshots
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,

    /// Suppress the per-step population report
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let scenario = loader.load(&cli.scenario)?;
    let mut world = scenario.build_world();
    let ticks = scenario.ticks(cli.ticks);
    let snapshot_interval = cli
        .snapshot_interval
        .unwrap_or(scenario.snapshot_interval_ticks);
    let snapshot_dir = cli
        .snapshot_dir
        .unwrap_or_else(|| PathBuf::from("snapshots"));

    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: cli.seed.unwrap_or(scenario.seed),
        snapshot_interval_ticks: snapshot_interval,
        snapshot_dir,
    };

    let mut builder = EngineBuilder::new(settings).with_system(LifecycleSystem::new());
    if scenario.plant_reproduction {
        builder.push_system(ReproductionSystem::new());
    }
    builder.push_system(PurgeSystem::new());
    let mut engine = builder.build();

    for step in 0..ticks {
        engine.step(&mut world)?;
        if !cli.quiet {
            println!("Step {}", step + 1);
            for entity in world.alive() {
                println!(
                    "{} at ({}, {}) with energy {}",
                    entity.name, entity.position.x, entity.position.y, entity.energy
                );
            }
            println!("==========================");
        }
    }

    println!(
        "Scenario '{}' completed after {} steps. Surviving entities: {}",
        scenario.name,
        ticks,
        world.live_count()
    );
    Ok(())
}

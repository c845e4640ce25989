use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::entity::Kind;
use crate::grid::{Grid, Position};
use crate::world::World;

fn default_snapshot_interval_ticks() -> u64 {
    0
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    pub grid_size: i32,
    #[serde(default)]
    pub ticks: Option<u64>,
    #[serde(default = "default_snapshot_interval_ticks")]
    pub snapshot_interval_ticks: u64,
    /// Wires the plant reproduction pass into the step. Off by default: the
    /// base design treats reproduction as a capability a caller opts into,
    /// not part of the automatic step.
    #[serde(default)]
    pub plant_reproduction: bool,
    pub entities: Vec<ScenarioEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioEntity {
    pub kind: Kind,
    pub name: String,
    pub position: [i32; 2],
    /// Initial energy; defaults to the species table when omitted.
    #[serde(default)]
    pub energy: Option<i32>,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("scenario validation error: {0}")]
    Validation(String),
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario, ScenarioError> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path).map_err(|source| ScenarioError::Io {
            path: path.clone(),
            source,
        })?;
        Scenario::from_yaml(&data)
    }
}

impl Scenario {
    pub fn from_yaml(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_yaml::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Configuration errors surface here, before any step runs.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.grid_size <= 0 {
            return Err(ScenarioError::Validation(format!(
                "grid size must be positive, got {}",
                self.grid_size
            )));
        }
        if self.ticks == Some(0) {
            return Err(ScenarioError::Validation(
                "tick count must be positive".to_string(),
            ));
        }
        if self.entities.is_empty() {
            return Err(ScenarioError::Validation(
                "scenario must seed at least one entity".to_string(),
            ));
        }
        let grid = Grid::new(self.grid_size);
        for seed in &self.entities {
            let position = Position {
                x: seed.position[0],
                y: seed.position[1],
            };
            if !grid.contains(position) {
                return Err(ScenarioError::Validation(format!(
                    "entity '{}' starts at ({}, {}), outside the {}x{} grid",
                    seed.name, position.x, position.y, self.grid_size, self.grid_size
                )));
            }
        }
        Ok(())
    }

    /// Seeds the world in list order, so collection order is scenario order.
    pub fn build_world(&self) -> World {
        let mut world = World::new(Grid::new(self.grid_size));
        for seed in &self.entities {
            let position = Position {
                x: seed.position[0],
                y: seed.position[1],
            };
            match seed.energy {
                Some(energy) => {
                    world.spawn_with_energy(seed.name.clone(), seed.kind, position, energy)
                }
                None => world.spawn(seed.name.clone(), seed.kind, position),
            };
        }
        world
    }

    pub fn ticks(&self, override_ticks: Option<u64>) -> u64 {
        override_ticks.or(self.ticks).unwrap_or(5)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::{Entity, EntityId, Kind};
use crate::grid::{Grid, Position};

/// A survivor of the purge was observed with non-positive energy. This means
/// the population state is corrupted; the run aborts rather than continuing.
#[derive(Debug, Error)]
#[error("entity '{name}' survived the purge with energy {energy}")]
pub struct InvariantViolation {
    pub name: String,
    pub energy: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: u64,
    pub name: String,
    pub kind: Kind,
    pub x: i32,
    pub y: i32,
    pub energy: i32,
    pub survival_rate: f32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub scenario: String,
    pub tick: u64,
    pub captured_at: DateTime<Utc>,
    pub population: usize,
    pub entities: Vec<EntitySnapshot>,
}

/// Exclusive owner of the entity collection. The collection is an ordered,
/// append-only sequence between purges: entities are appended by `spawn` and
/// removed only by `purge_dead`, so iteration order is insertion order.
pub struct World {
    next_entity: u64,
    tick: u64,
    grid: Grid,
    entities: Vec<Entity>,
}

impl World {
    pub fn new(grid: Grid) -> Self {
        Self {
            next_entity: 0,
            tick: 0,
            grid,
            entities: Vec::new(),
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn advance_time(&mut self) {
        self.tick += 1;
    }

    pub fn spawn(&mut self, name: impl Into<String>, kind: Kind, position: Position) -> EntityId {
        self.spawn_with_energy(name, kind, position, kind.initial_energy())
    }

    pub fn spawn_with_energy(
        &mut self,
        name: impl Into<String>,
        kind: Kind,
        position: Position,
        energy: i32,
    ) -> EntityId {
        let id = self.allocate();
        self.entities
            .push(Entity::new(id, name.into(), kind, position, energy));
        id
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn alive(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|entity| entity.is_alive())
    }

    pub fn live_count(&self) -> usize {
        self.alive().count()
    }

    /// Stable filter: survivors keep their relative order.
    pub fn purge_dead(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(Entity::is_alive);
        before - self.entities.len()
    }

    pub fn snapshot(&self, scenario: &str) -> WorldSnapshot {
        let entities: Vec<EntitySnapshot> = self
            .alive()
            .map(|entity| EntitySnapshot {
                id: entity.id.raw(),
                name: entity.name.clone(),
                kind: entity.kind,
                x: entity.position.x,
                y: entity.position.y,
                energy: entity.energy,
                survival_rate: entity.survival_rate,
            })
            .collect();
        WorldSnapshot {
            scenario: scenario.to_string(),
            tick: self.tick,
            captured_at: Utc::now(),
            population: entities.len(),
            entities,
        }
    }

    fn allocate(&mut self) -> EntityId {
        let id = EntityId::new(self.next_entity);
        self.next_entity += 1;
        id
    }
}

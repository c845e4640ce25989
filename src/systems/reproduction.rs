use anyhow::Result;
use rand::Rng;

use crate::{
    engine::{System, SystemContext},
    entity::Kind,
    rng::SystemRng,
    world::World,
};

const REPRODUCTION_THRESHOLD: i32 = 20;
const REPRODUCTION_COST: i32 = 10;

/// Opt-in pass: plants above the energy threshold pay the reproduction cost
/// and seed a new plant at a uniformly random cell. Not registered unless the
/// scenario enables `plant_reproduction`.
pub struct ReproductionSystem;

impl ReproductionSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReproductionSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for ReproductionSystem {
    fn name(&self) -> &str {
        "reproduction"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        reproduce_plants(world, rng);
        Ok(())
    }
}

/// Returns the number of offspring appended. Only plants present when the
/// pass began are considered, so offspring never reproduce in the same pass.
pub fn reproduce_plants(world: &mut World, rng: &mut impl Rng) -> usize {
    let grid = world.grid();
    let initial_len = world.entities().len();
    let mut spawned = 0;
    for index in 0..initial_len {
        let entity = &world.entities()[index];
        if entity.kind != Kind::Plant || entity.energy <= REPRODUCTION_THRESHOLD {
            continue;
        }
        let name = format!("{} seedling", entity.name);
        world.entities_mut()[index].energy -= REPRODUCTION_COST;
        let position = grid.random_position(rng);
        world.spawn(name, Kind::Plant, position);
        spawned += 1;
    }
    spawned
}

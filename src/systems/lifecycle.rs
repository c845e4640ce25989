use anyhow::Result;
use rand::Rng;

use crate::{
    engine::{System, SystemContext},
    entity::EntityId,
    rng::SystemRng,
    world::World,
};

/// The per-step pass over the population: each entity that is alive when its
/// turn comes acts, and animals then move and feed. Runs over the population
/// as it stood when the pass began, so entities appended mid-step wait for
/// the next step.
pub struct LifecycleSystem;

impl LifecycleSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LifecycleSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for LifecycleSystem {
    fn name(&self) -> &str {
        "lifecycle"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        run_lifecycle(world, rng);
        Ok(())
    }
}

pub fn run_lifecycle(world: &mut World, rng: &mut impl Rng) {
    let grid = world.grid();
    let initial_len = world.entities().len();
    for index in 0..initial_len {
        if !world.entities()[index].is_alive() {
            continue;
        }
        world.entities_mut()[index].act();
        if world.entities()[index].kind.is_animal() {
            world.entities_mut()[index].roam(grid, rng);
            feed(world, index);
        }
    }
}

/// Scan the collection in order for the first co-located prey matching the
/// predator's diet, excluding the predator itself. On a match the predator
/// gains its meal amount and the prey is marked dead; removal waits for the
/// purge. The scan does not skip prey already marked dead this step, so two
/// predators sharing a cell can both record the same kill before the purge
/// realizes it.
pub fn feed(world: &mut World, predator: usize) -> Option<EntityId> {
    let diet = world.entities()[predator].kind.diet()?;
    let position = world.entities()[predator].position;
    let prey = world
        .entities()
        .iter()
        .enumerate()
        .find_map(|(index, entity)| {
            (index != predator && diet.permits(entity.kind) && entity.position == position)
                .then_some(index)
        })?;
    let gain = world.entities()[predator].kind.meal_gain();
    let prey_id = world.entities()[prey].id;
    world.entities_mut()[prey].mark_dead();
    world.entities_mut()[predator].gain(gain);
    Some(prey_id)
}

use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::{InvariantViolation, World},
};

/// End-of-step removal of entities whose energy reached zero. This is the
/// only place entities leave the collection; the filter is stable so
/// survivors keep their order.
pub struct PurgeSystem;

impl PurgeSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PurgeSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for PurgeSystem {
    fn name(&self) -> &str {
        "purge"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        world.purge_dead();
        if let Some(entity) = world.entities().iter().find(|entity| !entity.is_alive()) {
            return Err(InvariantViolation {
                name: entity.name.clone(),
                energy: entity.energy,
            }
            .into());
        }
        Ok(())
    }
}

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::{Grid, Position};

const PLANT_GROWTH_PER_STEP: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Tagged entity kind. Per-species behavior dispatches on this instead of
/// runtime type inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Plant,
    Herbivore,
    Carnivore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diet {
    Plants,
    Animals,
}

impl Kind {
    pub fn is_animal(self) -> bool {
        !matches!(self, Kind::Plant)
    }

    pub fn diet(self) -> Option<Diet> {
        match self {
            Kind::Plant => None,
            Kind::Herbivore => Some(Diet::Plants),
            Kind::Carnivore => Some(Diet::Animals),
        }
    }

    /// Step-size bound for movement; zero for rooted kinds.
    pub fn speed(self) -> i32 {
        match self {
            Kind::Plant => 0,
            Kind::Herbivore => 2,
            Kind::Carnivore => 3,
        }
    }

    pub fn initial_energy(self) -> i32 {
        match self {
            Kind::Plant => 10,
            Kind::Herbivore => 20,
            Kind::Carnivore => 30,
        }
    }

    pub fn survival_rate(self) -> f32 {
        match self {
            Kind::Plant => 0.5,
            Kind::Herbivore => 0.6,
            Kind::Carnivore => 0.8,
        }
    }

    /// Energy gained from one successful meal.
    pub fn meal_gain(self) -> i32 {
        match self {
            Kind::Plant => 0,
            Kind::Herbivore => 10,
            Kind::Carnivore => 20,
        }
    }
}

impl Diet {
    pub fn permits(self, kind: Kind) -> bool {
        match self {
            Diet::Plants => kind == Kind::Plant,
            Diet::Animals => kind.is_animal(),
        }
    }
}

/// One occupant of the grid. Names are informational and need not be unique;
/// the survival rate is carried for reporting but no behavior consumes it.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub kind: Kind,
    pub energy: i32,
    pub position: Position,
    pub survival_rate: f32,
}

impl Entity {
    pub(crate) fn new(id: EntityId, name: String, kind: Kind, position: Position, energy: i32) -> Self {
        Self {
            id,
            name,
            kind,
            energy,
            position,
            survival_rate: kind.survival_rate(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.energy > 0
    }

    /// Consumption signal: zero the energy and leave removal to the purge.
    pub fn mark_dead(&mut self) {
        self.energy = 0;
    }

    pub fn gain(&mut self, amount: i32) {
        self.energy += amount;
    }

    /// Per-step self-update. Plants grow; animals have no intrinsic energy
    /// change (they only gain by feeding).
    pub fn act(&mut self) {
        if self.kind == Kind::Plant {
            self.energy += PLANT_GROWTH_PER_STEP;
        }
    }

    /// Displace each axis by a uniform draw over `[0, speed)` recentered by
    /// `speed / 2`, wrapped onto the grid. Costs no energy.
    pub fn roam(&mut self, grid: Grid, rng: &mut impl Rng) {
        let speed = self.kind.speed();
        if speed <= 0 {
            return;
        }
        let dx = rng.gen_range(0..speed) - speed / 2;
        let dy = rng.gen_range(0..speed) - speed / 2;
        self.position = grid.wrap(Position {
            x: self.position.x + dx,
            y: self.position.y + dy,
        });
    }
}

//! Toroidal grid - bounded integer coordinates with modulo wrap

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Cell coordinates, each component in `[0, grid_size)` for any position
/// produced by [`Grid::wrap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct Grid {
    size: i32,
}

impl Grid {
    pub fn new(size: i32) -> Self {
        Self { size }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// Wrap a displaced position back onto the grid. Euclidean remainder, so
    /// negative coordinates wrap to the far edge.
    pub fn wrap(&self, position: Position) -> Position {
        Position {
            x: position.x.rem_euclid(self.size),
            y: position.y.rem_euclid(self.size),
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        (0..self.size).contains(&position.x) && (0..self.size).contains(&position.y)
    }

    pub fn random_position(&self, rng: &mut impl Rng) -> Position {
        Position {
            x: rng.gen_range(0..self.size),
            y: rng.gen_range(0..self.size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn wrap_keeps_in_bounds_positions_unchanged() {
        let grid = Grid::new(10);
        let pos = Position { x: 3, y: 7 };
        assert_eq!(grid.wrap(pos), pos);
    }

    #[test]
    fn wrap_folds_both_edges() {
        let grid = Grid::new(10);
        assert_eq!(grid.wrap(Position { x: -1, y: 10 }), Position { x: 9, y: 0 });
        assert_eq!(grid.wrap(Position { x: 12, y: -3 }), Position { x: 2, y: 7 });
    }

    #[test]
    fn contains_rejects_out_of_range_components() {
        let grid = Grid::new(5);
        assert!(grid.contains(Position { x: 0, y: 4 }));
        assert!(!grid.contains(Position { x: 5, y: 0 }));
        assert!(!grid.contains(Position { x: 2, y: -1 }));
    }

    #[test]
    fn random_position_lands_on_the_grid() {
        let grid = Grid::new(3);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            assert!(grid.contains(grid.random_position(&mut rng)));
        }
    }
}

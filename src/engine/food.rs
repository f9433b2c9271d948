use super::geometry::{Coordinate, Grid};
use rand::{seq::IteratorRandom, Rng};
use std::collections::HashSet;
use thiserror::Error;

/// Lower bound on the number of random draws made before scanning the grid
const MIN_SAMPLE_ATTEMPTS: usize = 16;

/// Number of random draws per grid cell made before scanning the grid
const SAMPLE_ATTEMPTS_PER_CELL: usize = 4;

/// The single piece of food on the board
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    position: Coordinate,
}

impl Food {
    pub(crate) fn new(position: Coordinate) -> Food {
        Food { position }
    }

    pub(crate) fn position(self) -> Coordinate {
        self.position
    }

    /// Place food on a uniformly random cell of `grid` that is not in
    /// `occupied`.
    ///
    /// Cells are drawn at random a bounded number of times; if none of the
    /// draws is free, a free cell is instead chosen from a full scan of the
    /// grid.
    ///
    /// # Errors
    ///
    /// Returns [`FoodError::NoFreeCell`] if every cell is occupied.
    pub(crate) fn generate_random<R: Rng>(
        grid: Grid,
        occupied: &HashSet<Coordinate>,
        rng: &mut R,
    ) -> Result<Food, FoodError> {
        if grid.area() == 0 {
            return Err(FoodError::NoFreeCell);
        }
        let attempts = grid
            .area()
            .saturating_mul(SAMPLE_ATTEMPTS_PER_CELL)
            .max(MIN_SAMPLE_ATTEMPTS);
        let width = i32::from(grid.width);
        let height = i32::from(grid.height);
        for _ in 0..attempts {
            let pos = Coordinate::new(rng.random_range(0..width), rng.random_range(0..height));
            if !occupied.contains(&pos) {
                return Ok(Food::new(pos));
            }
        }
        tracing::warn!(
            attempts,
            occupied = occupied.len(),
            "Random food placement failed; scanning grid for a free cell"
        );
        grid.cells()
            .filter(|p| !occupied.contains(p))
            .choose(rng)
            .map(Food::new)
            .ok_or(FoodError::NoFreeCell)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum FoodError {
    #[error("no free cell left on the grid for food")]
    NoFreeCell,
}

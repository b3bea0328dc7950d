use log::debug;
use rand::Rng;

use crate::error::SimulationError;
use crate::grid::{Grid, Position};

/// Random probes per grid cell before falling back to enumerating free cells.
pub const SPAWN_ATTEMPTS_PER_CELL: usize = 4;

/// The single active food item.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
    /// Growth granted to the snake when eaten.
    pub value: usize,
}

impl Food {
    /// Places food at `position` and marks its cell on the grid.
    ///
    /// A zero `value` is rejected before the grid is touched.
    pub fn place(
        grid: &mut Grid,
        position: Position,
        value: usize,
    ) -> Result<Self, SimulationError> {
        if value == 0 {
            return Err(SimulationError::ZeroFoodValue);
        }

        grid.set_occupied(position, true)?;
        Ok(Self { position, value })
    }

    /// Places food on a random unoccupied cell.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        grid: &mut Grid,
        value: usize,
    ) -> Result<Self, SimulationError> {
        if value == 0 {
            return Err(SimulationError::ZeroFoodValue);
        }

        let position = spawn_position(rng, grid).ok_or(SimulationError::NoFreeCell {
            size: grid.size(),
        })?;
        debug!("spawning food worth {value} at ({}, {})", position.x, position.y);

        Self::place(grid, position, value)
    }
}

/// Picks a uniformly random unoccupied cell, or `None` when the grid is full.
///
/// Uses rejection sampling first. After [`SPAWN_ATTEMPTS_PER_CELL`] probes per
/// cell it enumerates the free cells instead, so a nearly full grid still
/// terminates.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, grid: &Grid) -> Option<Position> {
    let total_cells = grid.size().total_cells();
    if total_cells == 0 {
        return None;
    }

    let width = i32::from(grid.width());
    let height = i32::from(grid.height());
    for _ in 0..total_cells.saturating_mul(SPAWN_ATTEMPTS_PER_CELL) {
        let candidate = Position::new(rng.gen_range(0..width), rng.gen_range(0..height));
        if grid.is_occupied(candidate) == Ok(false) {
            return Some(candidate);
        }
    }

    let free: Vec<Position> = grid.free_cells().collect();
    if free.is_empty() {
        return None;
    }

    Some(free[rng.gen_range(0..free.len())])
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::error::SimulationError;
    use crate::grid::{Grid, Position};
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{Food, spawn_position};

    fn grid(width: u16, height: u16) -> Grid {
        Grid::new(GridSize { width, height })
    }

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = grid(8, 6);
        let snake = Snake::spawn(&mut grid, Position::new(0, 0), Direction::Right, 3)
            .expect("snake fits");

        for _ in 0..100 {
            let position = spawn_position(&mut rng, &grid).expect("grid has free cells");
            assert!(!snake.occupies(position));
            assert_eq!(grid.is_occupied(position), Ok(false));
        }
    }

    #[test]
    fn spawned_food_marks_its_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut grid = grid(10, 10);

        let food = Food::spawn(&mut rng, &mut grid, 2).expect("grid is empty");

        assert_eq!(food.value, 2);
        assert_eq!(grid.is_occupied(food.position), Ok(true));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn last_free_cell_is_found() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = grid(5, 4);
        let hole = Position::new(4, 3);
        for position in grid.free_cells().collect::<Vec<_>>() {
            if position != hole {
                grid.set_occupied(position, true).expect("in range");
            }
        }

        assert_eq!(spawn_position(&mut rng, &grid), Some(hole));
    }

    #[test]
    fn full_grid_reports_no_free_cell() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut grid = grid(3, 2);
        for position in grid.free_cells().collect::<Vec<_>>() {
            grid.set_occupied(position, true).expect("in range");
        }

        assert_eq!(
            Food::spawn(&mut rng, &mut grid, 1),
            Err(SimulationError::NoFreeCell {
                size: GridSize {
                    width: 3,
                    height: 2
                }
            })
        );
    }

    #[test]
    fn zero_value_food_is_rejected_without_marking() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut grid = grid(3, 3);

        assert_eq!(
            Food::place(&mut grid, Position::new(1, 1), 0),
            Err(SimulationError::ZeroFoodValue)
        );
        assert_eq!(
            Food::spawn(&mut rng, &mut grid, 0),
            Err(SimulationError::ZeroFoodValue)
        );
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn placing_food_off_grid_is_rejected() {
        let mut grid = grid(3, 3);

        assert!(Food::place(&mut grid, Position::new(3, 0), 1).is_err());
        assert_eq!(grid.occupied_count(), 0);
    }
}

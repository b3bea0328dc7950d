use crate::config::GridSize;
use crate::error::GridError;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
///
/// Signed so that a prospective head one step past a wall is representable.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring position one step towards `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Fixed-size occupancy map.
///
/// A cell is occupied iff the snake body or the active food covers it. The
/// grid does not know which; [`crate::snake::Snake`] and [`crate::food::Food`]
/// keep it in sync as they move and spawn.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    size: GridSize,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates a grid with every cell free.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![false; size.total_cells()],
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.size.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.size.height
    }

    /// Returns true when `position` can be indexed.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position.is_within_bounds(self.size)
    }

    /// Reads one cell.
    pub fn is_occupied(&self, position: Position) -> Result<bool, GridError> {
        self.index(position).map(|index| self.cells[index])
    }

    /// Writes one cell. Nothing is written when `position` is out of range.
    pub fn set_occupied(&mut self, position: Position, occupied: bool) -> Result<(), GridError> {
        let index = self.index(position)?;
        self.cells[index] = occupied;
        Ok(())
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }

    /// Iterates occupied cells in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions()
            .filter(|position| self.is_occupied(*position) == Ok(true))
    }

    /// Iterates free cells in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions()
            .filter(|position| self.is_occupied(*position) == Ok(false))
    }

    /// Iterates rows top to bottom; each row is indexed by `x`.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(usize::from(self.size.width).max(1))
    }

    fn positions(&self) -> impl Iterator<Item = Position> {
        let width = i32::from(self.size.width);
        let height = i32::from(self.size.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position { x, y }))
    }

    fn index(&self, position: Position) -> Result<usize, GridError> {
        let out_of_range = GridError::OutOfRange {
            position,
            size: self.size,
        };
        let (Ok(x), Ok(y)) = (usize::try_from(position.x), usize::try_from(position.y)) else {
            return Err(out_of_range);
        };

        let width = usize::from(self.size.width);
        if x >= width || y >= usize::from(self.size.height) {
            return Err(out_of_range);
        }

        Ok(y * width + x)
    }
}

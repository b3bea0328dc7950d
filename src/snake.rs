use std::collections::VecDeque;

use log::debug;

use crate::config::GridSize;
use crate::error::GridError;
use crate::food::Food;
use crate::grid::{Grid, Position};
use crate::input::{Direction, direction_change_is_valid};

/// Cell the seeded snake starts from before its initial moves.
pub const SEED_POSITION: Position = Position::new(3, 4);

/// Facing direction of the seeded snake.
pub const SEED_DIRECTION: Direction = Direction::Down;

/// Why a snake can no longer continue.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    /// The next head position lies outside the grid.
    Wall,
    /// The head already shares a cell with the tail.
    SelfOverlap,
}

/// Snake body, facing direction and the length it grows towards.
///
/// The body is split into `head` and a FIFO `tail` whose front is the oldest
/// cell. Growth is lazy: [`Snake::eat`] only raises `target_length`, and each
/// later move keeps the oldest tail cell until the body has caught up.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    head: Position,
    tail: VecDeque<Position>,
    direction: Direction,
    target_length: usize,
}

impl Snake {
    /// Creates the seeded snake: starts at [`SEED_POSITION`] facing
    /// [`SEED_DIRECTION`] and moves `target_length` times to lay out its body.
    pub fn new(grid: &mut Grid, target_length: usize) -> Result<Self, GridError> {
        Self::spawn(grid, SEED_POSITION, SEED_DIRECTION, target_length)
    }

    /// Creates a snake at `start` and synthesizes its body by moving
    /// `target_length` times towards `direction`.
    ///
    /// The resulting body is a straight segment of `target_length` cells whose
    /// head lies `target_length` cells past `start`. A target of zero is
    /// treated as one.
    pub fn spawn(
        grid: &mut Grid,
        start: Position,
        direction: Direction,
        target_length: usize,
    ) -> Result<Self, GridError> {
        grid.set_occupied(start, true)?;
        let mut snake = Self {
            head: start,
            tail: VecDeque::with_capacity(target_length),
            direction,
            target_length: target_length.max(1),
        };

        for _ in 0..snake.target_length {
            snake.move_forward(grid)?;
        }

        Ok(snake)
    }

    /// Turns towards `requested` unless it reverses the current direction.
    ///
    /// Returns whether the request was accepted.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if !direction_change_is_valid(self.direction, requested) {
            debug!(
                "ignoring reversal from {:?} to {:?}",
                self.direction, requested
            );
            return false;
        }

        self.direction = requested;
        true
    }

    /// Returns the head position for the next movement tick.
    #[must_use]
    pub fn next_head(&self) -> Position {
        self.head.step(self.direction)
    }

    /// Advances one cell and keeps `grid` in sync with the body.
    ///
    /// Fails without mutating anything when the next head is off the grid.
    pub fn move_forward(&mut self, grid: &mut Grid) -> Result<(), GridError> {
        let next_head = self.next_head();
        grid.set_occupied(next_head, true)?;

        self.tail.push_back(self.head);
        self.head = next_head;

        if self.len() > self.target_length {
            if let Some(oldest) = self.tail.pop_front() {
                // The head may have just entered the cell being vacated.
                if !self.occupies(oldest) {
                    grid.set_occupied(oldest, false)?;
                }
            }
        }

        Ok(())
    }

    /// Raises the target length by the food's value.
    pub fn eat(&mut self, food: &Food) {
        self.target_length = self.target_length.saturating_add(food.value);
    }

    /// Detects the terminal condition for the current state, if any.
    ///
    /// Walls are checked against the prospective next head, self overlap
    /// against the body as it stands now.
    #[must_use]
    pub fn collision(&self, bounds: GridSize) -> Option<Collision> {
        if !self.next_head().is_within_bounds(bounds) {
            return Some(Collision::Wall);
        }

        if self.head_overlaps_tail() {
            return Some(Collision::SelfOverlap);
        }

        None
    }

    /// Returns true if the head shares a cell with any tail cell.
    #[must_use]
    pub fn head_overlaps_tail(&self) -> bool {
        self.tail.contains(&self.head)
    }

    /// Returns true if any body cell covers `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.head == position || self.tail.contains(&position)
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.head
    }

    /// Tail cells, oldest first.
    pub fn tail(&self) -> impl Iterator<Item = &Position> {
        self.tail.iter()
    }

    /// Iterates over body cells from head to the oldest tail cell.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        std::iter::once(&self.head).chain(self.tail.iter().rev())
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Returns current body length, head included.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.tail.len()
    }

    /// Always false: the body keeps at least its head.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

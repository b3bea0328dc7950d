use thiserror::Error;

use crate::config::GridSize;
use crate::grid::Position;

/// Grid access outside `[0, width) × [0, height)`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GridError {
    #[error("cell ({}, {}) is outside the {}x{} grid", .position.x, .position.y, .size.width, .size.height)]
    OutOfRange { position: Position, size: GridSize },
}

/// Failures surfaced by a simulation tick or reset.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Food can only be placed on a free cell.
    #[error("cell ({}, {}) is already occupied", .position.x, .position.y)]
    CellOccupied { position: Position },

    /// Food must grant at least one cell of growth.
    #[error("food value must be at least 1")]
    ZeroFoodValue,

    /// Every cell is covered, so there is nowhere to put the next food item.
    #[error("no free cell left for food on the {}x{} grid", .size.width, .size.height)]
    NoFreeCell { size: GridSize },
}

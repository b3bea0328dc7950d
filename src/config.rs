use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::snake::SEED_POSITION;

/// Default display width in pixels.
pub const DEFAULT_DISPLAY_WIDTH: u32 = 300;

/// Default display height in pixels.
pub const DEFAULT_DISPLAY_HEIGHT: u32 = 300;

/// Default edge length of one grid cell in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 10;

/// Default snake target length at construction.
pub const DEFAULT_INITIAL_LENGTH: usize = 5;

/// Default growth granted by one food item.
pub const DEFAULT_FOOD_VALUE: usize = 1;

/// Default fixed tick rate of the driving loop.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 20;

/// Logical grid dimensions passed through the simulation as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Problems found while loading or validating a [`SimulationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cell size must be at least one pixel")]
    ZeroCellSize,

    #[error("tick rate must be at least one tick per second")]
    ZeroTickRate,

    #[error("initial snake length must be at least 1")]
    ZeroLength,

    #[error("food value must be at least 1")]
    ZeroFoodValue,

    #[error(
        "a {}x{} grid cannot hold a snake of length {initial_length} (need at least {min_width}x{min_height})",
        .size.width, .size.height
    )]
    GridTooSmall {
        size: GridSize,
        initial_length: usize,
        min_width: u32,
        min_height: u32,
    },

    #[error("grid of {width}x{height} cells exceeds the supported maximum of {max} per axis", max = u16::MAX)]
    GridTooLarge { width: u32, height: u32 },
}

/// Construction parameters shared by startup and every reset.
///
/// Missing keys in a config file fall back to the defaults above; unknown keys
/// are rejected so typos do not go unnoticed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub display_width: u32,
    pub display_height: u32,
    pub cell_size: u32,
    pub initial_length: usize,
    pub food_value: usize,
    pub ticks_per_second: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            display_width: DEFAULT_DISPLAY_WIDTH,
            display_height: DEFAULT_DISPLAY_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            initial_length: DEFAULT_INITIAL_LENGTH,
            food_value: DEFAULT_FOOD_VALUE,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
        }
    }
}

impl SimulationConfig {
    /// Reads a JSON config file and validates it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = serde_json::from_str::<Self>(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Grid dimensions in cells, using integer-truncating division.
    ///
    /// Axes that do not fit in `u16` saturate; [`Self::validate`] rejects them.
    #[must_use]
    pub fn grid_size(&self) -> GridSize {
        let (width, height) = self.cells_per_axis();
        GridSize {
            width: u16::try_from(width).unwrap_or(u16::MAX),
            height: u16::try_from(height).unwrap_or(u16::MAX),
        }
    }

    /// Wall-clock duration of one tick.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }

    /// Checks every invariant the simulation relies on at construction time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.initial_length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        if self.food_value == 0 {
            return Err(ConfigError::ZeroFoodValue);
        }

        let (width, height) = self.cells_per_axis();
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(ConfigError::GridTooLarge { width, height });
        }

        // The seeded snake grows straight down from the seed cell, and the
        // cell below its head must still be on the grid for the first move.
        let min_width = seed_axis(SEED_POSITION.x) + 1;
        let min_height = u32::try_from(self.initial_length)
            .unwrap_or(u32::MAX)
            .saturating_add(seed_axis(SEED_POSITION.y) + 2);
        if width < min_width || height < min_height {
            return Err(ConfigError::GridTooSmall {
                size: self.grid_size(),
                initial_length: self.initial_length,
                min_width,
                min_height,
            });
        }

        Ok(())
    }

    fn cells_per_axis(&self) -> (u32, u32) {
        let width = self.display_width.checked_div(self.cell_size).unwrap_or(0);
        let height = self.display_height.checked_div(self.cell_size).unwrap_or(0);
        (width, height)
    }
}

fn seed_axis(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

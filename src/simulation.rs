use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::food::Food;
use crate::grid::{Grid, Position};
use crate::input::Command;
use crate::snake::{Collision, Snake};

/// What happened during one [`Simulation::update`].
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TickReport {
    /// Set when the previous state was terminal and the game restarted first.
    pub restarted: Option<Collision>,
    /// The food item eaten this tick, if any.
    pub eaten: Option<Food>,
}

/// Result of one driving-loop step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// A quit signal was received earlier; the loop should halt.
    Stopped,
    Advanced(TickReport),
}

/// Owns the grid, the snake and the active food for one session.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    grid: Grid,
    snake: Snake,
    food: Food,
    stopped: bool,
    rng: StdRng,
}

impl Simulation {
    /// Creates a simulation seeded from OS entropy.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic simulation for tests and reproducible runs.
    pub fn new_with_seed(config: SimulationConfig, seed: u64) -> Result<Self, SimulationError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimulationConfig, mut rng: StdRng) -> Result<Self, SimulationError> {
        let (grid, snake, food) = build_board(&config, &mut rng)?;

        Ok(Self {
            config,
            grid,
            snake,
            food,
            stopped: false,
            rng,
        })
    }

    /// Returns true when the current state is terminal.
    ///
    /// Walls are judged from the prospective next head, self overlap from the
    /// body as it stands, so a fatal turn into the tail shows for one tick
    /// before it is detected.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.collision().is_some()
    }

    /// Which terminal rule currently applies, if any.
    #[must_use]
    pub fn collision(&self) -> Option<Collision> {
        self.snake.collision(self.grid.size())
    }

    /// Applies one tick's commands, moves the snake and handles food.
    ///
    /// On error the grid, the snake and the stopped flag are left as they were
    /// before the call.
    pub fn update(&mut self, commands: &[Command]) -> Result<TickReport, SimulationError> {
        let grid = self.grid.clone();
        let snake = self.snake.clone();
        let stopped = self.stopped;

        self.advance(commands).inspect_err(|_| {
            self.grid = grid;
            self.snake = snake;
            self.stopped = stopped;
        })
    }

    fn advance(&mut self, commands: &[Command]) -> Result<TickReport, SimulationError> {
        for command in commands {
            match *command {
                Command::Quit => self.stopped = true,
                Command::Direction(direction) => {
                    self.snake.set_direction(direction);
                }
            }
        }

        self.snake.move_forward(&mut self.grid)?;

        let mut report = TickReport::default();
        if self.snake.head() == self.food.position {
            let eaten = self.food;
            self.snake.eat(&eaten);
            self.spawn_food()?;
            report.eaten = Some(eaten);
        }

        Ok(report)
    }

    /// Runs one step of the driving loop: halt when stopped, restart when
    /// over, then update.
    ///
    /// A board with no room left for food counts as a finished game too.
    pub fn tick(&mut self, commands: &[Command]) -> Result<TickOutcome, SimulationError> {
        if self.stopped {
            return Ok(TickOutcome::Stopped);
        }

        let restarted = self.collision();
        if let Some(collision) = restarted {
            info!(
                "game over ({collision:?}) at length {}, restarting",
                self.snake.len()
            );
            self.reset()?;
        }

        match self.update(commands) {
            Ok(report) => Ok(TickOutcome::Advanced(TickReport {
                restarted,
                ..report
            })),
            Err(SimulationError::NoFreeCell { size }) => {
                info!(
                    "snake filled the {}x{} grid, restarting",
                    size.width, size.height
                );
                self.reset()?;
                self.stopped = commands.contains(&Command::Quit);
                Ok(TickOutcome::Advanced(TickReport {
                    restarted,
                    eaten: None,
                }))
            }
            Err(error) => Err(error),
        }
    }

    /// Rebuilds grid, snake and food from the construction parameters and
    /// clears the stopped flag.
    pub fn reset(&mut self) -> Result<(), SimulationError> {
        let (grid, snake, food) = build_board(&self.config, &mut self.rng)?;
        self.grid = grid;
        self.snake = snake;
        self.food = food;
        self.stopped = false;
        Ok(())
    }

    /// Replaces the active food with a freshly spawned one.
    pub fn spawn_food(&mut self) -> Result<Food, SimulationError> {
        self.food = Food::spawn(&mut self.rng, &mut self.grid, self.config.food_value)?;
        Ok(self.food)
    }

    /// Moves the active food to `position` with the given value.
    ///
    /// The old food cell is released unless the snake covers it. `position`
    /// must be inside the grid and free or already holding the food, and
    /// `value` must be at least 1.
    pub fn place_food(&mut self, position: Position, value: usize) -> Result<(), SimulationError> {
        if value == 0 {
            return Err(SimulationError::ZeroFoodValue);
        }
        if position != self.food.position && self.grid.is_occupied(position)? {
            debug!(
                "refusing to place food on occupied cell ({}, {})",
                position.x, position.y
            );
            return Err(SimulationError::CellOccupied { position });
        }

        if !self.snake.occupies(self.food.position) {
            self.grid.set_occupied(self.food.position, false)?;
        }
        self.food = Food::place(&mut self.grid, position, value)?;
        Ok(())
    }

    /// Occupancy snapshot for rendering.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Food {
        self.food
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

fn build_board(
    config: &SimulationConfig,
    rng: &mut StdRng,
) -> Result<(Grid, Snake, Food), SimulationError> {
    let mut grid = Grid::new(config.grid_size());
    let snake = Snake::new(&mut grid, config.initial_length)?;
    let food = Food::spawn(rng, &mut grid, config.food_value)?;
    Ok((grid, snake, food))
}

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use grid_snake::config::{ConfigError, SimulationConfig};
use grid_snake::input::collect_commands_until;
use grid_snake::simulation::{Simulation, TickOutcome};
use grid_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use log::{LevelFilter, debug, info};
use simplelog::WriteLogger;

/// Classic snake on a fixed grid, played in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file with simulation settings; the flags below override it.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Display width in pixels.
    #[arg(long)]
    display_width: Option<u32>,

    /// Display height in pixels.
    #[arg(long)]
    display_height: Option<u32>,

    /// Edge length of one grid cell in pixels.
    #[arg(long)]
    cell_size: Option<u32>,

    /// Initial snake length.
    #[arg(long = "length")]
    initial_length: Option<usize>,

    /// Growth granted by each food item.
    #[arg(long)]
    food_value: Option<usize>,

    /// Simulation ticks per second.
    #[arg(long = "fps")]
    ticks_per_second: Option<u32>,

    /// Seed for food placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Write a debug log to this file.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn simulation_config(&self) -> Result<SimulationConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)?,
            None => SimulationConfig::default(),
        };

        if let Some(display_width) = self.display_width {
            config.display_width = display_width;
        }
        if let Some(display_height) = self.display_height {
            config.display_height = display_height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(initial_length) = self.initial_length {
            config.initial_length = initial_length;
        }
        if let Some(food_value) = self.food_value {
            config.food_value = food_value;
        }
        if let Some(ticks_per_second) = self.ticks_per_second {
            config.ticks_per_second = ticks_per_second;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> io::Result<()> {
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    // Reported before raw mode so the message stays readable.
    let config = cli
        .simulation_config()
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    let mut simulation = match cli.seed {
        Some(seed) => Simulation::new_with_seed(config, seed),
        None => Simulation::new(config),
    }
    .map_err(io::Error::other)?;

    let size = config.grid_size();
    info!(
        "starting {}x{} grid at {} ticks/s",
        size.width, size.height, config.ticks_per_second
    );

    install_panic_hook();
    let mut session = TerminalSession::enter()?;
    run_loop(&mut session, &mut simulation)?;

    info!("stopped by player");
    Ok(())
}

fn run_loop(session: &mut TerminalSession, simulation: &mut Simulation) -> io::Result<()> {
    let interval = simulation.config().tick_interval();
    let mut next_tick = Instant::now();

    loop {
        let commands = collect_commands_until(next_tick)?;

        match simulation.tick(&commands).map_err(io::Error::other)? {
            TickOutcome::Stopped => return Ok(()),
            TickOutcome::Advanced(report) => {
                if let Some(food) = report.eaten {
                    debug!(
                        "ate food worth {}, length now {}",
                        food.value,
                        simulation.snake().len()
                    );
                }
            }
        }

        session.draw(simulation.grid())?;

        next_tick += interval;
        let now = Instant::now();
        if next_tick < now {
            next_tick = now;
        }
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    WriteLogger::init(
        LevelFilter::Debug,
        simplelog::Config::default(),
        File::create(path)?,
    )
    .map_err(io::Error::other)
}

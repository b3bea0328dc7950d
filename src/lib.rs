//! Fixed-tick grid snake simulation.
//!
//! The engine lives in [`grid`], [`snake`], [`food`] and [`simulation`].
//! [`input`], [`renderer`] and [`terminal_runtime`] are the thin terminal
//! adapters used by the `grid-snake` binary.

pub mod config;
pub mod error;
pub mod food;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod simulation;
pub mod snake;
pub mod terminal_runtime;

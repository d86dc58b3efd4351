//! Headless autopilot runs for tuning the game constants.
//!
//! Plays seeded runs through the same `Session` the terminal game uses, with
//! a simple jump heuristic standing in for the player, and summarises how far
//! each run got.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunRecord, SimReport};
pub use runner::{autopilot_should_jump, run_simulation};

//! Endless-runner simulation. Pure state plus a fixed-step `tick`; no I/O.

pub mod logic;
pub mod types;

pub use logic::{check_collision, jump, reset_game, tick, TickOutcome};
pub use types::{Bounds, Obstacle, Player, RunPhase, RunState};

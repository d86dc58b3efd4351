//! Simulation configuration.

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of runs to play
    pub num_runs: u32,

    /// Base seed; run `i` uses `seed + i`. None = fresh entropy per run.
    pub seed: Option<u64>,

    /// Runs still alive after this many ticks are stopped and marked timed out
    pub max_ticks_per_run: u64,

    /// Autopilot jumps when the next obstacle is this many ticks away at the
    /// current speed
    pub lookahead_ticks: f64,

    /// Game constants
    pub game: Config,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            max_ticks_per_run: 100_000,
            lookahead_ticks: 8.0,
            game: Config::default(),
        }
    }
}

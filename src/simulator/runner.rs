//! Simulation runner: one `Session` per run, driven tick by tick.

use super::config::SimConfig;
use super::report::{RunRecord, SimReport};
use crate::runner::{RunState, TickOutcome};
use crate::session::{Action, Session};
use crate::store::MemoryStore;

/// Play all configured runs and return the aggregated report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let seed = config.seed.map(|s| s.wrapping_add(run_idx as u64));
        let record = simulate_single_run(config, seed);
        log::debug!(
            "run {}/{}: score {} after {} ticks",
            run_idx + 1,
            config.num_runs,
            record.score,
            record.ticks
        );
        runs.push(record);
    }

    SimReport::from_runs(runs)
}

fn simulate_single_run(config: &SimConfig, seed: Option<u64>) -> RunRecord {
    let mut session = Session::new(config.game.clone(), MemoryStore::new(), seed);

    let mut ticks = 0;
    while ticks < config.max_ticks_per_run {
        if autopilot_should_jump(session.run(), config.lookahead_ticks) {
            session.handle(Action::JumpOrRestart);
        }
        ticks += 1;
        if let TickOutcome::GameOver { .. } = session.step() {
            break;
        }
    }

    RunRecord {
        seed,
        score: session.run().score,
        ticks,
        timed_out: session.run().is_running(),
    }
}

/// Jump when grounded and the nearest obstacle still ahead of the player is
/// within `lookahead_ticks` of travel.
pub fn autopilot_should_jump(run: &RunState, lookahead_ticks: f64) -> bool {
    if !run.is_running() || !run.player.grounded {
        return false;
    }
    let player_right = run.player.x + run.player.width;
    let reach = run.speed * lookahead_ticks;
    run.obstacles
        .iter()
        .filter(|o| o.right() >= run.player.x)
        .map(|o| o.x - player_right)
        .filter(|gap| *gap >= 0.0)
        .any(|gap| gap <= reach)
}

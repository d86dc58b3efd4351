//! The loop driver: owns a run, the best score and its store, and turns
//! player actions and elapsed time into simulation ticks.

use crate::config::Config;
use crate::runner::{self, RunState, TickOutcome};
use crate::scheduler::FixedStep;
use crate::store::{self, ScoreStore};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// UI-agnostic player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Space/Up or a click on the play field: jump while running, restart
    /// after game over.
    JumpOrRestart,
    /// The restart button. Works at any time.
    Restart,
    /// The mute button. Only flips a flag; there is no audio.
    ToggleMute,
}

pub struct Session<S: ScoreStore> {
    run: RunState,
    best: u32,
    /// Score of the most recently finished run.
    last_score: Option<u32>,
    /// Whether that run raised the best score. A tie does not count.
    last_run_new_best: bool,
    muted: bool,
    store: S,
    rng: StdRng,
    stepper: FixedStep,
}

impl<S: ScoreStore> Session<S> {
    /// Start a session. The best score is read from `store` once, here.
    /// `seed` makes obstacle generation reproducible.
    pub fn new(config: Config, store: S, seed: Option<u64>) -> Self {
        let best = store::load_best(&store);
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        log::info!("session start, best score {}", best);
        Self {
            stepper: FixedStep::new(config.tick_ms),
            run: RunState::new(config),
            best,
            last_score: None,
            last_run_new_best: false,
            muted: false,
            store,
            rng,
        }
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    /// Direct access for tests and tools that stage a scenario.
    pub fn run_mut(&mut self) -> &mut RunState {
        &mut self.run
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn last_score(&self) -> Option<u32> {
        self.last_score
    }

    pub fn last_run_new_best(&self) -> bool {
        self.last_run_new_best
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn handle(&mut self, action: Action) {
        match action {
            Action::JumpOrRestart => {
                if self.run.is_running() {
                    runner::jump(&mut self.run);
                } else {
                    self.restart();
                }
            }
            Action::Restart => self.restart(),
            Action::ToggleMute => {
                self.muted = !self.muted;
                log::debug!("muted: {}", self.muted);
            }
        }
    }

    pub fn restart(&mut self) {
        runner::reset_game(&mut self.run);
        self.stepper.reset();
        log::info!("run restarted");
    }

    /// Feed `dt_ms` of wall-clock time and run every tick that is due.
    /// Stops early at game over. Returns true if any tick ran.
    pub fn advance(&mut self, dt_ms: u64) -> bool {
        if !self.run.is_running() {
            return false;
        }
        let due = self.stepper.advance(dt_ms);
        let mut changed = false;
        for _ in 0..due {
            match self.step() {
                TickOutcome::Continued => changed = true,
                TickOutcome::GameOver { .. } => {
                    changed = true;
                    break;
                }
                TickOutcome::Idle => break,
            }
        }
        changed
    }

    /// Run exactly one tick. On game over the best score is updated and
    /// persisted if it improved.
    pub fn step(&mut self) -> TickOutcome {
        let outcome = runner::tick(&mut self.run, &mut self.rng);
        if let TickOutcome::GameOver { score } = outcome {
            self.record_score(score);
        }
        outcome
    }

    fn record_score(&mut self, score: u32) {
        self.last_score = Some(score);
        self.last_run_new_best = score > self.best;
        if !self.last_run_new_best {
            return;
        }
        self.best = score;
        log::info!("new best score {}", score);
        if let Err(e) = store::save_best(&mut self.store, score) {
            log::error!("could not save best score: {}", e);
        }
    }
}

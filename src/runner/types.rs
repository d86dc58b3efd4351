//! Runner data structures: player, obstacles, and the per-run state.

use crate::config::Config;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world units (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Inclusive overlap: rectangles that only touch along an edge intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        !(self.right() < other.x
            || self.x > other.right()
            || self.bottom() < other.y
            || self.y > other.bottom())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Vertical velocity per tick (negative = upward).
    pub velocity_y: f64,
    pub grounded: bool,
    pub gravity: f64,
    pub jump_impulse: f64,
}

impl Player {
    /// A player standing on the ground line.
    pub fn resting(config: &Config) -> Self {
        Self {
            x: config.player.x,
            y: config.world.ground_y() - config.player.height,
            width: config.player.width,
            height: config.player.height,
            velocity_y: 0.0,
            grounded: true,
            gravity: config.player.gravity,
            jump_impulse: config.player.jump_impulse,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Set once the player has cleared this obstacle and it has scored.
    pub passed: bool,
}

impl Obstacle {
    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    Running,
    GameOver,
}

/// Everything that changes during one run. Owned by the session; no globals.
#[derive(Debug, Clone)]
pub struct RunState {
    pub config: Config,
    pub player: Player,
    /// Live obstacles, oldest first.
    pub obstacles: Vec<Obstacle>,
    pub frame_count: u64,
    /// Current scroll speed in world units per tick.
    pub speed: f64,
    pub spawn_timer: u32,
    pub spawn_interval: u32,
    pub score: u32,
    pub phase: RunPhase,
}

impl RunState {
    pub fn new(config: Config) -> Self {
        Self {
            player: Player::resting(&config),
            obstacles: Vec::new(),
            frame_count: 0,
            speed: config.pace.base_speed,
            spawn_timer: 0,
            spawn_interval: config.spawn.first_interval,
            score: 0,
            phase: RunPhase::Running,
            config,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RunPhase::GameOver
    }

    /// Push a randomly sized obstacle just past the right edge, resting on
    /// the ground line.
    pub fn spawn_obstacle<R: Rng>(&mut self, rng: &mut R) {
        let sizes = &self.config.obstacle;
        let height = sizes.min_height + (rng.gen::<f64>() * sizes.height_jitter).round();
        let width = sizes.min_width + (rng.gen::<f64>() * sizes.width_jitter).round();
        let obstacle = Obstacle {
            x: self.config.world.width + self.config.spawn.offset_x,
            y: self.config.world.ground_y() - height,
            width,
            height,
            passed: false,
        };
        log::trace!(
            "spawned {}x{} obstacle at frame {}",
            width,
            height,
            self.frame_count
        );
        self.obstacles.push(obstacle);
    }

    /// Roll the frames until the next spawn.
    pub fn reroll_spawn_interval<R: Rng>(&mut self, rng: &mut R) {
        let spawn = &self.config.spawn;
        self.spawn_interval = if spawn.interval_jitter == 0 {
            spawn.interval_min
        } else {
            spawn
                .interval_min
                .saturating_add(rng.gen_range(0..spawn.interval_jitter))
        };
    }
}

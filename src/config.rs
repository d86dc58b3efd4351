//! Tunable game constants, loaded from an optional TOML file.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```toml
//! tick_ms = 16
//!
//! [pace]
//! base_speed = 6.0
//!
//! [scoring]
//! policy = "frame-cadence"
//! every = 10
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// How points are awarded during a run. Exactly one policy is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum ScoringPolicy {
    /// One point per obstacle, the first tick its right edge is left of the
    /// player's left edge.
    EdgePass,
    /// One point every `every` frames, independent of obstacles.
    FrameCadence { every: u32 },
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::EdgePass
    }
}

/// Play area in world units. The ground band occupies the bottom
/// `ground_height` units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub ground_height: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 300.0,
            ground_height: 20.0,
        }
    }
}

impl WorldConfig {
    /// Y of the ground line (top of the ground band).
    pub fn ground_y(&self) -> f64 {
        self.height - self.ground_height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub x: f64,
    pub width: f64,
    pub height: f64,
    /// Added to vertical velocity every tick (positive = downward).
    pub gravity: f64,
    /// Velocity set by a jump (negative = upward).
    pub jump_impulse: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            x: 60.0,
            width: 48.0,
            height: 48.0,
            gravity: 0.6,
            jump_impulse: -11.0,
        }
    }
}

/// Scroll speed ramp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaceConfig {
    pub base_speed: f64,
    pub speed_increment: f64,
    /// Frames between speed increments.
    pub speed_increase_every: u64,
}

impl Default for PaceConfig {
    fn default() -> Self {
        Self {
            base_speed: 5.0,
            speed_increment: 0.5,
            speed_increase_every: 600,
        }
    }
}

/// Spawn timer. After each spawn the interval is re-rolled in
/// `interval_min .. interval_min + interval_jitter`; a jitter of 0 keeps it fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub first_interval: u32,
    pub interval_min: u32,
    pub interval_jitter: u32,
    /// Obstacles appear this far past the right edge.
    pub offset_x: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            first_interval: 90,
            interval_min: 80,
            interval_jitter: 50,
            offset_x: 30.0,
        }
    }
}

/// Obstacle sizes are `min + round(uniform[0,1) * jitter)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub min_width: f64,
    pub width_jitter: f64,
    pub min_height: f64,
    pub height_jitter: f64,
    /// Obstacles are culled once their right edge is left of `-cull_margin`.
    pub cull_margin: f64,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            min_width: 28.0,
            width_jitter: 20.0,
            min_height: 30.0,
            height_jitter: 30.0,
            cull_margin: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Length of one simulation tick in milliseconds.
    pub tick_ms: u64,
    /// Player sprite file. Falls back to the data directory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprite: Option<PathBuf>,
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub pace: PaceConfig,
    pub spawn: SpawnConfig,
    pub obstacle: ObstacleConfig,
    pub scoring: ScoringPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            sprite: None,
            world: WorldConfig::default(),
            player: PlayerConfig::default(),
            pace: PaceConfig::default(),
            spawn: SpawnConfig::default(),
            obstacle: ObstacleConfig::default(),
            scoring: ScoringPolicy::default(),
        }
    }
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`. A missing file yields the defaults; a file that
    /// exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let config = Self::from_toml_str(&text)?;
                log::info!("loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject geometry and timing the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f64) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )))
            }
        }

        fn finite(name: &str, value: f64) -> Result<()> {
            if value.is_finite() {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )))
            }
        }

        for (name, value) in [
            ("world.ground_height", self.world.ground_height),
            ("player.x", self.player.x),
            ("player.gravity", self.player.gravity),
            ("player.jump_impulse", self.player.jump_impulse),
            ("pace.speed_increment", self.pace.speed_increment),
            ("spawn.offset_x", self.spawn.offset_x),
            ("obstacle.width_jitter", self.obstacle.width_jitter),
            ("obstacle.height_jitter", self.obstacle.height_jitter),
            ("obstacle.cull_margin", self.obstacle.cull_margin),
        ] {
            finite(name, value)?;
        }

        positive("world.width", self.world.width)?;
        positive("world.height", self.world.height)?;
        positive("player.width", self.player.width)?;
        positive("player.height", self.player.height)?;
        positive("pace.base_speed", self.pace.base_speed)?;
        positive("obstacle.min_width", self.obstacle.min_width)?;
        positive("obstacle.min_height", self.obstacle.min_height)?;

        if self.tick_ms == 0 {
            return Err(Error::InvalidConfig("tick_ms must be at least 1".into()));
        }
        if !(0.0..self.world.height).contains(&self.world.ground_height) {
            return Err(Error::InvalidConfig(format!(
                "world.ground_height {} must be in 0..{}",
                self.world.ground_height, self.world.height
            )));
        }
        if self.player.height > self.world.ground_y() {
            return Err(Error::InvalidConfig(format!(
                "player.height {} does not fit above the ground line at {}",
                self.player.height,
                self.world.ground_y()
            )));
        }
        if self.obstacle.min_height + self.obstacle.height_jitter > self.world.ground_y() {
            return Err(Error::InvalidConfig(
                "tallest obstacle does not fit above the ground line".into(),
            ));
        }
        if self.obstacle.width_jitter < 0.0 || self.obstacle.height_jitter < 0.0 {
            return Err(Error::InvalidConfig(
                "obstacle jitter must not be negative".into(),
            ));
        }
        if self.player.gravity < 0.0 || self.player.jump_impulse >= 0.0 {
            return Err(Error::InvalidConfig(
                "gravity must pull down and jump_impulse must point up".into(),
            ));
        }
        if self.pace.speed_increment < 0.0 {
            return Err(Error::InvalidConfig(
                "pace.speed_increment must not be negative".into(),
            ));
        }
        if self.pace.speed_increase_every == 0 {
            return Err(Error::InvalidConfig(
                "pace.speed_increase_every must be at least 1".into(),
            ));
        }
        if self.spawn.first_interval == 0 || self.spawn.interval_min == 0 {
            return Err(Error::InvalidConfig(
                "spawn intervals must be at least 1 frame".into(),
            ));
        }
        if self
            .spawn
            .interval_min
            .checked_add(self.spawn.interval_jitter)
            .is_none()
        {
            return Err(Error::InvalidConfig(format!(
                "spawn.interval_min + spawn.interval_jitter must not exceed {}",
                u32::MAX
            )));
        }
        if let ScoringPolicy::FrameCadence { every: 0 } = self.scoring {
            return Err(Error::InvalidConfig(
                "scoring.every must be at least 1 frame".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_world_constants() {
        let config = Config::default();
        assert_eq!(config.world.width, 900.0);
        assert_eq!(config.world.height, 300.0);
        assert_eq!(config.world.ground_y(), 280.0);
        assert_eq!(config.player.x, 60.0);
        assert_eq!(config.player.gravity, 0.6);
        assert_eq!(config.player.jump_impulse, -11.0);
        assert_eq!(config.pace.base_speed, 5.0);
        assert_eq!(config.pace.speed_increase_every, 600);
        assert_eq!(config.spawn.first_interval, 90);
        assert_eq!(config.tick_ms, 16);
        assert_eq!(config.scoring, ScoringPolicy::EdgePass);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = Config::from_toml_str(
            r#"
            tick_ms = 20

            [pace]
            base_speed = 7.5
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(config.tick_ms, 20);
        assert_eq!(config.pace.base_speed, 7.5);
        assert_eq!(config.pace.speed_increment, 0.5);
        assert_eq!(config.player, PlayerConfig::default());
    }

    #[test]
    fn test_frame_cadence_policy_parses() {
        let config = Config::from_toml_str(
            r#"
            [scoring]
            policy = "frame-cadence"
            every = 12
            "#,
        )
        .expect("scoring policy should parse");
        assert_eq!(config.scoring, ScoringPolicy::FrameCadence { every: 12 });
    }

    #[test]
    fn test_default_config_survives_toml_dump() {
        let config = Config::default();
        let text = config.to_toml_string().expect("serialize");
        let parsed = Config::from_toml_str(&text).expect("parse dump");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_player_taller_than_sky() {
        let mut config = Config::default();
        config.player.height = 500.0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_tick() {
        let mut config = Config::default();
        config.tick_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_cadence() {
        let mut config = Config::default();
        config.scoring = ScoringPolicy::FrameCadence { every: 0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_upward_gravity() {
        let mut config = Config::default();
        config.player.jump_impulse = 3.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_spawn_interval_overflow() {
        let result = Config::from_toml_str(
            "[spawn]\nfirst_interval = 1\ninterval_min = 4294967290\ninterval_jitter = 100\n",
        );
        assert!(matches!(result, Err(Error::InvalidConfig(_))));

        let mut config = Config::default();
        config.spawn.interval_min = u32::MAX - 10;
        config.spawn.interval_jitter = 10;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_nan_gravity() {
        let result = Config::from_toml_str("[player]\ngravity = nan\n");
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_non_finite_floats() {
        let cases: [fn(&mut Config); 9] = [
            |c| c.world.ground_height = f64::NAN,
            |c| c.player.x = f64::INFINITY,
            |c| c.player.gravity = f64::NAN,
            |c| c.player.jump_impulse = f64::NAN,
            |c| c.pace.speed_increment = f64::NAN,
            |c| c.spawn.offset_x = f64::NAN,
            |c| c.obstacle.width_jitter = f64::NAN,
            |c| c.obstacle.height_jitter = f64::INFINITY,
            |c| c.obstacle.cull_margin = f64::NAN,
        ];
        for (idx, corrupt) in cases.iter().enumerate() {
            let mut config = Config::default();
            corrupt(&mut config);
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "case {} accepted",
                idx
            );
        }
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = Config::from_toml_str("tick_ms = \"fast\"");
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("dino_sura_missing_config_81723.toml");
        let _ = fs::remove_file(&path);
        let config = Config::load(&path).expect("missing file is not an error");
        assert_eq!(config, Config::default());
    }
}

//! Game tuning.
//!
//! Every knob the simulation reads lives in [`GameConfig`], handed to the
//! [`Game`](crate::game::Game) once at start-up.  The defaults reproduce the
//! classic pacing; tests shrink periods to keep scenarios short.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Scene width in pixels.
    pub width: i32,
    /// Scene height in pixels.
    pub height: i32,
    pub star_count: usize,
    pub star_period_ms: u64,
    /// Render cadence: at most one frame per period.
    pub frame_period_ms: u64,
    /// Distance between the hero's centre and the bottom edge.
    pub hero_bottom_offset: i32,
    /// Click sampling window; at most one shot per window.
    pub fire_sample_ms: u64,
    /// Pixels a shot travels per frame.
    pub shooting_speed: i32,
    pub enemy_spawn_ms: u64,
    pub enemy_fire_ms: u64,
    /// Probability that an enemy fire tick actually fires.
    pub enemy_fire_chance: f64,
    pub enemy_march_ms: u64,
    /// Vertical pixels per march step.
    pub enemy_step: i32,
    /// Maximum horizontal drift per march step, either direction.
    pub enemy_jitter: i32,
    pub score_increment: u32,
    /// Fixed seed for the first session; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 800,
            height: 600,
            star_count: 100,
            star_period_ms: 40,
            frame_period_ms: 40,
            hero_bottom_offset: 30,
            fire_sample_ms: 200,
            shooting_speed: 15,
            enemy_spawn_ms: 1500,
            enemy_fire_ms: 2500,
            enemy_fire_chance: 0.5,
            enemy_march_ms: 40,
            enemy_step: 5,
            enemy_jitter: 15,
            score_increment: 5,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let periods = [
            ("star_period_ms", self.star_period_ms),
            ("frame_period_ms", self.frame_period_ms),
            ("fire_sample_ms", self.fire_sample_ms),
            ("enemy_spawn_ms", self.enemy_spawn_ms),
            ("enemy_fire_ms", self.enemy_fire_ms),
            ("enemy_march_ms", self.enemy_march_ms),
        ];
        if let Some(&(name, _)) = periods.iter().find(|(_, ms)| *ms == 0) {
            return Err(ConfigError::ZeroPeriod(name));
        }
        if !(0.0..=1.0).contains(&self.enemy_fire_chance) {
            return Err(ConfigError::FireChanceOutOfRange(self.enemy_fire_chance));
        }
        Ok(())
    }

    pub fn star_period(&self) -> Duration {
        Duration::from_millis(self.star_period_ms)
    }

    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(self.frame_period_ms)
    }

    pub fn fire_sample_period(&self) -> Duration {
        Duration::from_millis(self.fire_sample_ms)
    }

    pub fn enemy_spawn_period(&self) -> Duration {
        Duration::from_millis(self.enemy_spawn_ms)
    }

    pub fn enemy_fire_period(&self) -> Duration {
        Duration::from_millis(self.enemy_fire_ms)
    }

    pub fn enemy_march_period(&self) -> Duration {
        Duration::from_millis(self.enemy_march_ms)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    Read { path: String, reason: String },
    Parse(String),
    InvalidDimensions { width: i32, height: i32 },
    ZeroPeriod(&'static str),
    FireChanceOutOfRange(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, reason } => write!(f, "cannot read config {path}: {reason}"),
            Self::Parse(reason) => write!(f, "malformed config: {reason}"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "scene must be non-empty, got {width}x{height}")
            }
            Self::ZeroPeriod(name) => write!(f, "{name} must be greater than zero"),
            Self::FireChanceOutOfRange(p) => {
                write!(f, "enemy_fire_chance must lie in [0, 1], got {p}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

//! Data-driven wave balance
//!
//! Everything the wave director scales lives here so a host can tweak the
//! difficulty curve from a JSON file without recompiling.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::FormationPattern;

/// Wave and playfield tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Enemy count ===
    pub min_enemies: usize,
    pub max_enemies: usize,
    /// Extra enemies per wave after the first
    pub enemy_increase_rate: usize,

    // === Formations ===
    /// Fixed opening sequence; later waves pick from it at random
    pub patterns: Vec<FormationPattern>,

    // === Shooters ===
    /// Shooter count for waves 1..=len, indexed by wave - 1
    pub shooter_schedule: Vec<usize>,
    /// Shooter count once the schedule runs out
    pub default_shooters: usize,

    // === Difficulty ramp ===
    /// Horizontal speed gain per wave (0.1 = +10%)
    pub speed_step: f32,
    pub base_fire_interval_ms: u64,
    pub fire_interval_step_ms: u64,
    pub min_fire_interval_ms: u64,
    /// The fire interval drops one step every this many waves
    pub fire_ramp_every: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            min_enemies: 5,
            max_enemies: 18,
            enemy_increase_rate: 2,

            patterns: FormationPattern::ALL.to_vec(),

            shooter_schedule: vec![1, 2, 2, 3],
            default_shooters: 4,

            speed_step: 0.1,
            base_fire_interval_ms: 2000,
            fire_interval_step_ms: 250,
            min_fire_interval_ms: 750,
            fire_ramp_every: 5,
        }
    }
}

impl Tuning {
    /// Reject configurations that would produce an empty or unbounded wave
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_enemies == 0 {
            return Err(ConfigError::ZeroMinEnemies);
        }
        if self.max_enemies < self.min_enemies {
            return Err(ConfigError::MaxBelowMin {
                min: self.min_enemies,
                max: self.max_enemies,
            });
        }
        if self.patterns.is_empty() {
            return Err(ConfigError::EmptyPatternList);
        }
        let fits = self.playfield_width.is_finite()
            && self.playfield_height.is_finite()
            && self.playfield_width > ENEMY_SIZE.max(PLAYER_SIZE)
            && self.playfield_height > PLAYER_BOTTOM_OFFSET + ENEMY_SIZE;
        if !fits {
            return Err(ConfigError::PlayfieldTooSmall {
                width: self.playfield_width,
                height: self.playfield_height,
            });
        }
        // Negative steps stall or reverse later waves
        if !self.speed_step.is_finite() || self.speed_step < 0.0 {
            return Err(ConfigError::BadSpeedStep {
                step: self.speed_step,
            });
        }
        if self.min_fire_interval_ms == 0 {
            return Err(ConfigError::ZeroFireIntervalFloor);
        }
        if self.min_fire_interval_ms > self.base_fire_interval_ms {
            return Err(ConfigError::FireFloorAboveBase {
                floor_ms: self.min_fire_interval_ms,
                base_ms: self.base_fire_interval_ms,
            });
        }
        if self.fire_ramp_every == 0 {
            return Err(ConfigError::ZeroFireRamp);
        }
        Ok(())
    }

    /// Parse and validate tuning from JSON; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}

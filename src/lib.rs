//! Exostrike - a formation shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (formations, behaviors, tick, collisions)
//! - `game`: Host-side driver that wires the simulation to its collaborators
//! - `platform`: Clock, input, presentation and effect interfaces
//! - `persistence`: High-score storage
//! - `tuning`: Data-driven wave balance

pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, StoreError};
pub use game::Game;
pub use highscores::HighScores;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in milliseconds
    pub const TICK_MS: f64 = 1000.0 / TICKS_PER_SECOND as f64;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Distance from the bottom of the playfield to the player's top edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 60.0;
    pub const PLAYER_ACCELERATION: f32 = 0.5;
    pub const PLAYER_FRICTION: f32 = 0.92;
    pub const PLAYER_MAX_SPEED: f32 = 6.0;
    pub const PLAYER_LIVES: u8 = 3;
    /// Minimum time between player shots
    pub const PLAYER_SHOT_DELAY_MS: u64 = 250;

    /// Projectiles (player and enemy share the box)
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 12.0;
    pub const PLAYER_BULLET_SPEED: f32 = 10.0;
    pub const ENEMY_BULLET_SPEED: f32 = 5.0;
    /// Player bullets spawn this far above the ship
    pub const PLAYER_MUZZLE_OFFSET: f32 = 10.0;

    /// Enemy ships
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const ENEMY_BASE_SPEED: f32 = 2.0;
    pub const ENEMY_HEALTH: u8 = 1;

    /// Behavior tuning
    pub const LINEAR_DESCENT: f32 = 20.0;
    pub const SINE_DESCENT: f32 = 10.0;
    pub const ZIGZAG_DESCENT: f32 = 30.0;
    pub const SINE_AMPLITUDE: f32 = 30.0;
    pub const SINE_PHASE_RATE: f32 = 0.05;
    pub const CIRCULAR_RADIUS: f32 = 40.0;
    pub const CIRCULAR_PHASE_RATE: f32 = 0.03;
    pub const ZIGZAG_PHASE_RATE: f32 = 0.1;

    /// Formation layout
    pub const FORMATION_TOP: f32 = 50.0;
    pub const FORMATION_SPACING_X: f32 = 80.0;
    pub const FORMATION_SPACING_Y: f32 = 50.0;
    pub const V_ARM_STEP_X: f32 = 45.0;
    pub const V_ARM_STEP_Y: f32 = 30.0;
    pub const DIAMOND_SPACING_X: f32 = 60.0;
    pub const DIAMOND_SPACING_Y: f32 = 35.0;
    pub const CIRCLE_CENTER_Y: f32 = 150.0;
    pub const CIRCLE_MAX_RADIUS: f32 = 100.0;
    pub const CIRCLE_RADIUS_PER_ENEMY: f32 = 10.0;

    /// Scoring
    pub const SCORE_PER_KILL: u64 = 100;

    /// Particle bursts
    pub const BURST_PARTICLES: usize = 12;
    pub const PARTICLE_LIFETIME_TICKS: u32 = 30;
    pub const PARTICLE_MAX_SPEED: f32 = 3.0;
    pub const MAX_PARTICLES: usize = 256;
}

/// Axis-aligned box from a top-left corner and a size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    #[inline]
    pub fn from_top_left(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap: boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

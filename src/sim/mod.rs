//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (collection order, never hash order)
//! - No rendering, audio or storage dependencies

pub mod behavior;
pub mod collision;
pub mod formation;
pub mod state;
pub mod tick;
pub mod wave;

pub use behavior::Behavior;
pub use formation::{FormationPattern, generate};
pub use state::{
    Enemy, GameEvent, GameOverReason, GamePhase, GameState, Particle, Player, Projectile,
    SoundEffect,
};
pub use tick::{TickInput, tick};
pub use wave::{enemy_count, fire_interval_for_wave};

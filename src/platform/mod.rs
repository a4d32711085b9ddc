//! Platform abstraction layer
//!
//! The simulation core talks to the outside world only through these seams:
//! - Time (`time::Clock`)
//! - Input sampling (`input::InputSource`)
//! - Presentation of the post-tick world
//! - Effect signals (sound cues, screen shake)

pub mod input;
pub mod time;

pub use input::{Autopilot, InputSource, ScriptedInput};
pub use time::{Clock, ManualClock, SystemClock};

use crate::sim::{GameEvent, GameState, SoundEffect};

/// Receives the full world after each host frame. Read-only.
pub trait PresentationSink {
    fn present(&mut self, world: &GameState);
}

/// Receives discrete effect signals. Unimplemented hooks are no-ops.
pub trait EffectSink {
    fn emit(&mut self, _event: &GameEvent) {}
}

/// Presenter for headless runs: a HUD line whenever score, lives or wave change
#[derive(Debug, Default)]
pub struct LogPresenter {
    last_hud: Option<(u64, u8, u32)>,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresentationSink for LogPresenter {
    fn present(&mut self, world: &GameState) {
        let hud = (world.score, world.lives, world.wave);
        if self.last_hud == Some(hud) {
            return;
        }
        self.last_hud = Some(hud);
        log::info!(
            "Score: {}  Lives: {}  Wave: {}  Enemies: {}",
            world.score,
            world.lives,
            world.wave,
            world.enemies.len()
        );
    }
}

/// Stand-in audio backend: logs sound cues at trace level
#[derive(Debug, Default)]
pub struct LogEffects {
    muted: bool,
    played: u64,
}

impl LogEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute/unmute all cues
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Cues played so far
    pub fn played(&self) -> u64 {
        self.played
    }

    fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        self.played += 1;
        let name = match effect {
            SoundEffect::PlayerShot => "player_shot",
            SoundEffect::EnemyShot => "enemy_shot",
            SoundEffect::EnemyExplosion => "enemy_explosion",
            SoundEffect::PlayerHit => "player_hit",
            SoundEffect::WaveClear => "wave_clear",
            SoundEffect::GameOver => "game_over",
        };
        log::trace!("sfx {}", name);
    }
}

impl EffectSink for LogEffects {
    fn emit(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Sound(effect) => self.play(*effect),
            GameEvent::ScreenShake { intensity } => log::trace!("screen shake {:.1}", intensity),
            _ => {}
        }
    }
}

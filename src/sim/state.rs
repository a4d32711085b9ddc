//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]; hosts get a
//! read-only view of it between ticks.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::behavior::Behavior;
use super::formation::FormationPattern;
use super::wave;
use crate::Aabb;
use crate::consts::*;
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Particle colors (0xRRGGBB)
pub const ENEMY_BURST_COLOR: u32 = 0xFF4020;
pub const PLAYER_BURST_COLOR: u32 = 0xFFFFFF;
pub const PLAYER_BULLET_COLOR: u32 = 0x00FF00;
pub const ENEMY_BULLET_COLOR: u32 = 0xFF0000;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Lives reached zero
    LivesExhausted,
    /// An enemy reached the player's row
    Invaded,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    GameOver { reason: GameOverReason },
}

impl GamePhase {
    pub fn is_game_over(&self) -> bool {
        matches!(self, GamePhase::GameOver { .. })
    }
}

/// Sound cues for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    PlayerShot,
    EnemyShot,
    EnemyExplosion,
    PlayerHit,
    WaveClear,
    GameOver,
}

/// Discrete signals emitted during a tick, drained by the host afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerFired,
    EnemyFired { enemy_id: u32 },
    EnemyDestroyed { enemy_id: u32, pos: Vec2 },
    PlayerHit { lives_left: u8 },
    ScreenShake { intensity: f32 },
    WaveCleared { wave: u32 },
    WaveStarted {
        wave: u32,
        pattern: FormationPattern,
        enemies: usize,
    },
    GameOver {
        score: u64,
        wave: u32,
        reason: GameOverReason,
    },
    Sound(SoundEffect),
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    /// Sim time of the last shot; `None` until the first one
    pub last_shot_ms: Option<u64>,
}

impl Player {
    /// Spawn centered near the bottom of the playfield
    pub fn new(playfield_width: f32, playfield_height: f32) -> Self {
        Self {
            pos: Vec2::new(
                (playfield_width - PLAYER_SIZE) / 2.0,
                playfield_height - PLAYER_BOTTOM_OFFSET,
            ),
            vel: Vec2::ZERO,
            last_shot_ms: None,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_top_left(self.pos, Vec2::splat(PLAYER_SIZE))
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    /// Accelerate on held direction, apply friction, integrate and clamp
    pub fn steer(&mut self, left: bool, right: bool, playfield_width: f32) {
        if left {
            self.vel.x -= PLAYER_ACCELERATION;
        }
        if right {
            self.vel.x += PLAYER_ACCELERATION;
        }
        // Friction applies every tick, held or not
        self.vel.x = (self.vel.x * PLAYER_FRICTION).clamp(-PLAYER_MAX_SPEED, PLAYER_MAX_SPEED);
        self.pos.x = (self.pos.x + self.vel.x).clamp(0.0, playfield_width - PLAYER_SIZE);
    }

    /// Fire if the global cooldown has elapsed
    pub fn try_fire(&mut self, now_ms: u64) -> Option<Projectile> {
        let ready = self
            .last_shot_ms
            .is_none_or(|last| now_ms.saturating_sub(last) > PLAYER_SHOT_DELAY_MS);
        if !ready {
            return None;
        }
        self.last_shot_ms = Some(now_ms);
        let muzzle = Vec2::new(
            self.pos.x + (PLAYER_SIZE - BULLET_WIDTH) / 2.0,
            self.pos.y - PLAYER_MUZZLE_OFFSET,
        );
        Some(Projectile::player(muzzle))
    }
}

/// An enemy ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    /// Spawn position; periodic behaviors move relative to it
    pub anchor: Vec2,
    pub behavior: Behavior,
    /// Radians, advanced by periodic behaviors
    pub phase: f32,
    pub can_fire: bool,
    pub last_fired_ms: u64,
    pub health: u8,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, behavior: Behavior, phase: f32, spawned_ms: u64) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::new(ENEMY_BASE_SPEED, 0.0),
            anchor: pos,
            behavior,
            phase,
            can_fire: false,
            last_fired_ms: spawned_ms,
            health: ENEMY_HEALTH,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_top_left(self.pos, Vec2::splat(ENEMY_SIZE))
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    pub fn take_hit(&mut self) {
        self.health = self.health.saturating_sub(1);
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Fire downward if this enemy is a shooter and its own cooldown elapsed
    pub fn try_fire(&mut self, now_ms: u64, fire_interval_ms: u64) -> Option<Projectile> {
        if !self.can_fire || now_ms.saturating_sub(self.last_fired_ms) <= fire_interval_ms {
            return None;
        }
        self.last_fired_ms = now_ms;
        let muzzle = Vec2::new(
            self.pos.x + (ENEMY_SIZE - BULLET_WIDTH) / 2.0,
            self.pos.y + ENEMY_SIZE,
        );
        Some(Projectile::enemy(muzzle))
    }
}

/// A bullet. Ownership is implied by which collection holds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
}

impl Projectile {
    pub fn player(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            color: PLAYER_BULLET_COLOR,
        }
    }

    pub fn enemy(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, ENEMY_BULLET_SPEED),
            color: ENEMY_BULLET_COLOR,
        }
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_top_left(self.pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT))
    }

    /// Fully above the top edge or below the bottom edge
    pub fn is_out_of_bounds(&self, playfield_height: f32) -> bool {
        self.pos.y + BULLET_HEIGHT < 0.0 || self.pos.y > playfield_height
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining ticks
    pub life: u32,
    pub color: u32,
}

impl Particle {
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_dead(&self) -> bool {
        self.life == 0
    }
}

/// Complete session and world state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Validated on construction and on deserialize, read-only afterwards
    #[serde(deserialize_with = "validated_tuning")]
    pub(crate) tuning: Tuning,
    /// Current wave (1-based)
    pub wave: u32,
    pub lives: u8,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Timestamp of the latest tick
    pub now_ms: u64,
    pub phase: GamePhase,
    /// Current per-enemy cooldown between shots
    pub fire_interval_ms: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Projectile>,
    pub enemy_bullets: Vec<Projectile>,
    pub particles: Vec<Particle>,
    /// Events from the latest tick
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

/// Saved states go through the same checks as `GameState::new`
fn validated_tuning<'de, D>(deserializer: D) -> Result<Tuning, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let tuning = Tuning::deserialize(deserializer)?;
    tuning.validate().map_err(serde::de::Error::custom)?;
    Ok(tuning)
}

impl GameState {
    /// Validate tuning and start wave 1
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;

        let mut state = Self {
            seed,
            player: Player::new(tuning.playfield_width, tuning.playfield_height),
            fire_interval_ms: tuning.base_fire_interval_ms,
            tuning,
            wave: 1,
            lives: PLAYER_LIVES,
            score: 0,
            time_ticks: 0,
            now_ms: 0,
            phase: GamePhase::Playing,
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        wave::start_wave(&mut state);

        Ok(state)
    }

    /// Reset the session to wave 1. The RNG keeps running.
    pub fn restart(&mut self) {
        self.wave = 1;
        self.lives = PLAYER_LIVES;
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.fire_interval_ms = self.tuning.base_fire_interval_ms;
        self.player = Player::new(self.tuning.playfield_width, self.tuning.playfield_height);
        self.enemies.clear();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.particles.clear();
        self.events.clear();

        log::info!("Session restarted");
        wave::start_wave(self);
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    /// Events emitted by the latest tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reserve `count` consecutive entity IDs, returning the first
    pub fn reserve_ids(&mut self, count: usize) -> u32 {
        let first = self.next_id;
        self.next_id += count as u32;
        first
    }

    /// Enter game over. Returns false if the run had already ended.
    pub fn end_game(&mut self, reason: GameOverReason) -> bool {
        if self.phase.is_game_over() {
            return false;
        }
        self.phase = GamePhase::GameOver { reason };
        self.events.push(GameEvent::GameOver {
            score: self.score,
            wave: self.wave,
            reason,
        });
        self.events.push(GameEvent::Sound(SoundEffect::GameOver));
        log::info!(
            "Game over ({:?}) on wave {} with score {}",
            reason,
            self.wave,
            self.score
        );
        true
    }

    /// Emit a burst of particles with random velocities, respecting the cap
    pub fn spawn_burst(&mut self, center: Vec2, color: u32) {
        let room = MAX_PARTICLES.saturating_sub(self.particles.len());
        for _ in 0..BURST_PARTICLES.min(room) {
            let vel = Vec2::new(
                self.rng.random_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
                self.rng.random_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
            );
            let life = self
                .rng
                .random_range(PARTICLE_LIFETIME_TICKS / 2..=PARTICLE_LIFETIME_TICKS);
            self.particles.push(Particle {
                pos: center,
                vel,
                life,
                color,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_wave_one() {
        let state = GameState::new(Tuning::default(), 7).unwrap();
        assert_eq!(state.wave, 1);
        assert_eq!(state.lives, PLAYER_LIVES);
        assert_eq!(state.score, 0);
        assert_eq!(state.enemies.len(), Tuning::default().min_enemies);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_invalid_tuning_refuses_to_start() {
        let tuning = Tuning {
            patterns: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            GameState::new(tuning, 1),
            Err(ConfigError::EmptyPatternList)
        ));
    }

    #[test]
    fn test_player_friction_without_input() {
        let mut player = Player::new(800.0, 600.0);
        player.vel.x = 4.0;
        player.steer(false, false, 800.0);
        assert!((player.vel.x - 4.0 * PLAYER_FRICTION).abs() < 1e-5);
    }

    #[test]
    fn test_player_clamped_to_playfield() {
        let mut player = Player::new(800.0, 600.0);
        for _ in 0..500 {
            player.steer(true, false, 800.0);
        }
        assert_eq!(player.pos.x, 0.0);
        for _ in 0..500 {
            player.steer(false, true, 800.0);
        }
        assert_eq!(player.pos.x, 800.0 - PLAYER_SIZE);
    }

    #[test]
    fn test_player_fire_cooldown() {
        let mut player = Player::new(800.0, 600.0);
        assert!(player.try_fire(0).is_some());
        assert!(player.try_fire(100).is_none());
        assert!(player.try_fire(PLAYER_SHOT_DELAY_MS).is_none());
        assert!(player.try_fire(PLAYER_SHOT_DELAY_MS + 1).is_some());
    }

    #[test]
    fn test_player_bullet_spawns_centered_above_ship() {
        let mut player = Player::new(800.0, 600.0);
        let bullet = player.try_fire(0).unwrap();
        assert_eq!(bullet.pos.x, player.pos.x + 18.0);
        assert_eq!(bullet.pos.y, player.pos.y - PLAYER_MUZZLE_OFFSET);
        assert!(bullet.vel.y < 0.0);
    }

    #[test]
    fn test_enemy_fire_requires_shooter_and_cooldown() {
        let mut enemy = Enemy::new(1, Vec2::new(100.0, 100.0), Behavior::Linear, 0.0, 0);
        assert!(enemy.try_fire(5000, 1000).is_none());

        enemy.can_fire = true;
        assert!(enemy.try_fire(1000, 1000).is_none());
        let bullet = enemy.try_fire(1001, 1000).unwrap();
        assert_eq!(bullet.pos.y, 100.0 + ENEMY_SIZE);
        assert!(bullet.vel.y > 0.0);
        assert_eq!(enemy.last_fired_ms, 1001);
        assert!(enemy.try_fire(1500, 1000).is_none());
    }

    #[test]
    fn test_projectile_out_of_bounds() {
        let mut bullet = Projectile::player(Vec2::new(10.0, 5.0));
        assert!(!bullet.is_out_of_bounds(600.0));
        bullet.advance();
        bullet.advance();
        assert!(bullet.is_out_of_bounds(600.0));

        let bullet = Projectile::enemy(Vec2::new(10.0, 601.0));
        assert!(bullet.is_out_of_bounds(600.0));
    }

    #[test]
    fn test_particle_lifetime_expires() {
        let mut particle = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -1.0),
            life: 2,
            color: 0,
        };
        particle.update();
        assert_eq!(particle.pos, Vec2::new(1.0, -1.0));
        assert!(!particle.is_dead());
        particle.update();
        assert!(particle.is_dead());
    }

    #[test]
    fn test_spawn_burst_respects_cap() {
        let mut state = GameState::new(Tuning::default(), 3).unwrap();
        for _ in 0..100 {
            state.spawn_burst(Vec2::new(100.0, 100.0), ENEMY_BURST_COLOR);
        }
        assert_eq!(state.particles.len(), MAX_PARTICLES);
        assert!(state.particles.iter().all(|p| p.life > 0));
    }

    #[test]
    fn test_end_game_is_idempotent() {
        let mut state = GameState::new(Tuning::default(), 3).unwrap();
        assert!(state.end_game(GameOverReason::Invaded));
        assert!(!state.end_game(GameOverReason::LivesExhausted));
        assert_eq!(
            state.phase,
            GamePhase::GameOver {
                reason: GameOverReason::Invaded
            }
        );
        let game_overs = state
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = GameState::new(Tuning::default(), 11).unwrap();
        state.score = 1200;
        state.wave = 4;
        state.lives = 0;
        state.player_bullets.push(Projectile::player(Vec2::new(1.0, 1.0)));
        state.enemy_bullets.push(Projectile::enemy(Vec2::new(1.0, 1.0)));
        state.spawn_burst(Vec2::ZERO, PLAYER_BURST_COLOR);
        state.end_game(GameOverReason::LivesExhausted);

        state.restart();
        assert_eq!(state.score, 0);
        assert_eq!(state.wave, 1);
        assert_eq!(state.lives, PLAYER_LIVES);
        assert!(!state.is_game_over());
        assert!(state.player_bullets.is_empty());
        assert!(state.enemy_bullets.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.enemies.len(), state.tuning().min_enemies);
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::new(Tuning::default(), 5).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.enemies.len(), state.enemies.len());
        assert_eq!(restored.wave, state.wave);
    }

    #[test]
    fn test_deserialize_rejects_invalid_tuning() {
        let state = GameState::new(Tuning::default(), 5).unwrap();
        let mut json = serde_json::to_value(&state).unwrap();
        json["tuning"]["patterns"] = serde_json::json!([]);
        let err = serde_json::from_value::<GameState>(json).unwrap_err();
        assert!(err.to_string().contains("formation pattern list is empty"));

        let mut json = serde_json::to_value(&state).unwrap();
        json["tuning"]["speed_step"] = serde_json::json!(-2.0);
        assert!(serde_json::from_value::<GameState>(json).is_err());
    }
}

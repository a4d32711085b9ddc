//! Fixed timestep simulation tick
//!
//! Advances every moving entity by one step, then hands off to the collision
//! resolver.

use serde::{Deserialize, Serialize};

use super::behavior;
use super::collision;
use super::state::{GameEvent, GameOverReason, GameState, SoundEffect};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Move-left held
    pub left: bool,
    /// Move-right held
    pub right: bool,
    /// Fire held
    pub fire: bool,
}

/// Advance the game state by one fixed timestep.
///
/// `now_ms` is the monotonic clock reading used for every cooldown in this
/// tick. Once the game is over the world is frozen and the tick reports no
/// events.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    state.events.clear();
    if state.is_game_over() {
        return;
    }

    state.time_ticks += 1;
    state.now_ms = now_ms;

    let width = state.tuning.playfield_width;
    let height = state.tuning.playfield_height;

    // Player
    state.player.steer(input.left, input.right, width);
    if input.fire {
        if let Some(bullet) = state.player.try_fire(now_ms) {
            state.player_bullets.push(bullet);
            state.events.push(GameEvent::PlayerFired);
            state.events.push(GameEvent::Sound(SoundEffect::PlayerShot));
        }
    }

    // Enemies
    let front_line = state.player.pos.y;
    let mut invaded = false;
    for enemy in &mut state.enemies {
        behavior::apply(enemy, width);
        if enemy.bounds().max.y >= front_line {
            invaded = true;
        }
        if let Some(bullet) = enemy.try_fire(now_ms, state.fire_interval_ms) {
            state.enemy_bullets.push(bullet);
            state.events.push(GameEvent::EnemyFired { enemy_id: enemy.id });
            state.events.push(GameEvent::Sound(SoundEffect::EnemyShot));
        }
    }

    if invaded {
        state.end_game(GameOverReason::Invaded);
        return;
    }

    // Projectiles
    for bullet in state.player_bullets.iter_mut().chain(state.enemy_bullets.iter_mut()) {
        bullet.advance();
    }
    state.player_bullets.retain(|b| !b.is_out_of_bounds(height));
    state.enemy_bullets.retain(|b| !b.is_out_of_bounds(height));

    // Particles
    for particle in &mut state.particles {
        particle.update();
    }
    state.particles.retain(|p| !p.is_dead());

    collision::resolve(state);
}

//! Collision and scoring
//!
//! Runs after every entity has moved. Bullets are matched against targets in
//! a single pass and the surviving collections are rebuilt afterwards.

use glam::Vec2;

use super::state::{
    ENEMY_BURST_COLOR, GameEvent, GameOverReason, GameState, PLAYER_BURST_COLOR, SoundEffect,
};
use super::wave;
use crate::consts::*;

/// Resolve all collisions for the current tick
pub fn resolve(state: &mut GameState) {
    resolve_player_bullets(state);
    resolve_enemy_bullets(state);
}

/// Player bullets against enemies. Each bullet hits at most one enemy: the
/// first live one in collection order whose box overlaps it.
fn resolve_player_bullets(state: &mut GameState) {
    let bullets = std::mem::take(&mut state.player_bullets);
    let mut kills: Vec<(u32, Vec2)> = Vec::new();

    for bullet in bullets {
        let bounds = bullet.bounds();
        let target = state
            .enemies
            .iter()
            .position(|e| e.is_alive() && e.bounds().overlaps(&bounds));

        match target {
            Some(index) => {
                let enemy = &mut state.enemies[index];
                enemy.take_hit();
                if !enemy.is_alive() {
                    kills.push((enemy.id, enemy.center()));
                }
            }
            None => state.player_bullets.push(bullet),
        }
    }

    for (enemy_id, center) in kills {
        state.score = state.score.saturating_add(SCORE_PER_KILL);
        state.spawn_burst(center, ENEMY_BURST_COLOR);
        state.events.push(GameEvent::EnemyDestroyed {
            enemy_id,
            pos: center,
        });
        state.events.push(GameEvent::Sound(SoundEffect::EnemyExplosion));
        log::debug!("Enemy {} destroyed, score {}", enemy_id, state.score);
    }

    state.enemies.retain(|e| e.is_alive());

    if state.enemies.is_empty() {
        wave::advance_wave(state);
    }
}

/// Enemy bullets against the player
fn resolve_enemy_bullets(state: &mut GameState) {
    let player_box = state.player.bounds();
    let (hits, misses): (Vec<_>, Vec<_>) = std::mem::take(&mut state.enemy_bullets)
        .into_iter()
        .partition(|b| b.bounds().overlaps(&player_box));
    state.enemy_bullets = misses;

    for _ in hits {
        if state.is_game_over() {
            break;
        }
        state.lives = state.lives.saturating_sub(1);
        log::debug!("Player hit, {} lives left", state.lives);

        state.events.push(GameEvent::PlayerHit {
            lives_left: state.lives,
        });
        state.events.push(GameEvent::ScreenShake { intensity: 1.0 });
        state.events.push(GameEvent::Sound(SoundEffect::PlayerHit));
        let center = state.player.center();
        state.spawn_burst(center, PLAYER_BURST_COLOR);

        if state.lives == 0 {
            state.end_game(GameOverReason::LivesExhausted);
        }
    }
}

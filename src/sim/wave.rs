//! Wave director
//!
//! Scales enemy count, speed and fire rate with the wave number, picks the
//! formation and hands out shooter roles.

use rand::Rng;

use super::formation::{self, FormationPattern};
use super::state::{GameEvent, GameState, SoundEffect};
use crate::tuning::Tuning;

/// `clamp(min + (wave - 1) * rate, min, max)`
pub fn enemy_count(tuning: &Tuning, wave: u32) -> usize {
    let extra = (wave.saturating_sub(1) as usize).saturating_mul(tuning.enemy_increase_rate);
    tuning
        .min_enemies
        .saturating_add(extra)
        .clamp(tuning.min_enemies, tuning.max_enemies)
}

/// Fixed sequence for the opening waves, uniform random afterwards
pub fn select_pattern<R: Rng + ?Sized>(tuning: &Tuning, wave: u32, rng: &mut R) -> FormationPattern {
    let index = wave.saturating_sub(1) as usize;
    match tuning.patterns.get(index) {
        Some(&pattern) => pattern,
        None => tuning.patterns[rng.random_range(0..tuning.patterns.len())],
    }
}

/// Scheduled shooter count for the wave, never more than the enemies present
pub fn shooter_count(tuning: &Tuning, wave: u32, enemies: usize) -> usize {
    let index = wave.saturating_sub(1) as usize;
    tuning
        .shooter_schedule
        .get(index)
        .copied()
        .unwrap_or(tuning.default_shooters)
        .min(enemies)
}

pub fn speed_multiplier(tuning: &Tuning, wave: u32) -> f32 {
    1.0 + wave.saturating_sub(1) as f32 * tuning.speed_step
}

/// Drops one step every `fire_ramp_every` waves, floored
pub fn fire_interval_for_wave(tuning: &Tuning, wave: u32) -> u64 {
    let steps = (wave / tuning.fire_ramp_every) as u64;
    tuning
        .base_fire_interval_ms
        .saturating_sub(steps.saturating_mul(tuning.fire_interval_step_ms))
        .max(tuning.min_fire_interval_ms)
}

/// Populate `state.enemies` for `state.wave`
pub fn start_wave(state: &mut GameState) {
    let wave = state.wave;
    let count = enemy_count(&state.tuning, wave);
    let pattern = select_pattern(&state.tuning, wave, &mut state.rng);
    let first_id = state.reserve_ids(count);

    let mut enemies = formation::populate(
        pattern,
        count,
        state.tuning.playfield_width,
        first_id,
        state.now_ms,
        &mut state.rng,
    );

    let speed = speed_multiplier(&state.tuning, wave);
    for enemy in &mut enemies {
        enemy.vel.x *= speed;
    }

    let shooters = shooter_count(&state.tuning, wave, enemies.len());
    for index in rand::seq::index::sample(&mut state.rng, enemies.len(), shooters) {
        enemies[index].can_fire = true;
    }

    let previous_interval = state.fire_interval_ms;
    state.fire_interval_ms = fire_interval_for_wave(&state.tuning, wave);
    if state.fire_interval_ms < previous_interval {
        log::info!(
            "Wave {}: enemy fire interval {}ms -> {}ms",
            wave,
            previous_interval,
            state.fire_interval_ms
        );
    }

    log::info!(
        "Wave {}: {} enemies in {} formation, {} shooters, speed x{:.1}",
        wave,
        enemies.len(),
        pattern.as_str(),
        shooters,
        speed
    );

    state.enemies = enemies;
    state.events.push(GameEvent::WaveStarted {
        wave,
        pattern,
        enemies: count,
    });
}

/// The only way a wave ends: bump the counter and start the next one
pub fn advance_wave(state: &mut GameState) {
    let cleared = state.wave;
    log::info!("Wave {} cleared (score {})", cleared, state.score);
    state.events.push(GameEvent::WaveCleared { wave: cleared });
    state.events.push(GameEvent::Sound(SoundEffect::WaveClear));

    state.wave += 1;
    start_wave(state);
}

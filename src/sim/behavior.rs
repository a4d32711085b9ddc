//! Per-enemy movement rules
//!
//! Each enemy carries a [`Behavior`] tag; [`apply`] advances it by one tick.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Enemy;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Behavior {
    /// Sweep sideways, drop a row at each edge
    Linear,
    /// Sweep sideways while bobbing around the anchor row
    Sine,
    /// Orbit the spawn point
    Circular,
    /// Like Linear with a deeper drop
    Zigzag,
}

impl Behavior {
    pub const ALL: [Behavior; 4] = [
        Behavior::Linear,
        Behavior::Sine,
        Behavior::Circular,
        Behavior::Zigzag,
    ];

    /// Uniform pick
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Advance one enemy by one tick
pub fn apply(enemy: &mut Enemy, playfield_width: f32) {
    let right_edge = playfield_width - ENEMY_SIZE;

    match enemy.behavior {
        Behavior::Linear => {
            if sweep(enemy, right_edge) {
                enemy.pos.y += LINEAR_DESCENT;
            }
        }
        Behavior::Sine => {
            if sweep(enemy, right_edge) {
                enemy.anchor.y += SINE_DESCENT;
            }
            enemy.phase = (enemy.phase + SINE_PHASE_RATE).rem_euclid(TAU);
            enemy.pos.y = enemy.anchor.y + SINE_AMPLITUDE * enemy.phase.sin();
        }
        Behavior::Circular => {
            // Orbit speed follows the wave's speed scaling
            let rate = CIRCULAR_PHASE_RATE * enemy.vel.x.abs() / ENEMY_BASE_SPEED;
            enemy.phase = (enemy.phase + rate).rem_euclid(TAU);
            enemy.pos = enemy.anchor + Vec2::new(enemy.phase.cos(), enemy.phase.sin()) * CIRCULAR_RADIUS;
        }
        Behavior::Zigzag => {
            if sweep(enemy, right_edge) {
                enemy.pos.y += ZIGZAG_DESCENT;
            }
            enemy.phase = (enemy.phase + ZIGZAG_PHASE_RATE).rem_euclid(TAU);
        }
    }
}

/// Move horizontally and bounce off the edge being approached.
/// Returns true on a bounce.
fn sweep(enemy: &mut Enemy, right_edge: f32) -> bool {
    enemy.pos.x += enemy.vel.x;

    let hit_left = enemy.pos.x <= 0.0 && enemy.vel.x < 0.0;
    let hit_right = enemy.pos.x >= right_edge && enemy.vel.x > 0.0;
    if hit_left || hit_right {
        enemy.vel.x = -enemy.vel.x;
        true
    } else {
        false
    }
}

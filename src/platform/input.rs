//! Input sources sampled once per tick

use std::cmp::Ordering;

use crate::consts::*;
use crate::sim::{GameState, TickInput};

pub trait InputSource {
    /// Held-button snapshot for the next tick
    fn sample(&mut self, world: &GameState) -> TickInput;
}

/// A fixed input, held forever
impl InputSource for TickInput {
    fn sample(&mut self, _world: &GameState) -> TickInput {
        *self
    }
}

/// Replays a list of inputs, then holds nothing
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<TickInput>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<TickInput>) -> Self {
        Self { frames, cursor: 0 }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self, _world: &GameState) -> TickInput {
        let input = self.frames.get(self.cursor).copied().unwrap_or_default();
        self.cursor = self.cursor.saturating_add(1);
        input
    }
}

/// Demo AI: dodge incoming fire, otherwise line up under the lowest enemy.
/// Fires whenever it can.
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Horizontal slack before steering, in pixels
    pub deadzone: f32,
    /// How far above the ship an enemy bullet counts as a threat
    pub danger_range: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            deadzone: 4.0,
            danger_range: 120.0,
        }
    }
}

impl InputSource for Autopilot {
    fn sample(&mut self, world: &GameState) -> TickInput {
        let ship = world.player.bounds();
        let ship_x = world.player.center().x;

        // Nearest bullet about to land on the ship
        let threat = world
            .enemy_bullets
            .iter()
            .filter(|b| {
                let bounds = b.bounds();
                bounds.max.y >= ship.min.y - self.danger_range
                    && bounds.min.y <= ship.max.y
                    && bounds.max.x >= ship.min.x - PLAYER_SIZE / 2.0
                    && bounds.min.x <= ship.max.x + PLAYER_SIZE / 2.0
            })
            .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(Ordering::Equal));

        let target_x = match threat {
            Some(bullet) => {
                let bullet_x = bullet.bounds().center().x;
                let room_right = world.tuning().playfield_width - PLAYER_SIZE / 2.0;
                // Step away from the bullet, toward the side with room
                if bullet_x >= ship_x && ship.min.x > PLAYER_SIZE {
                    bullet_x - PLAYER_SIZE * 1.5
                } else if ship.max.x < room_right - PLAYER_SIZE {
                    bullet_x + PLAYER_SIZE * 1.5
                } else {
                    bullet_x - PLAYER_SIZE * 1.5
                }
            }
            None => world
                .enemies
                .iter()
                .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(Ordering::Equal))
                .map(|enemy| enemy.center().x)
                .unwrap_or(ship_x),
        };

        let dx = target_x - ship_x;
        TickInput {
            left: dx < -self.deadzone,
            right: dx > self.deadzone,
            fire: true,
        }
    }
}

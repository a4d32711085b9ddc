//! Formation layouts
//!
//! [`generate`] is a pure function from a pattern and an enemy count to
//! top-left spawn positions. Every pattern returns exactly `count` positions
//! whose x lies in `[0, playfield_width - ENEMY_SIZE]`.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::behavior::Behavior;
use super::state::Enemy;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormationPattern {
    Grid,
    V,
    Circle,
    Diamond,
    Zigzag,
}

impl FormationPattern {
    /// Opening sequence order
    pub const ALL: [FormationPattern; 5] = [
        FormationPattern::Grid,
        FormationPattern::V,
        FormationPattern::Circle,
        FormationPattern::Diamond,
        FormationPattern::Zigzag,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormationPattern::Grid => "grid",
            FormationPattern::V => "v",
            FormationPattern::Circle => "circle",
            FormationPattern::Diamond => "diamond",
            FormationPattern::Zigzag => "zigzag",
        }
    }
}

/// Spawn positions for `count` enemies
pub fn generate(pattern: FormationPattern, count: usize, playfield_width: f32) -> Vec<Vec2> {
    if count == 0 {
        return Vec::new();
    }

    // Range of valid top-left x values
    let usable = (playfield_width - ENEMY_SIZE).max(0.0);

    let mut positions = match pattern {
        FormationPattern::Grid => grid(count, usable),
        FormationPattern::V => v_shape(count, usable),
        FormationPattern::Circle => circle(count, usable),
        FormationPattern::Diamond => diamond(count, usable),
        FormationPattern::Zigzag => zigzag(count, usable),
    };
    debug_assert_eq!(positions.len(), count);

    for pos in &mut positions {
        pos.x = pos.x.clamp(0.0, usable);
    }
    positions
}

/// Build a wave's enemies: positions from the pattern, behavior and phase
/// drawn independently per enemy
pub fn populate<R: Rng + ?Sized>(
    pattern: FormationPattern,
    count: usize,
    playfield_width: f32,
    first_id: u32,
    spawned_ms: u64,
    rng: &mut R,
) -> Vec<Enemy> {
    generate(pattern, count, playfield_width)
        .into_iter()
        .enumerate()
        .map(|(i, pos)| {
            let behavior = Behavior::random(rng);
            let phase = rng.random_range(0.0..TAU);
            Enemy::new(first_id + i as u32, pos, behavior, phase, spawned_ms)
        })
        .collect()
}

/// Preferred spacing, shrunk so `gaps` intervals fit in `usable`
fn fit_spacing(gaps: f32, usable: f32, preferred: f32) -> f32 {
    if gaps <= 0.0 {
        preferred
    } else {
        preferred.min(usable / gaps)
    }
}

/// Up to 3x6 lattice, filled row-major. Counts past the cap spill into
/// extra rows.
fn grid(count: usize, usable: f32) -> Vec<Vec2> {
    let rows = count.div_ceil(6).min(3);
    let cols = count.div_ceil(rows).min(6);

    let dx = fit_spacing((cols - 1) as f32, usable, FORMATION_SPACING_X);
    let left = (usable - (cols - 1) as f32 * dx) / 2.0;

    (0..count)
        .map(|i| {
            let (row, col) = (i / cols, i % cols);
            Vec2::new(
                left + col as f32 * dx,
                FORMATION_TOP + row as f32 * FORMATION_SPACING_Y,
            )
        })
        .collect()
}

/// Apex first, then the left arm, then the right arm
fn v_shape(count: usize, usable: f32) -> Vec<Vec2> {
    let left_len = count.div_ceil(2);
    let right_len = count - left_len;
    let reach = (left_len - 1).max(right_len);

    let apex_x = usable / 2.0;
    let dx = fit_spacing(reach as f32, apex_x, V_ARM_STEP_X);

    (0..count)
        .map(|i| {
            let (dir, step) = if i < left_len {
                (-1.0, i)
            } else {
                (1.0, i - left_len + 1)
            };
            Vec2::new(
                apex_x + dir * step as f32 * dx,
                FORMATION_TOP + step as f32 * V_ARM_STEP_Y,
            )
        })
        .collect()
}

fn circle(count: usize, usable: f32) -> Vec<Vec2> {
    let center_x = usable / 2.0;
    let radius = (CIRCLE_RADIUS_PER_ENEMY * count as f32)
        .min(CIRCLE_MAX_RADIUS)
        .min(center_x);

    (0..count)
        .map(|i| {
            let angle = i as f32 * TAU / count as f32;
            Vec2::new(
                center_x + radius * angle.cos(),
                CIRCLE_CENTER_Y + radius * angle.sin(),
            )
        })
        .collect()
}

/// Rows widen 1..=peak then narrow peak..=1, truncated at `count`
fn diamond(count: usize, usable: f32) -> Vec<Vec2> {
    let mut peak = count.div_ceil(4);
    while peak * (peak + 1) < count {
        peak += 1;
    }

    let center_x = usable / 2.0;
    let dx = fit_spacing((peak - 1) as f32, usable, DIAMOND_SPACING_X);

    (1..=peak)
        .chain((1..=peak).rev())
        .enumerate()
        .flat_map(|(row, width)| {
            let row_left = center_x - (width - 1) as f32 * dx / 2.0;
            let y = FORMATION_TOP + row as f32 * DIAMOND_SPACING_Y;
            (0..width).map(move |col| Vec2::new(row_left + col as f32 * dx, y))
        })
        .take(count)
        .collect()
}

/// Rows of up to six, odd rows shifted half a column
fn zigzag(count: usize, usable: f32) -> Vec<Vec2> {
    let cols = count.min(6);
    let rows = count.div_ceil(cols);
    let shift = if rows > 1 { 0.5 } else { 0.0 };

    let dx = fit_spacing((cols - 1) as f32 + shift, usable, FORMATION_SPACING_X);
    let left = (usable - ((cols - 1) as f32 + shift) * dx) / 2.0;

    (0..count)
        .map(|i| {
            let (row, col) = (i / cols, i % cols);
            let offset = if row % 2 == 1 { dx / 2.0 } else { 0.0 };
            Vec2::new(
                left + col as f32 * dx + offset,
                FORMATION_TOP + row as f32 * FORMATION_SPACING_Y,
            )
        })
        .collect()
}

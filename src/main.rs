//! Exostrike headless demo
//!
//! Plays one autopilot session on a simulated 60 Hz clock and records the
//! final score. Usage: `exostrike [tuning.json]`

use std::time::{SystemTime, UNIX_EPOCH};

use exostrike::consts::TICK_MS;
use exostrike::persistence::{JsonScoreStore, ScoreStore};
use exostrike::platform::{Autopilot, LogEffects, LogPresenter, ManualClock};
use exostrike::{Game, Tuning};

const SCORE_FILE: &str = "exostrike_scores.json";
/// Ten simulated minutes
const MAX_FRAMES: u64 = 36_000;

fn main() {
    env_logger::init();
    log::info!("Exostrike (headless) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("Failed to load tuning from {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Seed: {}", seed);

    let store = JsonScoreStore::open(SCORE_FILE);
    let mut game = match Game::new(tuning, seed, store) {
        Ok(game) => game.with_effects(LogEffects::new()),
        Err(err) => {
            log::error!("Invalid tuning: {}", err);
            std::process::exit(1);
        }
    };

    let clock = ManualClock::new(0);
    let mut pilot = Autopilot::default();
    let mut presenter = LogPresenter::new();
    let frame_ms = TICK_MS.round() as u64;

    let mut frames = 0;
    while !game.is_game_over() && frames < MAX_FRAMES {
        clock.advance(frame_ms);
        game.frame(&clock, &mut pilot, &mut presenter);
        frames += 1;
    }

    let state = game.state();
    if game.is_game_over() {
        log::info!("Final score {} on wave {}", state.score, state.wave);
    } else {
        log::info!(
            "Stopped after {} frames at score {} on wave {}",
            frames,
            state.score,
            state.wave
        );
    }

    for (rank, score) in game.store().top_n(5).iter().enumerate() {
        log::info!("#{} {}", rank + 1, score);
    }
}

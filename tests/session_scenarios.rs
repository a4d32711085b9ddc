/// Integration tests for whole sessions
///
/// These drive the public `Game` driver and simulation API through full
/// wave, life-loss, invasion and restart sequences.
use exostrike::consts::*;
use exostrike::persistence::MemoryScoreStore;
use exostrike::platform::Autopilot;
use exostrike::sim::behavior::Behavior;
use exostrike::sim::wave::{self, enemy_count};
use exostrike::sim::{
    Enemy, FormationPattern, GameEvent, GameOverReason, GamePhase, GameState, Projectile,
    TickInput,
};
use exostrike::{Game, Tuning};
use glam::Vec2;

const FRAME_MS: u64 = 16;

fn new_game(seed: u64) -> Game<MemoryScoreStore> {
    Game::new(Tuning::default(), seed, MemoryScoreStore::new()).unwrap()
}

/// Pin every enemy in place so bullets can be aimed at known positions
fn freeze_enemies(state: &mut GameState) {
    for enemy in &mut state.enemies {
        enemy.behavior = Behavior::Linear;
        enemy.vel = Vec2::ZERO;
        enemy.can_fire = false;
    }
}

/// A player bullet that lands inside `enemy` after one tick of travel
fn shot_at(enemy: &Enemy) -> Projectile {
    Projectile::player(enemy.pos + Vec2::new(13.0, 9.0 + PLAYER_BULLET_SPEED))
}

#[test]
fn test_clearing_first_wave_advances_to_second() {
    let mut game = new_game(2024);
    assert_eq!(game.state().wave, 1);
    assert_eq!(game.state().enemies.len(), 5);
    freeze_enemies(game.state_mut());

    let mut now = 0;
    let mut cleared = 0;
    for kill in 1..=5u64 {
        let target = game.state().enemies[0].clone();
        let bullet = shot_at(&target);
        game.state_mut().player_bullets.push(bullet);

        now += FRAME_MS;
        let events = game.step(&TickInput::default(), now);
        assert!(events.contains(&GameEvent::EnemyDestroyed {
            enemy_id: target.id,
            pos: target.center(),
        }));
        cleared += events
            .iter()
            .filter(|e| matches!(e, GameEvent::WaveCleared { .. }))
            .count();
        assert_eq!(game.state().score, kill * SCORE_PER_KILL);
    }

    let state = game.state();
    assert_eq!(state.score, 500);
    assert_eq!(state.wave, 2);
    assert_eq!(cleared, 1);
    assert_eq!(state.enemies.len(), enemy_count(state.tuning(), 2));
}

#[test]
fn test_last_life_lost_saves_score_once() {
    let mut game = new_game(77);
    game.state_mut().lives = 1;
    game.state_mut().score = 2300;
    let pos = game.state().player.pos + Vec2::new(18.0, 10.0);
    game.state_mut().enemy_bullets.push(Projectile::enemy(pos));

    game.step(&TickInput::default(), FRAME_MS);
    let state = game.state();
    assert_eq!(state.lives, 0);
    assert!(state.is_game_over());
    assert_eq!(
        state.phase,
        GamePhase::GameOver {
            reason: GameOverReason::LivesExhausted
        }
    );

    // Further ticks are ignored and never save again
    for i in 2..120 {
        game.step(&TickInput::default(), i * FRAME_MS);
    }
    assert_eq!(game.store().saved(), &[2300]);
}

#[test]
fn test_invasion_ends_game_with_lives_left() {
    let mut game = new_game(5);
    let front = game.state().player.pos.y;
    let enemy = &mut game.state_mut().enemies[0];
    enemy.behavior = Behavior::Linear;
    enemy.pos.y = front - ENEMY_SIZE + 1.0;

    game.step(&TickInput::default(), FRAME_MS);
    let state = game.state();
    assert_eq!(
        state.phase,
        GamePhase::GameOver {
            reason: GameOverReason::Invaded
        }
    );
    assert_eq!(state.lives, PLAYER_LIVES);
    assert_eq!(game.store().saved(), &[0]);
}

#[test]
fn test_restart_regenerates_first_wave() {
    let fresh = GameState::new(Tuning::default(), 31).unwrap();
    let mut game = new_game(31);

    let mut pilot = Autopilot::default();
    for _ in 0..600 {
        game.advance(TICK_MS, &mut pilot);
    }
    game.state_mut().end_game(GameOverReason::LivesExhausted);
    game.restart();

    let state = game.state();
    assert_eq!(state.score, 0);
    assert_eq!(state.wave, 1);
    assert_eq!(state.lives, PLAYER_LIVES);
    assert!(!state.is_game_over());
    assert!(state.player_bullets.is_empty());
    assert!(state.enemy_bullets.is_empty());
    assert!(state.particles.is_empty());

    let anchors: Vec<Vec2> = state.enemies.iter().map(|e| e.anchor).collect();
    let fresh_anchors: Vec<Vec2> = fresh.enemies.iter().map(|e| e.anchor).collect();
    assert_eq!(anchors, fresh_anchors);
}

#[test]
fn test_wave_five_speeds_up_enemy_fire() {
    let mut state = GameState::new(Tuning::default(), 8).unwrap();
    state.wave = 4;
    wave::start_wave(&mut state);
    let wave_four_interval = state.fire_interval_ms;
    freeze_enemies(&mut state);

    let bullets: Vec<Projectile> = state.enemies.iter().map(shot_at).collect();
    state.player_bullets.extend(bullets);
    exostrike::sim::tick(&mut state, &TickInput::default(), FRAME_MS);

    assert_eq!(state.wave, 5);
    assert!(state.events().iter().any(|e| matches!(
        e,
        GameEvent::WaveStarted {
            wave: 5,
            pattern: FormationPattern::Zigzag,
            ..
        }
    )));
    assert_eq!(
        state.fire_interval_ms,
        wave_four_interval - state.tuning().fire_interval_step_ms
    );
}

#[test]
fn test_fire_interval_clamped_at_floor() {
    let tuning = Tuning {
        base_fire_interval_ms: 1000,
        fire_interval_step_ms: 300,
        min_fire_interval_ms: 800,
        ..Default::default()
    };
    let mut state = GameState::new(tuning, 8).unwrap();
    assert_eq!(state.fire_interval_ms, 1000);
    state.wave = 5;
    wave::start_wave(&mut state);
    assert_eq!(state.fire_interval_ms, 800);
}

#[test]
fn test_autopilot_session_invariants() {
    let mut game = new_game(4242);
    let mut pilot = Autopilot::default();
    let mut last_score = 0;
    let mut last_wave = 1;
    let mut last_lives = PLAYER_LIVES;

    for _ in 0..20_000 {
        game.advance(TICK_MS, &mut pilot);
        let state = game.state();

        assert!(state.score >= last_score);
        assert_eq!(state.score % SCORE_PER_KILL, 0);
        assert!(state.wave >= last_wave);
        assert!(state.lives <= last_lives);
        assert!(!state.enemies.is_empty());
        assert!(state.particles.len() <= MAX_PARTICLES);
        assert!(state.player.pos.x >= 0.0);
        assert!(state.player.pos.x <= state.tuning().playfield_width - PLAYER_SIZE);
        assert_eq!(state.is_game_over(), matches!(state.phase, GamePhase::GameOver { .. }));

        last_score = state.score;
        last_wave = state.wave;
        last_lives = state.lives;
        if state.is_game_over() {
            break;
        }
    }

    if game.is_game_over() {
        assert_eq!(game.store().saved(), &[last_score]);
    } else {
        assert!(game.store().saved().is_empty());
    }
}

//! Host-side driver
//!
//! Owns the simulation state together with its collaborators and runs it on
//! a fixed timestep. Effect events are forwarded after each tick and the
//! final score goes to the score store once per run.

use crate::consts::*;
use crate::error::ConfigError;
use crate::persistence::ScoreStore;
use crate::platform::{Clock, EffectSink, InputSource, PresentationSink};
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

pub struct Game<S: ScoreStore> {
    state: GameState,
    store: S,
    effects: Vec<Box<dyn EffectSink>>,
    /// Unsimulated time carried between frames
    accumulator: f64,
    /// Simulation clock, advanced one `TICK_MS` per tick
    sim_time_ms: f64,
    last_frame_ms: Option<u64>,
}

impl<S: ScoreStore> Game<S> {
    pub fn new(tuning: Tuning, seed: u64, store: S) -> Result<Self, ConfigError> {
        Ok(Self {
            state: GameState::new(tuning, seed)?,
            store,
            effects: Vec::new(),
            accumulator: 0.0,
            sim_time_ms: 0.0,
            last_frame_ms: None,
        })
    }

    pub fn with_effects(mut self, sink: impl EffectSink + 'static) -> Self {
        self.effects.push(Box::new(sink));
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for tests and tooling
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Run exactly one tick at `now_ms` and dispatch its events.
    /// Returns the events the tick produced.
    pub fn step(&mut self, input: &TickInput, now_ms: u64) -> Vec<GameEvent> {
        // Events raised outside a tick (the opening wave) go out first
        let pending = self.state.drain_events();
        self.dispatch(&pending);

        tick(&mut self.state, input, now_ms);
        let events = self.state.drain_events();
        self.dispatch(&events);
        events
    }

    /// Feed `elapsed_ms` of host time into the fixed-step accumulator and run
    /// the ticks it covers, at most `MAX_SUBSTEPS`. Returns the tick count.
    pub fn advance(&mut self, elapsed_ms: f64, input: &mut dyn InputSource) -> u32 {
        // Backlog beyond one frame's worth of substeps is dropped
        self.accumulator =
            (self.accumulator + elapsed_ms.max(0.0)).min(TICK_MS * (MAX_SUBSTEPS + 1) as f64);

        let mut substeps = 0;
        while self.accumulator >= TICK_MS && substeps < MAX_SUBSTEPS {
            let sampled = input.sample(&self.state);
            self.sim_time_ms += TICK_MS;
            self.step(&sampled, self.sim_time_ms as u64);
            self.accumulator -= TICK_MS;
            substeps += 1;
        }
        substeps
    }

    /// One host frame: read the clock, advance, then present the result
    pub fn frame(
        &mut self,
        clock: &dyn Clock,
        input: &mut dyn InputSource,
        presenter: &mut dyn PresentationSink,
    ) -> u32 {
        let now = clock.now_ms();
        let elapsed = self
            .last_frame_ms
            .map_or(0, |last| now.saturating_sub(last));
        self.last_frame_ms = Some(now);

        let ticks = self.advance(elapsed as f64, input);
        presenter.present(&self.state);
        ticks
    }

    /// Start a new run from wave 1
    pub fn restart(&mut self) {
        self.state.restart();
        self.accumulator = 0.0;
        let events = self.state.drain_events();
        self.dispatch(&events);
    }

    fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            for sink in &mut self.effects {
                sink.emit(event);
            }
            if let GameEvent::GameOver { score, .. } = event {
                if let Err(err) = self.store.save(*score) {
                    log::warn!("Failed to save score {}: {}", score, err);
                }
            }
        }
    }
}

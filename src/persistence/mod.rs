//! High-score persistence
//!
//! Features:
//! - `ScoreStore` trait the game driver saves final scores through
//! - In-memory store for tests and throwaway sessions
//! - Versioned JSON file store with backup rotation (tmp -> save, old save -> backup)
//! - Corruption detection and recovery

pub mod envelope;

pub use envelope::{FORMAT_VERSION, JsonScoreStore, ScoreEnvelope};

use crate::error::StoreError;
use crate::highscores::HighScores;

/// Persistent ordered list of integer scores
pub trait ScoreStore {
    /// Record a finished run's score
    fn save(&mut self, score: u64) -> Result<(), StoreError>;

    /// Up to `n` scores, highest first
    fn top_n(&self, n: usize) -> Vec<u64>;
}

/// Keeps every saved score in memory, in save order
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    saved: Vec<u64>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every score passed to `save`, oldest first
    pub fn saved(&self) -> &[u64] {
        &self.saved
    }
}

impl ScoreStore for MemoryScoreStore {
    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        self.saved.push(score);
        Ok(())
    }

    fn top_n(&self, n: usize) -> Vec<u64> {
        HighScores::from_scores(self.saved.iter().copied()).top_n(n)
    }
}

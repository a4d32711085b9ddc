//! High score leaderboard
//!
//! An ordered list of integer scores, highest first, capped at ten entries.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// High score leaderboard, sorted descending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    scores: Vec<u64>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self { scores: Vec::new() }
    }

    /// Build a board from scores in any order. Zeros are dropped and the
    /// result is sorted and trimmed.
    pub fn from_scores(scores: impl IntoIterator<Item = u64>) -> Self {
        let mut scores: Vec<u64> = scores.into_iter().filter(|&s| s > 0).collect();
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(MAX_HIGH_SCORES);
        Self { scores }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.scores.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Must beat the lowest entry
        self.scores.last().is_none_or(|&lowest| score > lowest)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.scores.iter().position(|&s| score > s);
        Some(rank.unwrap_or(self.scores.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.scores.insert(rank - 1, score);
        self.scores.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.scores.first().copied()
    }

    /// Up to `n` scores, highest first
    pub fn top_n(&self, n: usize) -> Vec<u64> {
        self.scores.iter().take(n).copied().collect()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.scores
    }
}

//! JSON score file
//!
//! On disk: `{ "version": 1, "scores": [900, 400, ...] }`. Writes go to a
//! sibling `.tmp` file which is renamed over the primary after the previous
//! primary has been moved to `.bak`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ScoreStore;
use crate::error::StoreError;
use crate::highscores::HighScores;

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEnvelope {
    pub version: u32,
    pub scores: Vec<u64>,
}

impl ScoreEnvelope {
    pub fn new(board: &HighScores) -> Self {
        Self {
            version: FORMAT_VERSION,
            scores: board.as_slice().to_vec(),
        }
    }

    /// Parse and check the version
    pub fn decode(json: &str) -> Result<Self, StoreError> {
        let envelope: ScoreEnvelope = serde_json::from_str(json)?;
        if envelope.version != FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: envelope.version,
            });
        }
        Ok(envelope)
    }

    pub fn into_board(self) -> HighScores {
        HighScores::from_scores(self.scores)
    }
}

/// Score board persisted as a JSON file
#[derive(Debug)]
pub struct JsonScoreStore {
    path: PathBuf,
    board: HighScores,
}

impl JsonScoreStore {
    /// Open the store at `path`. Never fails: a missing file starts an empty
    /// board, a damaged one falls back to the backup and then to empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let board = match read_board(&path) {
            Ok(Some(board)) => {
                log::info!("Loaded {} high scores from {}", board.len(), path.display());
                board
            }
            Ok(None) => {
                log::info!("No high scores at {}, starting fresh", path.display());
                HighScores::new()
            }
            Err(err) => {
                log::warn!("High scores at {} unreadable: {}", path.display(), err);
                recover_from_backup(&path)
            }
        };
        Self { path, board }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn board(&self) -> &HighScores {
        &self.board
    }

    fn write(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&ScoreEnvelope::new(&self.board))?;
        let tmp = sibling(&self.path, "tmp");
        fs::write(&tmp, json)?;

        if self.path.exists() {
            fs::rename(&self.path, sibling(&self.path, "bak"))?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ScoreStore for JsonScoreStore {
    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        match self.board.add_score(score) {
            Some(rank) => {
                log::info!("Score {} ranked #{}", score, rank);
                self.write()
            }
            None => Ok(()),
        }
    }

    fn top_n(&self, n: usize) -> Vec<u64> {
        self.board.top_n(n)
    }
}

/// `scores.json` -> `scores.json.bak`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

fn read_board(path: &Path) -> Result<Option<HighScores>, StoreError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    Ok(Some(ScoreEnvelope::decode(&json)?.into_board()))
}

fn recover_from_backup(path: &Path) -> HighScores {
    let backup = sibling(path, "bak");
    match read_board(&backup) {
        Ok(Some(board)) => {
            log::warn!("Recovered {} high scores from {}", board.len(), backup.display());
            board
        }
        Ok(None) => HighScores::new(),
        Err(err) => {
            log::warn!("Backup {} unreadable too: {}", backup.display(), err);
            HighScores::new()
        }
    }
}

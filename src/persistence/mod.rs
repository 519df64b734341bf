//! Score storage backends
//!
//! The simulation never touches storage directly; the leaderboard takes a
//! `ScoreStore` so the core stays testable without a real backend. Malformed
//! or missing data always loads as an empty board, never as an error.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use crate::highscores::Player;

/// Get/put pair the leaderboard persists through.
pub trait ScoreStore {
    /// Load the stored players. Missing or unparseable data is an empty list.
    fn load(&self) -> Vec<Player>;

    /// Persist the given players, replacing whatever was stored.
    fn save(&self, players: &[Player]);
}

/// JSON file on disk, the native counterpart of browser LocalStorage.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Vec<Player> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&json) {
            Ok(players) => players,
            Err(err) => {
                log::warn!(
                    "discarding malformed score data in {}: {}",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    fn save(&self, players: &[Player]) {
        let json = match serde_json::to_string(players) {
            Ok(json) => json,
            Err(err) => {
                log::error!("failed to encode scores: {}", err);
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, json) {
            log::error!("failed to save scores to {}: {}", self.path.display(), err);
        }
    }
}

/// In-memory store for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    players: RefCell<Vec<Player>>,
}

impl MemoryStore {
    /// Store pre-seeded with players.
    pub fn with_players(players: Vec<Player>) -> Self {
        Self {
            players: RefCell::new(players),
        }
    }

    /// Copy of the stored players.
    pub fn snapshot(&self) -> Vec<Player> {
        self.players.borrow().clone()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Vec<Player> {
        self.players.borrow().clone()
    }

    fn save(&self, players: &[Player]) {
        *self.players.borrow_mut() = players.to_vec();
    }
}

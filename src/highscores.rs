//! Player ranking and the persisted leaderboard
//!
//! Derived values (top scorers, cutoffs, prize status) are recomputed on
//! demand from the current player list; nothing is cached.

use serde::{Deserialize, Serialize};

use crate::persistence::ScoreStore;

/// How many scorers the leaderboard shows and persists
pub const TOP_SCORES_COUNT: usize = 5;

/// Score at or above which a run wins the prize
pub const PRIZE_THRESHOLD: u64 = 3000;

/// A single leaderboard entry, immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: u64,
}

impl Player {
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Stable sort by score descending; equal scores keep their original order.
pub fn rank(players: &mut [Player]) {
    players.sort_by(|a, b| b.score.cmp(&a.score));
}

/// First `n` players of the ranked sequence.
pub fn top_n(players: &[Player], n: usize) -> Vec<Player> {
    let mut ranked = players.to_vec();
    rank(&mut ranked);
    ranked.truncate(n);
    ranked
}

/// Historical scores plus the submission path for new ones.
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    players: Vec<Player>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull the persisted players out of a store.
    pub fn load(store: &dyn ScoreStore) -> Self {
        let players = store.load();
        log::info!("loaded {} stored scores", players.len());
        Self { players }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Ranked top scorers, recomputed from the full list.
    pub fn top_scorers(&self) -> Vec<Player> {
        top_n(&self.players, TOP_SCORES_COUNT)
    }

    /// Best score on the board, 0 when empty.
    pub fn first_top_score(&self) -> u64 {
        self.top_scorers().first().map(|p| p.score).unwrap_or(0)
    }

    /// Lowest score still on the board, 0 when empty. This is the cutoff a
    /// finished run must beat to earn a name-entry prompt.
    pub fn lowest_top_score(&self) -> u64 {
        self.top_scorers().last().map(|p| p.score).unwrap_or(0)
    }

    /// Whether a finished run beats the current cutoff.
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.lowest_top_score()
    }

    /// Whether a score wins the prize.
    pub fn is_prize_winner(score: u64) -> bool {
        score >= PRIZE_THRESHOLD
    }

    /// Record a new score under `name` and persist the top scorers.
    ///
    /// Names that trim to empty are rejected and nothing is stored; the
    /// caller's prompt stays pending.
    pub fn submit(&mut self, name: &str, score: u64, store: &dyn ScoreStore) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.players.push(Player::new(name, score));
        store.save(&self.top_scorers());
        log::info!("recorded {} points for {}", score, name);
        true
    }

    /// End-of-run banner text for the given final score.
    pub fn game_over_message(&self, score: u64) -> String {
        if score == 0 {
            "0 points... So sad.".to_string()
        } else if score >= self.first_top_score() {
            format!("New top score with {} points. Woo!", score)
        } else {
            format!("{} Points though :)", score)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn players(scores: &[u64]) -> Vec<Player> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &s)| Player::new(format!("p{}", i), s))
            .collect()
    }

    #[test]
    fn test_rank_descending() {
        let mut list = players(&[10, 30, 20]);
        rank(&mut list);
        let scores: Vec<u64> = list.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![30, 20, 10]);
    }

    #[test]
    fn test_rank_ties_keep_original_order() {
        let mut list = vec![
            Player::new("first", 20),
            Player::new("second", 20),
            Player::new("third", 30),
        ];
        rank(&mut list);
        assert_eq!(list[0].name, "third");
        assert_eq!(list[1].name, "first");
        assert_eq!(list[2].name, "second");
    }

    #[test]
    fn test_top_n_selection() {
        let list = players(&[10, 30, 20]);
        let top = top_n(&list, 2);
        let scores: Vec<u64> = top.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![30, 20]);
    }

    #[test]
    fn test_cutoffs_on_partial_board() {
        let mut board = Leaderboard::new();
        assert_eq!(board.first_top_score(), 0);
        assert_eq!(board.lowest_top_score(), 0);
        assert!(board.qualifies(1));

        let store = MemoryStore::default();
        board.submit("ada", 500, &store);
        board.submit("grace", 300, &store);
        assert_eq!(board.first_top_score(), 500);
        assert_eq!(board.lowest_top_score(), 300);
        assert!(board.qualifies(400));
        assert!(!board.qualifies(300));
    }

    #[test]
    fn test_blank_names_are_rejected() {
        let store = MemoryStore::default();
        let mut board = Leaderboard::new();
        assert!(!board.submit("", 100, &store));
        assert!(!board.submit("   ", 100, &store));
        assert!(board.players().is_empty());
        assert!(store.snapshot().is_empty());

        assert!(board.submit("  rin  ", 100, &store));
        assert_eq!(board.players()[0].name, "rin");
    }

    #[test]
    fn test_submit_persists_top_scorers_only() {
        let store = MemoryStore::default();
        let mut board = Leaderboard::new();
        for (i, score) in [100, 200, 300, 400, 500, 600, 50].iter().enumerate() {
            board.submit(&format!("p{}", i), *score, &store);
        }

        let saved = store.snapshot();
        assert_eq!(saved.len(), TOP_SCORES_COUNT);
        assert_eq!(saved[0].score, 600);
        assert_eq!(saved[TOP_SCORES_COUNT - 1].score, 200);
    }

    #[test]
    fn test_prize_threshold() {
        assert!(!Leaderboard::is_prize_winner(2999));
        assert!(Leaderboard::is_prize_winner(3000));
    }

    #[test]
    fn test_game_over_message_tiers() {
        let store = MemoryStore::default();
        let mut board = Leaderboard::new();
        board.submit("ada", 500, &store);

        assert_eq!(board.game_over_message(0), "0 points... So sad.");
        assert_eq!(board.game_over_message(100), "100 Points though :)");
        assert_eq!(
            board.game_over_message(700),
            "New top score with 700 points. Woo!"
        );
    }
}

//! High score leaderboard system
//!
//! Tracks the top 10 scores as a JSON file beside the game. Storage is
//! best-effort: a missing or unreadable file falls back to an empty
//! table and a save failure is logged and swallowed - persistence
//! trouble never reaches the simulation.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Name entered at game over
    pub name: String,
    pub score: f64,
    /// Unix timestamp (seconds) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn is_high_score(&self, score: f64) -> bool {
        if score <= 0.0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn record_score(&mut self, name: &str, score: f64, timestamp: f64) -> Option<usize> {
        if !self.is_high_score(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
            timestamp,
        };

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<f64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the leaderboard, falling back to empty on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    scores
                }
                Err(err) => {
                    log::warn!("High score file unreadable ({err}), starting fresh");
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save the leaderboard, best-effort
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(path, json) {
                    log::warn!("Failed to save high scores: {err}");
                } else {
                    log::info!("High scores saved ({} entries)", self.entries.len());
                }
            }
            Err(err) => log::warn!("Failed to serialize high scores: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_accepts_any_positive_score() {
        let scores = HighScores::new();
        assert!(scores.is_high_score(0.01));
        assert!(!scores.is_high_score(0.0));
        assert!(!scores.is_high_score(-5.0));
    }

    #[test]
    fn records_rank_in_descending_order() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record_score("A", 10.0, 0.0), Some(1));
        assert_eq!(scores.record_score("B", 30.0, 1.0), Some(1));
        assert_eq!(scores.record_score("C", 20.0, 2.0), Some(2));
        let ordered: Vec<_> = scores.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(ordered, vec!["B", "C", "A"]);
        assert_eq!(scores.top_score(), Some(30.0));
    }

    #[test]
    fn full_table_rejects_low_scores_and_trims() {
        let mut scores = HighScores::new();
        for i in 0..MAX_HIGH_SCORES {
            scores.record_score("X", (i as f64 + 1.0) * 10.0, 0.0);
        }
        assert!(!scores.is_high_score(5.0));
        assert_eq!(scores.record_score("Y", 5.0, 0.0), None);

        assert!(scores.is_high_score(95.0));
        assert_eq!(scores.record_score("Z", 95.0, 0.0), Some(2));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        // The old lowest entry fell off
        assert!(scores.entries.iter().all(|e| e.score >= 20.0));
    }

    #[test]
    fn missing_file_loads_empty() {
        let scores = HighScores::load(Path::new("/nonexistent/daily-bull-scores.json"));
        assert!(scores.is_empty());
    }
}

//! Best score tracking
//!
//! Persisted to LocalStorage as a plain integer.

use serde::{Deserialize, Serialize};

use crate::persistence;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub score: u64,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "snakeSatsBestScore";

    pub fn new(score: u64) -> Self {
        Self { score }
    }

    /// Check if a finished run beats the stored best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.score
    }

    /// Take `score` as the new best if it qualifies. Returns true when it did.
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.score = score;
        true
    }

    /// Load the best score; missing or unreadable values count as zero
    pub fn load() -> Self {
        let score = persistence::load_item(Self::STORAGE_KEY)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(0);
        log::info!("Best score: {}", score);
        Self { score }
    }

    pub fn save(&self) {
        persistence::save_item(Self::STORAGE_KEY, &self.score.to_string());
        log::info!("Best score saved ({})", self.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_only_improvements() {
        let mut best = BestScore::new(100);
        assert!(!best.record(100));
        assert!(!best.record(50));
        assert!(best.record(150));
        assert_eq!(best.score, 150);
    }

    #[test]
    fn test_load_save_roundtrip() {
        BestScore::new(320).save();
        assert_eq!(BestScore::load(), BestScore::new(320));
    }

    #[test]
    fn test_load_ignores_garbage() {
        persistence::save_item(BestScore::STORAGE_KEY, "lots");
        assert_eq!(BestScore::load().score, 0);
    }
}

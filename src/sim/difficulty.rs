//! Difficulty variants and their balance table

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_SPEED_MS;
use crate::error::EngineError;

/// Selectable difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Normal,
    Legendary,
}

/// The four numbers that differ between difficulties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// Tick period at speed level 1
    pub initial_speed_ms: u64,
    /// Period reduction per speed level
    pub speed_increment_ms: u64,
    /// Health restored by a sat
    pub health_gain_on_sat: i32,
    /// Health lost to a fiat
    pub fiat_damage: i32,
}

impl DifficultySettings {
    /// Tick period for a speed level, floored at `MIN_SPEED_MS`
    pub fn speed_ms_for_level(&self, speed_level: u32) -> u64 {
        let reduction = u64::from(speed_level.saturating_sub(1)) * self.speed_increment_ms;
        self.initial_speed_ms
            .saturating_sub(reduction)
            .max(MIN_SPEED_MS)
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 2] = [Difficulty::Normal, Difficulty::Legendary];

    pub fn settings(&self) -> DifficultySettings {
        match self {
            Difficulty::Normal => DifficultySettings {
                initial_speed_ms: 300,
                speed_increment_ms: 25,
                health_gain_on_sat: 8,
                fiat_damage: 25,
            },
            Difficulty::Legendary => DifficultySettings {
                initial_speed_ms: 200,
                speed_increment_ms: 30,
                health_gain_on_sat: 5,
                fiat_damage: 30,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Normal => "normal",
            Difficulty::Legendary => "legendary",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(Difficulty::Normal),
            "legendary" => Ok(Difficulty::Legendary),
            other => Err(EngineError::InvalidConfiguration(format!(
                "unknown difficulty '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_difficulty() {
        assert_eq!("normal".parse::<Difficulty>(), Ok(Difficulty::Normal));
        assert_eq!("Legendary".parse::<Difficulty>(), Ok(Difficulty::Legendary));
        assert!(matches!(
            "easy".parse::<Difficulty>(),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_speed_for_level() {
        let normal = Difficulty::Normal.settings();
        assert_eq!(normal.speed_ms_for_level(1), 300);
        assert_eq!(normal.speed_ms_for_level(2), 275);
        // 300 - 20 * 25 = -200, floored
        assert_eq!(normal.speed_ms_for_level(21), MIN_SPEED_MS);

        let legendary = Difficulty::Legendary.settings();
        assert_eq!(legendary.speed_ms_for_level(6), 50);
        assert_eq!(legendary.speed_ms_for_level(7), MIN_SPEED_MS);
    }

    #[test]
    fn test_speed_never_increases_with_level() {
        for difficulty in Difficulty::ALL {
            let settings = difficulty.settings();
            let mut last = settings.speed_ms_for_level(1);
            for level in 2..=crate::consts::MAX_SPEED_LEVEL {
                let speed = settings.speed_ms_for_level(level);
                assert!(speed <= last);
                assert!(speed >= MIN_SPEED_MS);
                last = speed;
            }
        }
    }
}

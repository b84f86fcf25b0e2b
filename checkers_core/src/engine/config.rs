use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Named search strength. Shallower cutoff plays weaker and faster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Easy,
    Advanced,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 4] = [Self::Beginner, Self::Easy, Self::Advanced, Self::Hard];

    /// Cutoff depth in plies.
    #[must_use]
    pub const fn cutoff_depth(self) -> u8 {
        match self {
            Self::Beginner => 5,
            Self::Easy => 9,
            Self::Advanced => 13,
            Self::Hard => 15,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Easy => "easy",
            Self::Advanced => "advanced",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty `{0}`, expected one of beginner, easy, advanced, hard")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.name() == wanted)
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub difficulty: Difficulty,
    /// Overrides the difficulty preset when set.
    pub cutoff_depth: Option<u8>,

    // Evaluation weights
    pub weight_material: i32,
    pub weight_mobility: i32,
    pub weight_jumps: i32,
    pub win_score: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            cutoff_depth: None,
            weight_material: 8,
            weight_mobility: 1,
            weight_jumps: 10,
            win_score: 1000,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_cutoff_depth(depth: u8) -> Self {
        Self {
            cutoff_depth: Some(depth),
            ..Self::default()
        }
    }

    /// Missing fields keep their defaults.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    #[must_use]
    pub fn cutoff_depth(&self) -> u8 {
        self.cutoff_depth.unwrap_or_else(|| self.difficulty.cutoff_depth())
    }
}

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Playing strength tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    const fn index(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

/// Depth and time budget per difficulty.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchParams {
    pub depths: [u32; 3],
    pub budgets_ms: [u64; 3],
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            depths: [2, 3, 4],
            budgets_ms: [400, 1500, 4000],
        }
    }
}

impl SearchParams {
    #[must_use]
    pub fn depth(&self, difficulty: Difficulty) -> u32 {
        self.depths[difficulty.index()]
    }

    #[must_use]
    pub fn budget(&self, difficulty: Difficulty) -> Duration {
        Duration::from_millis(self.budgets_ms[difficulty.index()])
    }

    /// Set the iterative-deepening limit for `difficulty` (at least 1).
    #[must_use]
    pub fn with_depth(mut self, difficulty: Difficulty, depth: u32) -> Self {
        self.depths[difficulty.index()] = depth.max(1);
        self
    }

    #[must_use]
    pub fn with_budget(mut self, difficulty: Difficulty, budget: Duration) -> Self {
        self.budgets_ms[difficulty.index()] = budget.as_millis() as u64;
        self
    }
}

//! Engine-wide configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::game::DEFAULT_PERPETUAL_REPEATS;
use super::search::SearchParams;

/// Default number of cached per-piece move lists
pub const DEFAULT_CACHE_CAPACITY: usize = 8192;

/// Default root penalty for a move that would complete a perpetual check
pub const DEFAULT_PERPETUAL_PENALTY: i32 = 500;

/// Configuration for an `Engine`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Maximum entries in the move cache; 0 disables it
    pub cache_capacity: usize,
    /// Repetitions that make a shuttle of checks perpetual
    pub perpetual_repeats: usize,
    /// Score subtracted at the root from moves completing a perpetual check
    pub perpetual_penalty: i32,
    /// Depth and time budget per difficulty
    pub search: SearchParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            perpetual_repeats: DEFAULT_PERPETUAL_REPEATS,
            perpetual_penalty: DEFAULT_PERPETUAL_PENALTY,
            search: SearchParams::default(),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_perpetual_repeats(mut self, repeats: usize) -> Self {
        self.perpetual_repeats = repeats;
        self
    }

    #[must_use]
    pub fn with_perpetual_penalty(mut self, penalty: i32) -> Self {
        self.perpetual_penalty = penalty;
        self
    }

    #[must_use]
    pub fn with_search_params(mut self, params: SearchParams) -> Self {
        self.search = params;
        self
    }
}

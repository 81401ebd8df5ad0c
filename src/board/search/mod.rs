//! Search module implementing alpha-beta with iterative deepening.
//!
//! Features:
//! - Iterative deepening up to the difficulty's depth
//! - Negamax alpha-beta with mate scores adjusted by ply
//! - Move ordering (MVV-LVA captures, killers, history, positional delta)
//! - Cooperative wall-clock deadline polled at every node
//! - Root penalty for moves that would complete a perpetual check

mod alphabeta;
mod constants;
mod move_order;
mod params;

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Move;
use constants::{HISTORY_MAX, KILLERS_PER_PLY, MAX_PLY};

pub use constants::{MATE_SCORE, MATE_THRESHOLD};
pub use params::{Difficulty, SearchParams};

/// Outcome of `Engine::search`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchResult {
    /// Best move of the deepest completed iteration; `None` only when the
    /// side to move has no legal move or the game is over
    pub best_move: Option<Move>,
    /// Score of `best_move` from the mover's point of view
    pub score: i32,
    /// Deepest iteration that completed
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
    /// Whether the deadline cut the search short
    pub timed_out: bool,
}

impl SearchResult {
    fn empty() -> Self {
        SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            elapsed: Duration::ZERO,
            timed_out: false,
        }
    }

    /// Moves to mate if `score` is a mate score (negative when being mated).
    #[must_use]
    pub fn mate_in(&self) -> Option<i32> {
        if self.score.abs() < MATE_THRESHOLD {
            None
        } else if self.score > 0 {
            Some((MATE_SCORE - self.score + 1) / 2)
        } else {
            Some(-(MATE_SCORE + self.score + 1) / 2)
        }
    }
}

/// Quiet moves that caused a beta cutoff, per ply.
#[derive(Debug)]
pub struct KillerTable {
    slots: [[Option<Move>; KILLERS_PER_PLY]; MAX_PLY],
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KillerTable {
    #[must_use]
    pub fn new() -> Self {
        KillerTable {
            slots: [[None; KILLERS_PER_PLY]; MAX_PLY],
        }
    }

    /// Slot holding `mv` at `ply` (0 is the most recent)
    #[must_use]
    pub fn slot_of(&self, ply: usize, mv: Move) -> Option<usize> {
        self.slots
            .get(ply)
            .and_then(|row| row.iter().position(|&k| k == Some(mv)))
    }

    pub fn update(&mut self, ply: usize, mv: Move) {
        let Some(row) = self.slots.get_mut(ply) else {
            return;
        };
        if row[0] != Some(mv) {
            row[1] = row[0];
            row[0] = Some(mv);
        }
    }

    pub fn reset(&mut self) {
        for row in &mut self.slots {
            *row = [None; KILLERS_PER_PLY];
        }
    }
}

/// Cutoff counts per from/to pair, accumulated across the whole search.
#[derive(Debug)]
pub struct HistoryTable {
    entries: Box<[i32; 90 * 90]>,
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryTable {
    #[must_use]
    pub fn new() -> Self {
        HistoryTable {
            entries: Box::new([0; 90 * 90]),
        }
    }

    #[must_use]
    pub fn score(&self, mv: Move) -> i32 {
        self.entries[mv.table_index()]
    }

    /// Credit a move that caused a beta cutoff at `depth`
    pub fn update(&mut self, mv: Move, depth: u32) {
        let bonus = (depth * depth) as i32;
        let entry = &mut self.entries[mv.table_index()];
        *entry = entry.saturating_add(bonus).min(HISTORY_MAX);
    }

    pub fn reset(&mut self) {
        self.entries.fill(0);
    }
}

/// Tables used during search (killers, history)
#[derive(Debug, Default)]
pub struct SearchTables {
    pub killers: KillerTable,
    pub history: HistoryTable,
}

impl SearchTables {
    #[must_use]
    pub fn new() -> Self {
        SearchTables {
            killers: KillerTable::new(),
            history: HistoryTable::new(),
        }
    }

    /// Forget everything learned by a previous search
    pub fn reset(&mut self) {
        self.killers.reset();
        self.history.reset();
    }
}

//! Position cache: per-piece move lists and a per-board piece index.
//!
//! Move lists are kept in a bounded LRU keyed by the board fingerprint and
//! the piece's identity, square and mode. The piece index holds each side's
//! live pieces and general square for the most recently queried board and is
//! rebuilt by a full scan whenever the queried board's stamp changes.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Board, GenMode, Piece, PieceId, PieceKind, Side, Square};

/// Hit and miss counters for both caches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CacheStats {
    pub move_hits: u64,
    pub move_misses: u64,
    pub evictions: u64,
    pub index_hits: u64,
    pub index_rebuilds: u64,
}

impl CacheStats {
    /// Fraction of move-list lookups served from the cache
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.move_hits + self.move_misses;
        if total == 0 {
            0.0
        } else {
            self.move_hits as f64 / total as f64
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct MoveKey {
    hash: u64,
    id: PieceId,
    square: Square,
    moved: bool,
    mode: GenMode,
}

#[derive(Debug)]
struct MoveEntry {
    destinations: Vec<Square>,
    tick: u64,
}

/// Live pieces and general squares of one board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardIndex {
    stamp: (u64, u32),
    pieces: [Vec<Piece>; 2],
    generals: [Option<Square>; 2],
}

impl BoardIndex {
    fn build(board: &Board) -> Self {
        let mut pieces: [Vec<Piece>; 2] = [Vec::with_capacity(16), Vec::with_capacity(16)];
        let mut generals = [None; 2];
        for piece in board.all_pieces() {
            if piece.kind == PieceKind::General {
                generals[piece.side.index()] = Some(piece.square);
            }
            pieces[piece.side.index()].push(piece);
        }
        BoardIndex {
            stamp: (board.hash(), board.ply()),
            pieces,
            generals,
        }
    }

    /// Live pieces of `side`, in board order
    #[must_use]
    pub fn pieces(&self, side: Side) -> &[Piece] {
        &self.pieces[side.index()]
    }

    #[must_use]
    pub fn general(&self, side: Side) -> Option<Square> {
        self.generals[side.index()]
    }
}

/// Bounded LRU of move lists plus the stamped board index.
#[derive(Debug)]
pub struct PositionCache {
    capacity: usize,
    entries: HashMap<MoveKey, MoveEntry>,
    recency: BTreeMap<u64, MoveKey>,
    tick: u64,
    index: Option<Arc<BoardIndex>>,
    stats: CacheStats,
}

impl PositionCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        PositionCache {
            capacity,
            entries: HashMap::with_capacity(capacity.min(1 << 16)),
            recency: BTreeMap::new(),
            tick: 0,
            index: None,
            stats: CacheStats::default(),
        }
    }

    /// Destinations of `piece` on `board`, served from the cache when the
    /// same piece was queried on the same position before.
    pub fn destinations(&mut self, board: &Board, piece: &Piece, mode: GenMode) -> Vec<Square> {
        if self.capacity == 0 {
            self.stats.move_misses += 1;
            return board.piece_destinations(piece, mode);
        }

        let key = MoveKey {
            hash: board.hash(),
            id: piece.id,
            square: piece.square,
            moved: piece.moved,
            mode,
        };
        self.tick += 1;
        let tick = self.tick;

        if let Some(entry) = self.entries.get_mut(&key) {
            self.recency.remove(&entry.tick);
            entry.tick = tick;
            self.recency.insert(tick, key);
            self.stats.move_hits += 1;
            return entry.destinations.clone();
        }

        self.stats.move_misses += 1;
        let destinations = board.piece_destinations(piece, mode);
        while self.entries.len() >= self.capacity {
            let Some((_, oldest)) = self.recency.pop_first() else {
                break;
            };
            self.entries.remove(&oldest);
            self.stats.evictions += 1;
        }
        self.entries.insert(
            key,
            MoveEntry {
                destinations: destinations.clone(),
                tick,
            },
        );
        self.recency.insert(tick, key);
        destinations
    }

    /// Piece index of `board`, rescanned if the board's stamp differs from
    /// the cached one.
    pub fn index(&mut self, board: &Board) -> Arc<BoardIndex> {
        let stamp = (board.hash(), board.ply());
        match &self.index {
            Some(index) if index.stamp == stamp => {
                self.stats.index_hits += 1;
                Arc::clone(index)
            }
            _ => {
                self.stats.index_rebuilds += 1;
                let index = Arc::new(BoardIndex::build(board));
                self.index = Some(Arc::clone(&index));
                index
            }
        }
    }

    /// Drop every cached move list and the board index.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
        self.index = None;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl Default for PositionCache {
    fn default() -> Self {
        PositionCache::new(super::config::DEFAULT_CACHE_CAPACITY)
    }
}

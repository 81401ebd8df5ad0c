//! Zobrist hashing for Xiangqi positions.
//!
//! Provides the incrementally-updatable 64-bit board fingerprint that keys
//! the position cache.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{PieceKind, Side, Square, NUM_SQUARES};

pub(crate) struct ZobristKeys {
    // piece_keys[side][kind][square_index]
    pub(crate) piece_keys: [[[u64; NUM_SQUARES]; 7]; 2],
    pub(crate) black_to_move_key: u64,
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(0x5851_F42D_4C95_7F2D); // Fixed seed for reproducibility
        let mut piece_keys = [[[0; NUM_SQUARES]; 7]; 2];

        for side in &mut piece_keys {
            for kind in side.iter_mut() {
                for key in kind.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key: rng.gen(),
        }
    }

    #[inline]
    pub(crate) fn piece(&self, side: Side, kind: PieceKind, sq: Square) -> u64 {
        self.piece_keys[side.index()][kind.index()][sq.index()]
    }
}

// Initialized lazily and shared by every board
pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

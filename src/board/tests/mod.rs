//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `movegen.rs` - Per-piece movement rules
//! - `rules.rs` - Check, legality and terminal statuses
//! - `cache.rs` - Position cache behaviour through the engine
//! - `eval.rs` - Static evaluation
//! - `search.rs` - Tactical search positions
//! - `perft.rs` - Move path counts
//! - `proptest.rs` - Property-based tests

mod cache;
mod perft;
mod search;

use crate::board::{Board, BoardBuilder, PieceKind, Side, Square};

/// Only the two generals, on different files.
pub(super) fn bare_generals() -> BoardBuilder {
    BoardBuilder::new()
        .piece(Square(4, 9), Side::Red, PieceKind::General)
        .piece(Square(3, 0), Side::Black, PieceKind::General)
}

pub(super) fn build(builder: BoardBuilder) -> Board {
    builder.build().expect("valid test position")
}

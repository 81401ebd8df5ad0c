//! Core Xiangqi types.
//!
//! - `PieceKind`, `Side`, `Piece` - piece records and their identity
//! - `Square` - (file, rank) coordinates plus palace and river queries
//! - `Move` - from/to pair with ICCS notation

mod moves;
mod piece;
mod square;

pub use moves::Move;
pub use piece::{Piece, PieceId, PieceKind, Side};
pub use square::{
    is_in_palace, is_own_side, is_valid_coordinate, Square, FILES, NUM_SQUARES, RANKS,
};

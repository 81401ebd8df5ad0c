//! Fluent builder for constructing Xiangqi positions.
//!
//! Allows creating positions piece by piece rather than parsing FEN strings.
//!
//! # Example
//! ```
//! use xiangqi_engine::board::{BoardBuilder, PieceKind, Side, Square};
//!
//! let board = BoardBuilder::new()
//!     .piece(Square(4, 9), Side::Red, PieceKind::General)
//!     .piece(Square(3, 0), Side::Black, PieceKind::General)
//!     .piece(Square(0, 5), Side::Red, PieceKind::Chariot)
//!     .side_to_move(Side::Black)
//!     .build()
//!     .unwrap();
//! assert_eq!(board.all_pieces().count(), 3);
//! ```

use super::error::BoardError;
use super::{Board, Piece, PieceId, PieceKind, Side, Square};

/// A fluent builder for constructing `Board` positions.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    pieces: Vec<(Square, Side, PieceKind)>,
    side_to_move: Side,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardBuilder {
    /// Create a new empty board builder with Red to move.
    #[must_use]
    pub fn new() -> Self {
        BoardBuilder {
            pieces: Vec::new(),
            side_to_move: Side::Red,
        }
    }

    /// Create a builder holding the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        let board = Board::new();
        BoardBuilder {
            pieces: board
                .all_pieces()
                .map(|p| (p.square, p.side, p.kind))
                .collect(),
            side_to_move: Side::Red,
        }
    }

    /// Place a piece, replacing whatever was on that square.
    #[must_use]
    pub fn piece(mut self, square: Square, side: Side, kind: PieceKind) -> Self {
        self.pieces.retain(|(sq, _, _)| *sq != square);
        self.pieces.push((square, side, kind));
        self
    }

    /// Remove a piece from a square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.pieces.retain(|(sq, _, _)| *sq != square);
        self
    }

    /// Set the side to move.
    #[must_use]
    pub const fn side_to_move(mut self, side: Side) -> Self {
        self.side_to_move = side;
        self
    }

    /// Build the board.
    ///
    /// Piece ids are assigned in board order. Fails on an off-board square
    /// or a second general for one side.
    pub fn build(mut self) -> Result<Board, BoardError> {
        for (square, _, _) in &self.pieces {
            square.validate()?;
        }
        self.pieces.sort_by_key(|(sq, _, _)| sq.index());

        let mut board = Board::empty();
        let mut generals = [false; 2];
        for (id, (square, side, kind)) in self.pieces.into_iter().enumerate() {
            if kind == PieceKind::General {
                if generals[side.index()] {
                    return Err(BoardError::TooManyGenerals { side });
                }
                generals[side.index()] = true;
            }
            board.put(Piece::new(PieceId(id as u8), kind, side, square));
        }
        board.set_side_to_move(self.side_to_move);
        Ok(board)
    }
}

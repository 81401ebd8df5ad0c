use crate::zobrist::ZOBRIST;

use super::error::BoardError;
use super::{Piece, PieceId, PieceKind, Side, Square, NUM_SQUARES};

/// Back-rank layout from file 0 to file 8
const BACK_RANK: [PieceKind; 9] = [
    PieceKind::Chariot,
    PieceKind::Horse,
    PieceKind::Elephant,
    PieceKind::Advisor,
    PieceKind::General,
    PieceKind::Advisor,
    PieceKind::Elephant,
    PieceKind::Horse,
    PieceKind::Chariot,
];

/// A Xiangqi position: 90 cells, side to move, move count and fingerprint.
///
/// Equality compares every cell, so two boards are equal exactly when a
/// simulate/undo cycle left nothing behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub(crate) cells: [Option<Piece>; NUM_SQUARES],
    pub(crate) side_to_move: Side,
    pub(crate) hash: u64,
    pub(crate) ply: u32,
}

impl Board {
    /// The standard 32-piece starting position, Red to move.
    #[must_use]
    pub fn new() -> Self {
        let mut layout: Vec<(Square, Side, PieceKind)> = Vec::with_capacity(32);
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            layout.push((Square(file as u8, 0), Side::Black, kind));
            layout.push((Square(file as u8, 9), Side::Red, kind));
        }
        for file in [1u8, 7] {
            layout.push((Square(file, 2), Side::Black, PieceKind::Cannon));
            layout.push((Square(file, 7), Side::Red, PieceKind::Cannon));
        }
        for file in [0u8, 2, 4, 6, 8] {
            layout.push((Square(file, 3), Side::Black, PieceKind::Soldier));
            layout.push((Square(file, 6), Side::Red, PieceKind::Soldier));
        }
        // Ids follow board order so they are stable for a given layout
        layout.sort_by_key(|(sq, _, _)| sq.index());

        let mut board = Board::empty();
        for (id, (sq, side, kind)) in layout.into_iter().enumerate() {
            board.cells[sq.index()] = Some(Piece::new(PieceId(id as u8), kind, side, sq));
        }
        board.hash = board.compute_hash();
        board
    }

    /// An empty board with Red to move.
    #[must_use]
    pub fn empty() -> Self {
        Board {
            cells: [None; NUM_SQUARES],
            side_to_move: Side::Red,
            hash: 0,
            ply: 0,
        }
    }

    /// Zobrist fingerprint of the position (placement and side to move)
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[must_use]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Number of moves applied to this board since setup
    #[must_use]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Piece on `sq`, or `None` for empty or off-board squares.
    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        if sq.is_valid() {
            self.cells[sq.index()]
        } else {
            None
        }
    }

    /// Piece on `sq`, distinguishing an invalid square from an empty one.
    pub fn piece(&self, sq: Square) -> Result<Piece, BoardError> {
        let sq = sq.validate()?;
        self.cells[sq.index()].ok_or(BoardError::NoPiece { square: sq })
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.cells[sq.index()].is_none()
    }

    /// All pieces of `side`, in board order
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = Piece> + '_ {
        self.cells
            .iter()
            .flatten()
            .copied()
            .filter(move |p| p.side == side)
    }

    /// All pieces on the board, in board order
    pub fn all_pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.cells.iter().flatten().copied()
    }

    /// Square of `side`'s general, if it is still on the board
    #[must_use]
    pub fn general_square(&self, side: Side) -> Option<Square> {
        self.pieces(side)
            .find(|p| p.kind == PieceKind::General)
            .map(|p| p.square)
    }

    pub(crate) fn set_side_to_move(&mut self, side: Side) {
        if self.side_to_move != side {
            self.side_to_move = side;
            self.hash ^= ZOBRIST.black_to_move_key;
        }
    }

    /// Place a piece on its own square, updating the fingerprint.
    pub(crate) fn put(&mut self, piece: Piece) {
        let idx = piece.square.index();
        if let Some(old) = self.cells[idx] {
            self.hash ^= ZOBRIST.piece(old.side, old.kind, old.square);
        }
        self.cells[idx] = Some(piece);
        self.hash ^= ZOBRIST.piece(piece.side, piece.kind, piece.square);
    }

    /// Recompute the fingerprint from scratch
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        let mut hash = self
            .all_pieces()
            .fold(0u64, |h, p| h ^ ZOBRIST.piece(p.side, p.kind, p.square));
        if self.side_to_move == Side::Black {
            hash ^= ZOBRIST.black_to_move_key;
        }
        hash
    }

    /// Check the cell/coordinate and one-general invariants.
    pub fn validate(&self) -> Result<(), BoardError> {
        let mut generals = [0u8; 2];
        for (idx, cell) in self.cells.iter().enumerate() {
            let Some(piece) = cell else { continue };
            if piece.square.index() != idx {
                return Err(BoardError::Misplaced {
                    square: Square::from_index(idx),
                });
            }
            if piece.kind == PieceKind::General {
                generals[piece.side.index()] += 1;
                if generals[piece.side.index()] > 1 {
                    return Err(BoardError::TooManyGenerals { side: piece.side });
                }
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

/// The standard starting layout.
#[must_use]
pub fn initialize_board() -> Board {
    Board::new()
}

use crate::zobrist::ZOBRIST;

use super::{Board, Move, Piece};

/// Everything needed to take a move back exactly.
#[derive(Clone, Debug)]
pub struct UnmakeInfo {
    pub(crate) mover: Option<Piece>,
    pub(crate) captured: Option<Piece>,
    pub(crate) previous_hash: u64,
}

impl UnmakeInfo {
    /// The piece removed by the move, if any
    #[must_use]
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }
}

impl Board {
    /// Apply `mv` without any legality checking and flip the side to move.
    ///
    /// Callers pair this with `unmake_move`; `with_move` does the pairing.
    pub(crate) fn make_move(&mut self, mv: Move) -> UnmakeInfo {
        let from_idx = mv.from.index();
        let to_idx = mv.to.index();
        let mover = self.cells[from_idx];
        let captured = self.cells[to_idx];
        let previous_hash = self.hash;

        debug_assert!(mover.is_some(), "make_move from empty square {}", mv.from);

        if let Some(piece) = mover {
            self.hash ^= ZOBRIST.piece(piece.side, piece.kind, piece.square);
            if let Some(victim) = captured {
                self.hash ^= ZOBRIST.piece(victim.side, victim.kind, victim.square);
            }
            let moved = Piece {
                square: mv.to,
                moved: true,
                ..piece
            };
            self.cells[from_idx] = None;
            self.cells[to_idx] = Some(moved);
            self.hash ^= ZOBRIST.piece(moved.side, moved.kind, moved.square);
        }

        self.side_to_move = self.side_to_move.opponent();
        self.hash ^= ZOBRIST.black_to_move_key;
        self.ply += 1;

        UnmakeInfo {
            mover,
            captured,
            previous_hash,
        }
    }

    /// Take back a move made by `make_move`.
    pub(crate) fn unmake_move(&mut self, mv: Move, info: UnmakeInfo) {
        if info.mover.is_some() {
            self.cells[mv.to.index()] = info.captured;
            self.cells[mv.from.index()] = info.mover;
        }
        self.side_to_move = self.side_to_move.opponent();
        self.hash = info.previous_hash;
        self.ply -= 1;
    }

    /// Run `f` on the position after `mv`, then restore the board.
    ///
    /// The undo is tied to the closure's scope so a simulation can never be
    /// left applied.
    pub(crate) fn with_move<R>(&mut self, mv: Move, f: impl FnOnce(&mut Board) -> R) -> R {
        let info = self.make_move(mv);
        let result = f(self);
        self.unmake_move(mv, info);
        result
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{Board, Move, PieceKind, Side, Square};

    #[test]
    fn test_make_unmake_restores_board() {
        let mut board = Board::new();
        let original = board.clone();
        let mv = Move::new(Square(7, 7), Square(4, 7));

        let info = board.make_move(mv);
        assert_eq!(board.side_to_move(), Side::Black);
        assert_eq!(board.ply(), 1);
        assert!(board.piece_at(Square(7, 7)).is_none());
        let cannon = board.piece_at(Square(4, 7)).expect("cannon moved");
        assert_eq!(cannon.square, Square(4, 7));
        assert!(cannon.moved);
        assert_eq!(board.hash(), board.compute_hash());

        board.unmake_move(mv, info);
        assert_eq!(board, original);
    }

    #[test]
    fn test_capture_make_unmake() {
        let mut board = Board::new();
        let original = board.clone();
        // Cannon jumps the black cannon screen onto the black horse
        let mv = Move::new(Square(1, 7), Square(1, 0));

        let info = board.make_move(mv);
        assert_eq!(info.captured().map(|p| p.kind), Some(PieceKind::Horse));
        assert_eq!(board.all_pieces().count(), 31);
        assert_eq!(board.hash(), board.compute_hash());

        board.unmake_move(mv, info);
        assert_eq!(board, original);
    }

    #[test]
    fn test_with_move_scopes_the_simulation() {
        let mut board = Board::new();
        let original = board.clone();
        let mv = Move::new(Square(0, 6), Square(0, 5));

        let moved_piece = board.with_move(mv, |b| b.piece_at(Square(0, 5)));
        assert_eq!(moved_piece.map(|p| p.kind), Some(PieceKind::Soldier));
        assert_eq!(board, original);
    }
}

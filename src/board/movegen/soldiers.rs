use super::super::{Board, Piece, Square};

impl Board {
    /// One step forward; once across the river also one step sideways.
    /// Soldiers never retreat.
    pub(crate) fn soldier_destinations(&self, piece: &Piece, out: &mut Vec<Square>) {
        if let Some(to) = piece.square.offset(0, piece.side.forward()) {
            self.push_if_not_own(to, piece.side, out);
        }
        if !piece.square.on_own_side(piece.side) {
            for df in [-1, 1] {
                if let Some(to) = piece.square.offset(df, 0) {
                    self.push_if_not_own(to, piece.side, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{BoardBuilder, GenMode, PieceKind, Side, Square};

    fn sorted(mut squares: Vec<Square>) -> Vec<Square> {
        squares.sort();
        squares
    }

    #[test]
    fn test_soldier_before_river_only_forward() {
        let board = BoardBuilder::new()
            .piece(Square(2, 6), Side::Red, PieceKind::Soldier)
            .piece(Square(6, 4), Side::Black, PieceKind::Soldier)
            .build()
            .unwrap();
        assert_eq!(
            board.destinations(Square(2, 6), GenMode::Full).unwrap(),
            vec![Square(2, 5)]
        );
        assert_eq!(
            board.destinations(Square(6, 4), GenMode::Full).unwrap(),
            vec![Square(6, 5)]
        );
    }

    #[test]
    fn test_soldier_after_river_gains_sideways() {
        let board = BoardBuilder::new()
            .piece(Square(4, 4), Side::Red, PieceKind::Soldier)
            .build()
            .unwrap();
        let dests = sorted(board.destinations(Square(4, 4), GenMode::Full).unwrap());
        assert_eq!(dests, vec![Square(3, 4), Square(4, 3), Square(5, 4)]);
    }

    #[test]
    fn test_soldier_on_last_rank_moves_sideways_only() {
        let board = BoardBuilder::new()
            .piece(Square(0, 9), Side::Black, PieceKind::Soldier)
            .piece(Square(1, 9), Side::Black, PieceKind::Soldier)
            .build()
            .unwrap();
        // Edge file and own neighbour leave nothing
        assert!(board
            .destinations(Square(0, 9), GenMode::Full)
            .unwrap()
            .is_empty());
        assert_eq!(
            board.destinations(Square(1, 9), GenMode::Full).unwrap(),
            vec![Square(2, 9)]
        );
    }
}

use super::super::{Board, Piece, PieceKind, Square};
use super::{GenMode, DIAGONAL, ORTHOGONAL};

impl Board {
    pub(crate) fn general_destinations(&self, piece: &Piece, mode: GenMode, out: &mut Vec<Square>) {
        let enemy_general = self.general_square(piece.side.opponent());
        for (df, dr) in ORTHOGONAL {
            let Some(to) = piece.square.offset(df, dr) else {
                continue;
            };
            if !to.in_palace(piece.side) {
                continue;
            }
            if mode == GenMode::Full {
                if let Some(enemy) = enemy_general {
                    if to != enemy && self.open_file_between(to, enemy, piece.square) {
                        continue;
                    }
                }
            }
            self.push_if_not_own(to, piece.side, out);
        }
    }

    pub(crate) fn advisor_destinations(&self, piece: &Piece, out: &mut Vec<Square>) {
        for (df, dr) in DIAGONAL {
            if let Some(to) = piece.square.offset(df, dr) {
                if to.in_palace(piece.side) {
                    self.push_if_not_own(to, piece.side, out);
                }
            }
        }
    }

    /// True iff `a` and `b` share a file with no piece strictly between
    /// them, treating `vacated` as empty.
    pub(crate) fn open_file_between(&self, a: Square, b: Square, vacated: Square) -> bool {
        if a.file() != b.file() {
            return false;
        }
        let (low, high) = if a.rank() < b.rank() {
            (a.rank(), b.rank())
        } else {
            (b.rank(), a.rank())
        };
        ((low + 1)..high).all(|rank| {
            let sq = Square(a.file(), rank);
            sq == vacated || self.is_empty(sq)
        })
    }

    /// Whether the two generals would face each other after the general on
    /// `from` steps to `to`.
    #[must_use]
    pub(crate) fn general_step_faces(&self, from: Square, to: Square) -> bool {
        let Some(general) = self.piece_at(from).filter(|p| p.kind == PieceKind::General) else {
            return false;
        };
        self.general_square(general.side.opponent())
            .is_some_and(|enemy| to != enemy && self.open_file_between(to, enemy, from))
    }
}

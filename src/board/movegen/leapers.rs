use super::super::{Board, Piece, Square};
use super::DIAGONAL;

/// Horse jumps paired with the leg cell on the long axis, next to the origin.
const HORSE_JUMPS: [((i8, i8), (i8, i8)); 8] = [
    ((1, -2), (0, -1)),
    ((-1, -2), (0, -1)),
    ((1, 2), (0, 1)),
    ((-1, 2), (0, 1)),
    ((2, 1), (1, 0)),
    ((2, -1), (1, 0)),
    ((-2, 1), (-1, 0)),
    ((-2, -1), (-1, 0)),
];

impl Board {
    pub(crate) fn elephant_destinations(&self, piece: &Piece, out: &mut Vec<Square>) {
        for (df, dr) in DIAGONAL {
            let Some(eye) = piece.square.offset(df, dr) else {
                continue;
            };
            let Some(to) = piece.square.offset(2 * df, 2 * dr) else {
                continue;
            };
            if !to.on_own_side(piece.side) || !self.is_empty(eye) {
                continue;
            }
            self.push_if_not_own(to, piece.side, out);
        }
    }

    pub(crate) fn horse_destinations(&self, piece: &Piece, out: &mut Vec<Square>) {
        for ((df, dr), (lf, lr)) in HORSE_JUMPS {
            let Some(to) = piece.square.offset(df, dr) else {
                continue;
            };
            let Some(leg) = piece.square.offset(lf, lr) else {
                continue;
            };
            if self.is_empty(leg) {
                self.push_if_not_own(to, piece.side, out);
            }
        }
    }
}

use super::super::{Board, Piece, Square};
use super::ORTHOGONAL;

impl Board {
    pub(crate) fn chariot_destinations(&self, piece: &Piece, out: &mut Vec<Square>) {
        for (df, dr) in ORTHOGONAL {
            let mut current = piece.square;
            while let Some(to) = current.offset(df, dr) {
                match self.cells[to.index()] {
                    None => out.push(to),
                    Some(occupant) => {
                        if occupant.side != piece.side {
                            out.push(to);
                        }
                        break;
                    }
                }
                current = to;
            }
        }
    }

    /// Quiet moves slide like a chariot; captures need exactly one screen
    /// between the cannon and its target.
    pub(crate) fn cannon_destinations(&self, piece: &Piece, out: &mut Vec<Square>) {
        for (df, dr) in ORTHOGONAL {
            let mut current = piece.square;
            let mut screened = false;
            while let Some(to) = current.offset(df, dr) {
                current = to;
                match (self.cells[to.index()], screened) {
                    (None, false) => out.push(to),
                    (None, true) => {}
                    (Some(_), false) => screened = true,
                    (Some(target), true) => {
                        if target.side != piece.side {
                            out.push(to);
                        }
                        break;
                    }
                }
            }
        }
    }
}

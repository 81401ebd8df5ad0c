//! Per-piece destination generation.
//!
//! Generators answer "where can this piece go by its movement rule" and
//! ignore whether the move exposes the mover's own general; that filter
//! lives in `rules`.

mod leapers;
mod palace;
mod sliders;
mod soldiers;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::BoardError;
use super::{Board, Piece, PieceKind, Side, Square};

/// Generation mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GenMode {
    /// Moves for actual play: general steps that would face the enemy
    /// general on an open file are dropped.
    Full,
    /// Squares a piece attacks: no flying-general filter, so a general's
    /// candidate square is still seen as covered by the enemy.
    Threat,
}

const ORTHOGONAL: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

impl Board {
    /// Destinations of the piece on `from` under `mode`.
    ///
    /// Fails with `BoardError::NoPiece` for an empty square so callers can
    /// tell "no moves" apart from "nothing there".
    pub fn destinations(&self, from: Square, mode: GenMode) -> Result<Vec<Square>, BoardError> {
        let piece = self.piece(from)?;
        Ok(self.piece_destinations(&piece, mode))
    }

    /// Destinations of a piece known to be on the board.
    pub(crate) fn piece_destinations(&self, piece: &Piece, mode: GenMode) -> Vec<Square> {
        let mut out = Vec::with_capacity(17);
        match piece.kind {
            PieceKind::General => self.general_destinations(piece, mode, &mut out),
            PieceKind::Advisor => self.advisor_destinations(piece, &mut out),
            PieceKind::Elephant => self.elephant_destinations(piece, &mut out),
            PieceKind::Horse => self.horse_destinations(piece, &mut out),
            PieceKind::Chariot => self.chariot_destinations(piece, &mut out),
            PieceKind::Cannon => self.cannon_destinations(piece, &mut out),
            PieceKind::Soldier => self.soldier_destinations(piece, &mut out),
        }
        out
    }

    /// Push `to` unless a piece of `side` stands there.
    #[inline]
    fn push_if_not_own(&self, to: Square, side: Side, out: &mut Vec<Square>) {
        match self.cells[to.index()] {
            Some(occupant) if occupant.side == side => {}
            _ => out.push(to),
        }
    }
}

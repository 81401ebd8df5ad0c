//! Static evaluation.
//!
//! Only the search calls this, at leaves and at nodes cut short by the
//! deadline. Rules never depend on it.

use super::pst::{
    mobility_weight, square_value, CHECK_BONUS, KING_GUARD_BONUS, MOBILITY_CAP,
    SOLDIER_ADVANCE_BONUS,
};
use super::{Board, GenMode, Piece, PieceKind, Side, Square};

/// Per-side evaluation terms, before subtracting the opponent's.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalTerms {
    pub material: i32,
    pub position: i32,
    pub king_safety: i32,
    pub soldier_advance: i32,
    pub mobility: i32,
}

impl EvalTerms {
    #[must_use]
    pub fn total(&self) -> i32 {
        self.material + self.position + self.king_safety + self.soldier_advance + self.mobility
    }
}

impl Board {
    /// Evaluation from `perspective`'s point of view (positive is good for
    /// `perspective`).
    #[must_use]
    pub fn evaluate(&self, perspective: Side) -> i32 {
        let own = self.eval_terms(perspective).total();
        let theirs = self.eval_terms(perspective.opponent()).total();
        let mut score = own - theirs;

        if self.in_check(perspective.opponent()) {
            score += CHECK_BONUS;
        }
        if self.in_check(perspective) {
            score -= CHECK_BONUS;
        }
        score
    }

    /// The terms contributed by `side`'s pieces alone.
    #[must_use]
    pub fn eval_terms(&self, side: Side) -> EvalTerms {
        let general = self.general_square(side);
        let mut terms = EvalTerms::default();

        for piece in self.pieces(side) {
            terms.material += piece.kind.value();
            terms.position += square_value(piece.kind, side, piece.square);
            terms.mobility += mobility(self, &piece);

            match piece.kind {
                PieceKind::Advisor | PieceKind::Elephant => {
                    if general.is_some_and(|g| is_adjacent(g, piece.square)) {
                        terms.king_safety += KING_GUARD_BONUS;
                    }
                }
                PieceKind::Soldier => {
                    terms.soldier_advance += SOLDIER_ADVANCE_BONUS * ranks_past_river(&piece);
                }
                _ => {}
            }
        }
        terms
    }
}

/// Static evaluation of `board` from `perspective`'s point of view.
#[must_use]
pub fn evaluate(board: &Board, perspective: Side) -> i32 {
    board.evaluate(perspective)
}

fn mobility(board: &Board, piece: &Piece) -> i32 {
    let weight = mobility_weight(piece.kind);
    if weight == 0 {
        return 0;
    }
    let count = board.piece_destinations(piece, GenMode::Full).len() as i32;
    (weight * count).clamp(0, MOBILITY_CAP)
}

fn is_adjacent(a: Square, b: Square) -> bool {
    a != b && a.file().abs_diff(b.file()) <= 1 && a.rank().abs_diff(b.rank()) <= 1
}

fn ranks_past_river(soldier: &Piece) -> i32 {
    let rank = i32::from(soldier.square.rank());
    match soldier.side {
        Side::Red => (5 - rank).max(0),
        Side::Black => (rank - 4).max(0),
    }
}

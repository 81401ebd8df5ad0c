//! Move ordering for search.

use super::super::pst::square_value;
use super::super::{Board, Move};
use super::constants::{CAPTURE_BONUS, CAPTURE_CLASS, KILLER_CLASS, QUIET_CLASS};
use super::SearchTables;

/// Sort key: class first, then the class's own score, then the positional
/// delta. Larger is searched earlier.
pub(crate) type OrderKey = (u8, i32, i32);

/// Ordering key of `mv` on `board` at `ply`.
pub(crate) fn order_key(board: &Board, tables: &SearchTables, mv: Move, ply: usize) -> OrderKey {
    let Some(mover) = board.piece_at(mv.from) else {
        return (0, 0, 0);
    };
    let delta = square_value(mover.kind, mover.side, mv.to) - square_value(mover.kind, mover.side, mv.from);

    if let Some(victim) = board.piece_at(mv.to) {
        return (
            CAPTURE_CLASS,
            CAPTURE_BONUS + victim.kind.value() - mover.kind.value(),
            delta,
        );
    }
    if let Some(slot) = tables.killers.slot_of(ply, mv) {
        return (KILLER_CLASS, -(slot as i32), delta);
    }
    (QUIET_CLASS, tables.history.score(mv), delta)
}

/// Sort `moves` best-first. The sort is stable so equal keys keep
/// generation order.
pub(crate) fn order_moves(board: &Board, tables: &SearchTables, moves: &mut [Move], ply: usize) {
    moves.sort_by_cached_key(|&mv| std::cmp::Reverse(order_key(board, tables, mv, ply)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardBuilder, PieceKind, Side, Square};

    fn board() -> Board {
        BoardBuilder::new()
            .piece(Square(4, 9), Side::Red, PieceKind::General)
            .piece(Square(3, 0), Side::Black, PieceKind::General)
            .piece(Square(0, 5), Side::Red, PieceKind::Chariot)
            .piece(Square(2, 7), Side::Red, PieceKind::Horse)
            .piece(Square(0, 2), Side::Black, PieceKind::Soldier)
            .piece(Square(3, 5), Side::Black, PieceKind::Cannon)
            .build()
            .unwrap()
    }

    #[test]
    fn test_mvv_lva() {
        let board = board();
        let tables = SearchTables::new();
        let takes_cannon = order_key(&board, &tables, Move::new(Square(0, 5), Square(3, 5)), 0);
        let takes_soldier = order_key(&board, &tables, Move::new(Square(0, 5), Square(0, 2)), 0);
        let horse_takes_cannon =
            order_key(&board, &tables, Move::new(Square(2, 7), Square(3, 5)), 0);
        assert!(takes_cannon > takes_soldier);
        // Cheaper attacker first for the same victim
        assert!(horse_takes_cannon > takes_cannon);
    }

    #[test]
    fn test_class_order() {
        let board = board();
        let mut tables = SearchTables::new();
        let killer = Move::new(Square(0, 5), Square(0, 6));
        let historic = Move::new(Square(0, 5), Square(0, 7));
        let quiet = Move::new(Square(0, 5), Square(0, 8));
        let capture = Move::new(Square(0, 5), Square(0, 2));
        tables.killers.update(1, killer);
        tables.history.update(historic, 4);

        let mut moves = vec![quiet, historic, killer, capture];
        order_moves(&board, &tables, &mut moves, 1);
        assert_eq!(moves, vec![capture, killer, historic, quiet]);

        // Killers are per ply
        assert_eq!(order_key(&board, &tables, killer, 2).0, QUIET_CLASS);
    }

    #[test]
    fn test_positional_delta_breaks_ties() {
        let board = board();
        let tables = SearchTables::new();
        let a = Move::new(Square(2, 7), Square(1, 5));
        let b = Move::new(Square(2, 7), Square(3, 5));
        let key_a = order_key(&board, &tables, a, 0);
        assert_eq!(key_a.0, QUIET_CLASS);
        let key_b = order_key(&board, &tables, b, 0);
        assert_eq!(key_b.0, CAPTURE_CLASS);
        let to = square_value(PieceKind::Horse, Side::Red, Square(1, 5));
        let from = square_value(PieceKind::Horse, Side::Red, Square(2, 7));
        assert_eq!(key_a.2, to - from);
    }
}

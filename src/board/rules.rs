//! Check, legality and terminal-state rules.
//!
//! Board-level predicates here are uncached; the `Engine` versions go
//! through the position cache and are what the game and the search use.

use rand::seq::SliceRandom;
use rand::Rng;

use super::engine::Engine;
use super::error::BoardError;
use super::{Board, GenMode, GameStatus, Move, PieceKind, Side, Square};

impl Board {
    /// Both generals on one file with nothing strictly between them.
    #[must_use]
    pub fn would_face_generals(&self) -> bool {
        match (
            self.general_square(Side::Red),
            self.general_square(Side::Black),
        ) {
            (Some(red), Some(black)) => self.open_file_between(red, black, red),
            _ => false,
        }
    }

    /// Whether any piece of `by` threatens `square`.
    #[must_use]
    pub fn is_square_attacked(&self, square: Square, by: Side) -> bool {
        self.pieces(by)
            .any(|piece| self.piece_destinations(&piece, GenMode::Threat).contains(&square))
    }

    /// Uncached check test: `false` when `side` has no general.
    #[must_use]
    pub fn in_check(&self, side: Side) -> bool {
        self.general_square(side)
            .is_some_and(|general| self.is_square_attacked(general, side.opponent()))
    }

    /// Number of legal move paths of length `depth`.
    #[must_use]
    pub fn perft(&self, depth: u32) -> u64 {
        Engine::new().perft(self, depth)
    }
}

impl Engine {
    /// Cached full-mode destinations of the piece on `from`.
    pub fn possible_moves(&mut self, board: &Board, from: Square) -> Result<Vec<Square>, BoardError> {
        let piece = board.piece(from)?;
        Ok(self.cache.destinations(board, &piece, GenMode::Full))
    }

    /// Cached threat-mode destinations of the piece on `from`.
    pub fn threat_moves(&mut self, board: &Board, from: Square) -> Result<Vec<Square>, BoardError> {
        let piece = board.piece(from)?;
        Ok(self.cache.destinations(board, &piece, GenMode::Threat))
    }

    /// Whether an enemy threat reaches `side`'s general.
    pub fn is_in_check(&mut self, board: &Board, side: Side) -> bool {
        let index = self.cache.index(board);
        let Some(general) = index.general(side) else {
            return false;
        };
        index
            .pieces(side.opponent())
            .iter()
            .any(|attacker| {
                self.cache
                    .destinations(board, attacker, GenMode::Threat)
                    .contains(&general)
            })
    }

    /// Whether `mv` is a legal move for the piece standing on its origin.
    ///
    /// The move is simulated on `board` and taken back, so the board is
    /// unchanged on return. A general may not step into facing the enemy
    /// general; any other move that opens the file is legal and loses on
    /// the spot.
    pub fn is_move_legal(&mut self, board: &mut Board, mv: Move) -> bool {
        if mv.from.validate().is_err() || mv.to.validate().is_err() {
            return false;
        }
        let Some(mover) = board.piece_at(mv.from) else {
            return false;
        };
        if !self
            .cache
            .destinations(board, &mover, GenMode::Full)
            .contains(&mv.to)
        {
            return false;
        }
        self.is_pseudo_legal_move_safe(board, mv)
    }

    /// Legality of a move already known to follow its piece's movement rule.
    pub(crate) fn is_pseudo_legal_move_safe(&mut self, board: &mut Board, mv: Move) -> bool {
        let Some(mover) = board.piece_at(mv.from) else {
            return false;
        };
        let takes_general = board
            .piece_at(mv.to)
            .is_some_and(|target| target.kind == PieceKind::General && target.side != mover.side);
        if takes_general {
            return true;
        }
        if mover.kind == PieceKind::General && board.general_step_faces(mv.from, mv.to) {
            return false;
        }
        board.with_move(mv, |after| !self.is_in_check(after, mover.side))
    }

    /// Every legal move of `side`, in board order.
    pub fn legal_moves(&mut self, board: &Board, side: Side) -> Vec<Move> {
        let mut scratch = board.clone();
        let index = self.cache.index(board);
        let mut moves = Vec::with_capacity(48);
        for piece in index.pieces(side) {
            for to in self.cache.destinations(board, piece, GenMode::Full) {
                let mv = Move::new(piece.square, to);
                if self.is_pseudo_legal_move_safe(&mut scratch, mv) {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    /// Legal destinations of the piece on `from`.
    pub fn legal_moves_for(&mut self, board: &Board, from: Square) -> Result<Vec<Square>, BoardError> {
        let destinations = self.possible_moves(board, from)?;
        let mut scratch = board.clone();
        Ok(destinations
            .into_iter()
            .filter(|&to| self.is_pseudo_legal_move_safe(&mut scratch, Move::new(from, to)))
            .collect())
    }

    /// In check with no legal move.
    pub fn is_checkmate(&mut self, board: &Board, side: Side) -> bool {
        self.is_in_check(board, side) && self.legal_moves(board, side).is_empty()
    }

    /// Not in check, yet no legal move.
    pub fn is_stalemate(&mut self, board: &Board, side: Side) -> bool {
        !self.is_in_check(board, side) && self.legal_moves(board, side).is_empty()
    }

    /// A uniformly random legal move, preferring captures.
    ///
    /// Moves that open the file between the generals are only chosen when
    /// nothing else is legal.
    pub fn random_legal_move<R: Rng + ?Sized>(
        &mut self,
        board: &Board,
        side: Side,
        rng: &mut R,
    ) -> Option<Move> {
        let moves = self.legal_moves(board, side);
        let mut scratch = board.clone();
        let safe: Vec<Move> = moves
            .iter()
            .copied()
            .filter(|&mv| !scratch.with_move(mv, |after| after.would_face_generals()))
            .collect();
        let pool = if safe.is_empty() { moves } else { safe };

        let captures: Vec<Move> = pool
            .iter()
            .copied()
            .filter(|mv| board.piece_at(mv.to).is_some())
            .collect();
        if captures.is_empty() {
            pool.choose(rng).copied()
        } else {
            captures.choose(rng).copied()
        }
    }

    /// Status after `mover` has just moved on `board`, given what it took.
    pub(crate) fn status_after_move(
        &mut self,
        board: &Board,
        mover: Side,
        captured: Option<PieceKind>,
    ) -> (GameStatus, bool) {
        if captured == Some(PieceKind::General) {
            return (GameStatus::GeneralCaptured { winner: mover }, false);
        }
        let opponent = mover.opponent();
        let gave_check = self.is_in_check(board, opponent);
        if board.would_face_generals() {
            return (GameStatus::FlyingGeneral { winner: opponent }, gave_check);
        }
        let status = if !self.legal_moves(board, opponent).is_empty() {
            GameStatus::Playing
        } else if gave_check {
            GameStatus::Checkmate { winner: mover }
        } else {
            GameStatus::Stalemate { winner: mover }
        };
        (status, gave_check)
    }

    /// Count legal move paths of length `depth` from `board`.
    pub fn perft(&mut self, board: &Board, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves(board, board.side_to_move());
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut scratch = board.clone();
        moves
            .into_iter()
            .map(|mv| scratch.with_move(mv, |after| self.perft(after, depth - 1)))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardBuilder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn chariot_mate() -> Board {
        BoardBuilder::new()
            .piece(Square(3, 0), Side::Black, PieceKind::General)
            .piece(Square(4, 9), Side::Red, PieceKind::General)
            .piece(Square(3, 5), Side::Red, PieceKind::Chariot)
            .side_to_move(Side::Black)
            .build()
            .unwrap()
    }

    #[test]
    fn test_would_face_generals() {
        let facing = BoardBuilder::new()
            .piece(Square(4, 9), Side::Red, PieceKind::General)
            .piece(Square(4, 1), Side::Black, PieceKind::General)
            .build()
            .unwrap();
        assert!(facing.would_face_generals());
        assert!(!Board::new().would_face_generals());

        let missing = BoardBuilder::new()
            .piece(Square(4, 9), Side::Red, PieceKind::General)
            .build()
            .unwrap();
        assert!(!missing.would_face_generals());
    }

    #[test]
    fn test_start_position_not_in_check() {
        let mut engine = Engine::new();
        let board = Board::new();
        assert!(!engine.is_in_check(&board, Side::Red));
        assert!(!engine.is_in_check(&board, Side::Black));
        assert_eq!(engine.legal_moves(&board, Side::Red).len(), 44);
        assert_eq!(engine.legal_moves(&board, Side::Black).len(), 44);
    }

    #[test]
    fn test_chariot_checkmate() {
        let mut engine = Engine::new();
        let board = chariot_mate();
        assert!(engine.is_in_check(&board, Side::Black));
        assert!(engine.is_checkmate(&board, Side::Black));
        assert!(!engine.is_stalemate(&board, Side::Black));
        assert!(!engine.is_checkmate(&board, Side::Red));
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        // The black horse is the only piece between the red chariot and its general
        let board = BoardBuilder::new()
            .piece(Square(4, 0), Side::Black, PieceKind::General)
            .piece(Square(4, 3), Side::Black, PieceKind::Horse)
            .piece(Square(4, 7), Side::Red, PieceKind::Chariot)
            .piece(Square(3, 9), Side::Red, PieceKind::General)
            .side_to_move(Side::Black)
            .build()
            .unwrap();
        let mut engine = Engine::new();
        assert_eq!(engine.legal_moves_for(&board, Square(4, 3)), Ok(vec![]));
        assert!(!engine.possible_moves(&board, Square(4, 3)).unwrap().is_empty());
    }

    #[test]
    fn test_is_move_legal_restores_board() {
        let mut engine = Engine::new();
        let mut board = Board::new();
        let original = board.clone();
        assert!(engine.is_move_legal(&mut board, Move::new(Square(7, 7), Square(4, 7))));
        // Black's cannon on (7,2) is not capturable without a screen
        assert!(!engine.is_move_legal(&mut board, Move::new(Square(7, 7), Square(7, 2))));
        assert!(!engine.is_move_legal(&mut board, Move::new(Square(4, 4), Square(4, 5))));
        assert!(!engine.is_move_legal(&mut board, Move::new(Square(4, 9), Square(4, 12))));
        assert_eq!(board, original);
    }

    #[test]
    fn test_general_may_not_step_into_facing() {
        let mut board = BoardBuilder::new()
            .piece(Square(3, 9), Side::Red, PieceKind::General)
            .piece(Square(4, 0), Side::Black, PieceKind::General)
            .build()
            .unwrap();
        let mut engine = Engine::new();
        assert!(!engine.is_move_legal(&mut board, Move::new(Square(3, 9), Square(4, 9))));
        assert!(engine.is_move_legal(&mut board, Move::new(Square(3, 9), Square(3, 8))));
    }

    #[test]
    fn test_opening_the_file_is_legal_but_loses() {
        // Only the red cannon stands between the generals
        let mut board = BoardBuilder::new()
            .piece(Square(4, 9), Side::Red, PieceKind::General)
            .piece(Square(4, 0), Side::Black, PieceKind::General)
            .piece(Square(4, 5), Side::Red, PieceKind::Cannon)
            .build()
            .unwrap();
        let mut engine = Engine::new();
        let mv = Move::new(Square(4, 5), Square(0, 5));
        assert!(engine.is_move_legal(&mut board, mv));

        let info = board.make_move(mv);
        let (status, _) = engine.status_after_move(&board, Side::Red, None);
        assert_eq!(status, GameStatus::FlyingGeneral { winner: Side::Black });
        board.unmake_move(mv, info);
    }

    #[test]
    fn test_capturing_general_is_always_legal() {
        // Red's own general is attacked, but taking Black's general ends the game
        let mut board = BoardBuilder::new()
            .piece(Square(4, 9), Side::Red, PieceKind::General)
            .piece(Square(3, 0), Side::Black, PieceKind::General)
            .piece(Square(3, 5), Side::Red, PieceKind::Chariot)
            .piece(Square(0, 9), Side::Black, PieceKind::Chariot)
            .build()
            .unwrap();
        let mut engine = Engine::new();
        assert!(engine.is_in_check(&board, Side::Red));
        assert!(engine.is_move_legal(&mut board, Move::new(Square(3, 5), Square(3, 0))));
    }

    #[test]
    fn test_stalemate_detected() {
        // Black general boxed in by a soldier and the facing rule
        let board = BoardBuilder::new()
            .piece(Square(3, 0), Side::Black, PieceKind::General)
            .piece(Square(4, 9), Side::Red, PieceKind::General)
            .piece(Square(3, 2), Side::Red, PieceKind::Soldier)
            .piece(Square(2, 1), Side::Red, PieceKind::Chariot)
            .side_to_move(Side::Black)
            .build()
            .unwrap();
        let mut engine = Engine::new();
        assert!(!engine.is_in_check(&board, Side::Black));
        assert!(engine.legal_moves(&board, Side::Black).is_empty());
        assert!(engine.is_stalemate(&board, Side::Black));
        assert!(!engine.is_checkmate(&board, Side::Black));
    }

    #[test]
    fn test_random_legal_move_prefers_captures() {
        let board = BoardBuilder::new()
            .piece(Square(4, 9), Side::Red, PieceKind::General)
            .piece(Square(3, 0), Side::Black, PieceKind::General)
            .piece(Square(0, 5), Side::Red, PieceKind::Chariot)
            .piece(Square(0, 2), Side::Black, PieceKind::Horse)
            .build()
            .unwrap();
        let mut engine = Engine::new();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert_eq!(
                engine.random_legal_move(&board, Side::Red, &mut rng),
                Some(Move::new(Square(0, 5), Square(0, 2)))
            );
        }
    }

    #[test]
    fn test_random_legal_move_avoids_opening_file() {
        // The cannon is the only screen; sliding it off the file hands Black the game
        let board = BoardBuilder::new()
            .piece(Square(4, 9), Side::Red, PieceKind::General)
            .piece(Square(4, 0), Side::Black, PieceKind::General)
            .piece(Square(4, 5), Side::Red, PieceKind::Cannon)
            .build()
            .unwrap();
        let mut engine = Engine::new();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let mv = engine
                .random_legal_move(&board, Side::Red, &mut rng)
                .unwrap();
            let mut after = board.clone();
            after.make_move(mv);
            assert!(!after.would_face_generals(), "{mv} opens the file");
        }
    }

    #[test]
    fn test_random_legal_move_none_when_mated() {
        let mut engine = Engine::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            engine.random_legal_move(&chariot_mate(), Side::Black, &mut rng),
            None
        );
    }

    #[test]
    fn test_perft_shallow() {
        let board = Board::new();
        assert_eq!(board.perft(1), 44);
        assert_eq!(board.perft(2), 1920);
    }
}

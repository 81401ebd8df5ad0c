//! Search algorithm tests.
//!
//! Tactical positions where the best move is forced.

use std::time::Duration;

use super::build;
use crate::board::{
    BoardBuilder, Difficulty, Engine, EngineConfig, GameState, GameStatus, Move, PieceKind,
    SearchParams, Side, Square, MATE_SCORE,
};

/// Engine whose tiers keep their depths but get a generous time budget, so
/// results do not depend on machine speed.
fn relaxed(config: EngineConfig) -> Engine {
    let params = Difficulty::ALL.iter().fold(SearchParams::default(), |p, &d| {
        p.with_budget(d, Duration::from_secs(60))
    });
    Engine::with_config(config.with_search_params(params))
}

fn mv(from: (u8, u8), to: (u8, u8)) -> Move {
    Move::new(Square(from.0, from.1), Square(to.0, to.1))
}

fn two_chariots() -> GameState {
    GameState::from_board(build(
        BoardBuilder::new()
            .piece(Square(3, 9), Side::Red, PieceKind::General)
            .piece(Square(4, 0), Side::Black, PieceKind::General)
            .piece(Square(0, 1), Side::Red, PieceKind::Chariot)
            .piece(Square(8, 1), Side::Red, PieceKind::Chariot),
    ))
}

#[test]
fn search_finds_mate_in_one() {
    let mut engine = relaxed(EngineConfig::default());
    let mut state = two_chariots();
    let result = engine.search(&state, Difficulty::Easy, Duration::from_secs(60));

    let best = result.best_move.unwrap();
    assert!(
        best == mv((0, 1), (0, 0)) || best == mv((8, 1), (8, 0)),
        "expected a back-rank mate, got {best}"
    );
    assert_eq!(result.score, MATE_SCORE - 1);
    assert_eq!(result.mate_in(), Some(1));

    let played = engine.make_move(&mut state, best.from, best.to).unwrap();
    assert_eq!(played.status, GameStatus::Checkmate { winner: Side::Red });
}

#[test]
fn search_takes_hanging_chariot() {
    let mut engine = relaxed(EngineConfig::default());
    let state = GameState::from_board(build(
        BoardBuilder::new()
            .piece(Square(4, 9), Side::Red, PieceKind::General)
            .piece(Square(3, 0), Side::Black, PieceKind::General)
            .piece(Square(0, 5), Side::Red, PieceKind::Chariot)
            .piece(Square(0, 2), Side::Black, PieceKind::Chariot),
    ));
    let result = engine.search(&state, Difficulty::Easy, Duration::from_secs(60));
    assert_eq!(result.best_move, Some(mv((0, 5), (0, 2))));
    assert!(result.score > 0);
}

#[test]
fn search_never_opens_the_file() {
    let mut engine = Engine::new();
    // The Red chariot is the only thing between the generals; taking the
    // Black chariot would lose on the spot.
    let state = GameState::from_board(build(
        BoardBuilder::new()
            .piece(Square(4, 9), Side::Red, PieceKind::General)
            .piece(Square(4, 0), Side::Black, PieceKind::General)
            .piece(Square(4, 5), Side::Red, PieceKind::Chariot)
            .piece(Square(0, 5), Side::Black, PieceKind::Chariot),
    ));
    for difficulty in Difficulty::ALL {
        let result = engine.search(&state, difficulty, Duration::from_secs(5));
        let best = result.best_move.unwrap();
        assert_ne!(best, mv((4, 5), (0, 5)));
        let mut board = state.board().clone();
        assert!(!board.with_move(best, |after| after.would_face_generals()));
    }
}

#[test]
fn search_avoids_completing_perpetual_check() {
    let mut engine = relaxed(EngineConfig::default().with_perpetual_repeats(2));
    let mut state = GameState::from_board(build(
        BoardBuilder::new()
            .piece(Square(3, 9), Side::Red, PieceKind::General)
            .piece(Square(4, 0), Side::Black, PieceKind::General)
            .piece(Square(0, 8), Side::Red, PieceKind::Chariot),
    ));
    // Red checks from a0 then shuttles between a9 and a8 while Black's
    // general steps between e9 and e8.
    let line = [
        mv((0, 8), (0, 0)),
        mv((4, 0), (4, 1)),
        mv((0, 0), (0, 1)),
        mv((4, 1), (4, 0)),
        mv((0, 1), (0, 0)),
        mv((4, 0), (4, 1)),
        mv((0, 0), (0, 1)),
        mv((4, 1), (4, 0)),
    ];
    for step in line {
        engine.make_move(&mut state, step.from, step.to).unwrap();
    }
    assert!(state.history().iter().step_by(2).all(|r| r.gave_check));

    let result = engine.search(&state, Difficulty::Easy, Duration::from_secs(60));
    assert_ne!(result.best_move, Some(mv((0, 1), (0, 0))));
}

#[test]
fn search_respects_budget() {
    let mut engine = Engine::new();
    let state = GameState::new();
    let result = engine.search(&state, Difficulty::Hard, Duration::from_millis(50));
    assert!(result.best_move.is_some());
    assert!(result.depth >= 1);
    assert!(result.elapsed < Duration::from_secs(2));
}

#[test]
fn search_on_finished_game_returns_nothing() {
    let mut engine = Engine::new();
    let mut state = two_chariots();
    engine
        .make_move(&mut state, Square(0, 1), Square(0, 0))
        .unwrap();
    assert!(state.is_over());
    let result = engine.search(&state, Difficulty::Medium, Duration::from_secs(1));
    assert_eq!(result.best_move, None);
    assert_eq!(result.nodes, 0);
}

#[test]
fn search_is_deterministic_without_deadline_pressure() {
    let state = GameState::new();
    let a = relaxed(EngineConfig::default()).search(&state, Difficulty::Easy, Duration::from_secs(60));
    let b = relaxed(EngineConfig::default()).search(&state, Difficulty::Easy, Duration::from_secs(60));
    assert!(!a.timed_out);
    assert_eq!(a.best_move, b.best_move);
    assert_eq!(a.score, b.score);
    assert_eq!(a.nodes, b.nodes);
}

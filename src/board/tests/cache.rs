//! Position cache behaviour through the engine.

use super::build;
use crate::board::{
    Board, BoardBuilder, Engine, EngineConfig, GameState, GenMode, PieceKind, Side, Square,
};

#[test]
fn test_cached_destinations_match_board() {
    let mut engine = Engine::new();
    let board = Board::new();
    for _ in 0..2 {
        for piece in board.all_pieces() {
            let cached = engine.possible_moves(&board, piece.square).unwrap();
            let direct = board.destinations(piece.square, GenMode::Full).unwrap();
            assert_eq!(cached, direct, "{piece}");

            let cached = engine.threat_moves(&board, piece.square).unwrap();
            let direct = board.destinations(piece.square, GenMode::Threat).unwrap();
            assert_eq!(cached, direct, "{piece}");
        }
    }
    let stats = engine.cache_stats();
    assert_eq!(stats.move_misses, 64);
    assert_eq!(stats.move_hits, 64);
}

#[test]
fn test_legal_moves_unaffected_by_cache_size() {
    let mut cached = Engine::new();
    let mut uncached = Engine::with_config(EngineConfig::default().with_cache_capacity(0));
    let mut tiny = Engine::with_config(EngineConfig::default().with_cache_capacity(3));

    let mut state = GameState::new();
    for notation in ["h2e2", "h9g7", "h0g2", "i9h9", "e2e6"] {
        let board = state.board().clone();
        for side in Side::BOTH {
            let expected = uncached.legal_moves(&board, side);
            assert_eq!(cached.legal_moves(&board, side), expected);
            assert_eq!(tiny.legal_moves(&board, side), expected);
        }
        cached.make_move_iccs(&mut state, notation).unwrap();
    }
    assert_eq!(uncached.cache_stats().move_hits, 0);
    assert!(tiny.cache_stats().evictions > 0);
}

#[test]
fn test_make_move_clears_cache() {
    let mut engine = Engine::new();
    let mut state = GameState::new();
    let _ = engine.legal_moves(state.board(), Side::Red);
    assert!(!engine.cache.is_empty());
    engine
        .make_move(&mut state, Square(7, 7), Square(4, 7))
        .unwrap();
    assert!(engine.cache.is_empty());
}

#[test]
fn test_stale_entries_never_served() {
    // Same chariot square, different surroundings
    let mut engine = Engine::new();
    let open = build(
        BoardBuilder::new()
            .piece(Square(4, 9), Side::Red, PieceKind::General)
            .piece(Square(3, 0), Side::Black, PieceKind::General)
            .piece(Square(0, 5), Side::Red, PieceKind::Chariot),
    );
    let blocked = build(
        BoardBuilder::new()
            .piece(Square(4, 9), Side::Red, PieceKind::General)
            .piece(Square(3, 0), Side::Black, PieceKind::General)
            .piece(Square(0, 5), Side::Red, PieceKind::Chariot)
            .piece(Square(0, 4), Side::Red, PieceKind::Soldier),
    );
    let a = engine.possible_moves(&open, Square(0, 5)).unwrap();
    let b = engine.possible_moves(&blocked, Square(0, 5)).unwrap();
    assert_ne!(a, b);
    assert_eq!(b, blocked.destinations(Square(0, 5), GenMode::Full).unwrap());
}

#[test]
fn test_engine_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<Engine>();
}

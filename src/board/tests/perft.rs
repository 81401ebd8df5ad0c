//! Perft (performance test) for move generation correctness.

use crate::board::{Board, Engine, EngineConfig, START_FEN};
use std::time::Instant;

struct TestPosition {
    name: &'static str,
    fen: &'static str,
    depths: &'static [(u32, u64)],
}

const TEST_POSITIONS: &[TestPosition] = &[
    TestPosition {
        name: "Initial Position",
        fen: START_FEN,
        depths: &[(1, 44), (2, 1920), (3, 79666)],
    },
    TestPosition {
        name: "Initial Position, Black to move",
        fen: "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR b",
        depths: &[(1, 44), (2, 1920)],
    },
];

#[test]
fn perft_shallow() {
    let board = Board::new();
    assert_eq!(board.perft(1), 44);
    assert_eq!(board.perft(2), 1920);
}

#[test]
fn perft_uncached_matches_cached() {
    let board = Board::new();
    let mut uncached = Engine::with_config(EngineConfig::default().with_cache_capacity(0));
    assert_eq!(uncached.perft(&board, 2), Engine::new().perft(&board, 2));
}

#[test]
#[ignore = "slow in debug builds"]
fn perft_suite() {
    for pos in TEST_POSITIONS {
        let board = Board::from_fen(pos.fen).unwrap();
        for &(depth, expected) in pos.depths {
            let start = Instant::now();
            let nodes = board.perft(depth);
            println!(
                "{} depth {depth}: {nodes} nodes in {:?}",
                pos.name,
                start.elapsed()
            );
            assert_eq!(nodes, expected, "{} at depth {depth}", pos.name);
        }
    }
}

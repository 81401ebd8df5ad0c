//! Xiangqi board representation and game logic.
//!
//! A 9x10 mailbox board with per-piece identities, rule-complete move
//! generation (palace, river, horse leg, elephant eye, cannon screen and
//! the flying-general rule), a game record with terminal statuses, a
//! position cache, and an alpha-beta search behind difficulty tiers.
//!
//! # Example
//! ```
//! use xiangqi_engine::board::{Engine, GameState, Side, Square};
//!
//! let mut engine = Engine::new();
//! let mut state = GameState::new();
//! let moves = engine.legal_moves(state.board(), Side::Red);
//! println!("Starting position has {} legal moves", moves.len());
//!
//! engine.make_move(&mut state, Square(7, 7), Square(4, 7)).unwrap();
//! assert_eq!(state.side_to_move(), Side::Black);
//! ```

mod builder;
mod cache;
mod config;
mod engine;
mod error;
mod eval;
mod fen;
mod game;
mod make_unmake;
mod movegen;
pub mod prelude;
mod pst;
mod rules;
mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use builder::BoardBuilder;
pub use error::{BoardError, FenError, MoveError, SquareError};
pub use fen::START_FEN;
pub use game::{GameState, GameStatus, MoveRecord, MoveResult, DEFAULT_PERPETUAL_REPEATS};
pub use state::{initialize_board, Board};
pub use types::{
    is_in_palace, is_own_side, is_valid_coordinate, Move, Piece, PieceId, PieceKind, Side, Square,
    FILES, NUM_SQUARES, RANKS,
};

// Public API - engine, cache and search configuration
pub use cache::{BoardIndex, CacheStats, PositionCache};
pub use config::{EngineConfig, DEFAULT_CACHE_CAPACITY, DEFAULT_PERPETUAL_PENALTY};
pub use engine::Engine;
pub use search::{
    Difficulty, SearchParams, SearchResult, SearchTables, MATE_SCORE, MATE_THRESHOLD,
};

// Lower-level pieces for callers that drive the board directly
pub use eval::{evaluate, EvalTerms};
pub use make_unmake::UnmakeInfo;
pub use movegen::GenMode;

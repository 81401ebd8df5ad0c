//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types.
//!
//! # Example
//! ```
//! use xiangqi_engine::board::prelude::*;
//!
//! let mut engine = Engine::new();
//! let state = GameState::new();
//! let result = engine.search(&state, Difficulty::Easy, std::time::Duration::from_millis(200));
//! assert!(result.best_move.is_some());
//! ```

pub use super::{
    Board, BoardBuilder, Difficulty, Engine, EngineConfig, FenError, GameState, GameStatus, Move,
    MoveError, MoveResult, Piece, PieceKind, SearchResult, Side, Square, SquareError,
};

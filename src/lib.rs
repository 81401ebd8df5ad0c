pub mod advisor;
pub mod board;
mod zobrist;

pub use advisor::{DecisionChain, DecisionProvider};
pub use board::{Board, Difficulty, Engine, GameState, GameStatus, Move, Piece, Side, Square};

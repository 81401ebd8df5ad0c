//! Game record and terminal-status state machine.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::FenError;
use super::{Board, Move, Piece, Side};

/// Default number of repetitions for the perpetual-check heuristic
pub const DEFAULT_PERPETUAL_REPEATS: usize = 3;

/// Outcome of a game. Every variant but `Playing` is terminal and names the
/// winner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameStatus {
    Playing,
    /// The loser is in check with no legal move
    Checkmate { winner: Side },
    /// The loser has no legal move and is not in check
    Stalemate { winner: Side },
    GeneralCaptured { winner: Side },
    /// The loser's move left the two generals facing on an open file
    FlyingGeneral { winner: Side },
}

impl GameStatus {
    #[inline]
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }

    #[must_use]
    pub const fn winner(self) -> Option<Side> {
        match self {
            GameStatus::Playing => None,
            GameStatus::Checkmate { winner }
            | GameStatus::Stalemate { winner }
            | GameStatus::GeneralCaptured { winner }
            | GameStatus::FlyingGeneral { winner } => Some(winner),
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Playing => write!(f, "in progress"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate { winner } => write!(f, "stalemate, {winner} wins"),
            GameStatus::GeneralCaptured { winner } => {
                write!(f, "general captured, {winner} wins")
            }
            GameStatus::FlyingGeneral { winner } => {
                write!(f, "generals face each other, {winner} wins")
            }
        }
    }
}

/// One applied move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveRecord {
    pub mv: Move,
    /// The moving piece as it stood before the move
    pub piece: Piece,
    pub captured: Option<Piece>,
    /// Whether the move left the opponent in check
    pub gave_check: bool,
}

/// What `Engine::make_move` reports back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveResult {
    pub captured: Option<Piece>,
    pub status: GameStatus,
    pub gave_check: bool,
}

/// A game in progress: the board, the moves that led to it and its status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) history: Vec<MoveRecord>,
    pub(crate) status: GameStatus,
}

impl GameState {
    /// A new game from the standard starting position.
    #[must_use]
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    /// A game starting from an arbitrary position.
    ///
    /// The status starts as `Playing`; `Engine::refresh_status` resolves a
    /// position that is already decided.
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        GameState {
            board,
            history: Vec::new(),
            status: GameStatus::Playing,
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Board::from_fen(fen).map(Self::from_board)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn side_to_move(&self) -> Side {
        self.board.side_to_move()
    }

    #[must_use]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Whether `side`'s trailing `2 * repeats` moves shuttle between two
    /// moves (A, B, A, B, ...) and every one of them gave check.
    #[must_use]
    pub fn is_perpetual_check(&self, side: Side, repeats: usize) -> bool {
        let own: Vec<(Move, bool)> = self
            .history
            .iter()
            .filter(|record| record.piece.side == side)
            .map(|record| (record.mv, record.gave_check))
            .collect();
        shuttles_with_check(&own, repeats)
    }

    /// Whether playing `mv` (giving check or not) would complete a
    /// perpetual-check pattern for the side to move.
    #[must_use]
    pub(crate) fn would_extend_perpetual(&self, mv: Move, gives_check: bool, repeats: usize) -> bool {
        let side = self.side_to_move();
        let mut own: Vec<(Move, bool)> = self
            .history
            .iter()
            .filter(|record| record.piece.side == side)
            .map(|record| (record.mv, record.gave_check))
            .collect();
        own.push((mv, gives_check));
        shuttles_with_check(&own, repeats)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

fn shuttles_with_check(moves: &[(Move, bool)], repeats: usize) -> bool {
    let window = repeats.saturating_mul(2);
    if repeats == 0 || moves.len() < window {
        return false;
    }
    let tail = &moves[moves.len() - window..];
    if !tail.iter().all(|&(_, check)| check) {
        return false;
    }
    tail[0].0 != tail[1].0 && tail.windows(3).all(|w| w[0].0 == w[2].0)
}

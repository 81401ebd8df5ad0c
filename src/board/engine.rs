//! The rule engine: owns the position cache and search tables and is the
//! only way to apply a move to a `GameState`.

use log::debug;

use super::cache::{CacheStats, PositionCache};
use super::config::EngineConfig;
use super::error::MoveError;
use super::search::SearchTables;
use super::{GameState, GameStatus, Move, MoveRecord, MoveResult, Square};

/// Rule engine and search front end.
///
/// One engine serves one caller at a time; give each thread its own.
#[derive(Debug)]
pub struct Engine {
    pub(crate) config: EngineConfig,
    pub(crate) cache: PositionCache,
    pub(crate) tables: SearchTables,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Engine {
            cache: PositionCache::new(config.cache_capacity),
            tables: SearchTables::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every cached move list and the board index.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Apply the move `from`-`to` for the side to move.
    ///
    /// Validates the squares, the mover and legality, then records the move
    /// and resolves the new status. The caches are cleared before returning.
    pub fn make_move(
        &mut self,
        state: &mut GameState,
        from: Square,
        to: Square,
    ) -> Result<MoveResult, MoveError> {
        if state.status.is_over() {
            return Err(MoveError::GameOver {
                status: state.status,
            });
        }
        let from = from.validate()?;
        let to = to.validate()?;
        let to_move = state.board.side_to_move();
        let piece = state
            .board
            .piece_at(from)
            .ok_or(MoveError::NoPiece { square: from })?;
        if piece.side != to_move {
            return Err(MoveError::WrongSide {
                square: from,
                to_move,
            });
        }

        let mv = Move::new(from, to);
        if !self.is_move_legal(&mut state.board, mv) {
            return Err(MoveError::IllegalMove { mv });
        }

        let info = state.board.make_move(mv);
        let captured = info.captured();
        let (status, gave_check) =
            self.status_after_move(&state.board, to_move, captured.map(|p| p.kind));

        state.history.push(MoveRecord {
            mv,
            piece,
            captured,
            gave_check,
        });
        debug!(
            "{to_move} plays {mv} ({}){}",
            piece.kind,
            captured.map_or(String::new(), |p| format!(" taking {}", p.kind))
        );
        if status != state.status {
            debug!("status: {} -> {}", state.status, status);
        }
        state.status = status;
        self.cache.clear();

        Ok(MoveResult {
            captured,
            status,
            gave_check,
        })
    }

    /// Parse an ICCS move (e.g. `h2e2`) and apply it.
    pub fn make_move_iccs(
        &mut self,
        state: &mut GameState,
        notation: &str,
    ) -> Result<MoveResult, MoveError> {
        let mv: Move = notation.parse()?;
        self.make_move(state, mv.from, mv.to)
    }

    /// Resolve the status of a position loaded without history.
    ///
    /// A decided game keeps its status. Otherwise the side to move loses if
    /// its general is gone, the generals already face each other, or it has
    /// no legal move.
    pub fn refresh_status(&mut self, state: &mut GameState) -> GameStatus {
        if state.status.is_over() {
            return state.status;
        }
        let board = &state.board;
        let side = board.side_to_move();
        let opponent = side.opponent();

        let status = if board.general_square(side).is_none() {
            GameStatus::GeneralCaptured { winner: opponent }
        } else if board.general_square(opponent).is_none() {
            GameStatus::GeneralCaptured { winner: side }
        } else if board.would_face_generals() {
            GameStatus::FlyingGeneral { winner: side }
        } else if !self.legal_moves(board, side).is_empty() {
            GameStatus::Playing
        } else if self.is_in_check(board, side) {
            GameStatus::Checkmate { winner: opponent }
        } else {
            GameStatus::Stalemate { winner: opponent }
        };

        if status != state.status {
            debug!("status: {} -> {}", state.status, status);
        }
        state.status = status;
        status
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

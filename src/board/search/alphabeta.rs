//! Core search implementation.
//!
//! Iterative deepening over a negamax alpha-beta. Every node polls the
//! deadline on entry and before each child; a node past the deadline
//! returns its static evaluation, and an iteration cut short that way is
//! discarded unless it is the first.

use std::time::{Duration, Instant};

use log::{debug, trace};

use super::constants::{INFINITY, MATE_SCORE, MATE_THRESHOLD, MAX_PLY};
use super::move_order::{order_key, order_moves};
use super::params::Difficulty;
use super::SearchResult;
use crate::board::engine::Engine;
use crate::board::{Board, GameState, Move, PieceKind};

/// A root move with its perpetual-check penalty.
#[derive(Clone, Copy, Debug)]
struct RootMove {
    mv: Move,
    penalty: i32,
}

/// Search context for a single search
pub(crate) struct SearchContext<'a> {
    engine: &'a mut Engine,
    board: Board,
    deadline: Instant,
    nodes: u64,
    timed_out: bool,
}

impl SearchContext<'_> {
    fn past_deadline(&mut self) -> bool {
        if !self.timed_out && Instant::now() >= self.deadline {
            self.timed_out = true;
        }
        self.timed_out
    }

    /// Iterative deepening from depth 1 to `max_depth`.
    fn iterative_deepening(&mut self, root: &mut [RootMove], max_depth: u32) -> SearchResult {
        let mut result = SearchResult::empty();
        {
            let board = &self.board;
            let tables = &self.engine.tables;
            root.sort_by_cached_key(|r| std::cmp::Reverse(order_key(board, tables, r.mv, 0)));
        }

        for depth in 1..=max_depth {
            if depth > 1 && self.past_deadline() {
                break;
            }
            let Some((index, score)) = self.search_root(root, depth) else {
                trace!("depth {depth} aborted after {} nodes", self.nodes);
                break;
            };
            result.best_move = Some(root[index].mv);
            result.score = score;
            result.depth = depth;
            trace!(
                "depth {depth} score {score} nodes {} best {}",
                self.nodes,
                root[index].mv
            );

            // Search the current best first next time
            root[..=index].rotate_right(1);

            if score >= MATE_THRESHOLD {
                break;
            }
        }
        result.nodes = self.nodes;
        result.timed_out = self.timed_out;
        result
    }

    /// One full-width pass over the root moves. Returns the index and score
    /// of the best move, or `None` if the deadline cut a deeper pass short.
    fn search_root(&mut self, root: &[RootMove], depth: u32) -> Option<(usize, i32)> {
        let mut alpha = -INFINITY;
        let mut best: Option<(usize, i32)> = None;

        for (i, entry) in root.iter().enumerate() {
            if depth > 1 && self.past_deadline() {
                return None;
            }
            // alpha already has the penalty taken off, so lift the bound by it
            let bound = alpha.saturating_add(entry.penalty);
            let score = self.search_child(entry.mv, depth, 0, bound, INFINITY) - entry.penalty;
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((i, score));
            }
            alpha = alpha.max(score);
        }

        if depth > 1 && self.timed_out {
            return None;
        }
        best
    }

    /// Score of playing `mv` at `ply`, from the mover's point of view.
    fn search_child(&mut self, mv: Move, depth: u32, ply: usize, alpha: i32, beta: i32) -> i32 {
        let takes_general = self
            .board
            .piece_at(mv.to)
            .is_some_and(|p| p.kind == PieceKind::General);
        let info = self.board.make_move(mv);
        let win = MATE_SCORE - (ply as i32 + 1);
        let score = if takes_general {
            win
        } else if self.board.would_face_generals() {
            -win
        } else {
            -self.negamax(depth - 1, ply + 1, -beta, -alpha)
        };
        self.board.unmake_move(mv, info);
        score
    }

    fn negamax(&mut self, depth: u32, ply: usize, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        let side = self.board.side_to_move();
        if depth == 0 || ply >= MAX_PLY || self.past_deadline() {
            return self.board.evaluate(side);
        }

        let mut moves = self.engine.legal_moves(&self.board, side);
        if moves.is_empty() {
            return if self.engine.is_in_check(&self.board, side) {
                -(MATE_SCORE - ply as i32)
            } else {
                // Scored level here even though GameStatus counts stalemate as a loss
                0
            };
        }
        order_moves(&self.board, &self.engine.tables, &mut moves, ply);

        let mut best: Option<i32> = None;
        for mv in moves {
            if self.past_deadline() {
                break;
            }
            let quiet = self.board.piece_at(mv.to).is_none();
            let score = self.search_child(mv, depth, ply, alpha, beta);
            best = Some(best.map_or(score, |b| b.max(score)));
            alpha = alpha.max(score);
            if alpha >= beta {
                if quiet {
                    self.engine.tables.killers.update(ply, mv);
                    self.engine.tables.history.update(mv, depth);
                }
                break;
            }
        }
        best.unwrap_or_else(|| self.board.evaluate(side))
    }
}

impl Engine {
    /// Pick a move for the side to move in `state`.
    ///
    /// Searches a copy of the board, so `state` is untouched. The time
    /// budget is the smaller of `budget` and the difficulty's own budget.
    /// Falls back to a random legal move if the search produced nothing.
    pub fn search(
        &mut self,
        state: &GameState,
        difficulty: Difficulty,
        budget: Duration,
    ) -> SearchResult {
        let start = Instant::now();
        let mut result = SearchResult::empty();
        if state.is_over() {
            return result;
        }

        let side = state.side_to_move();
        let max_depth = self.config.search.depth(difficulty);
        let budget = budget.min(self.config.search.budget(difficulty));

        let moves = self.legal_moves(&state.board, side);
        if !moves.is_empty() {
            let mut root = self.root_moves(state, moves);
            self.tables.reset();
            let mut ctx = SearchContext {
                engine: &mut *self,
                board: state.board.clone(),
                deadline: start + budget,
                nodes: 0,
                timed_out: false,
            };
            result = ctx.iterative_deepening(&mut root, max_depth);
        }

        if result.best_move.is_none() {
            result.best_move = self.random_legal_move(&state.board, side, &mut rand::thread_rng());
        }
        result.elapsed = start.elapsed();
        debug!(
            "{side} {difficulty} search: best {} score {} depth {} nodes {} in {:?}{}",
            result
                .best_move
                .map_or_else(|| "none".to_string(), |mv| mv.to_string()),
            result.score,
            result.depth,
            result.nodes,
            result.elapsed,
            if result.timed_out { " (timed out)" } else { "" }
        );
        result
    }

    /// Attach the perpetual-check penalty to each root move.
    fn root_moves(&mut self, state: &GameState, moves: Vec<Move>) -> Vec<RootMove> {
        let side = state.side_to_move();
        let repeats = self.config.perpetual_repeats;
        let own_moves = state
            .history
            .iter()
            .filter(|record| record.piece.side == side)
            .count();
        if repeats == 0 || own_moves + 1 < repeats * 2 {
            return moves
                .into_iter()
                .map(|mv| RootMove { mv, penalty: 0 })
                .collect();
        }

        let penalty = self.config.perpetual_penalty;
        let mut scratch = state.board.clone();
        moves
            .into_iter()
            .map(|mv| {
                let gives_check =
                    scratch.with_move(mv, |after| self.is_in_check(after, side.opponent()));
                let penalty = if state.would_extend_perpetual(mv, gives_check, repeats) {
                    penalty
                } else {
                    0
                };
                RootMove { mv, penalty }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardBuilder, PieceKind, Side, Square};

    #[test]
    fn test_depth_one_completes_with_zero_budget() {
        let mut engine = Engine::new();
        let state = GameState::new();
        let result = engine.search(&state, Difficulty::Hard, Duration::ZERO);
        assert_eq!(result.depth, 1);
        assert!(result.timed_out);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_takes_the_general() {
        let mut engine = Engine::new();
        let state = GameState::from_board(
            BoardBuilder::new()
                .piece(Square(3, 0), Side::Black, PieceKind::General)
                .piece(Square(4, 9), Side::Red, PieceKind::General)
                .piece(Square(3, 5), Side::Red, PieceKind::Chariot)
                .build()
                .unwrap(),
        );
        let result = engine.search(&state, Difficulty::Easy, Duration::from_secs(5));
        assert_eq!(result.best_move, Some(Move::new(Square(3, 5), Square(3, 0))));
        assert_eq!(result.score, MATE_SCORE - 1);
        assert_eq!(result.mate_in(), Some(1));
    }

    #[test]
    fn test_no_move_when_mated() {
        let mut engine = Engine::new();
        let state = GameState::from_board(
            BoardBuilder::new()
                .piece(Square(3, 0), Side::Black, PieceKind::General)
                .piece(Square(4, 9), Side::Red, PieceKind::General)
                .piece(Square(3, 5), Side::Red, PieceKind::Chariot)
                .side_to_move(Side::Black)
                .build()
                .unwrap(),
        );
        let result = engine.search(&state, Difficulty::Medium, Duration::from_secs(1));
        assert_eq!(result.best_move, None);
        assert_eq!(result.depth, 0);
    }

    #[test]
    fn test_search_leaves_state_untouched() {
        let mut engine = Engine::new();
        let state = GameState::new();
        let before = state.clone();
        let _ = engine.search(&state, Difficulty::Easy, Duration::from_secs(2));
        assert_eq!(state, before);
    }
}

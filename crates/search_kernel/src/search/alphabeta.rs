//! Minimax search with alpha-beta pruning
//!
//! Plain (non-negamax) formulation: the caller says which side maximizes, and every score
//! stays in White's frame. The cutoff is fail-hard in the sense used throughout this crate:
//! a node that cuts off returns the best value it actually saw, without clamping it to the
//! window. That value is exact enough to pick a move but is only a bound for the window it
//! was searched with, so it must not be cached as an exact score.

use super::make_unmake::Played;
use super::ordering::order_moves;
use crate::constants::BREADTH_LIMIT_DEPTH;
use crate::evaluation::evaluate;
use crate::position::Position;
use crate::score::{Score, Window};

/// Value of a searched node and the move that achieved it
///
/// `best_move` is `None` only for leaves: depth exhausted, game over, or no legal move.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<M> {
    pub value: Score,
    pub best_move: Option<M>,
}

impl<M> SearchResult<M> {
    fn leaf(value: Score) -> Self {
        Self {
            value,
            best_move: None,
        }
    }
}

/// Counters collected over one search call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Every position visited, leaves included.
    pub nodes: u64,
    /// Positions handed to the evaluator.
    pub leaves: u64,
    /// Nodes that stopped early because the window closed.
    pub cutoffs: u64,
}

/// Alpha-beta searcher carrying per-call statistics
#[derive(Debug, Default)]
pub struct AlphaBeta {
    stats: SearchStats,
}

impl AlphaBeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search `depth` plies below `pos` inside `window`.
    ///
    /// Moves are ordered by [`order_moves`], truncated to the best few once fewer than
    /// [`BREADTH_LIMIT_DEPTH`] plies remain. Among equal values the earliest move in that
    /// order is kept.
    pub fn search<P: Position>(
        &mut self,
        pos: &mut P,
        depth: u32,
        window: Window,
        maximizing: bool,
    ) -> SearchResult<P::Move> {
        self.stats.nodes += 1;

        if depth == 0 || pos.terminal_status().is_terminal() {
            self.stats.leaves += 1;
            return SearchResult::leaf(evaluate(pos));
        }

        let moves = order_moves(pos, depth < BREADTH_LIMIT_DEPTH);
        if moves.is_empty() {
            self.stats.leaves += 1;
            return SearchResult::leaf(evaluate(pos));
        }

        let mut window = window;
        let mut best_value = if maximizing {
            Score::NEG_INFINITY
        } else {
            Score::INFINITY
        };
        let mut best_move = None;

        for mv in moves {
            let child = {
                let mut played = Played::new(pos, &mv);
                self.search(&mut *played, depth - 1, window, !maximizing)
                    .value
            };

            let improves = if maximizing {
                child > best_value
            } else {
                child < best_value
            };
            if improves {
                best_value = child;
                best_move = Some(mv);
            }

            window.tighten(best_value, maximizing);
            if window.is_closed() {
                self.stats.cutoffs += 1;
                break;
            }
        }

        SearchResult {
            value: best_value,
            best_move,
        }
    }
}

/// One-shot search with a fresh [`AlphaBeta`]
pub fn search<P: Position>(
    pos: &mut P,
    depth: u32,
    alpha: Score,
    beta: Score,
    maximizing: bool,
) -> SearchResult<P::Move> {
    AlphaBeta::new().search(pos, depth, Window::new(alpha, beta), maximizing)
}

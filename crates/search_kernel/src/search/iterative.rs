//! Iterative deepening search
//!
//! Runs fresh alpha-beta searches at depth 1, 2, ... until the depth limit is reached or
//! the time budget is spent. The budget is checked between depths only: a depth that has
//! started always finishes, and a depth that never started contributes nothing.

use super::alphabeta::AlphaBeta;
use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_TIME_BUDGET_SECS};
use crate::position::{ChessMove, Position};
use crate::score::{Score, Window};
use rand::seq::IndexedRandom;
use rand::Rng;
use shakmaty::Color;
use std::time::{Duration, Instant};
use tracing::debug;

/// Depth and wall-clock limits for one [`deepen`] call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeepeningLimits {
    pub max_depth: u32,
    pub time_budget: Duration,
}

impl DeepeningLimits {
    pub fn new(max_depth: u32, time_budget: Duration) -> Self {
        Self {
            max_depth,
            time_budget,
        }
    }
}

impl Default for DeepeningLimits {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_DEPTH,
            Duration::from_secs_f64(DEFAULT_TIME_BUDGET_SECS),
        )
    }
}

/// Outcome of one completed depth
#[derive(Debug, Clone)]
pub struct DepthReport<M> {
    pub depth: u32,
    /// Root value, White's point of view.
    pub score: Score,
    pub best_move: Option<M>,
    pub nodes: u64,
    /// Time since the deepening call started.
    pub elapsed: Duration,
}

/// Pick a move for the side to move.
///
/// Returns `None` only when there are no legal moves at all.
pub fn deepen<P, R>(pos: &mut P, limits: DeepeningLimits, rng: &mut R) -> Option<P::Move>
where
    P: Position,
    R: Rng + ?Sized,
{
    deepen_with_progress(pos, limits, rng, |_| {})
}

/// [`deepen`], calling `on_depth` after every completed depth.
pub fn deepen_with_progress<P, R, F>(
    pos: &mut P,
    limits: DeepeningLimits,
    rng: &mut R,
    mut on_depth: F,
) -> Option<P::Move>
where
    P: Position,
    R: Rng + ?Sized,
    F: FnMut(&DepthReport<P::Move>),
{
    let start_time = Instant::now();

    // Fallback in case no depth completes
    let mut best_move = pos.legal_moves().choose(rng).cloned()?;
    let maximizing = pos.side_to_move() == Color::White;

    for depth in 1..=limits.max_depth {
        let elapsed = start_time.elapsed();
        if elapsed > limits.time_budget {
            debug!(
                "[SEARCH] Time budget of {:.3}s spent after {:.3}s, stopping before depth {}",
                limits.time_budget.as_secs_f64(),
                elapsed.as_secs_f64(),
                depth
            );
            break;
        }

        let mut engine = AlphaBeta::new();
        let result = engine.search(pos, depth, Window::FULL, maximizing);

        if let Some(mv) = &result.best_move {
            best_move = mv.clone();
        }

        let report = DepthReport {
            depth,
            score: result.value,
            best_move: result.best_move,
            nodes: engine.stats().nodes,
            elapsed: start_time.elapsed(),
        };
        debug!(
            "[SEARCH] Depth {} complete: best {} score {} ({} nodes, {} cutoffs, {:.3}s)",
            depth,
            best_move.uci(),
            report.score,
            report.nodes,
            engine.stats().cutoffs,
            report.elapsed.as_secs_f64()
        );
        on_depth(&report);
    }

    Some(best_move)
}

//! Alpha-beta search with iterative deepening
//!
//! This module implements the move search using:
//! - Plain minimax with alpha-beta pruning, recursive and depth-first
//! - Iterative deepening for time management
//! - Move ordering for better pruning
//! - A tracing variant that records every pruning decision
//!
//! The searched position is borrowed mutably for the whole call and walked with
//! apply/undo. Nothing is cached between calls.
//!
//! ## Module Organization
//!
//! - `alphabeta` - Core alpha-beta search algorithm
//! - `ordering` - Move ordering heuristics
//! - `make_unmake` - Scoped apply/undo guard
//! - `iterative` - Iterative deepening wrapper
//! - `trace` - Instrumented search for visualization

mod alphabeta;
mod iterative;
mod make_unmake;
mod ordering;
mod trace;

pub use alphabeta::{search, AlphaBeta, SearchResult, SearchStats};
pub use iterative::{deepen, deepen_with_progress, DeepeningLimits, DepthReport};
pub use make_unmake::Played;
pub use ordering::{order_moves, score_move};
pub use trace::{record_trace, SearchTrace, TraceKind, TraceNode};

//! Adversarial search kernel
//!
//! Depth-limited minimax with alpha-beta pruning over any [`Position`], plus the pieces a
//! caller needs around it:
//! - [`ChessBoard`], a standard chess [`Position`] built on `shakmaty`
//! - a static evaluator scored from White's side
//! - heuristic move ordering and time-boxed iterative deepening
//! - [`record_trace`], which keeps every pruning decision for visualization
//! - [`FixtureTree`], a rule-free tree for checking the pruning policy by hand
//!
//! ```no_run
//! use search_kernel::{deepen, ChessBoard, DeepeningLimits};
//! use rand::SeedableRng;
//!
//! let mut board = ChessBoard::new();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let best = deepen(&mut board, DeepeningLimits::default(), &mut rng);
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod fixture;
pub mod position;
pub mod score;
pub mod search;

pub use board::{ChessBoard, START_FEN};
pub use error::{BoardError, BoardResult, FixtureError, FixtureResult};
pub use evaluation::evaluate;
pub use fixture::{FixtureTree, NodeRole};
pub use position::{ChessMove, Position, TerminalStatus};
pub use score::{Score, Window};
pub use search::{
    deepen, deepen_with_progress, record_trace, search, AlphaBeta, DeepeningLimits,
    DepthReport, SearchResult, SearchStats, SearchTrace, TraceKind, TraceNode,
};

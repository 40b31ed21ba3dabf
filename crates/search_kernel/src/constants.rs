//! # Search Kernel Constants - Evaluation Values & Search Parameters
//!
//! ## Overview
//!
//! This module centralizes the constant values used by the evaluator, the move orderer and the
//! search drivers. All evaluation magnitudes are expressed in **centipawns** (1/100th of a pawn)
//! and converted to [`Score`](crate::score::Score) units at the point of use.
//!
//! ## Centipawn Valuation System
//!
//! - **Pawn**: 100 centipawns (reference unit)
//! - **Knight**: 320 centipawns
//! - **Bishop**: 330 centipawns (a touch above the knight)
//! - **Rook**: 500 centipawns
//! - **Queen**: 900 centipawns
//! - **King**: 0 - the king is never traded, so it carries no material weight
//!
//! Mate is reported through a separate sentinel ([`MATE_CENTIPAWNS`]) that sits above the
//! material plus positional total of any position reachable without mass promotion.
//!
//! ## Ordering Bonuses
//!
//! Move ordering uses its own scale. Those numbers never leak into an evaluation; they only
//! decide which move the search examines first.
//!
//! ## Breadth Limits
//!
//! Two independent breadth caps exist:
//! - [`BREADTH_LIMIT`]: applied by the search engine once remaining depth drops below
//!   [`BREADTH_LIMIT_DEPTH`]
//! - [`TRACE_WIDTH`]: the trace recorder's cap per level

use shakmaty::{Role, Square};

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 0;

/// Mate magnitude in centipawns.
pub const MATE_CENTIPAWNS: i32 = 10_000;

/// Bonus for a pawn or knight standing on one of [`CENTER_SQUARES`].
pub const CENTER_OCCUPANCY_BONUS: i32 = 20;

pub const CENTER_SQUARES: [Square; 4] = [Square::E4, Square::D4, Square::E5, Square::D5];

pub const CAPTURE_BONUS: i32 = 50;
pub const CHECK_BONUS: i32 = 25;
pub const PROMOTION_BONUS: i32 = 800;

/// Victim bonus added on top of [`CAPTURE_BONUS`].
pub const fn victim_bonus(role: Role) -> i32 {
    match role {
        Role::Queen => 900,
        Role::Rook => 500,
        Role::Bishop | Role::Knight => 330,
        Role::Pawn => 100,
        Role::King => 0,
    }
}

/// Material value of a piece role, in centipawns.
pub const fn role_value(role: Role) -> i32 {
    match role {
        Role::Pawn => PAWN_VALUE,
        Role::Knight => KNIGHT_VALUE,
        Role::Bishop => BISHOP_VALUE,
        Role::Rook => ROOK_VALUE,
        Role::Queen => QUEEN_VALUE,
        Role::King => KING_VALUE,
    }
}

pub const BREADTH_LIMIT: usize = 7;
pub const BREADTH_LIMIT_DEPTH: u32 = 3;
pub const TRACE_WIDTH: usize = 3;

pub const DEFAULT_MAX_DEPTH: u32 = 3;
pub const DEFAULT_TIME_BUDGET_SECS: f64 = 1.0;
pub const DEFAULT_TRACE_DEPTH: u32 = 4;

/// Queen's Gambit Declined after 1.d4 d5 2.c4 e6, White to move.
pub const DEMO_FEN: &str = "rnbqkbnr/ppp2ppp/4p3/3p4/2PP4/8/PP2PPPP/RNBQKBNR w KQkq - 0 3";

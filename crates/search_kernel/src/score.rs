//! Scores and search windows
//!
//! A [`Score`] is an integer count of tenths of a centipawn. The evaluator's mobility term
//! is `0.1 × move-count difference`, and the finer unit keeps it exact without floating point.

use crate::constants::MATE_CENTIPAWNS;
use serde::Serialize;
use std::fmt;

/// Units per centipawn.
const SCALE: i32 = 10;

/// Totally ordered evaluation value, always from White's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Score(i32);

impl Score {
    pub const ZERO: Score = Score(0);
    /// Upper window bound. Never produced by an evaluation.
    pub const INFINITY: Score = Score(i32::MAX);
    /// Lower window bound. Symmetric with [`Score::INFINITY`] so negation cannot overflow.
    pub const NEG_INFINITY: Score = Score(-i32::MAX);
    /// White has delivered mate.
    pub const MATE: Score = Score(MATE_CENTIPAWNS * SCALE);

    pub const fn from_centipawns(cp: i32) -> Self {
        Score(cp * SCALE)
    }

    /// Build a score from raw tenth-of-centipawn units.
    pub const fn from_units(units: i32) -> Self {
        Score(units)
    }

    /// Whole centipawns, truncated toward zero.
    pub const fn centipawns(self) -> i32 {
        self.0 / SCALE
    }

    /// True for either mate sentinel.
    pub fn is_mate(self) -> bool {
        self.0.abs() == Score::MATE.0
    }
}

impl std::ops::Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        Score(-self.0)
    }
}

impl std::ops::Add for Score {
    type Output = Score;

    fn add(self, rhs: Score) -> Score {
        Score(self.0.saturating_add(rhs.0))
    }
}

impl std::iter::Sum for Score {
    fn sum<I: Iterator<Item = Score>>(iter: I) -> Score {
        iter.fold(Score::ZERO, |acc, s| acc + s)
    }
}

impl fmt::Display for Score {
    /// Centipawns, with a single decimal only when the value is fractional.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Score::INFINITY => f.write_str("inf"),
            Score::NEG_INFINITY => f.write_str("-inf"),
            Score(units) if units % SCALE == 0 => write!(f, "{}", units / SCALE),
            Score(units) => {
                let sign = if units < 0 { "-" } else { "" };
                let abs = units.unsigned_abs();
                write!(f, "{sign}{}.{}", abs / SCALE as u32, abs % SCALE as u32)
            }
        }
    }
}

/// The `(alpha, beta)` bounds carried down a search
///
/// `alpha` is the value the maximizing side is already guaranteed, `beta` the value the
/// minimizing side is already guaranteed. Once `beta <= alpha` the current node cannot
/// influence its ancestors and its remaining children are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub alpha: Score,
    pub beta: Score,
}

impl Window {
    pub const FULL: Window = Window {
        alpha: Score::NEG_INFINITY,
        beta: Score::INFINITY,
    };

    pub const fn new(alpha: Score, beta: Score) -> Self {
        Window { alpha, beta }
    }

    pub fn raise_alpha(&mut self, value: Score) {
        self.alpha = self.alpha.max(value);
    }

    pub fn lower_beta(&mut self, value: Score) {
        self.beta = self.beta.min(value);
    }

    /// Tighten the bound owned by the side to move.
    pub fn tighten(&mut self, value: Score, maximizing: bool) {
        if maximizing {
            self.raise_alpha(value);
        } else {
            self.lower_beta(value);
        }
    }

    /// A cutoff has fired: remaining siblings must not be explored.
    pub fn is_closed(&self) -> bool {
        self.beta <= self.alpha
    }
}

impl Default for Window {
    fn default() -> Self {
        Window::FULL
    }
}

//! Position/Move capability consumed by the search
//!
//! The search never owns a position and never copies one. It borrows a single mutable
//! instance and walks the tree by pairing [`Position::apply`] with [`Position::undo`]. Every
//! ancestor frame relies on those two being exact inverses.
//!
//! Callers inside the kernel go through [`Played`](crate::search::Played) rather than calling
//! the pair by hand.

use shakmaty::{CastlingMode, Color, Move, Piece, Role, Square};
use std::fmt;

/// Game-over classification of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalStatus {
    None,
    Checkmate,
    Stalemate,
    InsufficientMaterial,
}

impl TerminalStatus {
    pub fn is_terminal(self) -> bool {
        self != TerminalStatus::None
    }
}

/// Move metadata the orderer and recorder need
pub trait ChessMove: Clone + PartialEq + fmt::Debug {
    /// Role of the piece this move removes from the board, if any.
    fn captured(&self) -> Option<Role>;

    fn is_promotion(&self) -> bool;

    /// Canonical long algebraic encoding, e.g. `e2e4` or `e7e8q`.
    fn uci(&self) -> String;
}

impl ChessMove for Move {
    fn captured(&self) -> Option<Role> {
        self.capture()
    }

    fn is_promotion(&self) -> bool {
        Move::is_promotion(self)
    }

    fn uci(&self) -> String {
        self.to_uci(CastlingMode::Standard).to_string()
    }
}

/// A mutable two-player game state
pub trait Position {
    type Move: ChessMove;

    /// Legal moves in a deterministic order. Never contains illegal entries.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Play `mv`, flipping the side to move.
    fn apply(&mut self, mv: &Self::Move);

    /// Revert the most recent unreverted [`Position::apply`].
    fn undo(&mut self);

    fn terminal_status(&self) -> TerminalStatus;

    fn side_to_move(&self) -> Color;

    fn is_check(&self) -> bool;

    fn piece_at(&self, square: Square) -> Option<Piece>;

    /// Every occupied square with its piece.
    fn pieces(&self) -> Vec<(Square, Piece)>;

    /// Number of legal moves `side` would have if it were on move.
    ///
    /// Forcing the turn is a probe only: the position observed afterwards is unchanged.
    fn legal_move_count_for(&self, side: Color) -> usize;
}

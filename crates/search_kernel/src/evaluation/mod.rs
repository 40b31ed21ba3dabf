//! Static position evaluation
//!
//! Scores a position from White's perspective (the fixed reference side):
//! - Material count (piece values)
//! - Mobility (legal-move difference, a tenth of a centipawn per move)
//! - Center occupancy by pawns and knights
//!
//! Terminal positions bypass all three: checkmate returns the mate sentinel signed against
//! the mated side, stalemate and insufficient material return exactly zero.
//!
//! ## Module Organization
//!
//! - `material` - Material balance evaluation
//! - `positional` - Mobility and center control

mod material;
mod positional;

pub use material::material;
pub use positional::{center_control, mobility};

use crate::position::{Position, TerminalStatus};
use crate::score::Score;
use shakmaty::Color;

/// Evaluate a position, honoring terminal overrides
pub fn evaluate<P: Position>(pos: &P) -> Score {
    if let Some(score) = terminal_score(pos) {
        return score;
    }
    material(pos) + mobility(pos) + center_control(pos)
}

/// Score of a finished game, or `None` while play continues.
pub fn terminal_score<P: Position>(pos: &P) -> Option<Score> {
    match pos.terminal_status() {
        TerminalStatus::None => None,
        TerminalStatus::Checkmate => Some(match pos.side_to_move() {
            // The side to move is the side with no escape
            Color::White => -Score::MATE,
            Color::Black => Score::MATE,
        }),
        TerminalStatus::Stalemate | TerminalStatus::InsufficientMaterial => Some(Score::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ChessBoard;

    #[test]
    fn test_starting_position_is_balanced() {
        let board = ChessBoard::new();
        assert_eq!(evaluate(&board), Score::ZERO);
    }

    #[test]
    fn test_white_mated_scores_negative_mate() {
        let board = ChessBoard::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .unwrap();
        assert_eq!(evaluate(&board), -Score::MATE);
    }

    #[test]
    fn test_black_mated_scores_positive_mate() {
        let board = ChessBoard::from_fen("R5k1/5ppp/8/8/8/8/5PPP/6K1 b - - 1 1").unwrap();
        assert_eq!(evaluate(&board), Score::MATE);
    }

    #[test]
    fn test_stalemate_is_exactly_zero_despite_material() {
        // White is a queen up, but Black has no move and is not in check
        let board = ChessBoard::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(evaluate(&board), Score::ZERO);
    }

    #[test]
    fn test_insufficient_material_is_zero() {
        let board = ChessBoard::from_fen("8/8/4k3/8/8/3KB3/8/8 w - - 0 1").unwrap();
        assert_eq!(evaluate(&board), Score::ZERO);
    }

    #[test]
    fn test_total_is_sum_of_components() {
        let board = ChessBoard::from_fen(
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
        )
        .unwrap();
        let expected = material(&board) + mobility(&board) + center_control(&board);
        assert_eq!(evaluate(&board), expected);
    }
}

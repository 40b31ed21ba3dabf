//! Move ordering for alpha-beta pruning
//!
//! Orders moves to maximize alpha-beta pruning efficiency by trying the most forcing moves
//! first: promotions, captures of valuable pieces, then checks. The ordering score only
//! decides examination order; it is never added to an evaluation.

use super::make_unmake::Played;
use crate::constants::*;
use crate::position::{ChessMove, Position};

/// Heuristic priority of a single move
///
/// En passant takes a pawn, so it earns the pawn victim bonus like any other pawn capture.
pub fn score_move<P: Position>(pos: &mut P, mv: &P::Move) -> i32 {
    let mut score = 0;

    if let Some(victim) = mv.captured() {
        score += CAPTURE_BONUS + victim_bonus(victim);
    }

    if Played::new(pos, mv).is_check() {
        score += CHECK_BONUS;
    }

    if mv.is_promotion() {
        score += PROMOTION_BONUS;
    }

    score
}

/// Order legal moves for better alpha-beta pruning
///
/// Sorting is stable, so equally scored moves stay in enumeration order. With
/// `limit_breadth` only the best [`BREADTH_LIMIT`] moves survive.
pub fn order_moves<P: Position>(pos: &mut P, limit_breadth: bool) -> Vec<P::Move> {
    let moves = pos.legal_moves();
    let mut scored: Vec<(P::Move, i32)> = moves
        .into_iter()
        .map(|mv| {
            let score = score_move(pos, &mv);
            (mv, score)
        })
        .collect();

    // Sort moves by score (descending)
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    if limit_breadth {
        scored.truncate(BREADTH_LIMIT);
    }

    scored.into_iter().map(|(mv, _)| mv).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ChessBoard;

    fn labels(moves: &[shakmaty::Move]) -> Vec<String> {
        moves.iter().map(|m| m.uci()).collect()
    }

    #[test]
    fn test_order_moves_prioritizes_queen_capture() {
        // White pawn on e4 can take a queen on d5 or a pawn on f5
        let mut board = ChessBoard::from_fen("4k3/8/8/3q1p2/4P3/8/8/4K3 w - - 0 1").unwrap();
        let ordered = order_moves(&mut board, false);

        assert_eq!(ordered[0].uci(), "e4d5");
        assert_eq!(ordered[1].uci(), "e4f5");
    }

    #[test]
    fn test_capture_scores() {
        let mut board = ChessBoard::from_fen("4k3/8/8/3q1p2/4P3/8/8/4K3 w - - 0 1").unwrap();
        let takes_queen = board.parse_uci_move("e4d5").unwrap();
        let takes_pawn = board.parse_uci_move("e4f5").unwrap();

        assert_eq!(score_move(&mut board, &takes_queen), CAPTURE_BONUS + 900);
        assert_eq!(score_move(&mut board, &takes_pawn), CAPTURE_BONUS + 100);
    }

    #[test]
    fn test_en_passant_scores_as_pawn_capture() {
        // The d-pawn just advanced two squares; exd6 removes it from d5, not d6
        let mut board = ChessBoard::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let en_passant = board.parse_uci_move("e5d6").unwrap();

        assert_eq!(en_passant.captured(), Some(shakmaty::Role::Pawn));
        assert_eq!(score_move(&mut board, &en_passant), CAPTURE_BONUS + 100);
    }

    #[test]
    fn test_promotion_ordered_first() {
        let mut board = ChessBoard::from_fen("8/4P3/8/8/8/8/8/k1K5 w - - 0 1").unwrap();
        let ordered = order_moves(&mut board, false);

        assert!(ordered[0].is_promotion());
        // No promoted piece reaches the black king on a1, so no check bonus
        assert_eq!(score_move(&mut board, &ordered[0]), PROMOTION_BONUS);
    }

    #[test]
    fn test_check_bonus_and_probe_restores_position() {
        let mut board = ChessBoard::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
        let fen = board.fen();
        let mate = board.parse_uci_move("a1a8").unwrap();

        assert_eq!(score_move(&mut board, &mate), CHECK_BONUS);
        assert_eq!(board.fen(), fen);
        assert_eq!(board.ply(), 0);
    }

    #[test]
    fn test_ties_keep_enumeration_order() {
        let mut board = ChessBoard::new();
        let enumerated = labels(&board.legal_moves());
        let ordered = labels(&order_moves(&mut board, false));

        // No capture, check or promotion is possible from the start position
        assert_eq!(ordered, enumerated);
    }

    #[test]
    fn test_breadth_limit_truncates_to_seven() {
        let mut board = ChessBoard::new();
        let limited = order_moves(&mut board, true);
        let full = order_moves(&mut board, false);

        assert_eq!(limited.len(), BREADTH_LIMIT);
        assert_eq!(limited[..], full[..BREADTH_LIMIT]);
    }

    #[test]
    fn test_breadth_limit_with_few_moves() {
        let mut board = ChessBoard::from_fen("8/8/8/8/8/8/8/k1K5 w - - 0 1").unwrap();
        let limited = order_moves(&mut board, true);
        assert_eq!(limited.len(), board.legal_moves().len());
    }
}

//! Mobility and center control

use crate::constants::{CENTER_OCCUPANCY_BONUS, CENTER_SQUARES};
use crate::position::Position;
use crate::score::Score;
use shakmaty::{Color, Role};

/// `0.1 × (White legal moves − Black legal moves)`
pub fn mobility<P: Position>(pos: &P) -> Score {
    let white = pos.legal_move_count_for(Color::White) as i32;
    let black = pos.legal_move_count_for(Color::Black) as i32;
    // One score unit is a tenth of a centipawn
    Score::from_units(white - black)
}

/// ±20 for each pawn or knight standing on d4, e4, d5 or e5
pub fn center_control<P: Position>(pos: &P) -> Score {
    let centipawns: i32 = CENTER_SQUARES
        .iter()
        .filter_map(|&sq| pos.piece_at(sq))
        .filter(|piece| matches!(piece.role, Role::Pawn | Role::Knight))
        .map(|piece| match piece.color {
            Color::White => CENTER_OCCUPANCY_BONUS,
            Color::Black => -CENTER_OCCUPANCY_BONUS,
        })
        .sum();

    Score::from_centipawns(centipawns)
}

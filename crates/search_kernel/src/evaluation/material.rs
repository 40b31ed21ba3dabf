//! Material evaluation
//!
//! Evaluates the material balance of a position by counting piece values.

use crate::constants::role_value;
use crate::position::Position;
use crate::score::Score;
use shakmaty::Color;

/// Evaluate material balance
pub fn material<P: Position>(pos: &P) -> Score {
    let centipawns: i32 = pos
        .pieces()
        .into_iter()
        .map(|(_, piece)| {
            let value = role_value(piece.role);
            match piece.color {
                Color::White => value,
                Color::Black => -value,
            }
        })
        .sum();

    Score::from_centipawns(centipawns)
}

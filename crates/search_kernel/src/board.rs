//! Standard chess position backed by `shakmaty`
//!
//! [`ChessBoard`] supplies the rules side of the search: legal move generation, terminal
//! detection and board queries all come from `shakmaty::Chess`. `shakmaty` positions are
//! immutable-by-value, so undo is provided by a history of earlier states. Snapshots are
//! private to the board; the search itself only ever sees `apply`/`undo`.
//!
//! The mobility probe forces the turn. `shakmaty` refuses to hand the move to a side that is
//! giving check, so that case counts the checking side's king-safe moves directly from the
//! attack tables, capturing the checked king included.

use crate::error::{BoardError, BoardResult};
use crate::position::{Position, TerminalStatus};
use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{
    attacks, Bitboard, Board, CastlingMode, CastlingSide, Chess, Color, EnPassantMode, Move, Piece,
    Position as _, Rank, Role, Square,
};

/// Start-position FEN.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, Default)]
pub struct ChessBoard {
    current: Chess,
    history: Vec<Chess>,
}

impl ChessBoard {
    /// Standard start position.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fen(fen: &str) -> BoardResult<Self> {
        let parsed: Fen = fen.trim().parse().map_err(|e| BoardError::InvalidFen {
            fen: fen.to_string(),
            message: format!("{e}"),
        })?;
        let current: Chess =
            parsed
                .into_position(CastlingMode::Standard)
                .map_err(|e| BoardError::InvalidFen {
                    fen: fen.to_string(),
                    message: format!("{e}"),
                })?;

        Ok(Self {
            current,
            history: Vec::new(),
        })
    }

    /// Resolve a long algebraic token against the current position.
    pub fn parse_uci_move(&self, token: &str) -> BoardResult<Move> {
        let uci: UciMove = token.parse().map_err(|e| BoardError::InvalidMove {
            token: token.to_string(),
            message: format!("{e}"),
        })?;
        uci.to_move(&self.current)
            .map_err(|_| BoardError::IllegalMove {
                token: token.to_string(),
                fen: self.fen(),
            })
    }

    /// Parse and play a move permanently. The undo history is kept, so this is still revertible.
    pub fn play_uci(&mut self, token: &str) -> BoardResult<()> {
        let mv = self.parse_uci_move(token)?;
        self.apply(&mv);
        Ok(())
    }

    pub fn fen(&self) -> String {
        Fen::from_position(self.current.clone(), EnPassantMode::Legal).to_string()
    }

    /// Number of applied, not yet undone, moves.
    pub fn ply(&self) -> usize {
        self.history.len()
    }
}

impl Position for ChessBoard {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        self.current.legal_moves().into_iter().collect()
    }

    fn apply(&mut self, mv: &Move) {
        let previous = self.current.clone();
        self.current.play_unchecked(mv);
        self.history.push(previous);
    }

    fn undo(&mut self) {
        if let Some(previous) = self.history.pop() {
            self.current = previous;
        } else {
            debug_assert!(false, "undo called without a matching apply");
        }
    }

    fn terminal_status(&self) -> TerminalStatus {
        if self.current.is_checkmate() {
            TerminalStatus::Checkmate
        } else if self.current.is_stalemate() {
            TerminalStatus::Stalemate
        } else if self.current.is_insufficient_material() {
            TerminalStatus::InsufficientMaterial
        } else {
            TerminalStatus::None
        }
    }

    fn side_to_move(&self) -> Color {
        self.current.turn()
    }

    fn is_check(&self) -> bool {
        self.current.is_check()
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.current.board().piece_at(square)
    }

    fn pieces(&self) -> Vec<(Square, Piece)> {
        let board = self.current.board();
        board
            .occupied()
            .into_iter()
            .filter_map(|sq| board.piece_at(sq).map(|piece| (sq, piece)))
            .collect()
    }

    fn legal_move_count_for(&self, side: Color) -> usize {
        if self.current.turn() == side {
            return self.current.legal_moves().len();
        }
        match self.current.clone().swap_turn() {
            Ok(forced) => forced.legal_moves().len(),
            // The side to move is in check, so `side` is the one giving it
            Err(_) => self.checking_side_move_count(side),
        }
    }
}

impl ChessBoard {
    fn checking_side_move_count(&self, side: Color) -> usize {
        let board = self.current.board();
        let own = board.by_color(side);
        let occupied = board.occupied();
        let mut count = 0;

        for from in own {
            let Some(piece) = board.piece_at(from) else {
                continue;
            };
            let targets = match piece.role {
                Role::Pawn => pawn_targets(board, side, from),
                Role::Knight => attacks::knight_attacks(from) & !own,
                Role::Bishop => attacks::bishop_attacks(from, occupied) & !own,
                Role::Rook => attacks::rook_attacks(from, occupied) & !own,
                Role::Queen => attacks::queen_attacks(from, occupied) & !own,
                Role::King => attacks::king_attacks(from) & !own,
            };
            for to in targets {
                if !keeps_king_safe(board, side, from, to) {
                    continue;
                }
                let promotes = piece.role == Role::Pawn && to.rank() == promotion_rank(side);
                // One move per promotion piece
                count += if promotes { 4 } else { 1 };
            }
        }

        count + self.castle_count(side)
    }

    fn castle_count(&self, side: Color) -> usize {
        let board = self.current.board();
        let castles = self.current.castles();
        let Some(king) = board.king_of(side) else {
            return 0;
        };
        if is_attacked(board, king, !side) {
            return 0;
        }

        CastlingSide::ALL
            .into_iter()
            .filter(|&wing| {
                if castles.rook(side, wing).is_none() {
                    return false;
                }
                let path = castles.path(side, wing);
                if (path & board.occupied()).any() {
                    return false;
                }
                // Squares the king crosses, destination included
                let king_to = wing.king_to(side);
                let (from, to) = (u32::from(king), u32::from(king_to));
                let crossed = from.min(to)..=from.max(to);
                (path | Bitboard::from(king_to))
                    .into_iter()
                    .filter(|&sq| crossed.contains(&u32::from(sq)) && sq != king)
                    .all(|sq| !is_attacked(board, sq, !side))
            })
            .count()
    }
}

fn promotion_rank(side: Color) -> Rank {
    match side {
        Color::White => Rank::Eighth,
        Color::Black => Rank::First,
    }
}

/// Pushes and diagonal captures. No en passant: the square belongs to the real side to move.
fn pawn_targets(board: &Board, side: Color, from: Square) -> Bitboard {
    let occupied = board.occupied();
    let mut targets = attacks::pawn_attacks(side, from) & board.by_color(!side);
    let (step, start) = match side {
        Color::White => (8, Rank::Second),
        Color::Black => (-8, Rank::Seventh),
    };

    if let Some(single) = from.offset(step).filter(|&sq| !occupied.contains(sq)) {
        targets.add(single);
        if from.rank() == start {
            if let Some(double) = single.offset(step).filter(|&sq| !occupied.contains(sq)) {
                targets.add(double);
            }
        }
    }
    targets
}

fn is_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    board.attacks_to(square, attacker, board.occupied()).any()
}

fn keeps_king_safe(board: &Board, side: Color, from: Square, to: Square) -> bool {
    let mut after = board.clone();
    let _ = after.remove_piece_at(to);
    let Some(piece) = after.remove_piece_at(from) else {
        return false;
    };
    after.set_piece_at(to, piece);

    match after.king_of(side) {
        Some(king) => !is_attacked(&after, king, !side),
        None => true,
    }
}

//! Protocol session state
//!
//! A [`Session`] owns the current game position, the settings `go` searches with, the random
//! source for the fallback move, and the reply sink. The sink is generic so tests can drive a
//! session entirely in memory.

use super::command::{Command, PositionBase};
use crate::config::EngineSettings;
use crate::error::ProtocolResult;
use rand::rngs::StdRng;
use search_kernel::{deepen_with_progress, ChessBoard, ChessMove, DepthReport, Position};
use shakmaty::{Color, Move};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Whether the read loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct Session<W: Write> {
    board: ChessBoard,
    settings: EngineSettings,
    rng: StdRng,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(settings: EngineSettings, out: W) -> Self {
        let rng = settings.rng();
        Self {
            board: ChessBoard::new(),
            settings,
            rng,
            out,
        }
    }

    pub fn board(&self) -> &ChessBoard {
        &self.board
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Read commands until `quit` or end of input.
    ///
    /// The first failing command ends the session with its error.
    pub fn run<R: BufRead>(&mut self, input: R) -> ProtocolResult<()> {
        for line in input.lines() {
            if self.handle_line(&line?)? == Control::Quit {
                break;
            }
        }
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> ProtocolResult<Control> {
        debug!("[UCI] <- {}", line);

        match Command::parse(line)? {
            Command::Uci => {
                self.reply(&format!("id name {}", env!("CARGO_PKG_NAME")))?;
                self.reply(&format!("id author {}", env!("CARGO_PKG_AUTHORS")))?;
                self.reply("uciok")?;
            }
            Command::IsReady => self.reply("readyok")?,
            Command::NewGame => self.board = ChessBoard::new(),
            Command::Position { base, moves } => self.set_position(base, &moves)?,
            Command::Go => self.go()?,
            Command::Quit => return Ok(Control::Quit),
            Command::Unknown(text) => debug!("[UCI] Ignoring unknown command: {:?}", text),
        }

        Ok(Control::Continue)
    }

    /// Replace the current position. Nothing changes unless every move applies.
    fn set_position(&mut self, base: PositionBase, moves: &[String]) -> ProtocolResult<()> {
        let mut board = match base {
            PositionBase::StartPos => ChessBoard::new(),
            PositionBase::Fen(fen) => ChessBoard::from_fen(&fen)?,
        };
        for token in moves {
            board.play_uci(token)?;
        }

        self.board = board;
        Ok(())
    }

    fn go(&mut self) -> ProtocolResult<()> {
        let limits = self.settings.limits();
        let side = self.board.side_to_move();
        let out = &mut self.out;
        let mut write_result: ProtocolResult<()> = Ok(());

        let best_move = deepen_with_progress(&mut self.board, limits, &mut self.rng, |report| {
            if write_result.is_ok() {
                write_result = write_line(&mut *out, &info_line(report, side));
            }
        });
        write_result?;

        match best_move {
            Some(mv) => {
                info!("[UCI] Best move {}", mv.uci());
                self.reply(&format!("bestmove {}", mv.uci()))
            }
            None => {
                info!("[UCI] No legal move in {}", self.board.fen());
                self.reply("bestmove 0000")
            }
        }
    }

    fn reply(&mut self, line: &str) -> ProtocolResult<()> {
        write_line(&mut self.out, line)
    }
}

fn write_line<W: Write>(out: &mut W, line: &str) -> ProtocolResult<()> {
    debug!("[UCI] -> {}", line);
    writeln!(out, "{}", line)?;
    out.flush()?;
    Ok(())
}

/// `info` line for one finished depth. The score is from the side to move's view.
fn info_line(report: &DepthReport<Move>, side: Color) -> String {
    let score = match side {
        Color::White => report.score,
        Color::Black => -report.score,
    };
    let mut line = format!(
        "info depth {} score cp {} nodes {} time {}",
        report.depth,
        score.centipawns(),
        report.nodes,
        report.elapsed.as_millis()
    );
    if let Some(mv) = &report.best_move {
        line.push_str(" pv ");
        line.push_str(&mv.uci());
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;

    fn session() -> Session<Vec<u8>> {
        let settings = EngineSettings {
            max_depth: 2,
            time_budget_secs: 30.0,
            seed: Some(17),
            ..EngineSettings::default()
        };
        Session::new(settings, Vec::new())
    }

    fn output(session: Session<Vec<u8>>) -> Vec<String> {
        String::from_utf8(session.into_output())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_uci_handshake() {
        let mut session = session();
        session.handle_line("uci").unwrap();
        session.handle_line("isready").unwrap();

        let lines = output(session);
        assert_eq!(lines[0], "id name minimax-uci");
        assert!(lines[1].starts_with("id author "));
        assert_eq!(lines[2], "uciok");
        assert_eq!(lines[3], "readyok");
    }

    #[test]
    fn test_unknown_command_is_silent() {
        let mut session = session();
        assert_eq!(session.handle_line("debug on").unwrap(), Control::Continue);
        assert!(output(session).is_empty());
    }

    #[test]
    fn test_quit() {
        let mut session = session();
        assert_eq!(session.handle_line("quit").unwrap(), Control::Quit);
    }

    #[test]
    fn test_position_and_new_game() {
        let mut session = session();
        session.handle_line("position startpos moves e2e4 e7e5").unwrap();
        assert_eq!(session.board().ply(), 2);

        session.handle_line("ucinewgame").unwrap();
        assert_eq!(session.board().ply(), 0);
    }

    #[test]
    fn test_failed_position_keeps_previous_board() {
        let mut session = session();
        session.handle_line("position startpos moves d2d4").unwrap();
        let before = session.board().fen();

        let err = session.handle_line("position startpos moves e2e4 e2e4").unwrap_err();
        assert!(matches!(err, ProtocolError::Board(_)));
        assert_eq!(session.board().fen(), before);
    }

    #[test]
    fn test_go_reports_depths_then_best_move() {
        let mut session = session();
        session.handle_line("position startpos").unwrap();
        session.handle_line("go").unwrap();

        let lines = output(session);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("info depth 1 score cp "));
        assert!(lines[1].starts_with("info depth 2 score cp "));
        assert!(lines[1].contains(" pv "));
        assert!(lines[2].starts_with("bestmove "));
    }

    #[test]
    fn test_black_score_is_from_black_view() {
        // Black to move with an extra queen
        let mut session = session();
        session
            .handle_line("position fen 3qk3/8/8/8/8/8/8/4K3 b - - 0 1")
            .unwrap();
        session.handle_line("go").unwrap();

        let lines = output(session);
        let cp: i32 = lines[0]
            .split_whitespace()
            .nth(5)
            .and_then(|token| token.parse().ok())
            .unwrap();
        assert!(cp > 0, "Black is winning, got {cp}");
    }
}

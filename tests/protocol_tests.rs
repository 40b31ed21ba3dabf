//! Protocol Integration Tests
//!
//! Drives a [`Session`] over in-memory input and output, the way a GUI would:
//! - Handshake and readiness
//! - Position setup followed by `go`
//! - Finished games and malformed input

use minimax_uci::{EngineSettings, ProtocolError, Session};
use search_kernel::constants::DEMO_FEN;
use search_kernel::{BoardError, ChessBoard, ChessMove, Position};
use std::io::Cursor;

fn settings() -> EngineSettings {
    EngineSettings {
        max_depth: 2,
        time_budget_secs: 30.0,
        seed: Some(2024),
        ..EngineSettings::default()
    }
}

/// Feed a whole script through a fresh session
fn run_script(script: &str) -> (Result<(), ProtocolError>, Vec<String>) {
    let mut session = Session::new(settings(), Vec::new());
    let result = session.run(Cursor::new(script.to_string()));
    let output = String::from_utf8(session.into_output()).unwrap();
    (result, output.lines().map(str::to_string).collect())
}

fn best_move(lines: &[String]) -> &str {
    lines
        .iter()
        .rev()
        .find_map(|line| line.strip_prefix("bestmove "))
        .expect("no bestmove line")
}

#[test]
fn test_full_handshake() {
    let (result, lines) = run_script("uci\nisready\nquit\n");

    assert!(result.is_ok());
    assert_eq!(lines.first().map(String::as_str), Some("id name minimax-uci"));
    assert!(lines.contains(&"uciok".to_string()));
    assert_eq!(lines.last().map(String::as_str), Some("readyok"));
}

#[test]
fn test_bestmove_after_opening_moves_is_legal() {
    //! A GUI sets up 1.e4 e5 and asks for a move; the reply must be legal for White

    let (result, lines) = run_script("position startpos moves e2e4 e7e5\ngo\nquit\n");
    assert!(result.is_ok());

    let mut board = ChessBoard::new();
    board.play_uci("e2e4").unwrap();
    board.play_uci("e7e5").unwrap();
    let reply = best_move(&lines);

    assert!(
        board.legal_moves().iter().any(|mv| mv.uci() == reply),
        "{reply} is not legal after 1.e4 e5"
    );
}

#[test]
fn test_fen_position_finds_mate() {
    let (_, lines) = run_script("position fen 6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1\ngo\n");
    assert_eq!(best_move(&lines), "a1a8");
}

#[test]
fn test_default_trace_position_is_playable() {
    let (result, lines) = run_script(&format!("position fen {DEMO_FEN}\ngo\n"));
    assert!(result.is_ok());

    let board = ChessBoard::from_fen(DEMO_FEN).unwrap();
    let reply = best_move(&lines);
    assert!(board.legal_moves().iter().any(|mv| mv.uci() == reply));
}

#[test]
fn test_checkmated_position_answers_null_move() {
    let (result, lines) = run_script(
        "position fen rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3\ngo\n",
    );

    assert!(result.is_ok());
    assert_eq!(best_move(&lines), "0000");
}

#[test]
fn test_stalemated_position_answers_null_move() {
    let (_, lines) = run_script("position fen 7k/5Q2/6K1/8/8/8/8/8 b - - 0 1\ngo\n");
    assert_eq!(best_move(&lines), "0000");
    assert!(!lines.iter().any(|line| line.starts_with("info depth")));
}

#[test]
fn test_illegal_move_ends_session_with_error() {
    let (result, lines) = run_script("position startpos moves e2e5\ngo\n");

    assert!(matches!(
        result,
        Err(ProtocolError::Board(BoardError::IllegalMove { .. }))
    ));
    assert!(lines.is_empty(), "nothing after the failing command runs");
}

#[test]
fn test_malformed_position_is_an_error() {
    let (result, _) = run_script("position\n");
    assert!(matches!(result, Err(ProtocolError::MissingArgument { .. })));

    let (result, _) = run_script("position fen not/a/fen w - - 0 1\n");
    assert!(matches!(
        result,
        Err(ProtocolError::Board(BoardError::InvalidFen { .. }))
    ));
}

#[test]
fn test_error_message_mentions_token() {
    let (result, _) = run_script("position startpos moves e9e4\n");
    let message = result.unwrap_err().to_string();
    assert!(message.contains("e9e4"), "unexpected message: {message}");
}

#[test]
fn test_unknown_commands_are_ignored() {
    let (result, lines) = run_script("setoption name Hash value 32\nregister later\nisready\n");

    assert!(result.is_ok());
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn test_quit_stops_reading() {
    let (_, lines) = run_script("quit\nisready\n");
    assert!(lines.is_empty());
}

#[test]
fn test_same_seed_same_reply() {
    let script = "position startpos moves d2d4\ngo\n";
    let (_, first) = run_script(script);
    let (_, second) = run_script(script);

    assert_eq!(best_move(&first), best_move(&second));
}

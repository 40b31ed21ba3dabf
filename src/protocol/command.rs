//! UCI command parsing

use crate::error::{ProtocolError, ProtocolResult};

/// Where a `position` command starts from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionBase {
    StartPos,
    Fen(String),
}

/// A single line of input, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Uci,
    IsReady,
    NewGame,
    Position {
        base: PositionBase,
        moves: Vec<String>,
    },
    /// Search arguments are accepted and ignored.
    Go,
    Quit,
    /// Anything else, kept verbatim for logging.
    Unknown(String),
}

impl Command {
    /// Classify one input line. Only a malformed `position` is an error.
    pub fn parse(line: &str) -> ProtocolResult<Self> {
        let line = line.trim();
        let mut tokens = line.split_whitespace();

        let command = match tokens.next() {
            Some("uci") => Command::Uci,
            Some("isready") => Command::IsReady,
            Some("ucinewgame") => Command::NewGame,
            Some("go") => Command::Go,
            Some("quit") => Command::Quit,
            Some("position") => parse_position(tokens)?,
            _ => Command::Unknown(line.to_string()),
        };
        Ok(command)
    }
}

fn parse_position<'a>(mut tokens: impl Iterator<Item = &'a str>) -> ProtocolResult<Command> {
    let base = match tokens.next() {
        Some("startpos") => {
            // Anything between `startpos` and `moves` is ignored
            tokens.by_ref().find(|&token| token == "moves");
            PositionBase::StartPos
        }
        Some("fen") => {
            let fields: Vec<&str> = tokens.by_ref().take_while(|&token| token != "moves").collect();
            if fields.is_empty() {
                return Err(missing("a FEN string"));
            }
            PositionBase::Fen(fields.join(" "))
        }
        _ => return Err(missing("'startpos' or 'fen'")),
    };

    let moves = tokens.map(str::to_string).collect();
    Ok(Command::Position { base, moves })
}

fn missing(argument: &str) -> ProtocolError {
    ProtocolError::MissingArgument {
        command: "position".to_string(),
        argument: argument.to_string(),
    }
}

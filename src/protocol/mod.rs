//! UCI front end
//!
//! Supports the subset needed to play games through a GUI: `uci`, `isready`, `ucinewgame`,
//! `position`, `go` and `quit`. Everything else is ignored.
//!
//! ## Module Organization
//!
//! - `command` - Line parsing into [`Command`]
//! - `session` - [`Session`], the state a connection carries between commands

mod command;
mod session;

pub use command::{Command, PositionBase};
pub use session::{Control, Session};

//! minimax-uci - a UCI chess engine around the `search_kernel` alpha-beta search
//!
//! ## Module Organization
//!
//! - `protocol` - UCI command parsing and the per-connection [`Session`](protocol::Session)
//! - `config` - [`EngineSettings`](config::EngineSettings), loaded from JSON
//! - `render` - Graphviz output for search traces
//! - `visualize` - The `draw` mode
//! - `error` - Protocol and configuration errors

pub mod config;
pub mod error;
pub mod protocol;
pub mod render;
pub mod visualize;

pub use config::EngineSettings;
pub use error::{ConfigError, ConfigResult, ProtocolError, ProtocolResult};
pub use protocol::{Command, Control, Session};

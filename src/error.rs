//! Error types for the engine front end
//!
//! Provides custom error types for the protocol session and for configuration loading.

use search_kernel::BoardError;
use thiserror::Error;

/// Errors that end a protocol session
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Position or move text was rejected by the board
    #[error("{0}")]
    Board(#[from] BoardError),

    /// Reading commands or writing replies failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Command is missing a required argument
    #[error("'{command}' is missing {argument}")]
    MissingArgument { command: String, argument: String },
}

/// Result type alias for protocol operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while loading engine settings
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file I/O error
    #[error("Settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings deserialization error
    #[error("Settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

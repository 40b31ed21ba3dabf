//! Error types for the search kernel
//!
//! Searching and evaluating never fail for a structurally valid position, so the only
//! fallible surface here is building a [`ChessBoard`](crate::board::ChessBoard) from
//! external text: board encodings and move tokens.

use thiserror::Error;

/// Errors raised while constructing or mutating a board from textual input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Board encoding could not be parsed or describes an impossible position
    #[error("Invalid FEN '{fen}': {message}")]
    InvalidFen { fen: String, message: String },

    /// Move token is not well-formed long algebraic notation
    #[error("Invalid move token '{token}': {message}")]
    InvalidMove { token: String, message: String },

    /// Move token is well-formed but not legal in the current position
    #[error("Illegal move '{token}' in position {fen}")]
    IllegalMove { token: String, fen: String },
}

/// Result type alias for board operations
pub type BoardResult<T> = Result<T, BoardError>;

/// Errors raised while assembling a [`FixtureTree`](crate::fixture::FixtureTree)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixtureError {
    /// Edge endpoint was never added
    #[error("Unknown fixture node {node}")]
    UnknownNode { node: usize },

    /// Leaves cannot have children
    #[error("Fixture node {node} is a leaf and cannot have children")]
    LeafParent { node: usize },

    /// Max/min node left without children
    #[error("Fixture node {node} is internal but has no children")]
    Childless { node: usize },

    /// Child is the root or already has a parent
    #[error("Fixture node {node} already has a parent or is the root")]
    SecondParent { node: usize },
}

/// Result type alias for fixture construction
pub type FixtureResult<T> = Result<T, FixtureError>;

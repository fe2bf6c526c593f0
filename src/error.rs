//! Error types for console operations

use std::io;
use thiserror::Error;

use crate::app::{ConsoleId, Selection};

/// Console error type
#[derive(Error, Debug)]
pub enum Error {
    /// The input line is full; the keystroke was rejected
    #[error("input line is full ({capacity} bytes including terminator)")]
    CapacityExceeded { capacity: usize },

    /// Character does not fit in a single-byte cell
    #[error("unsupported character {0:?}: only single-byte ASCII is accepted")]
    UnsupportedChar(char),

    /// Handle refers to a console that no longer exists
    #[error("invalid console handle: {0}")]
    InvalidConsoleHandle(ConsoleId),

    /// No console is selected for the requested role
    #[error("no console selected for {0}")]
    NoConsoleSelected(Selection),

    /// Configuration out of bounds
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON configuration
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for console operations
pub type Result<T> = std::result::Result<T, Error>;

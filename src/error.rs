//! Typed errors for the dispatch layer.
//!
//! Commands and the binary wrap these in `anyhow` with context; library
//! modules return them directly so callers can tell configuration problems
//! apart from per-message delivery failures.
//!
//! CHANGELOG:
//! - 01/12/2026 - Initial implementation

use thiserror::Error;

use crate::session::DirectiveKind;

/// Errors raised before any message is dispatched.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("recipient must not be empty")]
    EmptyRecipient,

    #[error("max concurrent sends must be at least 1 (got {0})")]
    InvalidConcurrency(usize),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Failures reported by a [`Transport`](crate::transport::Transport).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("AppleScript failed: {stderr}")]
    Script { stderr: String },

    #[error("failed to run osascript: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Messages database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("transport is closed")]
    Closed,

    /// Free-form failure, used by transports without a richer error type.
    #[error("{0}")]
    Other(String),
}

/// Problems with a line typed into the interactive session.
///
/// All of these are reported to the user; none of them end the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Usage: {}", .0.usage())]
    Usage(DirectiveKind),

    #[error("No default recipient set. Use /to <recipient> or /send <recipient> <message>")]
    NoDefaultRecipient,

    #[error("Input line is not valid UTF-8; ignored")]
    InvalidUtf8,
}

pub type Result<T, E = DispatchError> = std::result::Result<T, E>;

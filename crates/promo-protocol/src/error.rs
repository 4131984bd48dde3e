//! Protocol error types

use thiserror::Error;

/// Protocol-specific errors.
///
/// The `Display` strings double as client-facing text: the connection
/// handler answers a failed parse with `ERROR: <message>`, so the wording
/// here is part of the wire contract.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Empty command")]
    Empty,

    /// Carries the offending verb for logging; the wire message stays fixed
    #[error("Unknown command")]
    UnknownCommand(String),

    #[error("Usage GENERATE <count> [7|8]")]
    GenerateUsage,

    #[error("Length must be 7 or 8")]
    LengthArg,

    #[error("Usage USE <code>")]
    UseUsage,

    #[error("Line exceeds {limit} bytes")]
    LineTooLong { limit: usize },
}

/// Result type for protocol operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;

//! Error types for the command boundary.

use thiserror::Error;

/// Result type for command calls.
pub type CommandResult<T> = Result<T, CommandError>;

/// Errors returned by a command call.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The backend ran the command and reported a failure.
    #[error("{command} rejected: {message}")]
    Rejected { command: String, message: String },

    /// The call never reached the backend or its reply was lost.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend does not know this command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Arguments could not be built from the given payload.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// Arguments or reply did not (de)serialize.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CommandError {
    /// Shorthand for a backend rejection.
    pub fn rejected(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            command: command.into(),
            message: message.into(),
        }
    }
}

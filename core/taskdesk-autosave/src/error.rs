//! Error types for autosave.

use thiserror::Error;

/// Result type for autosave operations.
pub type AutosaveResult<T> = Result<T, AutosaveError>;

/// Errors surfaced to editors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutosaveError {
    /// The edit failed local validation and was not queued.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The backend write failed. The payload is still pending.
    #[error("write of {entity_id} (seq {seq}) failed: {message}")]
    Write {
        entity_id: String,
        seq: u64,
        message: String,
    },

    /// The autosave task has shut down.
    #[error("autosave task stopped")]
    ChannelClosed,
}

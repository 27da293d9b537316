//! Record model for Taskdesk.
//!
//! Defines the types every other Taskdesk crate agrees on:
//! - [`Record`]: anything with a stable string id that can be listed and edited
//! - Row/detail/input types for tasks, ideas, docs, projects and workspaces,
//!   shaped exactly like the JSON the command backend returns and accepts
//! - Status enums with their wire spellings
//!
//! Nothing here talks to the backend; see `taskdesk-command` for that.

mod doc;
mod idea;
mod project;
mod record;
mod status;
mod task;

pub use doc::{
    DocDetail, DocInput, DocMetaPatch, DocRow, DocStatus, UpdateDocBodyInput, UpdateDocMetaInput,
};
pub use idea::{IdeaDetail, IdeaInput, IdeaRow, IdeaStatus, IdeaToTaskInput, UpdateIdeaInput};
pub use project::{CreateProjectInput, CreateWorkspaceInput, ProjectOption, SearchHit, WorkspaceRow};
pub use record::Record;
pub use status::Status;
pub use task::{TaskDetail, TaskInput, TaskPatch, TaskReasonInput, TaskRow, TaskStatus};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while interpreting model values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown {kind} status: {value:?}")]
    UnknownStatus { kind: &'static str, value: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Keeps `current` unless `newer` carries a value.
pub(crate) fn overlay<T>(current: &mut Option<T>, newer: Option<T>) {
    if newer.is_some() {
        *current = newer;
    }
}

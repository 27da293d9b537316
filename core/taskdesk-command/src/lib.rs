//! Command boundary for Taskdesk.
//!
//! Everything Taskdesk persists goes through a single asynchronous call:
//! a command name plus JSON arguments, answered with JSON or an error
//! string. This crate provides:
//!
//! - [`CommandBackend`]: the trait any transport (desktop IPC, HTTP, test
//!   double) implements
//! - [`Api`]: typed wrappers for the record commands (list, get, create,
//!   update, search and per-project counts). Idea notes, links and
//!   attachments are not wrapped; send them through [`Api::call`]
//! - [`mock::MockBackend`]: a scriptable in-memory backend for tests

mod api;
mod backend;
mod error;
pub mod mock;

pub use api::{commands, with_id, Api};
pub use backend::CommandBackend;
pub use error::{CommandError, CommandResult};

//! Debounced, ordered autosave for Taskdesk editors.
//!
//! Editors submit every local change; this crate decides when those changes
//! reach the backend.
//!
//! # Guarantees
//!
//! - **Coalescing**: edits submitted within the quiet period collapse into a
//!   single write. Snapshots keep the last payload; patches are merged
//!   field by field (see [`Coalesce`])
//! - **One write in flight per entity**: edits arriving during a write are
//!   queued (only the newest is kept) and sent as soon as it completes
//! - **Latest wins**: an older payload is never written after a newer one
//! - **No silent retries**: a failed write is reported; the latest content
//!   stays pending until the next edit or an explicit retry
//!
//! # Components
//!
//! - [`SaveController`]: the per-entity state machine. Pure: it performs
//!   no I/O and reads no clock, so every transition is testable with
//!   hand-made instants.
//! - [`Autosaver`]: a tokio task that owns a controller, runs its timers
//!   and launches writes through an [`EntityWriter`].
//! - [`CommandWriter`]: the standard writer, issuing one backend command per
//!   write with `{ id, ...payload }`.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskdesk_autosave::{AutosaveConfig, Autosaver, CommandWriter};
//! use taskdesk_command::mock::MockBackend;
//!
//! # async fn demo() {
//! let backend = Arc::new(MockBackend::new());
//! let saver = Autosaver::spawn(CommandWriter::doc_body(backend), AutosaveConfig::default());
//!
//! let handle = saver.handle();
//! handle.submit("doc1", "# Draft".to_string()).unwrap();
//! handle.submit("doc1", "# Draft v2".to_string()).unwrap();
//! // 600ms later a single update_doc_body carrying "# Draft v2" is sent.
//!
//! saver.shutdown().await;
//! # }
//! ```

mod coalesce;
mod config;
mod controller;
mod driver;
mod error;
mod slot;
mod validate;
mod writer;

pub use coalesce::Coalesce;
pub use config::{AutosaveConfig, DEFAULT_DEBOUNCE_MS};
pub use controller::{Completion, SaveController, WriteOutcome, WriteRequest};
pub use driver::{AutosaveHandle, Autosaver, SaveEvent};
pub use error::{AutosaveError, AutosaveResult};
pub use slot::{PendingEdit, SaveSlot, SlotPhase};
pub use validate::{AcceptAll, EditValidator, NonBlank};
pub use writer::{CommandWriter, EntityWriter};

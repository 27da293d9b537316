//! The seam between the autosave driver and the backend.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use taskdesk_command::{commands, with_id, CommandBackend, CommandResult};
use tracing::debug;

/// Persists one entity's payload.
///
/// Implementations must not retry on their own; the controller reports
/// failures and leaves retrying to the user.
#[async_trait]
pub trait EntityWriter<E>: Send + Sync {
    async fn write(&self, entity_id: &str, payload: &E) -> CommandResult<()>;
}

/// Writes through a single backend command.
///
/// By default the arguments are `{ "id": entity_id, ...payload }`.
/// [`with_field`](Self::with_field) places a non-object payload (such as a
/// markdown body) under a named key, and [`wrapped_in`](Self::wrapped_in)
/// nests the whole argument object under a key, e.g. `{ "input": {...} }`.
#[derive(Debug, Clone)]
pub struct CommandWriter<B> {
    backend: B,
    command: String,
    field: Option<String>,
    wrap: Option<String>,
}

impl<B: CommandBackend> CommandWriter<B> {
    pub fn new(backend: B, command: impl Into<String>) -> Self {
        Self {
            backend,
            command: command.into(),
            field: None,
            wrap: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn wrapped_in(mut self, key: impl Into<String>) -> Self {
        self.wrap = Some(key.into());
        self
    }

    /// Saves a doc's markdown body: `update_doc_body { input: { id, body_md } }`.
    pub fn doc_body(backend: B) -> Self {
        Self::new(backend, commands::UPDATE_DOC_BODY)
            .with_field("body_md")
            .wrapped_in("input")
    }

    /// Saves doc metadata patches.
    pub fn doc_meta(backend: B) -> Self {
        Self::new(backend, commands::UPDATE_DOC_META).wrapped_in("input")
    }

    /// Saves task patches.
    pub fn task(backend: B) -> Self {
        Self::new(backend, commands::UPDATE_TASK).wrapped_in("input")
    }

    /// Saves idea patches.
    pub fn idea(backend: B) -> Self {
        Self::new(backend, commands::UPDATE_IDEA).wrapped_in("input")
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Builds the command arguments for one write.
    pub fn args<E: Serialize + ?Sized>(&self, entity_id: &str, payload: &E) -> CommandResult<Value> {
        let args = match &self.field {
            Some(field) => {
                let mut fields = Map::new();
                fields.insert(field.clone(), serde_json::to_value(payload)?);
                with_id(entity_id, &fields)?
            }
            None => with_id(entity_id, payload)?,
        };
        Ok(match &self.wrap {
            Some(key) => {
                let mut outer = Map::new();
                outer.insert(key.clone(), args);
                Value::Object(outer)
            }
            None => args,
        })
    }
}

#[async_trait]
impl<B, E> EntityWriter<E> for CommandWriter<B>
where
    B: CommandBackend,
    E: Serialize + Send + Sync,
{
    async fn write(&self, entity_id: &str, payload: &E) -> CommandResult<()> {
        let args = self.args(entity_id, payload)?;
        debug!(command = %self.command, entity = %entity_id, "autosave write");
        self.backend.invoke(&self.command, args).await.map(|_| ())
    }
}

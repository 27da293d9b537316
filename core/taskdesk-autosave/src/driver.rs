//! Autosaver: the tokio task that drives a [`SaveController`].
//!
//! The task owns the controller. It reacts to three kinds of events:
//! commands from [`AutosaveHandle`]s, the earliest quiet-period deadline,
//! and completions of writes it launched. Each write runs on its own
//! spawned task so a slow entity never delays another.

use crate::coalesce::Coalesce;
use crate::config::AutosaveConfig;
use crate::controller::{Completion, SaveController, WriteOutcome, WriteRequest};
use crate::error::{AutosaveError, AutosaveResult};
use crate::slot::SlotPhase;
use crate::validate::{AcceptAll, EditValidator};
use crate::writer::EntityWriter;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

/// Published after every write completion or discard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveEvent {
    Saved { entity_id: String, seq: u64 },
    /// Always carries [`AutosaveError::Write`].
    Failed(AutosaveError),
    /// An unsent edit was dropped by `cancel` or shutdown.
    Discarded { entity_id: String },
}

enum Command<E> {
    Submit { entity_id: String, payload: E },
    Flush(String),
    Retry(String),
    Cancel(String),
    Phase {
        entity_id: String,
        reply: oneshot::Sender<SlotPhase>,
    },
    Shutdown,
}

struct Finished {
    entity_id: String,
    seq: u64,
    outcome: WriteOutcome,
}

/// Cheap, cloneable access to a running [`Autosaver`].
pub struct AutosaveHandle<E> {
    commands: mpsc::UnboundedSender<Command<E>>,
    events: broadcast::Sender<SaveEvent>,
    validator: Arc<dyn EditValidator<E>>,
}

impl<E> Clone for AutosaveHandle<E> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
            events: self.events.clone(),
            validator: Arc::clone(&self.validator),
        }
    }
}

impl<E> AutosaveHandle<E> {
    /// Queues a local edit.
    ///
    /// Validation runs here; a rejected edit is returned as
    /// [`AutosaveError::Validation`] and leaves the pending edit untouched.
    pub fn submit(&self, entity_id: impl Into<String>, payload: E) -> AutosaveResult<()> {
        let entity_id = entity_id.into();
        self.validator
            .validate(&entity_id, &payload)
            .map_err(AutosaveError::Validation)?;
        self.send(Command::Submit { entity_id, payload })
    }

    /// Sends the entity's pending edit without waiting for the quiet period.
    pub fn flush(&self, entity_id: impl Into<String>) -> AutosaveResult<()> {
        self.send(Command::Flush(entity_id.into()))
    }

    /// Re-sends the latest content after a failed write.
    pub fn retry(&self, entity_id: impl Into<String>) -> AutosaveResult<()> {
        self.send(Command::Retry(entity_id.into()))
    }

    /// Discards the entity's unsent edit, e.g. when its editor closes.
    pub fn cancel(&self, entity_id: impl Into<String>) -> AutosaveResult<()> {
        self.send(Command::Cancel(entity_id.into()))
    }

    pub async fn phase(&self, entity_id: impl Into<String>) -> AutosaveResult<SlotPhase> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Phase {
            entity_id: entity_id.into(),
            reply,
        })?;
        rx.await.map_err(|_| AutosaveError::ChannelClosed)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SaveEvent> {
        self.events.subscribe()
    }

    fn send(&self, command: Command<E>) -> AutosaveResult<()> {
        self.commands
            .send(command)
            .map_err(|_| AutosaveError::ChannelClosed)
    }
}

/// A running autosave task.
///
/// Dropping every handle and the `Autosaver` stops the task and discards
/// unsent edits, the same as [`shutdown`](Self::shutdown).
pub struct Autosaver<E> {
    handle: AutosaveHandle<E>,
    task: JoinHandle<()>,
}

impl<E> Autosaver<E>
where
    E: Clone + Coalesce + Send + Sync + 'static,
{
    /// Spawns the task on the current tokio runtime, accepting every edit.
    pub fn spawn<W>(writer: W, config: AutosaveConfig) -> Self
    where
        W: EntityWriter<E> + 'static,
    {
        Self::spawn_with_validator(writer, AcceptAll, config)
    }

    pub fn spawn_with_validator<W, V>(writer: W, validator: V, config: AutosaveConfig) -> Self
    where
        W: EntityWriter<E> + 'static,
        V: EditValidator<E> + 'static,
    {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(config.event_capacity.max(1));

        let controller = SaveController::new(config.debounce());
        let task = tokio::spawn(run_event_loop(
            controller,
            Arc::new(writer),
            command_rx,
            events.clone(),
        ));
        info!(debounce_ms = config.debounce_ms, "autosave started");

        Self {
            handle: AutosaveHandle {
                commands: command_tx,
                events,
                validator: Arc::new(validator),
            },
            task,
        }
    }

    pub fn handle(&self) -> AutosaveHandle<E> {
        self.handle.clone()
    }

    /// Stops the task, discarding unsent edits. Writes already in flight
    /// run to completion but are not reported.
    pub async fn shutdown(self) {
        let _ = self.handle.send(Command::Shutdown);
        if let Err(e) = self.task.await {
            debug!("autosave task ended abnormally: {e}");
        }
    }
}

async fn run_event_loop<E>(
    mut controller: SaveController<E>,
    writer: Arc<dyn EntityWriter<E>>,
    mut command_rx: mpsc::UnboundedReceiver<Command<E>>,
    events: broadcast::Sender<SaveEvent>,
) where
    E: Clone + Coalesce + Send + Sync + 'static,
{
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Finished>();
    let launch = |request: WriteRequest<E>| spawn_write(&writer, &done_tx, request);

    loop {
        let deadline = controller.next_deadline();

        tokio::select! {
            command = command_rx.recv() => match command {
                Some(Command::Submit { entity_id, payload }) => {
                    controller.submit(entity_id, payload, Instant::now());
                }
                Some(Command::Flush(entity_id)) => {
                    if let Some(request) = controller.flush(&entity_id) {
                        launch(request);
                    }
                }
                Some(Command::Retry(entity_id)) => {
                    if let Some(request) = controller.retry(&entity_id) {
                        launch(request);
                    }
                }
                Some(Command::Cancel(entity_id)) => {
                    if controller.cancel(&entity_id) {
                        let _ = events.send(SaveEvent::Discarded { entity_id });
                    }
                }
                Some(Command::Phase { entity_id, reply }) => {
                    let _ = reply.send(controller.phase(&entity_id));
                }
                Some(Command::Shutdown) | None => {
                    for entity_id in controller.cancel_all() {
                        let _ = events.send(SaveEvent::Discarded { entity_id });
                    }
                    break;
                }
            },

            Some(finished) = done_rx.recv() => {
                match controller.complete(&finished.entity_id, finished.seq, finished.outcome) {
                    Completion::Saved { entity_id, seq, next } => {
                        let _ = events.send(SaveEvent::Saved { entity_id, seq });
                        if let Some(request) = next {
                            launch(request);
                        }
                    }
                    Completion::Failed { entity_id, seq, error, next } => {
                        let _ = events.send(SaveEvent::Failed(AutosaveError::Write {
                            entity_id,
                            seq,
                            message: error,
                        }));
                        if let Some(request) = next {
                            launch(request);
                        }
                    }
                    Completion::Ignored => {}
                }
            }

            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                for request in controller.poll_due(Instant::now()) {
                    launch(request);
                }
            }
        }
    }

    info!("autosave stopped");
}

fn spawn_write<E>(
    writer: &Arc<dyn EntityWriter<E>>,
    done: &mpsc::UnboundedSender<Finished>,
    request: WriteRequest<E>,
) where
    E: Send + Sync + 'static,
{
    let writer = Arc::clone(writer);
    let done = done.clone();
    debug!(entity = %request.entity_id, seq = request.seq, "launching write");

    tokio::spawn(async move {
        let outcome = match writer.write(&request.entity_id, &request.payload).await {
            Ok(()) => WriteOutcome::Saved,
            Err(e) => WriteOutcome::Failed(e.to_string()),
        };
        let _ = done.send(Finished {
            entity_id: request.entity_id,
            seq: request.seq,
            outcome,
        });
    });
}

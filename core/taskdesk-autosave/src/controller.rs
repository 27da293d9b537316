//! Save controller: the per-entity autosave state machine, without I/O.
//!
//! The controller never sleeps, spawns or calls the backend. Callers hand it
//! the current instant and act on what it returns: [`WriteRequest`]s to
//! launch and [`Completion`]s to report. The [`Autosaver`](crate::Autosaver)
//! is the production caller; tests drive it directly with synthetic time.
//!
//! ```text
//! Idle ──submit──▶ Pending ──deadline──▶ Sending ──ok──▶ Idle
//!                    ▲                     │  ▲
//!                    │ submit              │  │ completion with newer edit
//!                    │                     ▼  │
//!                  Failed ◀──error──── SendingWithPending
//! ```

use crate::coalesce::Coalesce;
use crate::slot::{PendingEdit, SaveSlot, SlotPhase};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// A write the caller must launch now.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteRequest<E> {
    pub entity_id: String,
    pub seq: u64,
    pub payload: E,
}

/// How a launched write ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Saved,
    Failed(String),
}

/// What the controller concluded from a write completion.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion<E> {
    /// The write succeeded. `next` is a newer edit to launch immediately.
    Saved {
        entity_id: String,
        seq: u64,
        next: Option<WriteRequest<E>>,
    },
    /// The write failed and will not be retried. `next` carries a newer
    /// edit that arrived during the write, folded over the failed content
    /// and launched immediately.
    Failed {
        entity_id: String,
        seq: u64,
        error: String,
        next: Option<WriteRequest<E>>,
    },
    /// Stale, unknown, or for an entity whose owner went away.
    Ignored,
}

/// Per-entity debounce and ordering state for one editor session.
#[derive(Debug)]
pub struct SaveController<E> {
    debounce: Duration,
    next_seq: u64,
    slots: HashMap<String, SaveSlot<E>>,
}

impl<E: Clone + Coalesce> SaveController<E> {
    /// Creates a controller whose quiet period is `debounce`.
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            next_seq: 0,
            slots: HashMap::new(),
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Records a local edit and restarts the entity's quiet period.
    ///
    /// An edit for the entity that has not been sent yet absorbs the new one
    /// (see [`Coalesce`]) and takes its sequence number.
    ///
    /// Returns the edit's sequence number.
    pub fn submit(&mut self, entity_id: impl Into<String>, payload: E, now: Instant) -> u64 {
        let entity_id = entity_id.into();
        self.next_seq += 1;
        let seq = self.next_seq;

        let slot = self.slots.entry(entity_id.clone()).or_default();
        match &mut slot.latest {
            Some(pending) => {
                debug!(entity = %entity_id, replaced = pending.issued_at_seq, seq, "coalescing edit");
                pending.payload.absorb(payload);
                pending.issued_at_seq = seq;
            }
            None => {
                slot.latest = Some(PendingEdit {
                    entity_id,
                    payload,
                    issued_at_seq: seq,
                });
            }
        }
        slot.deadline = Some(now + self.debounce);
        seq
    }

    /// Launches a write for every entity whose quiet period has elapsed and
    /// which has no write in flight.
    ///
    /// Entities with a write in flight keep their edit queued; it is sent
    /// when [`complete`](Self::complete) is called.
    pub fn poll_due(&mut self, now: Instant) -> Vec<WriteRequest<E>> {
        let mut due: Vec<WriteRequest<E>> = self
            .slots
            .values_mut()
            .filter(|slot| slot.in_flight.is_none())
            .filter(|slot| slot.deadline.is_some_and(|d| d <= now))
            .filter_map(launch)
            .collect();
        due.sort_by_key(|req| req.seq);
        due
    }

    /// The earliest instant at which [`poll_due`](Self::poll_due) would
    /// launch something.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.slots
            .values()
            .filter(|slot| slot.in_flight.is_none())
            .filter_map(|slot| slot.deadline)
            .min()
    }

    /// Reports that the write `seq` for `entity_id` finished.
    pub fn complete(&mut self, entity_id: &str, seq: u64, outcome: WriteOutcome) -> Completion<E> {
        let Some(slot) = self.slots.get_mut(entity_id) else {
            debug!(entity = %entity_id, seq, "completion for unknown entity ignored");
            return Completion::Ignored;
        };
        if slot.in_flight_seq() != Some(seq) {
            warn!(
                entity = %entity_id,
                seq,
                in_flight = ?slot.in_flight_seq(),
                "stale completion ignored"
            );
            return Completion::Ignored;
        }

        let finished = slot.in_flight.take();
        if slot.is_abandoned(seq) {
            debug!(entity = %entity_id, seq, "completion after cancel ignored");
            slot.abandoned_through = None;
            self.remove_if_empty(entity_id);
            return Completion::Ignored;
        }

        let completion = match outcome {
            WriteOutcome::Saved => {
                slot.last_error = None;
                let next = launch(slot);
                debug!(entity = %entity_id, seq, next = ?next.as_ref().map(|r| r.seq), "write saved");
                Completion::Saved {
                    entity_id: entity_id.to_string(),
                    seq,
                    next,
                }
            }
            WriteOutcome::Failed(error) => {
                slot.last_error = Some(error.clone());
                let next = match (finished, slot.latest.take()) {
                    (Some(mut failed), Some(newer)) => {
                        // The failed content was never persisted, so the
                        // newer edit is sent on top of it.
                        failed.payload.absorb(newer.payload);
                        failed.issued_at_seq = newer.issued_at_seq;
                        slot.latest = Some(failed);
                        launch(slot)
                    }
                    (None, Some(newer)) => {
                        slot.latest = Some(newer);
                        launch(slot)
                    }
                    (finished, None) => {
                        // Keep the failed content as the latest pending edit;
                        // it waits for a new submit or an explicit retry.
                        slot.latest = finished;
                        slot.deadline = None;
                        None
                    }
                };
                warn!(entity = %entity_id, seq, %error, "write failed");
                Completion::Failed {
                    entity_id: entity_id.to_string(),
                    seq,
                    error,
                    next,
                }
            }
        };
        self.remove_if_empty(entity_id);
        completion
    }

    /// Sends the entity's pending edit now, skipping the quiet period.
    ///
    /// Returns `None` if nothing is pending or a write is already in
    /// flight (the edit then follows that write).
    pub fn flush(&mut self, entity_id: &str) -> Option<WriteRequest<E>> {
        let slot = self.slots.get_mut(entity_id)?;
        if slot.in_flight.is_some() {
            return None;
        }
        launch(slot)
    }

    /// Re-sends the latest content after a failed write.
    ///
    /// Only acts in the [`SlotPhase::Failed`] phase.
    pub fn retry(&mut self, entity_id: &str) -> Option<WriteRequest<E>> {
        if self.phase(entity_id) != SlotPhase::Failed {
            return None;
        }
        debug!(entity = %entity_id, "manual retry");
        self.flush(entity_id)
    }

    /// Drops the entity's unsent edit. A write already in flight is allowed
    /// to finish but its completion is ignored, even if the entity is edited
    /// again before it lands. Returns whether an unsent edit was discarded.
    pub fn cancel(&mut self, entity_id: &str) -> bool {
        let Some(slot) = self.slots.get_mut(entity_id) else {
            return false;
        };
        let discarded = slot.latest.take().is_some();
        slot.deadline = None;
        slot.last_error = None;
        if let Some(seq) = slot.in_flight_seq() {
            slot.abandoned_through = Some(seq);
        }
        if discarded {
            debug!(entity = %entity_id, "pending edit discarded");
        }
        self.remove_if_empty(entity_id);
        discarded
    }

    /// Cancels every entity. Returns the ids whose unsent edits were dropped.
    pub fn cancel_all(&mut self) -> Vec<String> {
        let mut ids: Vec<String> = self.slots.keys().cloned().collect();
        ids.sort();
        ids.retain(|id| self.cancel(id));
        ids
    }

    /// Where the entity's edits stand; `Idle` for unknown entities.
    pub fn phase(&self, entity_id: &str) -> SlotPhase {
        self.slots
            .get(entity_id)
            .map_or(SlotPhase::Idle, SaveSlot::phase)
    }

    pub fn slot(&self, entity_id: &str) -> Option<&SaveSlot<E>> {
        self.slots.get(entity_id)
    }

    /// Whether the entity has content not yet confirmed persisted.
    pub fn has_unsaved(&self, entity_id: &str) -> bool {
        self.phase(entity_id) != SlotPhase::Idle
    }

    /// Number of entities with pending or in-flight state.
    pub fn active_entities(&self) -> usize {
        self.slots.len()
    }

    fn remove_if_empty(&mut self, entity_id: &str) {
        if self.slots.get(entity_id).is_some_and(|slot| slot.is_empty()) {
            self.slots.remove(entity_id);
        }
    }
}

/// Moves the slot's latest edit into flight.
fn launch<E: Clone>(slot: &mut SaveSlot<E>) -> Option<WriteRequest<E>> {
    let edit = slot.latest.take()?;
    slot.deadline = None;
    let request = WriteRequest {
        entity_id: edit.entity_id.clone(),
        seq: edit.issued_at_seq,
        payload: edit.payload.clone(),
    };
    slot.in_flight = Some(edit);
    Some(request)
}

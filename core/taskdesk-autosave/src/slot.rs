//! Per-entity save state held by the controller.
//!
//! A slot exists only while its entity has something unsaved or a write in
//! flight; the controller drops it as soon as both are gone.

use tokio::time::Instant;

/// A local change not yet confirmed persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEdit<E> {
    pub entity_id: String,
    pub payload: E,
    /// Controller-wide, strictly increasing. Later edits have larger values.
    pub issued_at_seq: u64,
}

/// Where one entity's edits stand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPhase {
    /// Nothing pending, nothing in flight.
    Idle,
    /// An edit is waiting for its quiet period to elapse.
    Pending,
    /// A write is in flight and nothing newer is queued.
    Sending,
    /// A write is in flight and a newer edit is queued behind it.
    SendingWithPending,
    /// The last write failed; the latest edit waits for a new edit or a retry.
    Failed,
}

/// Per-entity save state.
///
/// Invariants: at most one write is in flight; `latest`, when set, is newer
/// than `in_flight`.
#[derive(Debug, Clone)]
pub struct SaveSlot<E> {
    pub(crate) latest: Option<PendingEdit<E>>,
    pub(crate) in_flight: Option<PendingEdit<E>>,
    pub(crate) deadline: Option<Instant>,
    pub(crate) last_error: Option<String>,
    /// Set by `cancel`: writes up to this seq belong to an owner that went
    /// away, and their completions are dropped silently.
    pub(crate) abandoned_through: Option<u64>,
}

impl<E> Default for SaveSlot<E> {
    fn default() -> Self {
        Self {
            latest: None,
            in_flight: None,
            deadline: None,
            last_error: None,
            abandoned_through: None,
        }
    }
}

impl<E> SaveSlot<E> {
    /// The newest edit not yet handed to the writer.
    pub fn latest(&self) -> Option<&PendingEdit<E>> {
        self.latest.as_ref()
    }

    /// Sequence number of the write in flight, abandoned or not.
    pub fn in_flight_seq(&self) -> Option<u64> {
        self.in_flight.as_ref().map(|e| e.issued_at_seq)
    }

    /// When `latest` becomes due. `None` after a failure: the edit then waits
    /// for a new submit or a retry.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Message of the most recent failed write, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether write `seq` was launched before a cancel and will go unreported.
    pub fn is_abandoned(&self, seq: u64) -> bool {
        self.abandoned_through.is_some_and(|through| seq <= through)
    }

    pub fn phase(&self) -> SlotPhase {
        let in_flight = self
            .in_flight
            .as_ref()
            .filter(|edit| !self.is_abandoned(edit.issued_at_seq));
        match (in_flight, &self.latest) {
            (Some(_), Some(_)) => SlotPhase::SendingWithPending,
            (Some(_), None) => SlotPhase::Sending,
            (None, Some(_)) if self.deadline.is_none() && self.last_error.is_some() => {
                SlotPhase::Failed
            }
            (None, Some(_)) => SlotPhase::Pending,
            (None, None) => SlotPhase::Idle,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.latest.is_none() && self.in_flight.is_none()
    }
}

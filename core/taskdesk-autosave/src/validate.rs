//! Checks applied to edits before they reach the controller.

/// Local checks run on an edit before it is queued.
///
/// Rejected edits never reach the controller, so they cannot replace a
/// valid pending edit.
pub trait EditValidator<E>: Send + Sync {
    /// Return `Err(message)` to reject the edit.
    fn validate(&self, entity_id: &str, payload: &E) -> Result<(), String> {
        let _ = (entity_id, payload);
        Ok(())
    }
}

/// Accepts every edit.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl<E> EditValidator<E> for AcceptAll {}

/// Rejects blank required text, e.g. an empty doc title.
#[derive(Debug, Clone)]
pub struct NonBlank {
    field: &'static str,
}

impl NonBlank {
    pub fn new(field: &'static str) -> Self {
        Self { field }
    }
}

impl<E: AsRef<str>> EditValidator<E> for NonBlank {
    fn validate(&self, _entity_id: &str, payload: &E) -> Result<(), String> {
        if payload.as_ref().trim().is_empty() {
            Err(format!("{} must not be empty", self.field))
        } else {
            Ok(())
        }
    }
}

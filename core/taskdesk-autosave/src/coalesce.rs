//! How a newer edit folds into an unsent one.

use serde_json::Value;
use taskdesk_model::{DocMetaPatch, TaskPatch, UpdateIdeaInput};

/// Combines two edits for the same entity into one write.
///
/// The default replaces the older edit, which is right for full snapshots
/// such as a doc body. Partial updates override [`absorb`](Self::absorb) so
/// fields set only by the older edit survive.
pub trait Coalesce: Sized {
    fn absorb(&mut self, newer: Self) {
        *self = newer;
    }
}

impl Coalesce for String {}

impl Coalesce for &str {}

impl Coalesce for () {}

/// Objects merge key by key; anything else is replaced.
impl Coalesce for Value {
    fn absorb(&mut self, newer: Self) {
        match (self, newer) {
            (Value::Object(fields), Value::Object(newer)) => fields.extend(newer),
            (current, newer) => *current = newer,
        }
    }
}

impl Coalesce for DocMetaPatch {
    fn absorb(&mut self, newer: Self) {
        self.merge(newer);
    }
}

impl Coalesce for TaskPatch {
    fn absorb(&mut self, newer: Self) {
        self.merge(newer);
    }
}

impl Coalesce for UpdateIdeaInput {
    fn absorb(&mut self, newer: Self) {
        self.merge(newer);
    }
}

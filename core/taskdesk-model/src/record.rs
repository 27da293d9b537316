use serde_json::Value;

/// An item of a listed collection, identified by a stable string id.
///
/// Views and the autosave controller never look inside a record beyond its
/// id; everything else is read through column accessors.
pub trait Record {
    /// The record's unique id within its collection.
    fn id(&self) -> &str;
}

/// Raw command output (`{"id": "...", ...}`) can be viewed without first
/// deserializing into a typed row. Objects without a string `id` report `""`.
impl Record for Value {
    fn id(&self) -> &str {
        self.get("id").and_then(Value::as_str).unwrap_or("")
    }
}

impl<T: Record + ?Sized> Record for &T {
    fn id(&self) -> &str {
        (**self).id()
    }
}

impl<T: Record + ?Sized> Record for std::sync::Arc<T> {
    fn id(&self) -> &str {
        (**self).id()
    }
}

use std::time::Duration;

/// Quiet period before an edit is written, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 600;

/// Configuration for an [`Autosaver`](crate::Autosaver).
#[derive(Debug, Clone)]
pub struct AutosaveConfig {
    /// Quiet period after the last edit before a write is launched (ms).
    pub debounce_ms: u64,
    /// Capacity of the save event broadcast channel. Slow subscribers
    /// beyond this lag and miss events.
    pub event_capacity: usize,
}

impl AutosaveConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            event_capacity: 64,
        }
    }
}

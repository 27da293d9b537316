//! A mock backend for testing.
//!
//! Records every call, answers from canned responses, can fail on demand,
//! and can hold calls open until the test releases them, which is how
//! in-flight writes are simulated.

use crate::backend::CommandBackend;
use crate::error::{CommandError, CommandResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use tokio::sync::{oneshot, Notify};

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub command: String,
    pub args: Value,
}

/// How a held call should finish when released.
#[derive(Debug, Clone)]
pub enum Release {
    Ok(Value),
    Fail(String),
}

#[derive(Default)]
struct Inner {
    calls: Vec<RecordedCall>,
    responses: HashMap<String, Value>,
    failures: HashMap<String, VecDeque<String>>,
    held: HashSet<String>,
    waiting: VecDeque<(String, oneshot::Sender<Release>)>,
}

/// Scriptable in-memory [`CommandBackend`].
///
/// Commands without a canned response answer `null`.
#[derive(Default)]
pub struct MockBackend {
    inner: Mutex<Inner>,
    called: Notify,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every call to `command` with `reply`.
    pub fn respond(&self, command: &str, reply: Value) {
        self.inner
            .lock()
            .unwrap()
            .responses
            .insert(command.to_string(), reply);
    }

    /// Makes the next call to `command` fail with `message`. Queued
    /// failures are consumed in order.
    pub fn fail_next(&self, command: &str, message: impl Into<String>) {
        self.inner
            .lock()
            .unwrap()
            .failures
            .entry(command.to_string())
            .or_default()
            .push_back(message.into());
    }

    /// Holds calls to `command` open until released.
    pub fn hold(&self, command: &str) {
        self.inner.lock().unwrap().held.insert(command.to_string());
    }

    /// Stops holding `command`; calls already waiting stay held.
    pub fn unhold(&self, command: &str) {
        self.inner.lock().unwrap().held.remove(command);
    }

    /// Number of calls currently held open.
    pub fn held_count(&self) -> usize {
        self.inner.lock().unwrap().waiting.len()
    }

    /// Finishes the oldest held call. Returns `false` if none was waiting.
    pub fn release_next(&self, outcome: Release) -> bool {
        let next = self.inner.lock().unwrap().waiting.pop_front();
        match next {
            Some((_, tx)) => {
                let _ = tx.send(outcome);
                true
            }
            None => false,
        }
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Calls to one command, in order.
    pub fn calls_to(&self, command: &str) -> Vec<RecordedCall> {
        self.inner
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.command == command)
            .cloned()
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().calls.len()
    }

    /// Waits until at least `n` calls have been recorded.
    pub async fn wait_for_calls(&self, n: usize) {
        loop {
            let notified = self.called.notified();
            if self.call_count() >= n {
                return;
            }
            notified.await;
        }
    }
}

#[async_trait]
impl CommandBackend for MockBackend {
    async fn invoke(&self, command: &str, args: Value) -> CommandResult<Value> {
        let held = {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push(RecordedCall {
                command: command.to_string(),
                args,
            });

            if inner.held.contains(command) {
                let (tx, rx) = oneshot::channel();
                inner.waiting.push_back((command.to_string(), tx));
                Some(rx)
            } else if let Some(message) =
                inner.failures.get_mut(command).and_then(VecDeque::pop_front)
            {
                self.called.notify_waiters();
                return Err(CommandError::rejected(command, message));
            } else {
                None
            }
        };
        self.called.notify_waiters();

        let default_reply = || {
            self.inner
                .lock()
                .unwrap()
                .responses
                .get(command)
                .cloned()
                .unwrap_or(Value::Null)
        };

        match held {
            Some(rx) => match rx.await {
                Ok(Release::Ok(Value::Null)) => Ok(default_reply()),
                Ok(Release::Ok(reply)) => Ok(reply),
                Ok(Release::Fail(message)) => Err(CommandError::rejected(command, message)),
                Err(_) => Err(CommandError::Transport("mock call dropped".into())),
            },
            None => Ok(default_reply()),
        }
    }
}

use crate::error::CommandResult;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// An asynchronous, record-oriented command service.
///
/// Implementations send `command` with JSON `args` and resolve with the
/// JSON reply. Any failure, whether reported by the backend or by the
/// transport, is an `Err`.
#[async_trait]
pub trait CommandBackend: Send + Sync {
    async fn invoke(&self, command: &str, args: Value) -> CommandResult<Value>;
}

#[async_trait]
impl<B: CommandBackend + ?Sized> CommandBackend for Arc<B> {
    async fn invoke(&self, command: &str, args: Value) -> CommandResult<Value> {
        (**self).invoke(command, args).await
    }
}

#[async_trait]
impl<B: CommandBackend + ?Sized> CommandBackend for Box<B> {
    async fn invoke(&self, command: &str, args: Value) -> CommandResult<Value> {
        (**self).invoke(command, args).await
    }
}

// ABOUTME: Daemon-level capability: identify the runtime and check it answers.
// ABOUTME: connect() pings before handing a runtime to any command.

use super::sealed::Sealed;
use super::shared_types::RuntimeMetadata;
use async_trait::async_trait;

#[async_trait]
pub trait RuntimeInfo: Sealed + Send + Sync {
    /// Product name and version as reported by the daemon.
    async fn info(&self) -> Result<RuntimeMetadata, RuntimeInfoError>;

    async fn ping(&self) -> Result<(), RuntimeInfoError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RuntimeInfoError {
    #[error("cannot reach runtime socket: {0}")]
    ConnectionFailed(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}

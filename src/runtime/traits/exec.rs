// ABOUTME: Exec capability: run a short, non-interactive command in a running container.
// ABOUTME: Used for health checks and shell setup; interactive sessions go through the CLI.

use super::sealed::Sealed;
use super::shared_types::{ExecConfig, ExecResult};
use crate::types::ContainerName;
use async_trait::async_trait;

#[async_trait]
pub trait ExecOps: Sealed + Send + Sync {
    /// Run `config.cmd` to completion and collect its exit code and output.
    ///
    /// A non-zero exit code is a successful call; inspect
    /// [`ExecResult::success`].
    async fn exec(
        &self,
        container: &ContainerName,
        config: &ExecConfig,
    ) -> Result<ExecResult, ExecError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("container not running: {0}")]
    ContainerNotRunning(String),

    #[error("exec session lost: {0}")]
    SessionLost(String),

    #[error("exec failed: {0}")]
    Failed(String),
}

// ABOUTME: Volume operations trait for container runtimes.
// ABOUTME: List and remove named volumes.

use super::sealed::Sealed;
use crate::types::VolumeName;
use async_trait::async_trait;

/// Named volume operations.
#[async_trait]
pub trait VolumeOps: Sealed + Send + Sync {
    /// Names of every volume the runtime knows about.
    async fn list_volumes(&self) -> Result<Vec<VolumeName>, VolumeError>;

    /// Remove a volume.
    async fn remove_volume(&self, name: &VolumeName, force: bool) -> Result<(), VolumeError>;
}

/// Errors from volume operations.
#[derive(Debug, thiserror::Error)]
pub enum VolumeError {
    #[error("volume not found: {0}")]
    NotFound(String),

    #[error("volume in use, cannot remove: {0}")]
    InUse(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}

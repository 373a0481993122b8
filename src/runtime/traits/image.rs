// ABOUTME: Image capability: only removal, for `rm --nuke`.
// ABOUTME: Building and pulling images is done outside ai-shell.

use super::sealed::Sealed;
use crate::types::ImageName;
use async_trait::async_trait;

#[async_trait]
pub trait ImageOps: Sealed + Send + Sync {
    /// Without `force`, an image still used by any container is kept.
    async fn remove_image(&self, name: &ImageName, force: bool) -> Result<(), ImageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image not found: {0}")]
    NotFound(String),

    #[error("image in use by another container: {0}")]
    InUse(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}

// ABOUTME: Container capability: lifecycle, inspection, and label-filtered listing.
// ABOUTME: Everything ai-shell reads about an instance comes through inspect_container.

use super::sealed::Sealed;
use super::shared_types::ContainerInfo;
use crate::types::ContainerName;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

#[async_trait]
pub trait ContainerOps: Sealed + Send + Sync {
    async fn start_container(&self, name: &ContainerName) -> Result<(), ContainerError>;

    /// Ask the container to stop, killing it after `timeout`.
    async fn stop_container(
        &self,
        name: &ContainerName,
        timeout: Duration,
    ) -> Result<(), ContainerError>;

    /// `force` also removes a running container.
    async fn remove_container(
        &self,
        name: &ContainerName,
        force: bool,
    ) -> Result<(), ContainerError>;

    /// Labels, state, image and mounts of one container.
    async fn inspect_container(&self, name: &ContainerName)
    -> Result<ContainerInfo, ContainerError>;

    /// Names of the containers matching `filters`, in runtime order.
    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<ContainerSummary>, ContainerError>;
}

/// Label filter for [`ContainerOps::list_containers`]; all labels must match.
#[derive(Debug, Clone, Default)]
pub struct ContainerFilters {
    pub labels: HashMap<String, String>,
    /// Include stopped containers.
    pub all: bool,
}

impl ContainerFilters {
    /// Every container, running or not, carrying `key=value`.
    pub fn all_with_label(key: &str, value: &str) -> Self {
        Self {
            labels: HashMap::from([(key.to_string(), value.to_string())]),
            all: true,
        }
    }
}

/// One listed container. Anything beyond the name needs an inspect.
#[derive(Debug, Clone)]
pub struct ContainerSummary {
    /// Container name, without the leading slash.
    pub name: ContainerName,
}

#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("container not found: {0}")]
    NotFound(String),

    #[error("container not running: {0}")]
    NotRunning(String),

    #[error("container already running: {0}")]
    AlreadyRunning(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}

impl ContainerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContainerError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_not_found_is_not_found() {
        assert!(ContainerError::NotFound("c".into()).is_not_found());
        assert!(!ContainerError::NotRunning("c".into()).is_not_found());
        assert!(!ContainerError::Runtime("boom".into()).is_not_found());
    }
}

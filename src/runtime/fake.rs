// ABOUTME: In-memory runtime used by unit tests of the managed-instance layer.
// ABOUTME: Containers are described by ContainerInfo values; failures can be injected.

use super::traits::sealed::Sealed;
use super::traits::{
    ContainerError, ContainerFilters, ContainerInfo, ContainerOps, ContainerState,
    ContainerSummary, ExecConfig, ExecError, ExecOps, ExecResult, ImageError, ImageOps, MountInfo,
    MountKind, RuntimeInfo, RuntimeInfoError, RuntimeMetadata, VolumeError, VolumeOps,
};
use crate::labels::{LABEL_INSTANCE, LABEL_MANAGED, LABEL_SCHEMA, LABEL_VOLUME, MANAGED_VALUE};
use crate::types::{ContainerName, ImageName, VolumeName};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct FakeRuntime {
    containers: Mutex<BTreeMap<String, ContainerInfo>>,
    volumes: Mutex<BTreeSet<String>>,
    broken_inspect: BTreeSet<String>,
    broken_list: bool,
    removed_images: Mutex<Vec<String>>,
}

impl FakeRuntime {
    pub fn with_container(self, info: ContainerInfo) -> Self {
        self.lock_containers()
            .insert(info.name.as_str().to_string(), info);
        self
    }

    pub fn with_volume(self, name: &str) -> Self {
        self.lock_volumes().insert(name.to_string());
        self
    }

    /// Make inspecting `name` fail while it still shows up in listings.
    pub fn with_broken_inspect(mut self, name: &str) -> Self {
        self.broken_inspect.insert(name.to_string());
        self
    }

    pub fn with_broken_list(mut self) -> Self {
        self.broken_list = true;
        self
    }

    pub fn has_container(&self, name: &str) -> bool {
        self.lock_containers().contains_key(name)
    }

    pub fn has_volume(&self, name: &str) -> bool {
        self.lock_volumes().contains(name)
    }

    pub fn state_of(&self, name: &str) -> Option<ContainerState> {
        self.lock_containers().get(name).map(|c| c.state)
    }

    pub fn removed_images(&self) -> Vec<String> {
        self.removed_images
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn lock_containers(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, ContainerInfo>> {
        self.containers.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_volumes(&self) -> std::sync::MutexGuard<'_, BTreeSet<String>> {
        self.volumes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A container carrying the full managed label set and a `/work` bind mount.
pub fn managed_container(name: &str, instance_id: &str, workdir: &str) -> ContainerInfo {
    let volume = format!("ai_agent_shell_home_{instance_id}");
    let labels = HashMap::from([
        (LABEL_MANAGED.to_string(), MANAGED_VALUE.to_string()),
        (LABEL_SCHEMA.to_string(), "1".to_string()),
        (LABEL_INSTANCE.to_string(), instance_id.to_string()),
        (LABEL_VOLUME.to_string(), volume.clone()),
    ]);
    ContainerInfo {
        name: ContainerName::new(name),
        image: "ai-agent-shell".to_string(),
        state: ContainerState::Running,
        labels,
        mounts: vec![
            MountInfo {
                kind: MountKind::Bind,
                source: workdir.to_string(),
                destination: "/work".to_string(),
            },
            MountInfo {
                kind: MountKind::Volume,
                source: volume,
                destination: "/root".to_string(),
            },
        ],
    }
}

/// A container with no ai-shell labels at all.
pub fn foreign_container(name: &str, workdir: &str) -> ContainerInfo {
    let mut info = managed_container(name, "", workdir);
    info.labels.clear();
    info
}

impl Sealed for FakeRuntime {}

#[async_trait]
impl ContainerOps for FakeRuntime {
    async fn start_container(&self, name: &ContainerName) -> Result<(), ContainerError> {
        let mut containers = self.lock_containers();
        let info = containers
            .get_mut(name.as_str())
            .ok_or_else(|| ContainerError::NotFound(name.to_string()))?;
        if info.state.is_running() {
            return Err(ContainerError::AlreadyRunning(name.to_string()));
        }
        info.state = ContainerState::Running;
        Ok(())
    }

    async fn stop_container(
        &self,
        name: &ContainerName,
        _timeout: Duration,
    ) -> Result<(), ContainerError> {
        let mut containers = self.lock_containers();
        let info = containers
            .get_mut(name.as_str())
            .ok_or_else(|| ContainerError::NotFound(name.to_string()))?;
        if !info.state.is_running() {
            return Err(ContainerError::NotRunning(name.to_string()));
        }
        info.state = ContainerState::Exited;
        Ok(())
    }

    async fn remove_container(
        &self,
        name: &ContainerName,
        _force: bool,
    ) -> Result<(), ContainerError> {
        self.lock_containers()
            .remove(name.as_str())
            .map(|_| ())
            .ok_or_else(|| ContainerError::NotFound(name.to_string()))
    }

    async fn inspect_container(
        &self,
        name: &ContainerName,
    ) -> Result<ContainerInfo, ContainerError> {
        if self.broken_inspect.contains(name.as_str()) {
            return Err(ContainerError::Runtime(format!("inspect {name}: boom")));
        }
        self.lock_containers()
            .get(name.as_str())
            .cloned()
            .ok_or_else(|| ContainerError::NotFound(name.to_string()))
    }

    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<ContainerSummary>, ContainerError> {
        if self.broken_list {
            return Err(ContainerError::Runtime("list: boom".to_string()));
        }
        // Reverse order so callers cannot rely on the runtime sorting for them.
        Ok(self
            .lock_containers()
            .values()
            .rev()
            .filter(|c| filters.all || c.state.is_running())
            .filter(|c| {
                filters
                    .labels
                    .iter()
                    .all(|(k, v)| c.labels.get(k) == Some(v))
            })
            .map(|c| ContainerSummary {
                name: c.name.clone(),
            })
            .collect())
    }
}

#[async_trait]
impl VolumeOps for FakeRuntime {
    async fn list_volumes(&self) -> Result<Vec<VolumeName>, VolumeError> {
        Ok(self.lock_volumes().iter().map(VolumeName::new).collect())
    }

    async fn remove_volume(&self, name: &VolumeName, _force: bool) -> Result<(), VolumeError> {
        if self.lock_volumes().remove(name.as_str()) {
            Ok(())
        } else {
            Err(VolumeError::NotFound(name.to_string()))
        }
    }
}

#[async_trait]
impl ImageOps for FakeRuntime {
    async fn remove_image(&self, name: &ImageName, _force: bool) -> Result<(), ImageError> {
        self.removed_images
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(name.to_string());
        Ok(())
    }
}

#[async_trait]
impl ExecOps for FakeRuntime {
    async fn exec(
        &self,
        container: &ContainerName,
        config: &ExecConfig,
    ) -> Result<ExecResult, ExecError> {
        let running = self
            .state_of(container.as_str())
            .ok_or_else(|| ExecError::ContainerNotFound(container.to_string()))?
            .is_running();
        if !running {
            return Err(ExecError::ContainerNotRunning(container.to_string()));
        }
        Ok(ExecResult {
            exit_code: 0,
            stdout: config.cmd.join(" ").into_bytes(),
            stderr: Vec::new(),
        })
    }
}

#[async_trait]
impl RuntimeInfo for FakeRuntime {
    async fn info(&self) -> Result<RuntimeMetadata, RuntimeInfoError> {
        Ok(RuntimeMetadata {
            name: "Fake".to_string(),
            version: "0".to_string(),
            os: "linux".to_string(),
            arch: "x86_64".to_string(),
        })
    }

    async fn ping(&self) -> Result<(), RuntimeInfoError> {
        Ok(())
    }
}

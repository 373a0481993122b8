// ABOUTME: Bollard-based container runtime implementation.
// ABOUTME: Talks to Docker or Podman over the Docker-compatible socket API.

use crate::runtime::traits::sealed::Sealed;
use crate::runtime::traits::{
    ContainerError, ContainerFilters, ContainerInfo, ContainerOps, ContainerState,
    ContainerSummary, ExecConfig, ExecError, ExecOps, ExecResult, ImageError, ImageOps, MountInfo,
    MountKind, RuntimeInfo, RuntimeInfoError, RuntimeMetadata, VolumeError, VolumeOps,
};
use crate::runtime::types::{self, RuntimeType};
use crate::types::{ContainerName, ImageName, VolumeName};
use async_trait::async_trait;
use bollard::Docker;
use bollard::exec::StartExecOptions;
use bollard::models::{ContainerStateStatusEnum, MountPoint, MountPointTypeEnum};
use bollard::query_parameters::{
    InspectContainerOptions, ListContainersOptions, ListVolumesOptions, RemoveContainerOptions,
    RemoveImageOptions, RemoveVolumeOptions, StartContainerOptions, StopContainerOptions,
};
use futures::StreamExt;
use std::collections::HashMap;
use std::time::Duration;

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn status_of(e: &bollard::errors::Error) -> Option<(u16, &str)> {
    match e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } => Some((*status_code, message.as_str())),
        _ => None,
    }
}

fn map_container_start_error(e: bollard::errors::Error, name: &ContainerName) -> ContainerError {
    match status_of(&e) {
        Some((404, _)) => ContainerError::NotFound(name.to_string()),
        Some((304, _)) => ContainerError::AlreadyRunning(name.to_string()),
        _ => ContainerError::Runtime(format!("failed to start {}: {}", name, e)),
    }
}

fn map_container_stop_error(e: bollard::errors::Error, name: &ContainerName) -> ContainerError {
    match status_of(&e) {
        Some((404, _)) => ContainerError::NotFound(name.to_string()),
        Some((304, _)) => ContainerError::NotRunning(name.to_string()),
        _ => ContainerError::Runtime(format!("failed to stop {}: {}", name, e)),
    }
}

fn map_container_not_found_error(
    e: bollard::errors::Error,
    name: &ContainerName,
) -> ContainerError {
    match status_of(&e) {
        Some((404, _)) => ContainerError::NotFound(name.to_string()),
        _ => ContainerError::Runtime(format!("{}: {}", name, e)),
    }
}

fn map_volume_error(e: bollard::errors::Error, name: &VolumeName) -> VolumeError {
    match status_of(&e) {
        Some((404, _)) => VolumeError::NotFound(name.to_string()),
        Some((409, message)) => VolumeError::InUse(format!("{}: {}", name, message)),
        _ => VolumeError::Runtime(format!("failed to remove {}: {}", name, e)),
    }
}

fn map_image_remove_error(e: bollard::errors::Error, name: &ImageName) -> ImageError {
    match status_of(&e) {
        Some((404, _)) => ImageError::NotFound(name.to_string()),
        Some((409, message)) => ImageError::InUse(format!("{}: {}", name, message)),
        _ => ImageError::Runtime(format!("failed to remove {}: {}", name, e)),
    }
}

fn map_exec_error(e: bollard::errors::Error, container: &ContainerName) -> ExecError {
    match status_of(&e) {
        Some((404, _)) => ExecError::ContainerNotFound(container.to_string()),
        Some((409, _)) => ExecError::ContainerNotRunning(container.to_string()),
        _ => ExecError::Failed(e.to_string()),
    }
}

fn map_state(status: ContainerStateStatusEnum) -> ContainerState {
    match status {
        ContainerStateStatusEnum::CREATED => ContainerState::Created,
        ContainerStateStatusEnum::RUNNING => ContainerState::Running,
        ContainerStateStatusEnum::PAUSED => ContainerState::Paused,
        ContainerStateStatusEnum::RESTARTING => ContainerState::Restarting,
        ContainerStateStatusEnum::REMOVING => ContainerState::Removing,
        ContainerStateStatusEnum::EXITED => ContainerState::Exited,
        ContainerStateStatusEnum::DEAD => ContainerState::Dead,
        _ => ContainerState::Exited,
    }
}

fn map_mount(mount: MountPoint) -> MountInfo {
    let kind = match mount.typ {
        Some(MountPointTypeEnum::BIND) => MountKind::Bind,
        Some(MountPointTypeEnum::VOLUME) => MountKind::Volume,
        Some(MountPointTypeEnum::TMPFS) => MountKind::Tmpfs,
        _ => MountKind::Other,
    };
    let source = match kind {
        MountKind::Volume => mount.name.or(mount.source),
        _ => mount.source,
    };
    MountInfo {
        kind,
        source: source.unwrap_or_default(),
        destination: mount.destination.unwrap_or_default(),
    }
}

// =============================================================================
// BollardRuntime
// =============================================================================

/// Container runtime implementation using bollard.
///
/// Supports both Docker and Podman via the Docker-compatible API.
pub struct BollardRuntime {
    client: Docker,
    runtime_type: RuntimeType,
    stop_timeout: Duration,
}

impl BollardRuntime {
    /// Create a new BollardRuntime from a Docker client.
    pub fn new(client: Docker, runtime_type: RuntimeType) -> Self {
        Self {
            client,
            runtime_type,
            stop_timeout: Duration::from_secs(10),
        }
    }

    /// Connect to a container runtime using detected runtime info.
    ///
    /// `timeout` bounds every request made through the client.
    pub fn connect(info: &types::RuntimeInfo, timeout: Duration) -> Result<Self, RuntimeInfoError> {
        let client = Docker::connect_with_unix(
            &info.socket_path,
            timeout.as_secs().max(1),
            bollard::API_DEFAULT_VERSION,
        )
        .map_err(|e| RuntimeInfoError::ConnectionFailed(format!("{}: {}", info.socket_path, e)))?;
        Ok(Self::new(client, info.runtime_type))
    }

    /// Get the runtime type (Docker or Podman).
    pub fn runtime_type(&self) -> RuntimeType {
        self.runtime_type
    }

    /// Grace period given to containers before they are killed on stop.
    pub fn stop_timeout(&self) -> Duration {
        self.stop_timeout
    }

    /// Whether the exec is still running, and its exit code once it is not.
    async fn exec_status(&self, exec_id: &str) -> Result<(bool, Option<i64>), ExecError> {
        let details = self
            .client
            .inspect_exec(exec_id)
            .await
            .map_err(|e| ExecError::SessionLost(format!("{}: {}", exec_id, e)))?;
        Ok((details.running.unwrap_or(false), details.exit_code))
    }

    /// Execute in detached mode and poll for completion.
    /// Used for Podman which has issues with attached exec streams not closing.
    async fn exec_start_detached(&self, exec_id: &str) -> Result<ExecResult, ExecError> {
        let opts = StartExecOptions {
            detach: true,
            ..Default::default()
        };

        self.client
            .start_exec(exec_id, Some(opts))
            .await
            .map_err(|e| ExecError::Failed(e.to_string()))?;

        let poll_interval = Duration::from_millis(100);
        let max_wait = Duration::from_secs(300);
        let start = std::time::Instant::now();

        loop {
            let (running, exit_code) = self.exec_status(exec_id).await?;
            if !running {
                return Ok(ExecResult {
                    exit_code: exit_code.unwrap_or(0),
                    // Output is not captured in detached mode.
                    stdout: Vec::new(),
                    stderr: Vec::new(),
                });
            }

            if start.elapsed() > max_wait {
                return Err(ExecError::Failed("exec timed out".to_string()));
            }

            tokio::time::sleep(poll_interval).await;
        }
    }
}

impl Sealed for BollardRuntime {}

#[async_trait]
impl RuntimeInfo for BollardRuntime {
    async fn info(&self) -> Result<RuntimeMetadata, RuntimeInfoError> {
        let info = self
            .client
            .info()
            .await
            .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;

        let name = match self.runtime_type {
            RuntimeType::Docker => "Docker".to_string(),
            RuntimeType::Podman => "Podman".to_string(),
        };

        Ok(RuntimeMetadata {
            name,
            version: info.server_version.unwrap_or_default(),
            os: info.operating_system.unwrap_or_default(),
            arch: info.architecture.unwrap_or_default(),
        })
    }

    async fn ping(&self) -> Result<(), RuntimeInfoError> {
        self.client
            .ping()
            .await
            .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ContainerOps for BollardRuntime {
    async fn start_container(&self, name: &ContainerName) -> Result<(), ContainerError> {
        tracing::debug!(container = %name, "starting container");
        self.client
            .start_container(name.as_str(), None::<StartContainerOptions>)
            .await
            .map_err(|e| map_container_start_error(e, name))
    }

    async fn stop_container(
        &self,
        name: &ContainerName,
        timeout: Duration,
    ) -> Result<(), ContainerError> {
        tracing::debug!(container = %name, ?timeout, "stopping container");
        let opts = StopContainerOptions {
            t: Some(timeout.as_secs() as i32),
            signal: None,
        };

        self.client
            .stop_container(name.as_str(), Some(opts))
            .await
            .map_err(|e| map_container_stop_error(e, name))
    }

    async fn remove_container(
        &self,
        name: &ContainerName,
        force: bool,
    ) -> Result<(), ContainerError> {
        tracing::debug!(container = %name, force, "removing container");
        let opts = RemoveContainerOptions {
            force,
            ..Default::default()
        };

        self.client
            .remove_container(name.as_str(), Some(opts))
            .await
            .map_err(|e| map_container_not_found_error(e, name))
    }

    async fn inspect_container(
        &self,
        name: &ContainerName,
    ) -> Result<ContainerInfo, ContainerError> {
        let details = self
            .client
            .inspect_container(name.as_str(), None::<InspectContainerOptions>)
            .await
            .map_err(|e| map_container_not_found_error(e, name))?;

        let state = details
            .state
            .as_ref()
            .and_then(|s| s.status)
            .map(map_state)
            .unwrap_or(ContainerState::Exited);

        let (image, labels) = match details.config {
            Some(config) => (
                config.image.unwrap_or_default(),
                config.labels.unwrap_or_default(),
            ),
            None => (String::new(), HashMap::new()),
        };

        let mounts = details
            .mounts
            .unwrap_or_default()
            .into_iter()
            .map(map_mount)
            .collect();

        let name = details
            .name
            .map(|n| n.trim_start_matches('/').to_string())
            .filter(|n| !n.is_empty())
            .map(ContainerName::new)
            .unwrap_or_else(|| name.clone());

        Ok(ContainerInfo {
            name,
            image,
            state,
            labels,
            mounts,
        })
    }

    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<ContainerSummary>, ContainerError> {
        let mut filter_map: HashMap<String, Vec<String>> = HashMap::new();
        for (key, value) in &filters.labels {
            filter_map
                .entry("label".to_string())
                .or_default()
                .push(format!("{}={}", key, value));
        }

        let opts = ListContainersOptions {
            all: filters.all,
            filters: Some(filter_map),
            ..Default::default()
        };

        // Podman reports "stopping" as a container state during shutdown, but bollard
        // doesn't recognize it and fails deserialization. Retry after a short delay
        // since "stopping" is a transient state.
        let mut last_error = None;
        for attempt in 0..3 {
            match self.client.list_containers(Some(opts.clone())).await {
                Ok(containers) => {
                    return Ok(containers
                        .into_iter()
                        .map(|c| {
                            let name = c
                                .names
                                .unwrap_or_default()
                                .first()
                                .map(|n| n.trim_start_matches('/').to_string())
                                .unwrap_or_default();

                            ContainerSummary {
                                name: ContainerName::new(name),
                            }
                        })
                        .filter(|c| !c.name.is_empty())
                        .collect());
                }
                Err(e) => {
                    let err_str = e.to_string();
                    if (err_str.contains("unknown variant `stopping`")
                        || err_str.contains("unknown variant `stopped`"))
                        && attempt < 2
                    {
                        tokio::time::sleep(Duration::from_millis(500)).await;
                        last_error = Some(err_str);
                        continue;
                    }
                    return Err(ContainerError::Runtime(err_str));
                }
            }
        }

        Err(ContainerError::Runtime(
            last_error.unwrap_or_else(|| "list_containers failed".to_string()),
        ))
    }
}

#[async_trait]
impl VolumeOps for BollardRuntime {
    async fn list_volumes(&self) -> Result<Vec<VolumeName>, VolumeError> {
        let response = self
            .client
            .list_volumes(None::<ListVolumesOptions>)
            .await
            .map_err(|e| VolumeError::Runtime(format!("failed to list volumes: {}", e)))?;

        Ok(response
            .volumes
            .unwrap_or_default()
            .into_iter()
            .map(|v| VolumeName::new(v.name))
            .collect())
    }

    async fn remove_volume(&self, name: &VolumeName, force: bool) -> Result<(), VolumeError> {
        tracing::debug!(volume = %name, force, "removing volume");
        self.client
            .remove_volume(name.as_str(), Some(RemoveVolumeOptions { force }))
            .await
            .map_err(|e| map_volume_error(e, name))
    }
}

#[async_trait]
impl ImageOps for BollardRuntime {
    async fn remove_image(&self, name: &ImageName, force: bool) -> Result<(), ImageError> {
        tracing::debug!(image = %name, force, "removing image");
        let opts = RemoveImageOptions {
            force,
            ..Default::default()
        };

        self.client
            .remove_image(name.as_str(), Some(opts), None)
            .await
            .map_err(|e| map_image_remove_error(e, name))?;

        Ok(())
    }
}

#[async_trait]
impl ExecOps for BollardRuntime {
    async fn exec(
        &self,
        container: &ContainerName,
        config: &ExecConfig,
    ) -> Result<ExecResult, ExecError> {
        let opts = bollard::models::ExecConfig {
            cmd: Some(config.cmd.clone()),
            env: if config.env.is_empty() {
                None
            } else {
                Some(config.env.clone())
            },
            working_dir: config.working_dir.clone(),
            attach_stdout: Some(config.attach_stdout),
            attach_stderr: Some(config.attach_stderr),
            tty: Some(false),
            ..Default::default()
        };

        let exec_id = self
            .client
            .create_exec(container.as_str(), opts)
            .await
            .map_err(|e| map_exec_error(e, container))?
            .id;

        // Podman has issues with exec output streams not closing properly,
        // causing attached mode to hang. Use detached mode + polling for Podman.
        if self.runtime_type == RuntimeType::Podman {
            return self.exec_start_detached(&exec_id).await;
        }

        let opts = StartExecOptions {
            detach: false,
            ..Default::default()
        };

        let result = self
            .client
            .start_exec(&exec_id, Some(opts))
            .await
            .map_err(|e| map_exec_error(e, container))?;

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        if let bollard::exec::StartExecResults::Attached { mut output, .. } = result {
            while let Some(item) = output.next().await {
                match item {
                    Ok(bollard::container::LogOutput::StdOut { message }) => {
                        stdout.extend(message);
                    }
                    Ok(bollard::container::LogOutput::StdErr { message }) => {
                        stderr.extend(message);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        return Err(ExecError::Failed(e.to_string()));
                    }
                }
            }
        }

        let (_, exit_code) = self.exec_status(&exec_id).await?;
        let exit_code = exit_code.unwrap_or(0);

        Ok(ExecResult {
            exit_code,
            stdout,
            stderr,
        })
    }
}

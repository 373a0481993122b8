// ABOUTME: Shared types used across runtime trait definitions.
// ABOUTME: ContainerInfo, mounts, container state, exec config and results.

use crate::types::ContainerName;
use std::collections::HashMap;
use std::fmt;

/// Information about an inspected container.
#[derive(Debug, Clone)]
pub struct ContainerInfo {
    /// Container name, without the leading slash.
    pub name: ContainerName,
    /// Image reference the container was created from.
    pub image: String,
    /// Current state.
    pub state: ContainerState,
    /// Labels.
    pub labels: HashMap<String, String>,
    /// Mounts, in the order the runtime reports them.
    pub mounts: Vec<MountInfo>,
}

impl ContainerInfo {
    /// Host source of the bind mount targeting `destination`, if any.
    ///
    /// Named volumes and tmpfs mounts at the same destination are ignored.
    pub fn bind_source(&self, destination: &str) -> Option<&str> {
        self.mounts
            .iter()
            .find(|m| m.kind == MountKind::Bind && m.destination == destination)
            .map(|m| m.source.as_str())
    }
}

/// One mount of an inspected container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountInfo {
    pub kind: MountKind,
    /// Host path for binds, volume name for volumes.
    pub source: String,
    /// Path inside the container.
    pub destination: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountKind {
    Bind,
    Volume,
    Tmpfs,
    Other,
}

impl fmt::Display for MountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MountKind::Bind => "bind",
            MountKind::Volume => "volume",
            MountKind::Tmpfs => "tmpfs",
            MountKind::Other => "other",
        };
        f.write_str(s)
    }
}

/// Container state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
}

impl ContainerState {
    pub fn is_running(self) -> bool {
        self == ContainerState::Running
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContainerState::Created => "created",
            ContainerState::Running => "running",
            ContainerState::Paused => "paused",
            ContainerState::Restarting => "restarting",
            ContainerState::Removing => "removing",
            ContainerState::Exited => "exited",
            ContainerState::Dead => "dead",
        };
        f.write_str(s)
    }
}

/// Runtime metadata.
#[derive(Debug, Clone)]
pub struct RuntimeMetadata {
    /// Runtime name (e.g., "Docker", "Podman").
    pub name: String,
    /// Runtime version.
    pub version: String,
    /// Operating system.
    pub os: String,
    /// Architecture.
    pub arch: String,
}

/// Exec configuration for running commands in containers.
#[derive(Debug, Clone)]
pub struct ExecConfig {
    /// Command and arguments to run.
    pub cmd: Vec<String>,
    /// Environment variables.
    pub env: Vec<String>,
    /// Working directory.
    pub working_dir: Option<String>,
    /// Attach stdout.
    pub attach_stdout: bool,
    /// Attach stderr.
    pub attach_stderr: bool,
}

impl ExecConfig {
    /// Run `script` through `sh -c`, capturing both streams.
    ///
    /// `sh` is used because bash may not be installed in a fresh base image.
    pub fn shell(script: &str) -> Self {
        Self {
            cmd: vec!["sh".to_string(), "-c".to_string(), script.to_string()],
            ..Default::default()
        }
    }
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            cmd: Vec::new(),
            env: Vec::new(),
            working_dir: None,
            attach_stdout: true,
            attach_stderr: true,
        }
    }
}

/// Result of an exec operation.
#[derive(Debug, Clone)]
pub struct ExecResult {
    /// Exit code.
    pub exit_code: i64,
    /// Standard output.
    pub stdout: Vec<u8>,
    /// Standard error.
    pub stderr: Vec<u8>,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout followed by stderr, lossily decoded.
    pub fn combined_output(&self) -> String {
        let mut out = String::from_utf8_lossy(&self.stdout).into_owned();
        out.push_str(&String::from_utf8_lossy(&self.stderr));
        out
    }
}

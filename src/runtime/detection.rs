// ABOUTME: Runtime detection logic for the local system.
// ABOUTME: Honors the configured mode, otherwise checks Podman sockets first, then Docker.

use super::types::{RuntimeConfig, RuntimeInfo, RuntimeType};
use std::path::Path;

/// Error during runtime detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no container runtime found (checked Podman and Docker sockets)")]
    NoRuntimeFound,

    #[error("{runtime} socket not found at {socket}")]
    SocketMissing {
        runtime: RuntimeType,
        socket: String,
    },
}

const ROOTFUL_PODMAN: &str = "/run/podman/podman.sock";
const DOCKER_SOCKET: &str = "/var/run/docker.sock";

/// Detect container runtime on the local system.
///
/// Detection order:
/// 1. Rootless Podman socket (`/run/user/$UID/podman/podman.sock`)
/// 2. Rootful Podman socket (`/run/podman/podman.sock`)
/// 3. Docker socket (`/var/run/docker.sock`)
pub fn detect_local() -> Result<RuntimeInfo, DetectionError> {
    // 1. Rootless Podman
    if let Some(socket) = rootless_podman_socket()
        && Path::new(&socket).exists()
    {
        return Ok(RuntimeInfo {
            runtime_type: RuntimeType::Podman,
            socket_path: socket,
        });
    }

    // 2. Rootful Podman
    if Path::new(ROOTFUL_PODMAN).exists() {
        return Ok(RuntimeInfo {
            runtime_type: RuntimeType::Podman,
            socket_path: ROOTFUL_PODMAN.to_string(),
        });
    }

    // 3. Docker
    if Path::new(DOCKER_SOCKET).exists() {
        return Ok(RuntimeInfo {
            runtime_type: RuntimeType::Docker,
            socket_path: DOCKER_SOCKET.to_string(),
        });
    }

    Err(DetectionError::NoRuntimeFound)
}

/// Detect the runtime, letting explicit configuration take precedence.
///
/// A configured runtime without a socket uses that runtime's default socket;
/// for Podman the rootless socket is preferred when it exists.
pub fn detect_configured(config: &RuntimeConfig) -> Result<RuntimeInfo, DetectionError> {
    let Some(runtime_type) = config.runtime else {
        return detect_local();
    };

    if let Some(socket) = &config.socket {
        return Ok(RuntimeInfo {
            runtime_type,
            socket_path: socket.clone(),
        });
    }

    let socket_path = default_socket_path(runtime_type);
    if !Path::new(&socket_path).exists() {
        return Err(DetectionError::SocketMissing {
            runtime: runtime_type,
            socket: socket_path,
        });
    }

    Ok(RuntimeInfo {
        runtime_type,
        socket_path,
    })
}

fn default_socket_path(runtime: RuntimeType) -> String {
    match runtime {
        RuntimeType::Docker => DOCKER_SOCKET.to_string(),
        RuntimeType::Podman => rootless_podman_socket()
            .filter(|s| Path::new(s).exists())
            .unwrap_or_else(|| ROOTFUL_PODMAN.to_string()),
    }
}

fn rootless_podman_socket() -> Option<String> {
    get_uid().map(|uid| format!("/run/user/{}/podman/podman.sock", uid))
}

fn get_uid() -> Option<String> {
    std::env::var("UID").ok().or_else(|| {
        // Fall back to reading /proc/self/status
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|s| {
                s.lines()
                    .find(|l| l.starts_with("Uid:"))
                    .and_then(|l| l.split_whitespace().nth(1))
                    .map(|s| s.to_string())
            })
    })
}

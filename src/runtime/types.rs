// ABOUTME: Which runtime ai-shell talks to and where its API socket lives.
// ABOUTME: RuntimeType doubles as the persisted `mode` config value.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The `mode` values accepted by `config set-mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeType {
    Docker,
    Podman,
}

impl RuntimeType {
    /// Name of the runtime's command-line client.
    pub fn binary(self) -> &'static str {
        match self {
            RuntimeType::Docker => "docker",
            RuntimeType::Podman => "podman",
        }
    }
}

impl std::fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.binary())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid mode {0:?}: must be \"docker\" or \"podman\"")]
pub struct ParseRuntimeTypeError(pub String);

impl FromStr for RuntimeType {
    type Err = ParseRuntimeTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "docker" => Ok(RuntimeType::Docker),
            "podman" => Ok(RuntimeType::Podman),
            other => Err(ParseRuntimeTypeError(other.to_string())),
        }
    }
}

/// A runtime chosen by detection, ready to connect to.
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub runtime_type: RuntimeType,
    /// Unix socket serving the Docker-compatible API.
    pub socket_path: String,
}

/// Runtime selection derived from the user config.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Explicit runtime type (overrides auto-detection).
    pub runtime: Option<RuntimeType>,
    /// Explicit socket path (overrides default).
    pub socket: Option<String>,
}

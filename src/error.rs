// ABOUTME: Application-wide error type for ai-shell.
// ABOUTME: Aggregates module errors with thiserror and classifies them by kind.

use crate::config::ConfigError;
use crate::managed::{GuardError, ResolveError};
use crate::runtime::{ContainerError, ExecError, ImageError, RuntimeError, VolumeError};
use crate::types::WorkdirError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Workdir(#[from] WorkdirError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{source}\nhint: {hint}", hint = .source.hint())]
    Runtime {
        #[from]
        source: RuntimeError,
    },

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error(transparent)]
    Volume(#[from] VolumeError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("container not found for workdir: {0} (run: ai-shell up)")]
    NoContainerForWorkdir(String),

    #[error("container is not running: {container} (run: {hint})")]
    NotRunning { container: String, hint: String },

    #[error("{0}")]
    CheckFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Empty target, bad flag combination, or an unusable workdir argument.
    InvalidInput,
    /// Nothing matched, or there is nothing to operate on.
    NotFound,
    /// A target matched several instances.
    Ambiguous,
    /// The container exists but is not owned by ai-shell.
    NotManaged,
    /// The container is owned by ai-shell but bound to another workdir.
    WorkdirMismatch,
    /// The runtime could not inspect a container the guard needed.
    RuntimeInspectFailed,
    /// Config file unreadable or invalid, or a bad config value.
    Config,
    /// Runtime detection, connection, or operation failure.
    Runtime,
    /// Local I/O failure.
    Io,
}

impl Error {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Workdir(WorkdirError::NotFound(_)) => ErrorKind::NotFound,
            Error::Workdir(_) => ErrorKind::InvalidInput,
            Error::Resolve(e) => match e {
                ResolveError::InvalidTarget => ErrorKind::InvalidInput,
                ResolveError::NoManagedInstances | ResolveError::NotFound { .. } => {
                    ErrorKind::NotFound
                }
                ResolveError::Ambiguous { .. } => ErrorKind::Ambiguous,
                ResolveError::List(_) => ErrorKind::Runtime,
            },
            Error::Guard(e) => match e {
                GuardError::Inspect { .. } => ErrorKind::RuntimeInspectFailed,
                GuardError::NotManaged { .. } => ErrorKind::NotManaged,
                GuardError::WorkdirMismatch { .. } => ErrorKind::WorkdirMismatch,
            },
            Error::Config(_) => ErrorKind::Config,
            Error::Container(ContainerError::NotFound(_)) | Error::NoContainerForWorkdir(_) => {
                ErrorKind::NotFound
            }
            Error::Runtime { .. }
            | Error::Container(_)
            | Error::Volume(_)
            | Error::Image(_)
            | Error::Exec(_)
            | Error::NotRunning { .. }
            | Error::CheckFailed(_) => ErrorKind::Runtime,
            Error::InvalidArgs(_) => ErrorKind::InvalidInput,
            Error::Io(_) | Error::Json(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContainerName;

    #[test]
    fn classifies_resolution_errors() {
        let err = Error::from(ResolveError::NotFound {
            target: "x".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = Error::from(ResolveError::Ambiguous {
            target: "a".to_string(),
            candidates: Vec::new(),
        });
        assert_eq!(err.kind(), ErrorKind::Ambiguous);

        assert_eq!(
            Error::from(ResolveError::InvalidTarget).kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn classifies_guard_errors() {
        let err = Error::from(GuardError::WorkdirMismatch {
            container: ContainerName::new("c"),
            expected: "/a".to_string(),
            found: "/b".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::WorkdirMismatch);

        let err = Error::from(GuardError::Inspect {
            container: ContainerName::new("c"),
            source: ContainerError::Runtime("down".to_string()),
        });
        assert_eq!(err.kind(), ErrorKind::RuntimeInspectFailed);
    }

    #[test]
    fn runtime_errors_carry_a_hint() {
        let err = Error::from(RuntimeError::Detect {
            source: crate::runtime::DetectionError::NoRuntimeFound,
        });
        assert_eq!(err.kind(), ErrorKind::Runtime);
        assert!(err.to_string().contains("hint: start Docker or Podman"));
    }
}

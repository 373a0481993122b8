// ABOUTME: Failure to obtain a usable runtime connection, with a next-step hint.
// ABOUTME: Built with snafu context selectors so the socket that failed is recorded.

use snafu::Snafu;

use super::detection::DetectionError;
use super::traits::RuntimeInfoError;
use super::types::RuntimeType;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RuntimeError {
    #[snafu(display("{source}"))]
    Detect { source: DetectionError },

    #[snafu(display("cannot connect to {runtime} at {socket}: {source}"))]
    Connect {
        runtime: RuntimeType,
        socket: String,
        source: RuntimeInfoError,
    },
}

impl RuntimeError {
    /// Next step to suggest to the user.
    pub fn hint(&self) -> &'static str {
        match self {
            RuntimeError::Detect {
                source: DetectionError::NoRuntimeFound,
            } => "start Docker or Podman, or run: ai-shell config set-mode <docker|podman>",
            RuntimeError::Detect {
                source: DetectionError::SocketMissing { .. },
            } => "start the configured runtime, or switch with: ai-shell config set-mode <docker|podman>",
            RuntimeError::Connect { .. } => {
                "check that the runtime daemon is running and the socket is accessible"
            }
        }
    }
}

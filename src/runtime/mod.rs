// ABOUTME: Container runtime access for Docker and Podman.
// ABOUTME: Detects the local runtime, connects via bollard, exposes capability traits.

mod bollard;
mod detection;
mod error;
#[cfg(test)]
pub(crate) mod fake;
mod traits;
mod types;

pub use self::bollard::BollardRuntime;
pub use detection::{DetectionError, detect_configured, detect_local};
pub use error::RuntimeError;
pub use traits::{
    ContainerError, ContainerFilters, ContainerInfo, ContainerOps, ContainerState,
    ContainerSummary, ExecConfig, ExecError, ExecOps, ExecResult, ImageError, ImageOps, MountInfo,
    MountKind, RuntimeInfo as RuntimeInfoTrait, RuntimeInfoError, RuntimeMetadata, VolumeError,
    VolumeOps,
};
pub use types::{ParseRuntimeTypeError, RuntimeConfig, RuntimeInfo, RuntimeType};

use error::{ConnectSnafu, DetectSnafu};
use snafu::ResultExt;
use std::time::Duration;

/// Detect the runtime selected by `config` and connect to it.
///
/// The connection is verified with a ping before it is returned.
pub async fn connect(
    config: &RuntimeConfig,
    timeout: Duration,
) -> Result<BollardRuntime, RuntimeError> {
    let info = detect_configured(config).context(DetectSnafu)?;
    tracing::debug!(
        runtime = %info.runtime_type,
        socket = %info.socket_path,
        "connecting to container runtime"
    );
    let connect_failed = || ConnectSnafu {
        runtime: info.runtime_type,
        socket: info.socket_path.clone(),
    };
    let runtime = BollardRuntime::connect(&info, timeout).with_context(|_| connect_failed())?;
    RuntimeInfoTrait::ping(&runtime)
        .await
        .with_context(|_| connect_failed())?;
    Ok(runtime)
}

// ABOUTME: Ownership guard run before mutating a container reached by workdir.
// ABOUTME: Refuses containers without the managed marker or bound to another workdir.

use super::discovered_workdir;
use crate::labels::{ManagedMarker, ManagementLabels};
use crate::runtime::{ContainerError, ContainerOps};
use crate::types::{CanonicalWorkdir, ContainerName};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("cannot inspect container \"{container}\": {source}")]
    Inspect {
        container: ContainerName,
        #[source]
        source: ContainerError,
    },

    #[error(
        "refusing: container \"{container}\" is not managed by ai-shell (missing label com.nimzi.ai-shell.managed=true)"
    )]
    NotManaged {
        container: ContainerName,
        marker: ManagedMarker,
    },

    #[error("refusing: container \"{container}\" workdir mismatch\nexpected: {expected}\nfound:    {found}")]
    WorkdirMismatch {
        container: ContainerName,
        expected: String,
        found: String,
    },
}

/// Verify that `container` is ours and was created for `expected_workdir`.
///
/// The managed marker is checked first, so an unmanaged container is
/// refused even when its workdir happens to match.
pub async fn require_managed<R>(
    runtime: &R,
    container: &ContainerName,
    expected_workdir: &CanonicalWorkdir,
) -> Result<(), GuardError>
where
    R: ContainerOps + ?Sized,
{
    let info = runtime
        .inspect_container(container)
        .await
        .map_err(|source| GuardError::Inspect {
            container: container.clone(),
            source,
        })?;

    let labels = ManagementLabels::parse(&info.labels);
    if !labels.is_managed() {
        tracing::debug!(%container, marker = ?labels.marker, "refusing unmanaged container");
        return Err(GuardError::NotManaged {
            container: container.clone(),
            marker: labels.marker,
        });
    }

    let found = discovered_workdir(&info).unwrap_or("");
    if found != expected_workdir.as_str() {
        return Err(GuardError::WorkdirMismatch {
            container: container.clone(),
            expected: expected_workdir.to_string(),
            found: found.to_string(),
        });
    }

    Ok(())
}

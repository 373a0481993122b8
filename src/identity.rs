// ABOUTME: Deterministic instance identity derived from a canonical workdir.
// ABOUTME: Computes the short instance id and the container/volume names.

use crate::types::{CanonicalWorkdir, ContainerName, VolumeName};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of hex characters kept from the workdir digest.
pub const INSTANCE_ID_LEN: usize = 10;

/// Short, stable identifier for the instance bound to one workdir.
///
/// This is a naming primitive, not a security token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything that follows from a workdir plus the configured base names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceNames {
    pub instance_id: InstanceId,
    pub container: ContainerName,
    pub volume: VolumeName,
}

/// Hash the workdir's UTF-8 bytes with SHA-256 and keep the first 10 hex chars.
pub fn derive_instance_id(workdir: &CanonicalWorkdir) -> InstanceId {
    instance_id_for(workdir.as_str())
}

/// Same digest as [`derive_instance_id`], over an arbitrary path string.
///
/// Useful when the path comes from runtime metadata rather than the local
/// filesystem.
pub fn instance_id_for(path: &str) -> InstanceId {
    let digest = Sha256::digest(path.as_bytes());
    let mut id = hex::encode(digest);
    id.truncate(INSTANCE_ID_LEN);
    InstanceId(id)
}

/// `<container_base>-<id>` and `<volume_base>_<id>`.
pub fn derive_names(
    workdir: &CanonicalWorkdir,
    container_base: &str,
    volume_base: &str,
) -> InstanceNames {
    let instance_id = derive_instance_id(workdir);
    InstanceNames {
        container: ContainerName::new(format!("{container_base}-{instance_id}")),
        volume: VolumeName::new(format!("{volume_base}_{instance_id}")),
        instance_id,
    }
}

// ABOUTME: Managed-instance layer: what ai-shell owns, how targets find it, and the ownership guard.
// ABOUTME: Everything here re-queries the runtime; nothing is cached between calls.

mod guard;
mod list;
mod nuke;
mod prefix;
mod resolve;

pub use guard::{GuardError, require_managed};
pub use list::{container_exists, list_managed};
pub use nuke::{NukePlan, NukeSummary, execute_nuke, plan_nuke};
pub use prefix::unique_prefix_len;
pub use resolve::{MatchStrategy, ResolveError, looks_like_path, match_target, resolve_target};

use crate::labels::ManagementLabels;
use crate::runtime::ContainerInfo;
use crate::types::ContainerName;
use serde::Serialize;

/// Container-side mount point of the workdir bind mount.
pub const WORKDIR_MOUNT: &str = "/work";

/// Container-side mount point of the persistent home volume.
pub const HOME_MOUNT: &str = "/root";

/// Read projection of one live managed container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagedInstance {
    /// Host source of the `/work` bind mount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workdir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    pub container: ContainerName,
    pub status: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
}

impl ManagedInstance {
    /// Project an inspected container. Labels are parsed here and nowhere else.
    pub fn from_info(info: &ContainerInfo) -> Self {
        let labels = ManagementLabels::parse(&info.labels);
        Self {
            workdir: discovered_workdir(info).map(str::to_string),
            instance_id: labels.instance,
            container: info.name.clone(),
            status: info.state.to_string(),
            image: info.image.clone(),
            volume: labels.volume,
        }
    }

    pub fn workdir_str(&self) -> &str {
        self.workdir.as_deref().unwrap_or("")
    }

    pub fn instance_id_str(&self) -> &str {
        self.instance_id.as_deref().unwrap_or("")
    }

    pub fn is_running(&self) -> bool {
        self.status == "running"
    }
}

/// The workdir a container was created for, read from its `/work` bind mount.
pub fn discovered_workdir(info: &ContainerInfo) -> Option<&str> {
    info.bind_source(WORKDIR_MOUNT).filter(|s| !s.is_empty())
}

// ABOUTME: Bulk removal of everything ai-shell created: containers, home volumes, images.
// ABOUTME: Planning is read-only; execution collects per-resource failures as warnings.

use super::discovered_workdir;
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::Result;
use crate::labels::{LABEL_MANAGED, MANAGED_VALUE, ManagementLabels};
use crate::runtime::{ContainerFilters, ContainerOps, ImageOps, VolumeOps};
use crate::types::{ContainerName, ImageName, VolumeName};
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Duration;

/// Everything `rm --nuke` would delete, each list sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NukePlan {
    pub containers: Vec<ContainerName>,
    pub volumes: Vec<VolumeName>,
    pub images: Vec<ImageName>,
}

impl NukePlan {
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty() && self.volumes.is_empty() && self.images.is_empty()
    }
}

/// How much of a [`NukePlan`] was actually removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NukeSummary {
    pub containers: usize,
    pub volumes: usize,
    pub images: usize,
}

/// Collect managed containers, their labelled volumes and images, plus any
/// volume whose name starts with `orphan_prefix`.
///
/// Containers that cannot be inspected are still removed; only their volume
/// and image are unknown.
pub async fn plan_nuke<R>(runtime: &R, orphan_prefix: &str) -> Result<NukePlan>
where
    R: ContainerOps + VolumeOps + ?Sized,
{
    let filters = ContainerFilters::all_with_label(LABEL_MANAGED, MANAGED_VALUE);
    let containers: BTreeSet<ContainerName> = runtime
        .list_containers(&filters)
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();

    let mut volumes = BTreeSet::new();
    let mut images = BTreeSet::new();
    for name in &containers {
        let info = match runtime.inspect_container(name).await {
            Ok(info) => info,
            Err(e) => {
                tracing::warn!(container = %name, error = %e, "cannot inspect; volume and image unknown");
                continue;
            }
        };
        if let Some(volume) = ManagementLabels::parse(&info.labels).volume {
            volumes.insert(volume);
        }
        let image = info.image.trim();
        if !image.is_empty() {
            images.insert(image.to_string());
        }
        tracing::debug!(container = %name, workdir = ?discovered_workdir(&info), "planned for removal");
    }

    for volume in runtime.list_volumes().await? {
        if volume.as_str().starts_with(orphan_prefix) {
            volumes.insert(volume.into_inner());
        }
    }

    Ok(NukePlan {
        containers: containers.into_iter().collect(),
        volumes: volumes.into_iter().map(VolumeName::new).collect(),
        images: images.into_iter().map(ImageName::new).collect(),
    })
}

/// Stop and remove everything in `plan`, recording failures in `diag`.
pub async fn execute_nuke<R>(
    runtime: &R,
    plan: &NukePlan,
    stop_timeout: Duration,
    diag: &mut Diagnostics,
) -> NukeSummary
where
    R: ContainerOps + VolumeOps + ImageOps + ?Sized,
{
    let mut summary = NukeSummary::default();

    for name in &plan.containers {
        if let Err(e) = runtime.stop_container(name, stop_timeout).await {
            tracing::debug!(container = %name, error = %e, "stop before removal failed");
        }
    }
    for name in &plan.containers {
        match runtime.remove_container(name, true).await {
            Ok(()) => summary.containers += 1,
            Err(e) => diag.warn(Warning::container_remove(format!("{name}: {e}"))),
        }
    }
    for name in &plan.volumes {
        match runtime.remove_volume(name, false).await {
            Ok(()) => summary.volumes += 1,
            Err(e) => diag.warn(Warning::volume_remove(format!("{name}: {e}"))),
        }
    }
    for name in &plan.images {
        match runtime.remove_image(name, false).await {
            Ok(()) => summary.images += 1,
            Err(e) => diag.warn(Warning::image_remove(format!("{name}: {e}"))),
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::WarningKind;
    use crate::managed::list_managed;
    use crate::runtime::fake::{FakeRuntime, foreign_container, managed_container};

    const ORPHAN_PREFIX: &str = "ai_agent_shell_home_";

    fn fleet() -> FakeRuntime {
        FakeRuntime::default()
            .with_container(managed_container("ai-agent-shell-bbbb", "bbbb", "/b"))
            .with_container(managed_container("ai-agent-shell-aaaa", "aaaa", "/a"))
            .with_container(foreign_container("postgres", "/srv"))
            .with_volume("ai_agent_shell_home_aaaa")
            .with_volume("ai_agent_shell_home_bbbb")
            .with_volume("ai_agent_shell_home_0ld0rphan")
            .with_volume("pgdata")
    }

    #[tokio::test]
    async fn plan_covers_managed_resources_and_orphans_only() {
        let runtime = fleet();

        let plan = plan_nuke(&runtime, ORPHAN_PREFIX).await.unwrap();

        let containers: Vec<&str> = plan.containers.iter().map(|c| c.as_str()).collect();
        assert_eq!(containers, vec!["ai-agent-shell-aaaa", "ai-agent-shell-bbbb"]);
        let volumes: Vec<&str> = plan.volumes.iter().map(|v| v.as_str()).collect();
        assert_eq!(
            volumes,
            vec![
                "ai_agent_shell_home_0ld0rphan",
                "ai_agent_shell_home_aaaa",
                "ai_agent_shell_home_bbbb",
            ]
        );
        let images: Vec<&str> = plan.images.iter().map(|i| i.as_str()).collect();
        assert_eq!(images, vec!["ai-agent-shell"]);
    }

    #[tokio::test]
    async fn uninspectable_container_is_still_planned() {
        let runtime = fleet().with_broken_inspect("ai-agent-shell-aaaa");

        let plan = plan_nuke(&runtime, ORPHAN_PREFIX).await.unwrap();

        assert_eq!(plan.containers.len(), 2);
    }

    #[tokio::test]
    async fn execute_removes_plan_and_leaves_foreign_state() {
        let runtime = fleet();
        let plan = plan_nuke(&runtime, ORPHAN_PREFIX).await.unwrap();
        let mut diag = Diagnostics::default();

        let summary = execute_nuke(&runtime, &plan, Duration::from_secs(1), &mut diag).await;

        assert_eq!(
            summary,
            NukeSummary {
                containers: 2,
                volumes: 3,
                images: 1
            }
        );
        assert!(!diag.has_warnings());
        assert!(runtime.has_container("postgres"));
        assert!(runtime.has_volume("pgdata"));
        assert_eq!(runtime.removed_images(), vec!["ai-agent-shell".to_string()]);
        assert!(list_managed(&runtime).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn removal_failures_become_warnings() {
        let runtime = fleet();
        let mut plan = plan_nuke(&runtime, ORPHAN_PREFIX).await.unwrap();
        plan.volumes.push(VolumeName::new("ai_agent_shell_home_gone"));
        let mut diag = Diagnostics::default();

        let summary = execute_nuke(&runtime, &plan, Duration::from_secs(1), &mut diag).await;

        assert_eq!(summary.volumes, 3);
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].kind, WarningKind::VolumeRemove);
    }
}

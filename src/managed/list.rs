// ABOUTME: Lists live managed containers and projects them into ManagedInstance records.
// ABOUTME: Per-container inspection failures are skipped; a failing list query is not.

use super::ManagedInstance;
use crate::labels::{LABEL_MANAGED, MANAGED_VALUE};
use crate::runtime::{ContainerError, ContainerFilters, ContainerOps};
use crate::types::ContainerName;

/// Every container carrying the managed marker, running or stopped, sorted by name.
pub async fn list_managed<R>(runtime: &R) -> Result<Vec<ManagedInstance>, ContainerError>
where
    R: ContainerOps + ?Sized,
{
    let filters = ContainerFilters::all_with_label(LABEL_MANAGED, MANAGED_VALUE);
    let mut names: Vec<ContainerName> = runtime
        .list_containers(&filters)
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();
    names.sort();
    names.dedup();

    let mut instances = Vec::with_capacity(names.len());
    for name in names {
        match runtime.inspect_container(&name).await {
            Ok(info) => instances.push(ManagedInstance::from_info(&info)),
            Err(e) => {
                tracing::warn!(container = %name, error = %e, "skipping managed container");
            }
        }
    }

    tracing::debug!(count = instances.len(), "listed managed containers");
    Ok(instances)
}

/// Whether a container with this exact name exists, managed or not.
pub async fn container_exists<R>(runtime: &R, name: &ContainerName) -> Result<bool, ContainerError>
where
    R: ContainerOps + ?Sized,
{
    match runtime.inspect_container(name).await {
        Ok(_) => Ok(true),
        Err(e) if e.is_not_found() => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::ContainerState;
    use crate::runtime::fake::{FakeRuntime, foreign_container, managed_container};

    #[tokio::test]
    async fn lists_only_managed_sorted_by_name() {
        let runtime = FakeRuntime::default()
            .with_container(managed_container("ai-agent-shell-bbbb", "bbbb", "/b"))
            .with_container(foreign_container("postgres", "/srv"))
            .with_container(managed_container("ai-agent-shell-aaaa", "aaaa", "/a"));

        let instances = list_managed(&runtime).await.unwrap();

        let names: Vec<&str> = instances.iter().map(|i| i.container.as_str()).collect();
        assert_eq!(names, vec!["ai-agent-shell-aaaa", "ai-agent-shell-bbbb"]);
        assert_eq!(instances[0].workdir.as_deref(), Some("/a"));
        assert_eq!(instances[0].instance_id.as_deref(), Some("aaaa"));
        assert_eq!(
            instances[0].volume.as_deref(),
            Some("ai_agent_shell_home_aaaa")
        );
    }

    #[tokio::test]
    async fn includes_stopped_containers() {
        let mut stopped = managed_container("ai-agent-shell-cccc", "cccc", "/c");
        stopped.state = ContainerState::Exited;
        let runtime = FakeRuntime::default().with_container(stopped);

        let instances = list_managed(&runtime).await.unwrap();

        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].status, "exited");
        assert!(!instances[0].is_running());
    }

    #[tokio::test]
    async fn skips_containers_that_fail_inspection() {
        let runtime = FakeRuntime::default()
            .with_container(managed_container("ai-agent-shell-aaaa", "aaaa", "/a"))
            .with_container(managed_container("ai-agent-shell-bbbb", "bbbb", "/b"))
            .with_broken_inspect("ai-agent-shell-aaaa");

        let instances = list_managed(&runtime).await.unwrap();

        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].container.as_str(), "ai-agent-shell-bbbb");
    }

    #[tokio::test]
    async fn propagates_list_failure() {
        let runtime = FakeRuntime::default()
            .with_container(managed_container("ai-agent-shell-aaaa", "aaaa", "/a"))
            .with_broken_list();

        assert!(list_managed(&runtime).await.is_err());
    }

    #[tokio::test]
    async fn workdir_comes_from_bind_mount_only() {
        let mut info = managed_container("ai-agent-shell-dddd", "dddd", "/d");
        info.mounts.retain(|m| m.destination != "/work");
        let runtime = FakeRuntime::default().with_container(info);

        let instances = list_managed(&runtime).await.unwrap();

        assert_eq!(instances[0].workdir, None);
    }

    #[tokio::test]
    async fn container_exists_distinguishes_missing() {
        let runtime = FakeRuntime::default().with_container(foreign_container("other", "/x"));

        assert!(
            container_exists(&runtime, &ContainerName::new("other"))
                .await
                .unwrap()
        );
        assert!(
            !container_exists(&runtime, &ContainerName::new("nope"))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn container_exists_propagates_other_errors() {
        let runtime = FakeRuntime::default()
            .with_container(managed_container("ai-agent-shell-aaaa", "aaaa", "/a"))
            .with_broken_inspect("ai-agent-shell-aaaa");

        let err = container_exists(&runtime, &ContainerName::new("ai-agent-shell-aaaa"))
            .await
            .unwrap_err();

        assert!(!err.is_not_found());
    }
}

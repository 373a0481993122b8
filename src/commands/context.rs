// ABOUTME: Shared plumbing for commands: settings, runtime connection, and instance selection.
// ABOUTME: Every command that touches a container goes through select() so the guard always runs.

use ai_shell::config::{AppConfig, Settings};
use ai_shell::error::{Error, Result};
use ai_shell::identity::{InstanceNames, derive_names};
use ai_shell::managed::{container_exists, require_managed, resolve_target};
use ai_shell::output::Output;
use ai_shell::runtime::{self, BollardRuntime, ContainerOps};
use ai_shell::types::{CanonicalWorkdir, ContainerName, PathContext, VolumeName};
use std::path::PathBuf;

/// Everything a command needs, resolved once at startup.
pub struct Context {
    pub settings: Settings,
    pub paths: PathContext,
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub output: Output,
}

impl Context {
    pub fn canonical_workdir(&self) -> Result<CanonicalWorkdir> {
        Ok(CanonicalWorkdir::resolve(
            self.settings.workdir_input(),
            &self.paths,
        )?)
    }

    /// Canonical workdir plus the names derived from it.
    pub fn derived(&self) -> Result<(CanonicalWorkdir, InstanceNames)> {
        let workdir = self.canonical_workdir()?;
        let names = derive_names(
            &workdir,
            &self.settings.container_base,
            &self.settings.volume_base,
        );
        Ok((workdir, names))
    }

    /// Detect the configured runtime and connect to it.
    pub async fn connect(&self) -> Result<BollardRuntime> {
        let runtime = runtime::connect(&self.config.runtime_config(), self.config.timeout).await?;
        tracing::debug!(runtime = %runtime.runtime_type(), "runtime connected");
        Ok(runtime)
    }
}

/// A container the caller is allowed to operate on.
#[derive(Debug, Clone)]
pub struct Selection {
    pub container: ContainerName,
    pub volume: Option<VolumeName>,
    /// The TARGET string, when the container was reached by target.
    pub target: Option<String>,
}

impl Selection {
    /// Command suggested when the container needs starting first.
    pub fn start_hint(&self) -> String {
        match &self.target {
            Some(t) => format!("ai-shell start {t}"),
            None => "ai-shell start".to_string(),
        }
    }
}

/// Outcome of looking up the instance for the current workdir.
pub enum WorkdirLookup {
    /// No container with the derived name exists.
    Missing { workdir: CanonicalWorkdir },
    /// The derived container exists and passed the ownership guard.
    Owned(Selection),
}

/// Resolve TARGET against the managed fleet, or derive from the workdir and guard.
///
/// A missing workdir container is reported as `Missing` so each command can
/// word its own message.
pub async fn lookup<R>(ctx: &Context, runtime: &R, target: Option<&str>) -> Result<WorkdirLookup>
where
    R: ContainerOps + ?Sized,
{
    if let Some(target) = target {
        let instance = resolve_target(runtime, target, &ctx.paths).await?;
        return Ok(WorkdirLookup::Owned(Selection {
            volume: instance.volume.clone().map(VolumeName::new),
            container: instance.container,
            target: Some(target.to_string()),
        }));
    }

    let (workdir, names) = ctx.derived()?;
    if !container_exists(runtime, &names.container).await? {
        return Ok(WorkdirLookup::Missing { workdir });
    }
    require_managed(runtime, &names.container, &workdir).await?;
    Ok(WorkdirLookup::Owned(Selection {
        container: names.container,
        volume: Some(names.volume),
        target: None,
    }))
}

/// Like [`lookup`], but a missing workdir container is an error.
pub async fn select<R>(ctx: &Context, runtime: &R, target: Option<&str>) -> Result<Selection>
where
    R: ContainerOps + ?Sized,
{
    match lookup(ctx, runtime, target).await? {
        WorkdirLookup::Owned(selection) => Ok(selection),
        WorkdirLookup::Missing { workdir } => Err(Error::NoContainerForWorkdir(workdir.to_string())),
    }
}

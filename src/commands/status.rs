// ABOUTME: `status` command: identity, state and mounts for one instance.
// ABOUTME: A missing workdir container is reported, not treated as an error.

use super::context::{Context, WorkdirLookup, lookup};
use ai_shell::error::Result;
use ai_shell::managed::{HOME_MOUNT, resolve_target};
use ai_shell::runtime::{BollardRuntime, ContainerOps, MountInfo};
use ai_shell::types::ContainerName;
use serde::Serialize;

#[derive(Serialize)]
struct StatusReport {
    workdir: String,
    instance_id: String,
    container: String,
    status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    image: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    volume: String,
    mounts: Vec<MountLine>,
}

#[derive(Serialize)]
struct MountLine {
    kind: String,
    source: String,
    destination: String,
}

impl From<&MountInfo> for MountLine {
    fn from(m: &MountInfo) -> Self {
        Self {
            kind: m.kind.to_string(),
            source: m.source.clone(),
            destination: m.destination.clone(),
        }
    }
}

pub async fn status(ctx: &Context, target: Option<&str>) -> Result<()> {
    let runtime = ctx.connect().await?;

    let mut report = match target {
        Some(target) => {
            let instance = resolve_target(&runtime, target, &ctx.paths).await?;
            StatusReport {
                workdir: instance.workdir_str().to_string(),
                instance_id: instance.instance_id_str().to_string(),
                container: instance.container.to_string(),
                status: instance.status.clone(),
                image: instance.image.clone(),
                volume: instance.volume.clone().unwrap_or_default(),
                mounts: Vec::new(),
            }
        }
        None => {
            let (workdir, names) = ctx.derived()?;
            let missing = StatusReport {
                workdir: workdir.to_string(),
                instance_id: names.instance_id.to_string(),
                container: names.container.to_string(),
                status: "missing".to_string(),
                image: ctx.settings.image.clone(),
                volume: names.volume.to_string(),
                mounts: Vec::new(),
            };
            match lookup(ctx, &runtime, None).await? {
                WorkdirLookup::Missing { .. } => {
                    print_report(ctx, &missing)?;
                    return Ok(());
                }
                WorkdirLookup::Owned(_) => {
                    let info = runtime.inspect_container(&names.container).await?;
                    StatusReport {
                        status: if info.state.is_running() {
                            "running".to_string()
                        } else {
                            "stopped".to_string()
                        },
                        ..missing
                    }
                }
            }
        }
    };

    report.mounts = mounts_of(&runtime, &ContainerName::new(report.container.clone())).await;
    print_report(ctx, &report)
}

/// Mounts are informational; a failed inspection just leaves them out.
async fn mounts_of(runtime: &BollardRuntime, container: &ContainerName) -> Vec<MountLine> {
    match runtime.inspect_container(container).await {
        Ok(info) => info.mounts.iter().map(MountLine::from).collect(),
        Err(e) => {
            tracing::debug!(%container, error = %e, "cannot read mounts");
            Vec::new()
        }
    }
}

fn print_report(ctx: &Context, report: &StatusReport) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(report)?;
        return Ok(());
    }

    println!("workdir:   {}", report.workdir);
    println!("instance:  {}", report.instance_id);
    println!("container: {} ({})", report.container, report.status);
    if !report.image.is_empty() {
        println!("image:     {}", report.image);
    }
    if !report.volume.is_empty() {
        println!("volume:    {} -> {HOME_MOUNT}", report.volume);
    }
    if !report.mounts.is_empty() {
        println!("mounts:");
        for m in &report.mounts {
            println!("  {} {} -> {}", m.kind, m.source, m.destination);
        }
    }
    Ok(())
}

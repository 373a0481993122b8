// ABOUTME: `rm` command: remove one guarded instance, or `--nuke` every ai-shell resource.
// ABOUTME: Nuke prints its plan first and needs a typed confirmation unless --yes is given.

use super::context::{Context, Selection, WorkdirLookup, lookup};
use ai_shell::config::DEFAULT_VOLUME_BASE;
use ai_shell::diagnostics::Diagnostics;
use ai_shell::error::{Error, Result};
use ai_shell::managed::{NukePlan, NukeSummary, execute_nuke, plan_nuke};
use ai_shell::runtime::{BollardRuntime, ContainerError, ContainerOps, VolumeError, VolumeOps};
use std::fmt::Display;
use std::io::{BufRead, IsTerminal, Write};

const CONFIRM_WORD: &str = "NUKE";

pub async fn rm(ctx: &Context, target: Option<&str>, volume: bool) -> Result<()> {
    let runtime = ctx.connect().await?;

    let selected = match lookup(ctx, &runtime, target).await? {
        WorkdirLookup::Owned(selected) => selected,
        WorkdirLookup::Missing { workdir } => {
            ctx.output
                .success(&format!("OK: no container for workdir: {workdir}"));
            return Ok(());
        }
    };

    if volume && selected.volume.is_none() {
        return Err(Error::InvalidArgs(format!(
            "container \"{}\" has no volume label; refusing to guess which volume to remove",
            selected.container
        )));
    }

    remove_container(ctx, &runtime, &selected).await?;
    if volume {
        remove_volume(ctx, &runtime, &selected).await?;
    }
    Ok(())
}

async fn remove_container(ctx: &Context, runtime: &BollardRuntime, selected: &Selection) -> Result<()> {
    let container = &selected.container;
    match runtime.stop_container(container, runtime.stop_timeout()).await {
        Ok(()) | Err(ContainerError::NotRunning(_)) => {}
        Err(e) => tracing::debug!(%container, error = %e, "stop before removal failed"),
    }
    match runtime.remove_container(container, true).await {
        Ok(()) => ctx
            .output
            .success(&format!("OK: removed container \"{container}\".")),
        Err(ContainerError::NotFound(_)) => ctx
            .output
            .success(&format!("OK: container \"{container}\" already gone.")),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

async fn remove_volume(ctx: &Context, runtime: &BollardRuntime, selected: &Selection) -> Result<()> {
    let Some(volume) = &selected.volume else {
        return Ok(());
    };
    match runtime.remove_volume(volume, false).await {
        Ok(()) => ctx
            .output
            .success(&format!("OK: removed volume \"{volume}\".")),
        Err(VolumeError::NotFound(_)) => ctx
            .output
            .success(&format!("OK: volume \"{volume}\" already gone.")),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

pub async fn nuke(ctx: &Context, yes: bool) -> Result<()> {
    if ctx.settings.workdir.is_some() {
        return Err(Error::InvalidArgs(
            "--nuke removes every managed instance; it cannot be combined with --workdir"
                .to_string(),
        ));
    }

    let runtime = ctx.connect().await?;
    let plan = plan_nuke(&runtime, &format!("{DEFAULT_VOLUME_BASE}_")).await?;

    // JSON mode reports the plan together with the summary.
    if !ctx.output.is_json() {
        print_plan(&plan);
    }
    if plan.is_empty() {
        ctx.output.success("Nothing to delete.");
        return Ok(());
    }

    if !yes && !confirm()? {
        ctx.output.line("Aborted.");
        return Ok(());
    }

    let mut diag = Diagnostics::default();
    let summary = execute_nuke(&runtime, &plan, runtime.stop_timeout(), &mut diag).await;

    if ctx.output.is_json() {
        #[derive(serde::Serialize)]
        struct NukeReport<'a> {
            plan: &'a NukePlan,
            removed: NukeSummary,
            warnings: Vec<&'a str>,
        }
        ctx.output.json(&NukeReport {
            plan: &plan,
            removed: summary,
            warnings: diag.warnings().iter().map(|w| w.message.as_str()).collect(),
        })?;
        return Ok(());
    }

    ctx.output.success("OK: nuke complete.");
    ctx.output.line(&format!(
        "Removed: {}/{} containers, {}/{} volumes, {}/{} images.",
        summary.containers,
        plan.containers.len(),
        summary.volumes,
        plan.volumes.len(),
        summary.images,
        plan.images.len(),
    ));
    for warning in diag.warnings() {
        ctx.output.warn(&warning.message);
    }
    Ok(())
}

fn print_plan(plan: &NukePlan) {
    println!("This will delete ALL ai-shell managed resources:");
    print_section("Containers", &plan.containers);
    print_section("Volumes", &plan.volumes);
    print_section("Images", &plan.images);
}

fn print_section<T: Display>(title: &str, items: &[T]) {
    print!("{}", render_section(title, items));
}

fn render_section<T: Display>(title: &str, items: &[T]) -> String {
    let mut out = format!("{title} ({}):\n", items.len());
    if items.is_empty() {
        out.push_str("  (none)\n");
    }
    for item in items {
        out.push_str(&format!("  - {item}\n"));
    }
    out
}

/// Ask the user to type the confirmation word. Requires an interactive stdin.
fn confirm() -> Result<bool> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        return Err(Error::InvalidArgs(
            "refusing to --nuke without a TTY; re-run with --yes".to_string(),
        ));
    }
    print!("Type {CONFIRM_WORD} to continue: ");
    std::io::stdout().flush()?;
    let mut reply = String::new();
    stdin.lock().read_line(&mut reply)?;
    Ok(reply.trim() == CONFIRM_WORD)
}

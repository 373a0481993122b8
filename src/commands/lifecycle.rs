// ABOUTME: `start` and `stop` commands for an existing managed container.
// ABOUTME: Both are idempotent: an already-running or already-stopped container is OK.

use super::context::{Context, select};
use ai_shell::error::Result;
use ai_shell::runtime::{ContainerError, ContainerOps};

pub async fn start(ctx: &Context, target: Option<&str>) -> Result<()> {
    let runtime = ctx.connect().await?;
    let selected = select(ctx, &runtime, target).await?;
    let container = &selected.container;

    let info = runtime.inspect_container(container).await?;
    if info.state.is_running() {
        ctx.output.success(&format!("OK: \"{container}\" already running."));
        return Ok(());
    }

    match runtime.start_container(container).await {
        Ok(()) => ctx.output.success(&format!("OK: started \"{container}\".")),
        Err(ContainerError::AlreadyRunning(_)) => {
            ctx.output.success(&format!("OK: \"{container}\" already running."))
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

pub async fn stop(ctx: &Context, target: Option<&str>) -> Result<()> {
    let runtime = ctx.connect().await?;
    let selected = select(ctx, &runtime, target).await?;
    let container = &selected.container;

    let info = runtime.inspect_container(container).await?;
    if !info.state.is_running() {
        ctx.output.success(&format!("OK: \"{container}\" already stopped."));
        return Ok(());
    }

    match runtime.stop_container(container, runtime.stop_timeout()).await {
        Ok(()) => ctx.output.success(&format!("OK: stopped \"{container}\".")),
        Err(ContainerError::NotRunning(_)) => {
            ctx.output.success(&format!("OK: \"{container}\" already stopped."))
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

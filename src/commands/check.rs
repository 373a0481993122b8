// ABOUTME: `check` command: sanity-check cursor-agent, its config mount, and gh auth.
// ABOUTME: gh output is echoed with token-like lines redacted.

use super::context::{Context, select};
use ai_shell::error::{Error, Result};
use ai_shell::runtime::{ContainerOps, ExecConfig, ExecOps, RuntimeInfoTrait, RuntimeMetadata};

const CURSOR_AGENT: &str = "command -v cursor-agent && cursor-agent --help | head -30";
const CURSOR_CONFIG: &str = "ls -la /root/.config/cursor/ 2>/dev/null | head -50";
const GH_AUTH: &str = "gh auth status 2>&1 | head -50";

pub async fn check(ctx: &Context, target: Option<&str>) -> Result<()> {
    let runtime = ctx.connect().await?;
    match runtime.info().await {
        Ok(meta) => ctx.output.line(&runtime_line(&meta)),
        Err(e) => tracing::debug!(error = %e, "runtime info unavailable"),
    }
    let selected = select(ctx, &runtime, target).await?;
    let container = &selected.container;

    let info = runtime.inspect_container(container).await?;
    if !info.state.is_running() {
        return Err(Error::NotRunning {
            container: container.to_string(),
            hint: selected.start_hint(),
        });
    }

    let result = runtime.exec(container, &ExecConfig::shell(CURSOR_AGENT)).await?;
    if !result.success() {
        return Err(Error::CheckFailed(
            "cursor-agent not found (run: ai-shell up)".to_string(),
        ));
    }
    ctx.output.success("OK: cursor-agent is installed.");

    let result = runtime.exec(container, &ExecConfig::shell(CURSOR_CONFIG)).await?;
    if !result.success() {
        return Err(Error::CheckFailed(
            "/root/.config/cursor is missing; ensure host Cursor is installed/signed in"
                .to_string(),
        ));
    }
    ctx.output.success("OK: /root/.config/cursor is mounted.");

    // gh is optional; its failure is shown, never fatal.
    let gh = match runtime.exec(container, &ExecConfig::shell(GH_AUTH)).await {
        Ok(result) => result.combined_output(),
        Err(e) => e.to_string(),
    };
    let gh = redact_secrets(&gh);
    let gh = gh.trim();
    if gh.is_empty() {
        ctx.output.line("gh auth (optional): (no output)");
    } else {
        ctx.output.line("gh auth (optional):");
        for line in gh.lines() {
            ctx.output.line(&format!("  {line}"));
        }
    }
    Ok(())
}

fn runtime_line(meta: &RuntimeMetadata) -> String {
    let version = if meta.version.is_empty() {
        "unknown version"
    } else {
        meta.version.as_str()
    };
    if meta.os.is_empty() || meta.arch.is_empty() {
        format!("Runtime: {} {version}", meta.name)
    } else {
        format!("Runtime: {} {version} ({}/{})", meta.name, meta.os, meta.arch)
    }
}

/// Replace the value of any `...TOKEN=` or `...KEY=` line with `***`.
fn redact_secrets(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.contains("TOKEN=") || line.contains("KEY=") {
                if let Some((key, _)) = line.split_once('=') {
                    return format!("{key}=***");
                }
            }
            line.to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

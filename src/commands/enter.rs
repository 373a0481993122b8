// ABOUTME: `enter` command: replace this process with an interactive shell in the container.
// ABOUTME: Starts a stopped container first; drops -it when there is no TTY.

use super::context::{Context, select};
use ai_shell::error::{Error, Result};
use ai_shell::runtime::{ContainerOps, ExecConfig, ExecOps};
use ai_shell::types::ContainerName;
use std::io::IsTerminal;
use std::os::unix::process::CommandExt;
use std::process::Command;

const PATH_SETUP: &str = r#"grep -q "\.local/bin" ~/.bashrc 2>/dev/null || echo "export PATH=\"$HOME/.local/bin:$PATH\"" >> ~/.bashrc"#;

pub async fn enter(ctx: &Context, target: Option<&str>) -> Result<()> {
    let runtime = ctx.connect().await?;
    let selected = select(ctx, &runtime, target).await?;
    let container = &selected.container;

    let info = runtime.inspect_container(container).await?;
    if !info.state.is_running() {
        ctx.output.progress(&format!("Starting \"{container}\"..."));
        runtime.start_container(container).await?;
    }

    if let Err(e) = runtime.exec(container, &ExecConfig::shell(PATH_SETUP)).await {
        tracing::debug!(%container, error = %e, "PATH setup skipped");
    }

    let tty = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
    if !tty {
        ctx.output
            .warn("no TTY available; running non-interactive shell.");
    }

    let binary = runtime.runtime_type().binary();
    let args = exec_args(container, tty);
    tracing::debug!(%binary, ?args, "replacing process");

    // exec() only returns on failure.
    let err = Command::new(binary).args(&args).exec();
    Err(Error::Io(err))
}

fn exec_args(container: &ContainerName, tty: bool) -> Vec<String> {
    let mut args = vec!["exec".to_string()];
    if tty {
        args.push("-it".to_string());
    }
    args.extend([
        container.to_string(),
        "bash".to_string(),
        "-l".to_string(),
    ]);
    args
}

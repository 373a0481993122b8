// ABOUTME: Entry point for the ai-shell CLI application.
// ABOUTME: Parses arguments, builds the shared context, and dispatches to command handlers.

mod cli;
mod commands;

use ai_shell::config::{AppConfig, Overrides, Settings};
use ai_shell::error::Result;
use ai_shell::output::{Output, OutputMode};
use ai_shell::types::PathContext;
use clap::Parser;
use cli::{AliasCommands, Cli, Commands, ConfigCommands, NamingArgs};
use commands::Context;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        tracing::debug!(kind = ?e.kind(), "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn build_context(naming: NamingArgs, quiet: bool, json: bool) -> Result<Context> {
    let overrides = Overrides {
        container_base: naming.container_base,
        image: naming.image,
        volume_base: naming.volume_base,
        workdir: naming.workdir,
    };
    let (config_path, config) = AppConfig::discover()?;
    Ok(Context {
        settings: Settings::from_process_env(&overrides),
        paths: PathContext::from_env()?,
        config,
        config_path,
        output: Output::new(OutputMode::from_flags(quiet, json)),
    })
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = build_context(cli.naming, cli.quiet, cli.json)?;

    match cli.command {
        Commands::Instance => commands::instance(&ctx),
        Commands::Ls => commands::ls(&ctx).await,
        Commands::Status { target } => commands::status(&ctx, target.as_deref()).await,
        Commands::Start { target } => commands::start(&ctx, target.as_deref()).await,
        Commands::Stop { target } => commands::stop(&ctx, target.as_deref()).await,
        Commands::Enter { target } => commands::enter(&ctx, target.as_deref()).await,
        Commands::Check { target } => commands::check(&ctx, target.as_deref()).await,
        Commands::Rm {
            target,
            volume,
            nuke,
            yes,
        } => {
            if nuke {
                commands::nuke(&ctx, yes).await
            } else {
                commands::rm(&ctx, target.as_deref(), volume).await
            }
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::show(&ctx),
            ConfigCommands::SetMode { mode } => commands::config::set_mode(&ctx, &mode),
            ConfigCommands::SetDefaultBaseImage { image } => {
                commands::config::set_default_base_image(&ctx, &image)
            }
            ConfigCommands::Alias { command } => match command {
                AliasCommands::Set { alias, image } => {
                    commands::config::alias_set(&ctx, &alias, &image)
                }
                AliasCommands::Rm { alias } => commands::config::alias_rm(&ctx, &alias),
                AliasCommands::Ls => commands::config::alias_ls(&ctx),
            },
        },
    }
}

// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines global naming flags, all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ai-shell")]
#[command(about = "Manage per-workdir ai-shell Docker/Podman containers")]
#[command(
    long_about = "Manage per-workdir ai-shell Docker/Podman containers.\n\n\
Workdir is the identity: one container + one /root volume per workdir.\n\n\
Defaults can be overridden via env vars:\n  \
AI_SHELL_CONTAINER (base name, default: ai-agent-shell)\n  \
AI_SHELL_IMAGE     (default: ai-agent-shell)\n  \
AI_SHELL_VOLUME    (base name, default: ai_agent_shell_home)"
)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub naming: NamingArgs,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress progress output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Emit machine-readable JSON where supported
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags that select the workdir and override derived names.
#[derive(Args, Debug, Clone, Default)]
pub struct NamingArgs {
    /// Target workdir (default: current directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub workdir: Option<String>,

    /// Container base name (overrides AI_SHELL_CONTAINER)
    #[arg(long, global = true, value_name = "NAME")]
    pub container_base: Option<String>,

    /// Image name (overrides AI_SHELL_IMAGE)
    #[arg(long, global = true, value_name = "NAME")]
    pub image: Option<String>,

    /// Volume base name for /root (overrides AI_SHELL_VOLUME)
    #[arg(long, global = true, value_name = "NAME")]
    pub volume_base: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the derived instance identity for the workdir (no runtime needed)
    Instance,

    /// List all ai-shell managed containers
    Ls,

    /// Show status for this workdir instance, or for TARGET
    Status {
        /// Container name, instance id (or unique prefix), or workdir path
        target: Option<String>,
    },

    /// Start the container for this workdir, or for TARGET
    Start {
        /// Container name, instance id (or unique prefix), or workdir path
        target: Option<String>,
    },

    /// Stop the container for this workdir, or for TARGET
    Stop {
        /// Container name, instance id (or unique prefix), or workdir path
        target: Option<String>,
    },

    /// Enter an interactive shell inside the container
    Enter {
        /// Container name, instance id (or unique prefix), or workdir path
        target: Option<String>,
    },

    /// Sanity-check cursor-agent, its config mount, and gh auth
    Check {
        /// Container name, instance id (or unique prefix), or workdir path
        target: Option<String>,
    },

    /// Remove the workdir container (or --nuke all ai-shell state)
    Rm {
        /// Container name, instance id (or unique prefix), or workdir path
        target: Option<String>,

        /// Also remove the associated /root volume
        #[arg(long)]
        volume: bool,

        /// Remove ALL managed containers, their volumes, and images they use
        #[arg(long, conflicts_with_all = ["target", "volume"])]
        nuke: bool,

        /// Skip the confirmation prompt (use with --nuke in scripts)
        #[arg(long, requires = "nuke")]
        yes: bool,
    },

    /// Manage ai-shell configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set the container runtime
    SetMode {
        /// docker or podman
        mode: String,
    },

    /// Set the default base image for builds
    SetDefaultBaseImage {
        /// Image reference or alias
        image: String,
    },

    /// Manage base image aliases
    Alias {
        #[command(subcommand)]
        command: AliasCommands,
    },
}

#[derive(Subcommand)]
pub enum AliasCommands {
    /// Set an alias for a base image
    Set { alias: String, image: String },

    /// Remove an alias
    Rm { alias: String },

    /// List aliases
    Ls,
}

// ABOUTME: Command handlers for the ai-shell CLI.
// ABOUTME: Each submodule implements one subcommand on top of the shared Context.

pub mod config;
mod context;

mod check;
mod enter;
mod instance;
mod lifecycle;
mod ls;
mod rm;
mod status;

pub use check::check;
pub use context::Context;
pub use enter::enter;
pub use instance::instance;
pub use lifecycle::{start, stop};
pub use ls::ls;
pub use rm::{nuke, rm};
pub use status::status;

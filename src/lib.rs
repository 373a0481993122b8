// ABOUTME: Library root for ai-shell: identity, target resolution, and the ownership guard.
// ABOUTME: The CLI binary in main.rs is a thin layer over these modules.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod identity;
pub mod labels;
pub mod managed;
pub mod output;
pub mod runtime;
pub mod types;

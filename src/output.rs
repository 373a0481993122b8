// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (scripting), and JSON output modes.

use serde::Serialize;
use std::io::IsTerminal;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output (only results and warnings)
    Quiet,
    /// JSON documents for scripting
    Json,
}

impl OutputMode {
    /// `--json` wins over `--quiet`.
    pub fn from_flags(quiet: bool, json: bool) -> Self {
        if json {
            OutputMode::Json
        } else if quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    color: bool,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            color: std::io::stderr().is_terminal(),
        }
    }

    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a result line. Shown in normal and quiet mode.
    pub fn line(&self, message: &str) {
        if self.mode != OutputMode::Json {
            println!("{message}");
        }
    }

    /// Print a success message.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => println!("{message}"),
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "success",
                    message,
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print a warning to stderr, highlighted when stderr is a terminal.
    pub fn warn(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                if self.color {
                    eprintln!("\x1b[33mwarning:\x1b[0m {message}");
                } else {
                    eprintln!("warning: {message}");
                }
            }
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "warning",
                    message,
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }

    /// Print a serializable record as pretty JSON.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> serde_json::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
}

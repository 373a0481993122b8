// ABOUTME: Canonical workdir paths and the context used to resolve them.
// ABOUTME: Expands ~, absolutizes, resolves symlinks, and requires a directory.

use serde::Serialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkdirError {
    #[error("workdir not found: {0}")]
    NotFound(PathBuf),

    #[error("workdir is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("cannot resolve workdir {path}: {reason}")]
    Resolution { path: PathBuf, reason: String },
}

/// Process-level facts needed to interpret a user-supplied path.
///
/// Built once at the binary boundary and threaded through, so resolution
/// never reads the environment behind the caller's back.
#[derive(Debug, Clone)]
pub struct PathContext {
    pub cwd: PathBuf,
    pub home: Option<PathBuf>,
}

impl PathContext {
    pub fn new(cwd: impl Into<PathBuf>, home: Option<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            home,
        }
    }

    /// Capture the current directory and the invoking user's home.
    pub fn from_env() -> Result<Self, WorkdirError> {
        let cwd = std::env::current_dir().map_err(|e| WorkdirError::Resolution {
            path: PathBuf::from("."),
            reason: format!("cannot determine current directory: {e}"),
        })?;
        Ok(Self {
            cwd,
            home: dirs::home_dir(),
        })
    }

    /// Expand a leading `~` or `~/` using the captured home directory.
    ///
    /// `~user` forms are left untouched.
    pub fn expand_user(&self, input: &str) -> Result<PathBuf, WorkdirError> {
        let rest = match input {
            "~" => "",
            s if s.starts_with("~/") => &s[2..],
            s => return Ok(PathBuf::from(s)),
        };
        let home = self.home.as_ref().ok_or_else(|| WorkdirError::Resolution {
            path: PathBuf::from(input),
            reason: "home directory is unknown".to_string(),
        })?;
        if rest.is_empty() {
            Ok(home.clone())
        } else {
            Ok(home.join(rest))
        }
    }

    /// Make `path` absolute against the captured current directory.
    pub fn absolutize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// An absolute, symlink-free path to an existing directory.
///
/// Two paths naming the same directory produce byte-identical values, which
/// is what makes the derived instance id stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalWorkdir(String);

impl CanonicalWorkdir {
    /// Canonicalize `input`; an empty input means the current directory.
    pub fn resolve(input: &str, ctx: &PathContext) -> Result<Self, WorkdirError> {
        let expanded = if input.trim().is_empty() {
            ctx.cwd.clone()
        } else {
            ctx.expand_user(input)?
        };
        let absolute = ctx.absolutize(&expanded);

        let real = std::fs::canonicalize(&absolute).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => WorkdirError::NotFound(absolute.clone()),
            _ => WorkdirError::Resolution {
                path: absolute.clone(),
                reason: e.to_string(),
            },
        })?;

        let meta = std::fs::metadata(&real).map_err(|e| WorkdirError::Resolution {
            path: real.clone(),
            reason: e.to_string(),
        })?;
        if !meta.is_dir() {
            return Err(WorkdirError::NotADirectory(real));
        }

        match real.into_os_string().into_string() {
            Ok(s) => Ok(Self(s)),
            Err(raw) => Err(WorkdirError::Resolution {
                path: PathBuf::from(raw),
                reason: "path is not valid UTF-8".to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for CanonicalWorkdir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalWorkdir {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

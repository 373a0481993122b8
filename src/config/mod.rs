// ABOUTME: Configuration for ai-shell: the user config file and per-invocation settings.
// ABOUTME: The config file is TOML under $XDG_CONFIG_HOME/ai-shell (or ~/.config/ai-shell).

mod settings;
mod validate;

pub use settings::{
    DEFAULT_CONTAINER_BASE, DEFAULT_IMAGE, DEFAULT_VOLUME_BASE, ENV_CONTAINER, ENV_IMAGE,
    ENV_VOLUME, Overrides, Settings,
};
pub use validate::{ValueError, validate_alias, validate_alias_key, validate_image_ref};

use crate::runtime::{ParseRuntimeTypeError, RuntimeConfig, RuntimeType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_DIR_NAME: &str = "ai-shell";
pub const CONFIG_FILENAME: &str = "config.toml";
pub const DEFAULT_BASE_IMAGE: &str = "python:3.12-slim";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot locate config directory: neither XDG_CONFIG_HOME nor a home directory is set")]
    NoConfigDir,

    #[error("failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config {path}: {source}")]
    Invalid { path: PathBuf, source: ValueError },

    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("failed to write config file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Mode(#[from] ParseRuntimeTypeError),

    #[error(transparent)]
    Value(#[from] ValueError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Contents of `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AppConfig {
    /// Container runtime; auto-detected when unset.
    #[serde(
        default,
        deserialize_with = "deserialize_mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub mode: Option<RuntimeType>,

    #[serde(default = "default_base_image")]
    pub default_base_image: String,

    /// Client timeout for runtime API requests.
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    #[serde(default)]
    pub base_image_aliases: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: None,
            default_base_image: default_base_image(),
            timeout: default_timeout(),
            base_image_aliases: BTreeMap::new(),
        }
    }
}

fn default_base_image() -> String {
    DEFAULT_BASE_IMAGE.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(120)
}

fn deserialize_mode<'de, D>(deserializer: D) -> std::result::Result<Option<RuntimeType>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl AppConfig {
    /// Parse and validate TOML text. `path` is only used in error messages.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config
            .normalize()
            .map_err(|source| ConfigError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load the file at `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text, path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Locate the config file and load it.
    pub fn discover() -> Result<(PathBuf, Self)> {
        let path = config_path()?;
        let config = Self::load(&path)?;
        Ok((path, config))
    }

    /// Validate, then write to `path` with owner-only permissions.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut config = self.clone();
        config.normalize()?;
        let text = config.to_toml()?;

        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(write_err)?;
        }
        write_private(path, text.as_bytes()).map_err(write_err)?;
        tracing::debug!(path = %path.display(), "wrote config");
        Ok(())
    }

    pub fn set_mode(&mut self, mode: &str) -> Result<()> {
        self.mode = Some(mode.parse()?);
        Ok(())
    }

    pub fn set_default_base_image(&mut self, image: &str) -> Result<()> {
        self.default_base_image = validate_image_ref(image)?;
        Ok(())
    }

    pub fn set_alias(&mut self, alias: &str, image: &str) -> Result<()> {
        let (alias, image) = validate_alias(alias, image)?;
        self.base_image_aliases.insert(alias, image);
        Ok(())
    }

    /// Remove an alias, reporting whether it existed.
    pub fn remove_alias(&mut self, alias: &str) -> bool {
        self.base_image_aliases.remove(alias.trim()).is_some()
    }

    /// Runtime selection for this config; no socket override is ever configured.
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            runtime: self.mode,
            socket: None,
        }
    }

    fn normalize(&mut self) -> std::result::Result<(), ValueError> {
        self.default_base_image = if self.default_base_image.trim().is_empty() {
            default_base_image()
        } else {
            validate_image_ref(&self.default_base_image)?
        };

        let mut aliases = BTreeMap::new();
        for (key, image) in &self.base_image_aliases {
            let (key, image) = validate_alias(key, image)?;
            aliases.insert(key, image);
        }
        self.base_image_aliases = aliases;
        Ok(())
    }
}

/// `$XDG_CONFIG_HOME/ai-shell/config.toml`, else `~/.config/ai-shell/config.toml`.
pub fn config_path() -> Result<PathBuf> {
    config_path_from(std::env::var_os("XDG_CONFIG_HOME"), dirs::home_dir())
}

/// Path resolution behind [`config_path`], with the inputs passed explicitly.
pub fn config_path_from(xdg_config_home: Option<OsString>, home: Option<PathBuf>) -> Result<PathBuf> {
    let base = xdg_config_home
        .filter(|v| !v.to_string_lossy().trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|h| h.join(".config")))
        .ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILENAME))
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation; tighten a pre-existing file too.
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    std::fs::write(path, contents)
}

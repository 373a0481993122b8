// ABOUTME: Per-invocation settings: base names and the workdir override.
// ABOUTME: Resolved flag -> environment -> default; blank values fall through.

pub const DEFAULT_CONTAINER_BASE: &str = "ai-agent-shell";
pub const DEFAULT_IMAGE: &str = "ai-agent-shell";
pub const DEFAULT_VOLUME_BASE: &str = "ai_agent_shell_home";

pub const ENV_CONTAINER: &str = "AI_SHELL_CONTAINER";
pub const ENV_IMAGE: &str = "AI_SHELL_IMAGE";
pub const ENV_VOLUME: &str = "AI_SHELL_VOLUME";

/// Values given on the command line, before any fallback is applied.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub container_base: Option<String>,
    pub image: Option<String>,
    pub volume_base: Option<String>,
    pub workdir: Option<String>,
}

/// Fully resolved naming settings for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub container_base: String,
    pub image: String,
    pub volume_base: String,
    /// Explicit `--workdir`; `None` means the current directory.
    pub workdir: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            container_base: DEFAULT_CONTAINER_BASE.to_string(),
            image: DEFAULT_IMAGE.to_string(),
            volume_base: DEFAULT_VOLUME_BASE.to_string(),
            workdir: None,
        }
    }
}

impl Settings {
    /// Apply `overrides`, then `env`, then the built-in defaults.
    ///
    /// `env` is a lookup function so callers decide where variables come from.
    pub fn resolve<F>(overrides: &Overrides, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |flag: &Option<String>, var: &str, default: &str| {
            non_blank(flag.as_deref())
                .or_else(|| non_blank(env(var).as_deref()))
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            container_base: pick(
                &overrides.container_base,
                ENV_CONTAINER,
                DEFAULT_CONTAINER_BASE,
            ),
            image: pick(&overrides.image, ENV_IMAGE, DEFAULT_IMAGE),
            volume_base: pick(&overrides.volume_base, ENV_VOLUME, DEFAULT_VOLUME_BASE),
            workdir: non_blank(overrides.workdir.as_deref()),
        }
    }

    /// [`Settings::resolve`] against the process environment.
    pub fn from_process_env(overrides: &Overrides) -> Self {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// The workdir argument to canonicalize; empty means the current directory.
    pub fn workdir_input(&self) -> &str {
        self.workdir.as_deref().unwrap_or("")
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let settings = Settings::resolve(&Overrides::default(), env_of(&[]));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn env_beats_default() {
        let settings = Settings::resolve(
            &Overrides::default(),
            env_of(&[(ENV_CONTAINER, "box"), (ENV_VOLUME, "home")]),
        );
        assert_eq!(settings.container_base, "box");
        assert_eq!(settings.volume_base, "home");
        assert_eq!(settings.image, DEFAULT_IMAGE);
    }

    #[test]
    fn flag_beats_env() {
        let overrides = Overrides {
            image: Some("custom:dev".to_string()),
            ..Default::default()
        };
        let settings = Settings::resolve(&overrides, env_of(&[(ENV_IMAGE, "from-env")]));
        assert_eq!(settings.image, "custom:dev");
    }

    #[test]
    fn blank_values_fall_through() {
        let overrides = Overrides {
            container_base: Some("   ".to_string()),
            workdir: Some(String::new()),
            ..Default::default()
        };
        let settings = Settings::resolve(&overrides, env_of(&[(ENV_CONTAINER, "")]));
        assert_eq!(settings.container_base, DEFAULT_CONTAINER_BASE);
        assert_eq!(settings.workdir, None);
        assert_eq!(settings.workdir_input(), "");
    }
}

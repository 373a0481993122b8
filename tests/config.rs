// ABOUTME: Integration tests for the config file and per-invocation settings.
// ABOUTME: Tests TOML parsing, validation, persistence, and path discovery.

use ai_shell::config::*;
use ai_shell::runtime::RuntimeType;
use std::path::{Path, PathBuf};
use std::time::Duration;

mod parsing {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml("", Path::new("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.default_base_image, DEFAULT_BASE_IMAGE);
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert!(config.mode.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
mode = "podman"
default-base-image = "ubuntu:24.04"
timeout = "30s"

[base-image-aliases]
py = "python:3.12-slim"
node = " node:22 "
"#;
        let config = AppConfig::from_toml(toml, Path::new("config.toml")).unwrap();

        assert_eq!(config.mode, Some(RuntimeType::Podman));
        assert_eq!(config.default_base_image, "ubuntu:24.04");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.base_image_aliases["node"], "node:22");
        assert_eq!(config.base_image_aliases.len(), 2);
    }

    #[test]
    fn blank_mode_means_auto_detect() {
        let config = AppConfig::from_toml("mode = \"  \"", Path::new("c.toml")).unwrap();
        assert!(config.mode.is_none());
    }

    #[test]
    fn invalid_mode_is_rejected() {
        let err = AppConfig::from_toml("mode = \"lxc\"", Path::new("c.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got {err:?}");
        assert!(err.to_string().contains("c.toml"));
    }

    #[test]
    fn invalid_alias_key_names_the_file() {
        let toml = "[base-image-aliases]\n\"-bad\" = \"alpine\"\n";

        let err = AppConfig::from_toml(toml, Path::new("/x/config.toml")).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { .. }), "got {err:?}");
        assert!(err.to_string().contains("/x/config.toml"));
    }
}

mod editing {
    use super::*;

    #[test]
    fn setters_validate_input() {
        let mut config = AppConfig::default();

        assert!(config.set_mode("docker").is_ok());
        assert_eq!(config.mode, Some(RuntimeType::Docker));
        assert!(matches!(config.set_mode("rkt"), Err(ConfigError::Mode(_))));

        assert!(config.set_default_base_image("has space:1").is_err());
        assert!(config.set_alias("ok_alias-1", "alpine:3").is_ok());
        assert!(config.set_alias("bad alias", "alpine:3").is_err());
    }

    #[test]
    fn remove_alias_reports_presence() {
        let mut config = AppConfig::default();
        config.set_alias("py", "python:3.12").unwrap();

        assert!(config.remove_alias("py"));
        assert!(!config.remove_alias("py"));
    }
}

mod persistence {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = AppConfig::load(&dir.path().join("nope.toml")).unwrap();

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ai-shell").join("config.toml");
        let mut config = AppConfig::default();
        config.set_mode("podman").unwrap();
        config.set_alias("py", "python:3.12-slim").unwrap();

        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        AppConfig::default().save(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn discover_uses_xdg_config_home() {
        let dir = tempfile::tempdir().unwrap();
        let expected = dir.path().join("ai-shell").join("config.toml");
        std::fs::create_dir_all(expected.parent().unwrap()).unwrap();
        std::fs::write(&expected, "mode = \"docker\"\n").unwrap();

        temp_env::with_var("XDG_CONFIG_HOME", Some(dir.path()), || {
            let (path, config) = AppConfig::discover().unwrap();
            assert_eq!(path, expected);
            assert_eq!(config.mode, Some(RuntimeType::Docker));
        });
    }
}

mod paths {
    use super::*;

    #[test]
    fn xdg_wins_over_home() {
        let path = config_path_from(Some("/xdg".into()), Some(PathBuf::from("/home/u"))).unwrap();
        assert_eq!(path, PathBuf::from("/xdg/ai-shell/config.toml"));
    }

    #[test]
    fn blank_xdg_falls_back_to_home() {
        let path = config_path_from(Some(" ".into()), Some(PathBuf::from("/home/u"))).unwrap();
        assert_eq!(path, PathBuf::from("/home/u/.config/ai-shell/config.toml"));
    }

    #[test]
    fn neither_is_an_error() {
        assert!(matches!(
            config_path_from(None, None),
            Err(ConfigError::NoConfigDir)
        ));
    }
}

mod settings {
    use super::*;

    fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn flag_beats_env_beats_default() {
        let overrides = Overrides {
            container_base: Some("flagbox".to_string()),
            ..Default::default()
        };
        let env = env_of(&[(ENV_CONTAINER, "envbox"), (ENV_IMAGE, "envimage")]);

        let settings = Settings::resolve(&overrides, env);

        assert_eq!(settings.container_base, "flagbox");
        assert_eq!(settings.image, "envimage");
        assert_eq!(settings.volume_base, DEFAULT_VOLUME_BASE);
    }

    #[test]
    fn process_env_is_read() {
        temp_env::with_var(ENV_VOLUME, Some("custom_home"), || {
            let settings = Settings::from_process_env(&Overrides::default());
            assert_eq!(settings.volume_base, "custom_home");
        });
    }
}

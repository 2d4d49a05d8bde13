use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Site-level settings consumed by the decoration pipeline.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Root directory holding the authored content fragments.
    pub content_root: PathBuf,
    /// Path of the navigation fragment, resolved by the fragment source.
    #[serde(default = "default_nav_path")]
    pub nav_path: String,
    /// Viewport width (logical pixels) at which the layout switches to wide
    /// mode. Hosts feed this to the engine's
    /// `ViewportObserver::with_breakpoint` when building the header.
    #[serde(default = "default_wide_breakpoint")]
    pub wide_breakpoint: f64,
}

fn default_nav_path() -> String {
    "/nav".to_string()
}

fn default_wide_breakpoint() -> f64 {
    900.0
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded content root
        config.content_root = Self::expand_path(&config.content_root).unwrap_or(config.content_root);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/foliate");
        PathBuf::from(config_dir.as_ref()).join("foliate.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        // Should contain the expected config file name
        assert!(path_str.ends_with(".config/foliate/foliate.toml"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            content_root: PathBuf::from("/tmp/test-content"),
            nav_path: "/site/nav".to_string(),
            wide_breakpoint: 1024.0,
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original.content_root, deserialized.content_root);
        assert_eq!(original.nav_path, deserialized.nav_path);
        assert_eq!(original.wide_breakpoint, deserialized.wide_breakpoint);
    }

    #[test]
    fn test_defaults_applied_when_absent() {
        let config_content = r#"
content_root = "/srv/site"
"#;

        let config: Config = toml::from_str(config_content).unwrap();

        assert_eq!(config.nav_path, "/nav");
        assert_eq!(config.wide_breakpoint, 900.0);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("FOLIATE_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$FOLIATE_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert_eq!(expanded, PathBuf::from("/test/env/path/subdir"));

        unsafe {
            env::remove_var("FOLIATE_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("foliate.toml");
        let test_config = Config {
            content_root: PathBuf::from("/tmp/test-content"),
            nav_path: "/nav".to_string(),
            wide_breakpoint: 900.0,
        };

        // Test saving
        test_config.save_to_path(&config_file).unwrap();

        // Test loading
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config.content_root, test_config.content_root);
        assert_eq!(loaded_config.nav_path, test_config.nav_path);
        assert_eq!(loaded_config.wide_breakpoint, test_config.wide_breakpoint);
    }

    #[test]
    fn test_config_with_tilde_in_toml() {
        let config_content = r#"
content_root = "~/test/content"
"#;

        let mut config: Config = toml::from_str(config_content).unwrap();
        config.content_root =
            Config::expand_path(&config.content_root).unwrap_or(config.content_root);

        let expanded_path = config.content_root.to_string_lossy();
        assert!(!expanded_path.starts_with('~'));
        assert!(expanded_path.contains("test/content"));
    }
}

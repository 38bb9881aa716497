//! Configuration management for retrace.
//!
//! Loads `config.toml` from the path discovered by [`crate::paths::discover`],
//! with optional CLI override via `--config`.
//!
//! # Architecture
//!
//! 1. **Startup** calls [`crate::paths::discover`] to find the `.retrace/` directory
//! 2. [`Config::load_with_overrides`] picks the config path: CLI override > discovered > defaults
//! 3. The [`Config`] is handed to [`SymbolProvider`](crate::SymbolProvider) when building the outline
//!
//! # Testing
//!
//! Tests use [`Config::load()`] with explicit paths to temporary directories.

use crate::outline::SymbolKind;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Global configuration, loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// File name of the symbol rules file, relative to the workspace root.
    #[serde(default = "default_rules_file")]
    pub rules_file: String,

    /// Include the built-in comment tag rule (`// TODO: ...`).
    #[serde(default = "default_builtin_rules")]
    pub builtin_rules: bool,

    /// Kind given to symbols whose rule names none.
    pub default_kind: SymbolKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules_file: default_rules_file(),
            builtin_rules: default_builtin_rules(),
            default_kind: SymbolKind::default(),
        }
    }
}

fn default_rules_file() -> String {
    ".symbol-rules".to_string()
}

fn default_builtin_rules() -> bool {
    true
}

impl Config {
    /// Read and deserialize a TOML config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration with priority: CLI override > discovered path > defaults.
    pub fn load_with_overrides(
        cli_override: Option<&Path>,
        discovered_path: Option<&Path>,
    ) -> Result<Self> {
        if let Some(path) = cli_override {
            return Self::load(path);
        }
        if let Some(path) = discovered_path {
            return Self::load(path);
        }
        Self::load_embedded()
    }

    fn load_embedded() -> Result<Self> {
        let source = include_str!("../../config.toml");
        toml::from_str(source).context("Failed to parse embedded config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_empty_config() {
        let tmp_dir = tempdir().unwrap();
        let config_path = tmp_dir.path().join("config.toml");
        std::fs::write(&config_path, "").unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn loads_all_fields() {
        let tmp_dir = tempdir().unwrap();
        let config_path = tmp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "rules_file = \"outline.rules\"\nbuiltin_rules = false\ndefault_kind = \"Function\"\n",
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.rules_file, "outline.rules");
        assert!(!config.builtin_rules);
        assert_eq!(config.default_kind, SymbolKind::Function);
    }

    #[test]
    fn errors_on_invalid_toml() {
        let tmp_dir = tempdir().unwrap();
        let config_path = tmp_dir.path().join("config.toml");
        std::fs::write(&config_path, "invalid toml {{{{").unwrap();

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse"));
    }

    #[test]
    fn errors_on_unknown_field() {
        let tmp_dir = tempdir().unwrap();
        let config_path = tmp_dir.path().join("config.toml");
        std::fs::write(&config_path, "history_limit = 3").unwrap();

        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn errors_on_nonexistent_file() {
        let tmp_dir = tempdir().unwrap();
        let config_path = tmp_dir.path().join("nonexistent.toml");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read"));
    }

    #[test]
    fn cli_override_takes_priority() {
        let tmp_dir = tempdir().unwrap();
        let cli_path = tmp_dir.path().join("cli.toml");
        let discovered_path = tmp_dir.path().join("discovered.toml");
        std::fs::write(&cli_path, "rules_file = \"cli.rules\"").unwrap();
        std::fs::write(&discovered_path, "rules_file = \"found.rules\"").unwrap();

        let config = Config::load_with_overrides(Some(&cli_path), Some(&discovered_path)).unwrap();
        assert_eq!(config.rules_file, "cli.rules");
    }

    #[test]
    fn discovered_path_used_without_override() {
        let tmp_dir = tempdir().unwrap();
        let discovered_path = tmp_dir.path().join("discovered.toml");
        std::fs::write(&discovered_path, "builtin_rules = false").unwrap();

        let config = Config::load_with_overrides(None, Some(&discovered_path)).unwrap();
        assert!(!config.builtin_rules);
    }

    #[test]
    fn embedded_config_matches_defaults() {
        let config = Config::load_with_overrides(None, None).unwrap();
        assert_eq!(config, Config::default());
    }
}

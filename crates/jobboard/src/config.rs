// File: src/config.rs
// Purpose: Configuration parsing from jobboard.toml

use anyhow::{Context, Result};
use jobboard_router::RouterOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "jobboard.toml";

/// Environment variable overriding `routing.base_path`
pub const BASE_PATH_ENV: &str = "JOBBOARD_BASE_PATH";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingConfig {
    /// Path the application is served under (default: "/")
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Whether literal segments match case-insensitively (default: false)
    #[serde(default = "default_false")]
    pub case_insensitive: bool,

    /// Whether a trailing slash makes a different path (default: false)
    #[serde(default = "default_false")]
    pub trailing_slash: bool,
}

fn default_base_path() -> String {
    "/".to_string()
}

fn default_false() -> bool {
    false
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            case_insensitive: false,
            trailing_slash: false,
        }
    }
}

impl RoutingConfig {
    pub fn router_options(&self) -> RouterOptions {
        RouterOptions::default()
            .with_case_sensitivity(self.case_insensitive)
            .with_strict_trailing_slash(self.trailing_slash)
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// A missing or blank file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!(?path, "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from ./jobboard.toml, then apply environment overrides
    pub fn load_default() -> Result<Self> {
        let config = Self::load(DEFAULT_CONFIG_PATH)?;
        Ok(config.with_base_path_override(std::env::var(BASE_PATH_ENV).ok()))
    }

    /// Replaces the base path when an override is present and non-blank
    pub fn with_base_path_override(mut self, base_path: Option<String>) -> Self {
        if let Some(base_path) = base_path.filter(|b| !b.trim().is_empty()) {
            tracing::info!(%base_path, "base path overridden from environment");
            self.routing.base_path = base_path;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.routing.base_path, "/");
        assert!(!config.routing.case_insensitive);
        assert!(!config.routing.trailing_slash);
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap_or_default();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_custom_routing() {
        let toml = r#"
            [routing]
            base_path = "/careers/"
            case_insensitive = true
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.routing.base_path, "/careers/");
        assert!(config.routing.case_insensitive);
        assert!(!config.routing.trailing_slash);

        let options = config.routing.router_options();
        assert!(options.case_insensitive);
        assert!(!options.strict);
    }

    #[test]
    fn test_base_path_override() {
        let config = Config::default().with_base_path_override(Some("/board".to_string()));
        assert_eq!(config.routing.base_path, "/board");

        let config = config.with_base_path_override(Some("  ".to_string()));
        assert_eq!(config.routing.base_path, "/board");

        let config = config.with_base_path_override(None);
        assert_eq!(config.routing.base_path, "/board");
    }
}

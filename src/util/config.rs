//! Configuration file support for fotno.
//!
//! Repository-wide defaults live in `.fotno/config.toml` at the repository
//! root:
//!
//! ```toml
//! [format-manifests]
//! source = "packages"
//! clean = true
//! reorder = true
//! dep-locations = true
//! ```
//!
//! Command-line flags take precedence over the file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::fs;

/// fotno configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `format-manifests` settings
    #[serde(rename = "format-manifests")]
    pub format_manifests: FormatManifestsConfig,
}

/// Defaults for `fotno format-manifests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FormatManifestsConfig {
    /// Directory searched for manifests, relative to the repository root
    pub source: Option<String>,

    /// Strip unsupported manifest properties
    pub clean: bool,

    /// Sort properties and dependency names
    pub reorder: bool,

    /// Point dependencies at their package locations
    pub dep_locations: bool,
}

impl Default for FormatManifestsConfig {
    fn default() -> Self {
        FormatManifestsConfig {
            source: None,
            clean: true,
            reorder: true,
            dep_locations: true,
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.format_manifests.source.is_none());
        assert!(config.format_manifests.clean);
        assert!(config.format_manifests.reorder);
        assert!(config.format_manifests.dep_locations);
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[format-manifests]
source = "platform"
reorder = false
dep-locations = false
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.format_manifests.source, Some("platform".to_string()));
        assert!(config.format_manifests.clean); // Not set, keeps default
        assert!(!config.format_manifests.reorder);
        assert!(!config.format_manifests.dep_locations);
    }

    #[test]
    fn test_config_empty_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "").unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.format_manifests, FormatManifestsConfig::default());
    }

    #[test]
    fn test_config_load_or_default_missing() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_or_default(&tmp.path().join("missing.toml"));
        assert_eq!(config.format_manifests, FormatManifestsConfig::default());
    }

    #[test]
    fn test_config_load_or_default_invalid() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[format-manifests]\nclean = \"yes please\"\n").unwrap();

        assert!(Config::load(&config_path).is_err());
        let config = Config::load_or_default(&config_path);
        assert!(config.format_manifests.clean);
    }
}

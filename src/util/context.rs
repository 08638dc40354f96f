//! Global context for fotno operations.
//!
//! Provides centralized access to the repository root, configuration paths
//! and loaded configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::Config;

/// Name of the per-repository fotno directory.
pub const PROJECT_DIR_NAME: &str = ".fotno";

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Repository root (defaults to cwd)
    root: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        Ok(GlobalContext {
            root: cwd.clone(),
            cwd,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        GlobalContext {
            root: cwd.clone(),
            cwd,
        }
    }

    /// Use a different repository root. Relative paths resolve against cwd.
    pub fn with_root(mut self, root: impl AsRef<Path>) -> Self {
        self.root = self.cwd.join(root);
        self
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the repository-local fotno directory.
    pub fn project_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR_NAME)
    }

    /// Get the repository configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.project_dir().join("config.toml")
    }

    /// Load the repository configuration, falling back to defaults.
    pub fn config(&self) -> Config {
        Config::load_or_default(&self.config_path())
    }
}

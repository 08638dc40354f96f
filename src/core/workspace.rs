//! Workspace - the monorepo being formatted.
//!
//! A Workspace ties together the repository root, which holds the package
//! roots, and the source directory searched for manifests.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::{DirEntry, WalkDir};

use crate::core::locations::PackageLocations;
use crate::core::manifest::MANIFEST_FILE_NAME;

/// Default directory, relative to the repository root, searched for manifests.
pub const DEFAULT_SOURCE: &str = "packages";

/// A monorepo checkout.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Repository root
    root: PathBuf,

    /// Manifest search directory, relative to `root`
    source: PathBuf,
}

impl Workspace {
    /// Create a workspace searching the default source directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Workspace {
            root: root.into(),
            source: PathBuf::from(DEFAULT_SOURCE),
        }
    }

    /// Use a different manifest search directory.
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    /// Get the repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the source directory as configured.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Get the absolute source directory.
    pub fn source_dir(&self) -> PathBuf {
        self.root.join(&self.source)
    }

    /// Find every `fonto-manifest.json` below the source directory.
    ///
    /// The walk is sorted by file name so the order is stable for a given
    /// directory tree. Hidden directories are not entered. A missing source
    /// directory yields no manifests.
    pub fn find_manifests(&self) -> Result<Vec<PathBuf>> {
        let source_dir = self.source_dir();
        if !source_dir.is_dir() {
            tracing::debug!("source directory does not exist: {}", source_dir.display());
            return Ok(Vec::new());
        }

        let mut manifests = Vec::new();
        let walker = WalkDir::new(&source_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = entry
                .with_context(|| format!("failed to walk directory: {}", source_dir.display()))?;
            if entry.file_type().is_file() && entry.file_name() == MANIFEST_FILE_NAME {
                manifests.push(entry.into_path());
            }
        }

        Ok(manifests)
    }

    /// Build the package location index for this repository.
    pub fn package_locations(&self) -> Result<PackageLocations> {
        PackageLocations::discover(&self.root)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

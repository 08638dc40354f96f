//! Package location index.
//!
//! Maps every package in the monorepo to the location dependencies should
//! point at, e.g. `my-extension` -> `packages/my-extension`.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use glob::{glob_with, MatchOptions, Pattern};

/// Root folders scanned for packages, in index construction order.
///
/// `platform-linked` is deliberately absent: no package may depend on it.
pub const PACKAGE_ROOTS: [&str; 3] = ["packages", "packages-shared", "platform"];

/// Package name -> corrected relative location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageLocations {
    locations: BTreeMap<String, String>,
}

impl PackageLocations {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan the immediate subdirectories of each package root under `repo_root`.
    ///
    /// Missing roots are ignored. When a name occurs under several roots the
    /// root scanned last wins.
    pub fn discover(repo_root: &Path) -> Result<Self> {
        let mut index = PackageLocations::new();
        let options = MatchOptions {
            require_literal_leading_dot: true,
            ..MatchOptions::new()
        };

        for root in PACKAGE_ROOTS {
            let pattern = format!(
                "{}/{}/*",
                Pattern::escape(&repo_root.to_string_lossy()),
                root
            );

            for entry in glob_with(&pattern, options)
                .with_context(|| format!("invalid glob pattern: {}", pattern))?
            {
                let path = match entry {
                    Ok(path) => path,
                    Err(e) => {
                        tracing::warn!("glob error: {}", e);
                        continue;
                    }
                };

                if !path.is_dir() {
                    continue;
                }

                if let Some(name) = path.file_name() {
                    index.insert(root, &name.to_string_lossy());
                }
            }
        }

        tracing::debug!("Found {} package locations", index.len());
        Ok(index)
    }

    /// Record `name` as living under `root`, replacing any earlier location.
    pub fn insert(&mut self, root: &str, name: &str) {
        let location = format!("{}/{}", root, name);
        if let Some(previous) = self.locations.insert(name.to_string(), location) {
            tracing::debug!(
                "Package `{}` found in several roots, `{}/{}` replaces `{}`",
                name,
                root,
                name,
                previous
            );
        }
    }

    /// Corrected location for a package, if it is known.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.locations.get(name).map(String::as_str)
    }

    /// Check whether a package is known.
    pub fn contains(&self, name: &str) -> bool {
        self.locations.contains_key(name)
    }

    /// Number of known packages.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether no packages were found.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

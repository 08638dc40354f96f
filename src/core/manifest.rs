//! `fonto-manifest.json` parsing and property selection.
//!
//! A manifest is an arbitrary JSON object. Only two of its top-level
//! properties are officially supported (`dependencies` and
//! `devDependencies`); everything else is a candidate for removal when the
//! manifest is cleaned.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

/// File name of a package manifest.
pub const MANIFEST_FILE_NAME: &str = "fonto-manifest.json";

/// Top-level properties kept when a manifest is cleaned, in output order.
pub const SUPPORTED_PROPERTIES: [&str; 2] = ["dependencies", "devDependencies"];

/// Properties whose value maps package names to versions or locations.
pub const DEPENDENCY_PROPERTIES: [&str; 2] = ["dependencies", "devDependencies"];

/// Errors raised while loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "invalid JSON in {} at line {line}, column {column}: {message}",
        path.display()
    )]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
        /// Raw file contents, kept for rendering the diagnostic.
        contents: String,
    },

    #[error("manifest is not valid UTF-8: {} (invalid byte at offset {valid_up_to})", path.display())]
    InvalidEncoding { path: PathBuf, valid_up_to: usize },

    #[error("manifest is not a JSON object: {}", path.display())]
    NotAnObject { path: PathBuf },
}

impl ManifestError {
    /// Whether the manifest should be skipped rather than aborting the run.
    ///
    /// Encoding, syntax and shape problems only affect one manifest; failing
    /// to read the file at all is treated as an I/O failure of the whole run.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            ManifestError::Parse { .. }
                | ManifestError::InvalidEncoding { .. }
                | ManifestError::NotAnObject { .. }
        )
    }
}

/// A loaded manifest: its location on disk and its top-level properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    path: PathBuf,
    properties: Map<String, Value>,
}

impl Manifest {
    /// Read and parse a manifest file. Always reads from disk.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let bytes = std::fs::read(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let contents = String::from_utf8(bytes).map_err(|e| ManifestError::InvalidEncoding {
            path: path.to_path_buf(),
            valid_up_to: e.utf8_error().valid_up_to(),
        })?;
        Self::parse(path, &contents)
    }

    /// Parse manifest text that was read from `path`.
    ///
    /// A leading byte order mark is ignored.
    pub fn parse(path: &Path, contents: &str) -> Result<Self, ManifestError> {
        let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
        let value: Value = serde_json::from_str(contents).map_err(|e| ManifestError::Parse {
            path: path.to_path_buf(),
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
            contents: contents.to_string(),
        })?;

        match value {
            Value::Object(properties) => Ok(Manifest {
                path: path.to_path_buf(),
                properties,
            }),
            _ => Err(ManifestError::NotAnObject {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Create a manifest from already-built properties.
    pub fn from_properties(path: impl Into<PathBuf>, properties: Map<String, Value>) -> Self {
        Manifest {
            path: path.into(),
            properties,
        }
    }

    /// Path the manifest was loaded from (and is written back to).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Top-level properties, in file order.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Look up a top-level property.
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.properties.get(property)
    }

    /// Name of the directory containing the manifest.
    pub fn package_dir_name(&self) -> String {
        package_dir_name(&self.path)
    }

    /// Select the top-level properties that survive formatting.
    ///
    /// Clean mode keeps the allowlisted properties present in the manifest,
    /// otherwise every original key is kept. With `reorder` the result is
    /// sorted alphabetically.
    pub fn included_properties(&self, clean: bool, reorder: bool) -> Vec<String> {
        let mut included: Vec<String> = if clean {
            SUPPORTED_PROPERTIES
                .iter()
                .filter(|p| self.properties.contains_key(**p))
                .map(|p| p.to_string())
                .collect()
        } else {
            self.properties.keys().cloned().collect()
        };

        if reorder {
            included.sort();
        }

        included
    }
}

/// Whether `property` holds a dependency map.
pub fn is_dependency_property(property: &str) -> bool {
    DEPENDENCY_PROPERTIES.contains(&property)
}

/// Name of the directory containing `manifest_path`, used when reporting.
pub fn package_dir_name(manifest_path: &Path) -> String {
    manifest_path
        .parent()
        .and_then(|dir| dir.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

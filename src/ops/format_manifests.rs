//! Implementation of `fotno format-manifests`.
//!
//! Every manifest under the source directory goes through the same cycle:
//! load, select properties, run the dependency transforms, write back with
//! tab indentation. A manifest that cannot be parsed is skipped and left
//! untouched; the run carries on with the next one.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::core::locations::PackageLocations;
use crate::core::manifest::{is_dependency_property, package_dir_name, Manifest, ManifestError};
use crate::core::Workspace;
use crate::util::diagnostic::render_manifest_error;
use crate::util::fs::{self, LINE_ENDING};
use crate::util::shell::{Shell, Status};

/// Options for formatting manifests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Strip properties outside the supported allowlist
    pub clean: bool,

    /// Sort top-level properties and dependency names
    pub reorder: bool,

    /// Rewrite dependency values to the package's actual location
    pub dep_locations: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            clean: true,
            reorder: true,
            dep_locations: true,
        }
    }
}

impl FormatOptions {
    /// Transforms applied to each dependency map, in order.
    pub fn transforms(&self) -> Vec<Transform> {
        let mut transforms = Vec::new();
        if self.reorder {
            transforms.push(Transform::Reorder);
        }
        if self.dep_locations {
            transforms.push(Transform::RewriteLocations);
        }
        transforms
    }
}

/// A transformation of a dependency map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Sort dependency names.
    Reorder,
    /// Point known packages at their location in the repository.
    RewriteLocations,
}

impl Transform {
    /// Apply this transform.
    pub fn apply(self, locations: &PackageLocations, deps: Map<String, Value>) -> Map<String, Value> {
        match self {
            Transform::Reorder => reorder_keys(deps),
            Transform::RewriteLocations => rewrite_locations(locations, deps),
        }
    }
}

/// Rebuild `map` with its keys in lexicographic order.
pub fn reorder_keys(map: Map<String, Value>) -> Map<String, Value> {
    let mut entries: Vec<(String, Value)> = map.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries.into_iter().collect()
}

/// Replace the value of every known package with its location.
///
/// Values are replaced in place, so key order is unchanged. Unknown names
/// (external packages) keep their value.
pub fn rewrite_locations(
    locations: &PackageLocations,
    mut deps: Map<String, Value>,
) -> Map<String, Value> {
    for (name, value) in deps.iter_mut() {
        if let Some(location) = locations.get(name) {
            *value = Value::String(location.to_string());
        }
    }
    deps
}

/// Run every transform over a dependency property value.
///
/// Values that are not objects pass through unchanged.
fn transform_dependencies(
    transforms: &[Transform],
    locations: &PackageLocations,
    value: Value,
) -> Value {
    match value {
        Value::Object(deps) => Value::Object(
            transforms
                .iter()
                .fold(deps, |deps, transform| transform.apply(locations, deps)),
        ),
        other => other,
    }
}

/// Properties with these values are dropped from the output.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn is_empty_collection(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Produce the formatted version of a manifest.
pub fn transform_manifest(
    manifest: &Manifest,
    opts: &FormatOptions,
    locations: &PackageLocations,
) -> Manifest {
    let transforms = opts.transforms();
    let mut formatted = Map::new();

    for property in manifest.included_properties(opts.clean, opts.reorder) {
        let Some(value) = manifest.get(&property) else {
            continue;
        };
        if is_falsy(value) {
            continue;
        }

        let value = if is_dependency_property(&property) {
            transform_dependencies(&transforms, locations, value.clone())
        } else {
            value.clone()
        };

        if is_empty_collection(&value) {
            continue;
        }

        formatted.insert(property, value);
    }

    Manifest::from_properties(manifest.path(), formatted)
}

/// Serialize properties as tab-indented JSON followed by a line terminator.
pub fn render_manifest(properties: &Map<String, Value>) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    properties.serialize(&mut ser)?;

    let mut text = String::from_utf8(buf)?;
    text.push_str(LINE_ENDING);
    Ok(text)
}

/// Overwrite the manifest's file with its formatted contents.
pub fn write_manifest(manifest: &Manifest) -> Result<()> {
    let text = render_manifest(manifest.properties())?;
    fs::write_string(manifest.path(), &text)
}

/// What happened to a single manifest.
#[derive(Debug)]
pub enum ManifestOutcome {
    /// The manifest was formatted and written back.
    Rewrote { path: PathBuf, package: String },
    /// The manifest could not be parsed and was not touched.
    Skipped {
        path: PathBuf,
        package: String,
        error: ManifestError,
    },
}

impl ManifestOutcome {
    /// Path of the manifest.
    pub fn path(&self) -> &Path {
        match self {
            ManifestOutcome::Rewrote { path, .. } | ManifestOutcome::Skipped { path, .. } => path,
        }
    }

    /// Name of the directory containing the manifest.
    pub fn package(&self) -> &str {
        match self {
            ManifestOutcome::Rewrote { package, .. } | ManifestOutcome::Skipped { package, .. } => {
                package
            }
        }
    }

    /// Check if the manifest was skipped.
    pub fn is_skipped(&self) -> bool {
        matches!(self, ManifestOutcome::Skipped { .. })
    }
}

/// Result of a formatting run.
#[derive(Debug, Default)]
pub struct FormatReport {
    /// One outcome per manifest, in processing order
    pub outcomes: Vec<ManifestOutcome>,
}

impl FormatReport {
    /// Number of manifests written back.
    pub fn rewritten(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_skipped()).count()
    }

    /// Number of manifests skipped.
    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }
}

/// Format a single manifest file in place.
///
/// Parse failures become a `Skipped` outcome; read and write failures are
/// returned as errors.
pub fn format_manifest(
    path: &Path,
    opts: &FormatOptions,
    locations: &PackageLocations,
) -> Result<ManifestOutcome> {
    let package = package_dir_name(path);

    let manifest = match Manifest::load(path) {
        Ok(manifest) => manifest,
        Err(error) if error.is_skippable() => {
            tracing::debug!("Skipping {}: {}", path.display(), error);
            return Ok(ManifestOutcome::Skipped {
                path: path.to_path_buf(),
                package,
                error,
            });
        }
        Err(error) => return Err(error.into()),
    };

    let formatted = transform_manifest(&manifest, opts, locations);
    write_manifest(&formatted)?;

    Ok(ManifestOutcome::Rewrote {
        path: path.to_path_buf(),
        package,
    })
}

/// Format every manifest in the workspace, reporting progress to `shell`.
pub fn format_manifests(ws: &Workspace, opts: &FormatOptions, shell: &Shell) -> Result<FormatReport> {
    tracing::debug!("Looking for fonto-manifest.json files");
    let manifests = ws.find_manifests()?;
    tracing::debug!(
        "Formatting {} manifest files in \"{}\".",
        manifests.len(),
        ws.source().display()
    );

    if !opts.reorder {
        tracing::debug!("Not reordering property names");
    }
    if !opts.dep_locations {
        tracing::debug!("Not rewriting dependency locations");
    }
    if !opts.clean {
        tracing::debug!("Not cleaning up unsupported manifest properties");
    }

    let locations = if opts.dep_locations {
        ws.package_locations()?
    } else {
        PackageLocations::new()
    };

    let mut report = FormatReport::default();
    for path in &manifests {
        let outcome = format_manifest(path, opts, &locations)?;
        report_outcome(ws, shell, &outcome);
        report.outcomes.push(outcome);
    }

    Ok(report)
}

fn report_outcome(ws: &Workspace, shell: &Shell, outcome: &ManifestOutcome) {
    let manifest = fs::display_slash(&fs::relative_path(ws.root(), outcome.path()));

    match outcome {
        ManifestOutcome::Rewrote { package, .. } => {
            shell.status(Status::Rewrote, package);
            shell.json_event(&serde_json::json!({
                "reason": "manifest-rewritten",
                "package": package,
                "manifest": manifest,
            }));
        }
        ManifestOutcome::Skipped { package, error, .. } => {
            shell.status(Status::Skip, package);
            shell.diagnostic(&render_manifest_error(package, error, shell.use_color()));
            shell.json_event(&serde_json::json!({
                "reason": "manifest-skipped",
                "package": package,
                "manifest": manifest,
                "message": error.to_string(),
            }));
        }
    }
}

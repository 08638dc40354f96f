//! Core data structures for fotno.

pub mod locations;
pub mod manifest;
pub mod workspace;

pub use locations::{PackageLocations, PACKAGE_ROOTS};
pub use manifest::{Manifest, ManifestError, MANIFEST_FILE_NAME, SUPPORTED_PROPERTIES};
pub use workspace::{Workspace, DEFAULT_SOURCE};

//! fotno - monorepo tooling for fonto manifests
//!
//! This crate provides the library behind `fotno format-manifests`:
//! locating `fonto-manifest.json` files, indexing package locations, and
//! rewriting manifests into their canonical form.

pub mod core;
pub mod ops;
pub mod util;

/// Test utilities for fotno unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It builds temporary monorepo layouts on disk.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{Manifest, ManifestError, PackageLocations, Workspace};

pub use ops::{FormatOptions, FormatReport};
pub use util::context::GlobalContext;

//! High-level operations.
//!
//! This module contains the implementation of fotno commands.

pub mod format_manifests;

pub use format_manifests::{
    format_manifest, format_manifests, FormatOptions, FormatReport, ManifestOutcome, Transform,
};

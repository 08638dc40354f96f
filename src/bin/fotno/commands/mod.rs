//! Command implementations

pub mod format_manifests;

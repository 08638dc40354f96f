//! Test utilities for fotno unit tests.
//!
//! Builds throwaway monorepo layouts on disk so discovery and formatting can
//! be exercised against a real filesystem.
//!
//! # Example
//!
//! ```rust,ignore
//! use fotno::test_support::MonorepoFixture;
//!
//! let repo = MonorepoFixture::new()
//!     .package("packages-shared", "ui")
//!     .manifest("packages/app/fonto-manifest.json", r#"{"dependencies":{"ui":""}}"#);
//! ```

pub mod fixtures;

pub use fixtures::*;

//! Monorepo fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary monorepo checkout.
///
/// The directory is removed when the fixture is dropped.
#[derive(Debug)]
pub struct MonorepoFixture {
    dir: TempDir,
}

impl MonorepoFixture {
    /// Create an empty repository.
    pub fn new() -> Self {
        MonorepoFixture {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Repository root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a repository-relative path.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Create an (empty) package directory under `root`.
    pub fn package(self, root: &str, name: &str) -> Self {
        fs::create_dir_all(self.path(root).join(name)).unwrap();
        self
    }

    /// Write a file, creating parent directories.
    pub fn file(self, relative: &str, contents: &str) -> Self {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
        self
    }

    /// Write raw bytes, creating parent directories.
    pub fn bytes(self, relative: &str, contents: &[u8]) -> Self {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
        self
    }

    /// Write a manifest. The containing directory doubles as a package.
    pub fn manifest(self, relative: &str, contents: &str) -> Self {
        self.file(relative, contents)
    }

    /// Read a repository file back.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap()
    }
}

impl Default for MonorepoFixture {
    fn default() -> Self {
        Self::new()
    }
}

//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Native line terminator appended to written files.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";

/// Native line terminator appended to written files.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Overwrite a file with `contents`.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Render a path with forward slashes, for stable output across platforms.
pub fn display_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("file.json");

        write_string(&path, "first").unwrap();
        write_string(&path, "second").unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_write_missing_parent_fails() {
        let tmp = TempDir::new().unwrap();
        let err = write_string(&tmp.path().join("missing/file.json"), "x").unwrap_err();
        assert!(err.to_string().contains("failed to write file"));
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/repo"), Path::new("/repo/packages/a/fonto-manifest.json")),
            PathBuf::from("packages/a/fonto-manifest.json")
        );
    }

    #[test]
    fn test_display_slash() {
        let path = Path::new("packages").join("a").join("fonto-manifest.json");
        assert_eq!(display_slash(&path), "packages/a/fonto-manifest.json");
    }
}

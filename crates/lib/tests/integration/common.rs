//! Shared test helpers for library integration tests.

use hostio_lib::{DirectoryPath, FilePath, Path, PathStyle};
use tempfile::TempDir;

pub fn unix(raw: &str) -> Path {
  Path::parse_with(raw, PathStyle::Unix).unwrap_or_else(|e| panic!("failed to parse {raw:?}: {e}"))
}

pub fn unix_dir(raw: &str) -> DirectoryPath {
  DirectoryPath::parse_with(raw, PathStyle::Unix).unwrap_or_else(|e| panic!("failed to parse {raw:?}: {e}"))
}

pub fn unix_file(raw: &str) -> FilePath {
  FilePath::parse_with(raw, PathStyle::Unix).unwrap_or_else(|e| panic!("failed to parse {raw:?}: {e}"))
}

/// A temporary directory plus its path as a native `DirectoryPath`.
///
/// The path is canonicalized so it compares equal to what the OS reports
/// as the working directory (macOS links `/var` to `/private/var`).
pub fn temp_dir() -> (TempDir, DirectoryPath) {
  let temp = TempDir::new().unwrap();
  let canonical = dunce::canonicalize(temp.path()).unwrap();
  let dir = DirectoryPath::parse(canonical.to_str().unwrap()).unwrap();
  (temp, dir)
}

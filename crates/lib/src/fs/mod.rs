//! File and directory operations behind a mockable interface.
//!
//! [`SystemFileSystem`] forwards to the host OS; [`MemoryFileSystem`] keeps
//! everything in process for tests. Callers take a `&dyn FileSystem` (or a
//! generic) and never inspect which one they were given.

mod memory;
mod system;

use std::io::{Read, Seek, Write};

pub use memory::MemoryFileSystem;
pub use system::SystemFileSystem;

use crate::error::{Error, Result};
use crate::path::{DirectoryPath, FilePath};

/// How to open or create a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
  /// Create; fail if the file exists.
  CreateNew,
  /// Create, truncating an existing file.
  Create,
  /// Open an existing file.
  Open,
  /// Open, creating the file when missing.
  OpenOrCreate,
  /// Open an existing file and truncate it.
  Truncate,
  /// Open or create, positioned at the end. Write-only.
  Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAccess {
  Read,
  Write,
  ReadWrite,
}

impl FileAccess {
  pub fn can_read(&self) -> bool {
    matches!(self, Self::Read | Self::ReadWrite)
  }

  pub fn can_write(&self) -> bool {
    matches!(self, Self::Write | Self::ReadWrite)
  }
}

/// What other handles may do while this one is open.
///
/// Enforced by the host on Windows only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileShare {
  None,
  Read,
  Write,
  ReadWrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
  /// Immediate children only.
  #[default]
  Current,
  /// All descendants.
  Recursive,
}

/// An open file.
pub trait FileStream: Read + Write + Seek + Send {}

impl<T: Read + Write + Seek + Send> FileStream for T {}

/// File and directory operations.
///
/// Relative paths resolve against the backend's notion of the working
/// directory. Errors from the host surface as [`Error::NotFound`],
/// [`Error::AccessDenied`] or [`Error::Io`]; nothing is retried.
pub trait FileSystem {
  fn file_exists(&self, path: &FilePath) -> bool;

  fn directory_exists(&self, path: &DirectoryPath) -> bool;

  fn open(&self, path: &FilePath, mode: FileMode, access: FileAccess, share: FileShare) -> Result<Box<dyn FileStream>>;

  fn file_length(&self, path: &FilePath) -> Result<u64>;

  /// Copy a file; fails with [`Error::AlreadyExists`] when the destination
  /// exists and `overwrite` is false.
  fn copy_file(&self, source: &FilePath, destination: &FilePath, overwrite: bool) -> Result<()>;

  /// Move a file; the destination must not exist.
  fn move_file(&self, source: &FilePath, destination: &FilePath) -> Result<()>;

  fn delete_file(&self, path: &FilePath) -> Result<()>;

  /// Create a directory and any missing ancestors.
  fn create_directory(&self, path: &DirectoryPath) -> Result<()>;

  /// Move a directory with its contents; the destination must not exist.
  fn move_directory(&self, source: &DirectoryPath, destination: &DirectoryPath) -> Result<()>;

  fn delete_directory(&self, path: &DirectoryPath, recursive: bool) -> Result<()>;

  /// Files under `path` whose name matches the wildcard `filter`.
  fn files(&self, path: &DirectoryPath, filter: &str, scope: SearchScope) -> Result<Vec<FilePath>>;

  /// Directories under `path` whose name matches the wildcard `filter`.
  fn directories(&self, path: &DirectoryPath, filter: &str, scope: SearchScope) -> Result<Vec<DirectoryPath>>;
}

/// Convenience opens with fixed mode/access/share combinations.
pub trait FileSystemExt: FileSystem {
  /// Append opens write-only; every other mode opens read-write. No sharing.
  fn open_with_mode(&self, path: &FilePath, mode: FileMode) -> Result<Box<dyn FileStream>> {
    let access = if mode == FileMode::Append {
      FileAccess::Write
    } else {
      FileAccess::ReadWrite
    };
    self.open(path, mode, access, FileShare::None)
  }

  fn open_with_access(&self, path: &FilePath, mode: FileMode, access: FileAccess) -> Result<Box<dyn FileStream>> {
    self.open(path, mode, access, FileShare::None)
  }

  fn open_read(&self, path: &FilePath) -> Result<Box<dyn FileStream>> {
    self.open(path, FileMode::Open, FileAccess::Read, FileShare::Read)
  }

  /// Create or truncate for writing.
  fn open_write(&self, path: &FilePath) -> Result<Box<dyn FileStream>> {
    self.open(path, FileMode::Create, FileAccess::Write, FileShare::None)
  }

  fn open_append(&self, path: &FilePath) -> Result<Box<dyn FileStream>> {
    self.open(path, FileMode::Append, FileAccess::Write, FileShare::None)
  }

  fn read_to_string(&self, path: &FilePath) -> Result<String> {
    let mut contents = String::new();
    self
      .open_read(path)?
      .read_to_string(&mut contents)
      .map_err(|e| Error::from_io(path, e))?;
    Ok(contents)
  }

  fn write_all(&self, path: &FilePath, contents: &[u8]) -> Result<()> {
    let mut stream = self.open_write(path)?;
    stream.write_all(contents).map_err(|e| Error::from_io(path, e))?;
    stream.flush().map_err(|e| Error::from_io(path, e))
  }
}

impl<T: FileSystem + ?Sized> FileSystemExt for T {}

/// Reject mode/access combinations no backend can honor.
pub(crate) fn validate_open(path: &FilePath, mode: FileMode, access: FileAccess) -> Result<()> {
  if mode == FileMode::Append && access.can_read() {
    return Err(Error::InvalidArgument(format!(
      "{path}: append mode can only be combined with write access"
    )));
  }
  if matches!(mode, FileMode::CreateNew | FileMode::Create | FileMode::Truncate) && !access.can_write() {
    return Err(Error::InvalidArgument(format!(
      "{path}: {mode:?} requires write access"
    )));
  }
  Ok(())
}

/// Match a file name against a `*`/`?` wildcard pattern.
///
/// An empty pattern matches everything.
pub fn matches_filter(name: &str, pattern: &str, case_sensitive: bool) -> bool {
  if pattern.is_empty() {
    return true;
  }
  let (name, pattern): (Vec<char>, Vec<char>) = if case_sensitive {
    (name.chars().collect(), pattern.chars().collect())
  } else {
    (name.to_lowercase().chars().collect(), pattern.to_lowercase().chars().collect())
  };

  let (mut n, mut p) = (0, 0);
  let mut backtrack: Option<(usize, usize)> = None;
  while n < name.len() {
    match pattern.get(p) {
      Some('*') => {
        backtrack = Some((p, n));
        p += 1;
      }
      Some(c) if *c == '?' || *c == name[n] => {
        n += 1;
        p += 1;
      }
      _ => match backtrack {
        Some((star, matched)) => {
          p = star + 1;
          n = matched + 1;
          backtrack = Some((star, matched + 1));
        }
        None => return false,
      },
    }
  }
  pattern[p..].iter().all(|c| *c == '*')
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::path::PathStyle;

  #[test]
  fn wildcard_matching() {
    assert!(matches_filter("main.rs", "*.rs", true));
    assert!(matches_filter("main.rs", "m??n.*", true));
    assert!(matches_filter("main.rs", "*", true));
    assert!(matches_filter("main.rs", "", true));
    assert!(matches_filter("a.b.c", "*.c", true));
    assert!(!matches_filter("main.rs", "*.toml", true));
    assert!(!matches_filter("Main.RS", "*.rs", true));
    assert!(matches_filter("Main.RS", "*.rs", false));
    assert!(!matches_filter("ab", "a?b", true));
  }

  #[test]
  fn append_cannot_read() {
    let path = FilePath::parse_with("log.txt", PathStyle::Unix).unwrap();
    assert!(validate_open(&path, FileMode::Append, FileAccess::Write).is_ok());
    assert!(matches!(
      validate_open(&path, FileMode::Append, FileAccess::ReadWrite),
      Err(Error::InvalidArgument(_))
    ));
    assert!(validate_open(&path, FileMode::Create, FileAccess::Read).is_err());
    assert!(validate_open(&path, FileMode::OpenOrCreate, FileAccess::Read).is_ok());
  }
}

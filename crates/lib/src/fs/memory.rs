//! In-memory file system for tests.

use std::collections::BTreeMap;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::{FileAccess, FileMode, FileShare, FileStream, FileSystem, SearchScope, matches_filter, validate_open};
use crate::error::{Error, Result};
use crate::path::{DirectoryPath, FilePath, Path, PathComparer, PathStyle};

type Contents = Arc<Mutex<Vec<u8>>>;

#[derive(Debug, Clone)]
enum Node {
  Directory,
  File(Contents),
}

/// A file system that lives entirely in process memory.
///
/// ### Invariants
///
/// 1. The root directory always exists.
/// 2. Keys are absolute, collapsed paths in this file system's style.
/// 3. Every entry's parent is a directory entry.
///
/// Relative paths resolve against the file system's own working directory,
/// the root by default. [`FileShare`] is accepted but not enforced; open
/// streams share the file contents, so writes are visible immediately.
#[derive(Debug)]
pub struct MemoryFileSystem {
  style: PathStyle,
  working_directory: DirectoryPath,
  entries: Mutex<BTreeMap<Path, Node>>,
}

impl MemoryFileSystem {
  /// An empty file system containing only its root (`/` or `C:\`).
  pub fn new(style: PathStyle) -> Self {
    let root = root_path(style);
    let mut entries = BTreeMap::new();
    entries.insert(root.clone(), Node::Directory);

    Self {
      style,
      working_directory: DirectoryPath::from(root),
      entries: Mutex::new(entries),
    }
  }

  pub fn unix() -> Self {
    Self::new(PathStyle::Unix)
  }

  pub fn windows() -> Self {
    Self::new(PathStyle::Windows)
  }

  /// Resolve relative paths against `path` (itself resolved against the
  /// current working directory). The directory is created when missing.
  pub fn with_working_directory(mut self, path: DirectoryPath) -> Result<Self> {
    let resolved = DirectoryPath::from(self.resolve(path.path())?);
    self.create_directory(&resolved)?;
    self.working_directory = resolved;
    Ok(self)
  }

  pub fn working_directory(&self) -> &DirectoryPath {
    &self.working_directory
  }

  pub fn style(&self) -> PathStyle {
    self.style
  }

  /// Create or overwrite a file, creating missing parent directories.
  pub fn add_file(&self, path: &FilePath, contents: impl AsRef<[u8]>) -> Result<()> {
    let key = self.resolve(path.path())?;
    if let Some(parent) = key.parent() {
      self.create_directory(&DirectoryPath::from(parent))?;
    }

    let mut entries = self.lock();
    if let Some(Node::Directory) = entries.get(&key) {
      return Err(access_denied(path, "is a directory"));
    }
    entries.insert(key, Node::File(Arc::new(Mutex::new(contents.as_ref().to_vec()))));
    Ok(())
  }

  fn lock(&self) -> MutexGuard<'_, BTreeMap<Path, Node>> {
    self.entries.lock().unwrap_or_else(PoisonError::into_inner)
  }

  fn resolve(&self, path: &Path) -> Result<Path> {
    let path = if path.style() == self.style {
      path.clone()
    } else {
      path.with_style(self.style)?
    };
    Ok(path.make_absolute(&self.working_directory)?.collapse().without_trailing_separator())
  }

  fn comparer(&self) -> PathComparer {
    PathComparer::for_style(self.style)
  }

  fn is_within(&self, ancestor: &Path, path: &Path) -> bool {
    let comparer = self.comparer();
    path.root() == ancestor.root()
      && path.segments().len() >= ancestor.segments().len()
      && ancestor
        .segments()
        .iter()
        .zip(path.segments())
        .all(|(a, b)| comparer.segment_eq(a, b))
  }

  fn file_contents(entries: &BTreeMap<Path, Node>, key: &Path, path: &FilePath) -> Result<Contents> {
    match entries.get(key) {
      Some(Node::File(contents)) => Ok(Arc::clone(contents)),
      Some(Node::Directory) => Err(access_denied(path, "is a directory")),
      None => Err(Error::not_found(path)),
    }
  }

  fn require_parent(entries: &BTreeMap<Path, Node>, key: &Path) -> Result<()> {
    match key.parent() {
      None => Ok(()),
      Some(parent) => match entries.get(&parent) {
        Some(Node::Directory) => Ok(()),
        _ => Err(Error::not_found(parent)),
      },
    }
  }

  fn enumerate(&self, path: &DirectoryPath, filter: &str, scope: SearchScope, want_files: bool) -> Result<Vec<Path>> {
    let key = self.resolve(path.path())?;
    let entries = self.lock();
    if !matches!(entries.get(&key), Some(Node::Directory)) {
      return Err(Error::not_found(path));
    }

    let depth = key.segments().len();
    let case_sensitive = self.style.is_case_sensitive();
    let found = entries
      .iter()
      .filter(|(candidate, node)| {
        let relative_depth = candidate.segments().len().saturating_sub(depth);
        matches!(node, Node::File(_)) == want_files
          && relative_depth > 0
          && (scope == SearchScope::Recursive || relative_depth == 1)
          && self.is_within(&key, candidate)
          && matches_filter(candidate.last_segment().unwrap_or_default(), filter, case_sensitive)
      })
      .map(|(candidate, _)| candidate.clone())
      .collect();
    Ok(found)
  }
}

impl Default for MemoryFileSystem {
  fn default() -> Self {
    Self::new(PathStyle::native())
  }
}

fn root_path(style: PathStyle) -> Path {
  let raw = match style {
    PathStyle::Unix => "/",
    PathStyle::Windows => "C:\\",
  };
  Path::parse_with(raw, style).unwrap_or_else(|_| Path::current(style))
}

fn access_denied(path: impl ToString, reason: &str) -> Error {
  Error::from_io(path, io::Error::new(io::ErrorKind::PermissionDenied, reason.to_string()))
}

impl FileSystem for MemoryFileSystem {
  fn file_exists(&self, path: &FilePath) -> bool {
    self
      .resolve(path.path())
      .is_ok_and(|key| matches!(self.lock().get(&key), Some(Node::File(_))))
  }

  fn directory_exists(&self, path: &DirectoryPath) -> bool {
    self
      .resolve(path.path())
      .is_ok_and(|key| matches!(self.lock().get(&key), Some(Node::Directory)))
  }

  fn open(&self, path: &FilePath, mode: FileMode, access: FileAccess, _share: FileShare) -> Result<Box<dyn FileStream>> {
    validate_open(path, mode, access)?;
    let key = self.resolve(path.path())?;
    let mut entries = self.lock();

    let contents = match (entries.get(&key).cloned(), mode) {
      (Some(Node::Directory), _) => return Err(access_denied(path, "is a directory")),
      (Some(Node::File(_)), FileMode::CreateNew) => {
        return Err(Error::AlreadyExists { path: path.to_string() });
      }
      (Some(Node::File(contents)), FileMode::Create | FileMode::Truncate) => {
        contents.lock().unwrap_or_else(PoisonError::into_inner).clear();
        contents
      }
      (Some(Node::File(contents)), _) => contents,
      (None, FileMode::Open | FileMode::Truncate) => return Err(Error::not_found(path)),
      (None, _) => {
        Self::require_parent(&entries, &key)?;
        let contents: Contents = Arc::default();
        entries.insert(key, Node::File(Arc::clone(&contents)));
        contents
      }
    };

    let position = if mode == FileMode::Append {
      contents.lock().unwrap_or_else(PoisonError::into_inner).len() as u64
    } else {
      0
    };

    Ok(Box::new(MemoryStream {
      contents,
      position,
      access,
    }))
  }

  fn file_length(&self, path: &FilePath) -> Result<u64> {
    let key = self.resolve(path.path())?;
    let contents = Self::file_contents(&self.lock(), &key, path)?;
    let len = contents.lock().unwrap_or_else(PoisonError::into_inner).len();
    Ok(len as u64)
  }

  fn copy_file(&self, source: &FilePath, destination: &FilePath, overwrite: bool) -> Result<()> {
    let from = self.resolve(source.path())?;
    let to = self.resolve(destination.path())?;
    let mut entries = self.lock();

    let contents = Self::file_contents(&entries, &from, source)?;
    match entries.get(&to) {
      Some(Node::Directory) => return Err(access_denied(destination, "is a directory")),
      Some(Node::File(_)) if !overwrite => {
        return Err(Error::AlreadyExists {
          path: destination.to_string(),
        });
      }
      _ => {}
    }
    Self::require_parent(&entries, &to)?;

    let copy = contents.lock().unwrap_or_else(PoisonError::into_inner).clone();
    entries.insert(to, Node::File(Arc::new(Mutex::new(copy))));
    debug!(source = %source, destination = %destination, "copied file");
    Ok(())
  }

  fn move_file(&self, source: &FilePath, destination: &FilePath) -> Result<()> {
    let from = self.resolve(source.path())?;
    let to = self.resolve(destination.path())?;
    let mut entries = self.lock();

    Self::file_contents(&entries, &from, source)?;
    if entries.contains_key(&to) {
      return Err(Error::AlreadyExists {
        path: destination.to_string(),
      });
    }
    Self::require_parent(&entries, &to)?;

    if let Some(node) = entries.remove(&from) {
      entries.insert(to, node);
    }
    debug!(source = %source, destination = %destination, "moved file");
    Ok(())
  }

  fn delete_file(&self, path: &FilePath) -> Result<()> {
    let key = self.resolve(path.path())?;
    let mut entries = self.lock();
    Self::file_contents(&entries, &key, path)?;
    entries.remove(&key);
    debug!(path = %path, "deleted file");
    Ok(())
  }

  fn create_directory(&self, path: &DirectoryPath) -> Result<()> {
    let key = self.resolve(path.path())?;
    let mut entries = self.lock();

    for len in 0..=key.segments().len() {
      let ancestor = key.with_segments(key.segments()[..len].to_vec(), false);
      match entries.get(&ancestor) {
        Some(Node::File(_)) => {
          return Err(Error::AlreadyExists {
            path: ancestor.to_string(),
          });
        }
        Some(Node::Directory) => {}
        None => {
          entries.insert(ancestor, Node::Directory);
        }
      }
    }
    debug!(path = %path, "created directory");
    Ok(())
  }

  fn move_directory(&self, source: &DirectoryPath, destination: &DirectoryPath) -> Result<()> {
    let from = self.resolve(source.path())?;
    let to = self.resolve(destination.path())?;
    let mut entries = self.lock();

    if !matches!(entries.get(&from), Some(Node::Directory)) {
      return Err(Error::not_found(source));
    }
    if from.segments().is_empty() {
      return Err(Error::InvalidArgument("cannot move a root directory".to_string()));
    }
    if self.is_within(&from, &to) {
      return Err(Error::InvalidArgument(format!(
        "cannot move {source} into itself ({destination})"
      )));
    }
    if entries.contains_key(&to) {
      return Err(Error::AlreadyExists {
        path: destination.to_string(),
      });
    }
    Self::require_parent(&entries, &to)?;

    let moved: Vec<Path> = entries.keys().filter(|k| self.is_within(&from, k)).cloned().collect();
    for old in moved {
      if let Some(node) = entries.remove(&old) {
        let mut segments = to.segments().to_vec();
        segments.extend(old.segments()[from.segments().len()..].iter().cloned());
        entries.insert(to.with_segments(segments, false), node);
      }
    }
    debug!(source = %source, destination = %destination, "moved directory");
    Ok(())
  }

  fn delete_directory(&self, path: &DirectoryPath, recursive: bool) -> Result<()> {
    let key = self.resolve(path.path())?;
    let mut entries = self.lock();

    if !matches!(entries.get(&key), Some(Node::Directory)) {
      return Err(Error::not_found(path));
    }
    if key.segments().is_empty() {
      return Err(Error::InvalidArgument("cannot delete a root directory".to_string()));
    }

    let doomed: Vec<Path> = entries.keys().filter(|k| self.is_within(&key, k)).cloned().collect();
    if !recursive && doomed.len() > 1 {
      return Err(Error::from_io(
        path,
        io::Error::new(io::ErrorKind::DirectoryNotEmpty, "directory is not empty"),
      ));
    }
    for k in doomed {
      entries.remove(&k);
    }
    debug!(path = %path, recursive, "deleted directory");
    Ok(())
  }

  fn files(&self, path: &DirectoryPath, filter: &str, scope: SearchScope) -> Result<Vec<FilePath>> {
    self
      .enumerate(path, filter, scope, true)?
      .into_iter()
      .map(FilePath::try_from)
      .collect()
  }

  fn directories(&self, path: &DirectoryPath, filter: &str, scope: SearchScope) -> Result<Vec<DirectoryPath>> {
    Ok(
      self
        .enumerate(path, filter, scope, false)?
        .into_iter()
        .map(DirectoryPath::from)
        .collect(),
    )
  }
}

/// A handle onto shared in-memory file contents.
struct MemoryStream {
  contents: Contents,
  position: u64,
  access: FileAccess,
}

impl MemoryStream {
  fn contents(&self) -> MutexGuard<'_, Vec<u8>> {
    self.contents.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl Read for MemoryStream {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    if !self.access.can_read() {
      return Err(io::Error::new(io::ErrorKind::PermissionDenied, "stream is not readable"));
    }
    let n = {
      let contents = self.contents();
      let start = usize::try_from(self.position).unwrap_or(usize::MAX).min(contents.len());
      let n = buf.len().min(contents.len() - start);
      buf[..n].copy_from_slice(&contents[start..start + n]);
      n
    };
    self.position += n as u64;
    Ok(n)
  }
}

impl Write for MemoryStream {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    if !self.access.can_write() {
      return Err(io::Error::new(io::ErrorKind::PermissionDenied, "stream is not writable"));
    }
    let range = usize::try_from(self.position)
      .ok()
      .and_then(|start| start.checked_add(buf.len()).map(|end| (start, end)));
    let Some((start, end)) = range else {
      return Err(invalid_position());
    };
    {
      let mut contents = self.contents();
      if contents.len() < end {
        let additional = end - contents.len();
        contents
          .try_reserve(additional)
          .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))?;
        contents.resize(end, 0);
      }
      contents[start..end].copy_from_slice(buf);
    }
    self.position = end as u64;
    Ok(buf.len())
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

impl Seek for MemoryStream {
  fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
    let len = self.contents().len() as u64;
    let (base, offset) = match pos {
      SeekFrom::Start(offset) => (0, i64::try_from(offset).map_err(|_| invalid_position())?),
      SeekFrom::End(offset) => (len, offset),
      SeekFrom::Current(offset) => (self.position, offset),
    };
    // Positions stay within i64 so every later relative seek is representable.
    let target = base
      .checked_add_signed(offset)
      .filter(|target| i64::try_from(*target).is_ok())
      .ok_or_else(invalid_position)?;
    self.position = target;
    Ok(self.position)
  }
}

fn invalid_position() -> io::Error {
  io::Error::new(io::ErrorKind::InvalidInput, "invalid seek to a negative or overflowing position")
}

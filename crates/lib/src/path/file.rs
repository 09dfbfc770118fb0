use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DirectoryPath, Path, PathComparer, PathStyle};
use crate::environment::Environment;
use crate::error::{Error, Result};

/// A path whose last segment names a file.
///
/// Always names an entry below its root (a bare `/`, `C:\` or UNC share is
/// rejected); the trailing separator of the input is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Path", into = "Path")]
pub struct FilePath(Path);

impl FilePath {
  pub fn parse(raw: &str) -> Result<Self> {
    Path::parse(raw)?.try_into()
  }

  pub fn parse_with(raw: &str, style: PathStyle) -> Result<Self> {
    Path::parse_with(raw, style)?.try_into()
  }

  /// Wrap the result of combining onto a file path, which always ends in a segment.
  pub(super) fn from_combined(path: Path) -> Self {
    Self(path.without_trailing_separator())
  }

  pub fn path(&self) -> &Path {
    &self.0
  }

  pub fn into_path(self) -> Path {
    self.0
  }

  pub fn segments(&self) -> &[String] {
    self.0.segments()
  }

  pub fn is_relative(&self) -> bool {
    self.0.is_relative()
  }

  pub fn full_path(&self) -> String {
    self.0.full_path()
  }

  pub fn equals(&self, other: &FilePath, comparer: &PathComparer) -> bool {
    self.0.equals(&other.0, comparer)
  }

  /// The last segment.
  pub fn filename(&self) -> &str {
    self.0.last_segment().unwrap_or_default()
  }

  /// Suffix after the final `.` of the filename, without the dot.
  ///
  /// `None` when there is no `.`, when the only `.` starts the name
  /// (`.bashrc`), or when the name ends with `.`.
  pub fn extension(&self) -> Option<&str> {
    let name = self.filename();
    match name.rfind('.') {
      Some(0) | None => None,
      Some(i) if i + 1 == name.len() => None,
      Some(i) => Some(&name[i + 1..]),
    }
  }

  pub fn has_extension(&self) -> bool {
    self.extension().is_some()
  }

  pub fn filename_without_extension(&self) -> &str {
    let name = self.filename();
    match self.extension() {
      Some(ext) => &name[..name.len() - ext.len() - 1],
      None => name,
    }
  }

  /// The containing directory; `.` for a single relative segment.
  pub fn directory(&self) -> DirectoryPath {
    DirectoryPath::from(self.0.parent().unwrap_or_else(|| Path::current(self.0.style())))
  }

  /// Replace the extension; an empty `extension` removes it.
  pub fn change_extension(&self, extension: &str) -> Result<FilePath> {
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() {
      return self.remove_extension();
    }
    self.with_filename(format!("{}.{}", self.filename_without_extension(), extension))
  }

  /// Add another extension after the existing name (`a.tar` -> `a.tar.gz`).
  pub fn append_extension(&self, extension: &str) -> Result<FilePath> {
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() {
      return Err(Error::InvalidArgument("extension is empty".to_string()));
    }
    self.with_filename(format!("{}.{}", self.filename(), extension))
  }

  pub fn remove_extension(&self) -> Result<FilePath> {
    self.with_filename(self.filename_without_extension().to_string())
  }

  pub fn collapse(&self) -> Result<FilePath> {
    self.0.collapse().try_into()
  }

  pub fn make_absolute(&self, base: &DirectoryPath) -> Result<FilePath> {
    self.0.make_absolute(base).map(FilePath)
  }

  pub fn make_absolute_with(&self, environment: &dyn Environment) -> Result<FilePath> {
    self.0.make_absolute_with(environment).map(FilePath)
  }

  fn with_filename(&self, name: String) -> Result<FilePath> {
    let style = self.0.style();
    if name.contains(PathStyle::is_separator) || name == "." {
      return Err(Error::invalid_path(name, "file name must be a single segment"));
    }
    if let Some(c) = style.find_invalid_char(&name) {
      return Err(Error::invalid_path(name, format!("invalid character {c:?}")));
    }

    let mut segments = self.0.segments().to_vec();
    if let Some(last) = segments.last_mut() {
      *last = name;
    }
    Ok(FilePath(self.0.with_segments(segments, false)))
  }
}

impl TryFrom<Path> for FilePath {
  type Error = Error;

  fn try_from(path: Path) -> Result<Self> {
    if path.last_segment().is_none() {
      return Err(Error::invalid_path(path.full_path(), "file path has no file name"));
    }
    Ok(Self(path.without_trailing_separator()))
  }
}

impl From<FilePath> for Path {
  fn from(file: FilePath) -> Self {
    file.0
  }
}

impl AsRef<Path> for FilePath {
  fn as_ref(&self) -> &Path {
    &self.0
  }
}

impl fmt::Display for FilePath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.0, f)
  }
}

impl FromStr for FilePath {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Self::parse(s)
  }
}

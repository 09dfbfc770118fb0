use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{FilePath, Path, PathComparer, PathStyle};
use crate::environment::Environment;
use crate::error::{Error, Result};

/// A path naming a directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Path", into = "Path")]
pub struct DirectoryPath(Path);

impl DirectoryPath {
  pub fn parse(raw: &str) -> Result<Self> {
    Path::parse(raw).map(Self)
  }

  pub fn parse_with(raw: &str, style: PathStyle) -> Result<Self> {
    Path::parse_with(raw, style).map(Self)
  }

  /// The relative current directory `.`.
  pub fn current(style: PathStyle) -> Self {
    Self(Path::current(style))
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

  pub fn equals(&self, other: &DirectoryPath, comparer: &PathComparer) -> bool {
    self.0.equals(&other.0, comparer)
  }

  /// Last segment, or `None` for a bare root, a UNC share or `.`.
  pub fn name(&self) -> Option<&str> {
    self.0.last_segment()
  }

  pub fn parent(&self) -> Option<DirectoryPath> {
    self.0.parent().map(Self)
  }

  /// Append a relative path; an absolute `other` replaces this directory.
  ///
  /// Fails when `other` cannot be expressed in this directory's style.
  pub fn combine(&self, other: &Path) -> Result<DirectoryPath> {
    self.0.combine(other).map(Self)
  }

  pub fn combine_with_directory(&self, name: &str) -> Result<DirectoryPath> {
    let other = Path::parse_with(name, self.0.style())?;
    self.combine(&other)
  }

  /// Append a file name, producing a file path inside this directory.
  pub fn combine_with_file_path(&self, name: &str) -> Result<FilePath> {
    let other = Path::parse_with(name, self.0.style())?;
    if other.segments().is_empty() {
      return Err(Error::invalid_path(name, "file path has no file name"));
    }
    self.0.combine(&other)?.try_into()
  }

  /// Type-safe variant of [`DirectoryPath::combine_with_file_path`].
  pub fn combine_with_file(&self, file: &FilePath) -> Result<FilePath> {
    self.0.combine(file.path()).map(FilePath::from_combined)
  }

  pub fn collapse(&self) -> DirectoryPath {
    Self(self.0.collapse())
  }

  pub fn make_absolute(&self, base: &DirectoryPath) -> Result<DirectoryPath> {
    self.0.make_absolute(base).map(Self)
  }

  pub fn make_absolute_with(&self, environment: &dyn Environment) -> Result<DirectoryPath> {
    self.0.make_absolute_with(environment).map(Self)
  }

  /// Relative path leading from this directory to `target`.
  ///
  /// Both paths must be absolute and share a root. `..` is resolved on both
  /// sides first.
  pub fn relative_path_to(&self, target: &DirectoryPath) -> Result<DirectoryPath> {
    if self.is_relative() || target.is_relative() {
      return Err(Error::InvalidArgument(format!(
        "cannot relate {} and {}: both paths must be absolute",
        self, target
      )));
    }
    if self.0.root() != target.0.root() {
      return Err(Error::InvalidArgument(format!(
        "cannot relate {} and {}: paths have different roots",
        self, target
      )));
    }

    let comparer = PathComparer::for_style(self.0.style());
    let from = self.0.collapse();
    let to = target.0.collapse();
    let common = from
      .segments()
      .iter()
      .zip(to.segments())
      .take_while(|(a, b)| comparer.segment_eq(a, b))
      .count();
    if common < from.root_segment_count() {
      return Err(Error::InvalidArgument(format!(
        "cannot relate {} and {}: paths are on different shares",
        self, target
      )));
    }

    let mut segments: Vec<String> = std::iter::repeat_n("..".to_string(), from.segments().len() - common).collect();
    segments.extend(to.segments()[common..].iter().cloned());

    Ok(Self(Path::current(self.0.style()).with_segments(segments, false)))
  }

  /// Relative path leading from this directory to a file.
  pub fn relative_file_path_to(&self, target: &FilePath) -> Result<FilePath> {
    let directory = self.relative_path_to(&target.directory())?;
    directory.combine_with_file_path(target.filename())
  }
}

impl From<Path> for DirectoryPath {
  fn from(path: Path) -> Self {
    Self(path)
  }
}

impl From<DirectoryPath> for Path {
  fn from(directory: DirectoryPath) -> Self {
    directory.0
  }
}

impl AsRef<Path> for DirectoryPath {
  fn as_ref(&self) -> &Path {
    &self.0
  }
}

impl fmt::Display for DirectoryPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.0, f)
  }
}

impl FromStr for DirectoryPath {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Self::parse(s)
  }
}

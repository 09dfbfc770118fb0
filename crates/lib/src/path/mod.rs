//! Immutable, normalized path values.
//!
//! A [`Path`] keeps its root, its segments and a trailing-separator flag; the
//! separators of the input are discarded and re-rendered for the path's
//! [`PathStyle`] on demand. Parsing collapses repeated separators and drops
//! `.` segments, but leaves `..` alone: it is only resolved by an explicit
//! [`Path::collapse`], since the textual result can be wrong once symlinks or
//! not-yet-existing directories are involved.
//!
//! [`FilePath`] and [`DirectoryPath`] wrap a `Path` and expose only the
//! operations that make sense for their role.

mod comparer;
mod directory;
mod file;
mod style;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use comparer::PathComparer;
pub use directory::DirectoryPath;
pub use file::FilePath;
pub use style::PathStyle;

use crate::environment::Environment;
use crate::error::{Error, Result};

/// How an absolute path is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathRoot {
  /// `/foo` or `\foo`.
  Separator,
  /// `C:\foo`; the letter is stored uppercase.
  Drive(char),
  /// `\\server\share`, Windows only. The server and share are kept as the
  /// first two segments and are never removed by `parent` or `collapse`.
  Unc,
}

/// Segments a UNC root owns: server and share.
const UNC_ROOT_SEGMENTS: usize = 2;

/// A normalized path.
#[derive(Debug, Clone)]
pub struct Path {
  style: PathStyle,
  root: Option<PathRoot>,
  segments: Vec<String>,
  trailing_separator: bool,
}

impl Path {
  /// Parse `raw` for the native platform.
  pub fn parse(raw: &str) -> Result<Self> {
    Self::parse_with(raw, PathStyle::native())
  }

  /// Parse `raw` for the given style.
  ///
  /// Fails with [`Error::InvalidPath`] when `raw` is empty, whitespace-only,
  /// contains a character the style disallows, is drive-relative (`C:foo`),
  /// or is a UNC path without both a server and a share.
  pub fn parse_with(raw: &str, style: PathStyle) -> Result<Self> {
    if raw.trim().is_empty() {
      return Err(Error::invalid_path(raw, "path is empty"));
    }
    if raw.contains('\0') {
      return Err(Error::invalid_path(raw, "path contains a NUL character"));
    }

    let (root, rest) = split_root(raw, style)?;

    let mut segments = Vec::new();
    for segment in rest.split(PathStyle::is_separator) {
      if segment.is_empty() || segment == "." {
        continue;
      }
      if let Some(c) = style.find_invalid_char(segment) {
        return Err(Error::invalid_path(raw, format!("invalid character {c:?}")));
      }
      segments.push(segment.to_string());
    }

    if root == Some(PathRoot::Unc)
      && (segments.len() < UNC_ROOT_SEGMENTS || segments[..UNC_ROOT_SEGMENTS].iter().any(|s| s == ".."))
    {
      return Err(Error::invalid_path(raw, "UNC path needs a server and a share name"));
    }

    let trailing_separator = !segments.is_empty() && rest.ends_with(PathStyle::is_separator);

    Ok(Self {
      style,
      root,
      segments,
      trailing_separator,
    })
  }

  /// The relative path `.`, with no segments.
  pub fn current(style: PathStyle) -> Self {
    Self {
      style,
      root: None,
      segments: Vec::new(),
      trailing_separator: false,
    }
  }

  pub fn style(&self) -> PathStyle {
    self.style
  }

  pub fn root(&self) -> Option<PathRoot> {
    self.root
  }

  /// Normalized segments, excluding the root and separators.
  pub fn segments(&self) -> &[String] {
    &self.segments
  }

  /// The last segment that names something, excluding a UNC server and share.
  pub fn last_segment(&self) -> Option<&str> {
    self.segments[self.root_segment_count()..].last().map(String::as_str)
  }

  pub fn is_relative(&self) -> bool {
    self.root.is_none()
  }

  pub fn is_absolute(&self) -> bool {
    self.root.is_some()
  }

  pub fn has_trailing_separator(&self) -> bool {
    self.trailing_separator
  }

  /// Render with the separator of this path's style.
  ///
  /// A relative path with no segments renders as `.`.
  pub fn full_path(&self) -> String {
    let sep = self.style.separator();
    let mut out = String::new();
    match self.root {
      Some(PathRoot::Separator) => out.push(sep),
      Some(PathRoot::Drive(letter)) => {
        out.push(letter);
        out.push(':');
        out.push(sep);
      }
      Some(PathRoot::Unc) => {
        out.push(sep);
        out.push(sep);
      }
      None => {}
    }

    for (i, segment) in self.segments.iter().enumerate() {
      if i > 0 {
        out.push(sep);
      }
      out.push_str(segment);
    }

    if self.trailing_separator && !self.segments.is_empty() {
      out.push(sep);
    }
    if out.is_empty() {
      out.push('.');
    }
    out
  }

  /// Append `other` to this path.
  ///
  /// `other` is first re-rendered in this path's style, failing like
  /// [`Path::with_style`] when it cannot be. An absolute `other` then replaces
  /// the base entirely; otherwise the segments are concatenated and the
  /// result keeps this path's root.
  pub fn combine(&self, other: &Path) -> Result<Path> {
    let converted;
    let other = if other.style == self.style {
      other
    } else {
      converted = other.with_style(self.style)?;
      &converted
    };
    if other.is_absolute() {
      return Ok(other.clone());
    }

    let mut segments = self.segments.clone();
    segments.extend(other.segments.iter().cloned());
    let trailing_separator = if other.segments.is_empty() {
      self.trailing_separator
    } else {
      other.trailing_separator
    };

    Ok(Path {
      style: self.style,
      root: self.root,
      segments,
      trailing_separator,
    })
  }

  /// Resolve `..` segments textually, without touching the disk.
  ///
  /// `..` after a normal segment removes it; `..` at the root of an absolute
  /// path is dropped; leading `..` of a relative path are kept. A UNC server
  /// and share are part of the root and survive.
  pub fn collapse(&self) -> Path {
    let fixed = self.root_segment_count();
    let mut stack: Vec<String> = self.segments[..fixed].to_vec();
    for segment in &self.segments[fixed..] {
      if segment == ".." {
        match stack.last() {
          Some(last) if stack.len() > fixed && last != ".." => {
            stack.pop();
          }
          _ if self.is_absolute() => {}
          _ => stack.push(segment.clone()),
        }
      } else {
        stack.push(segment.clone());
      }
    }

    Path {
      style: self.style,
      root: self.root,
      trailing_separator: self.trailing_separator && !stack.is_empty(),
      segments: stack,
    }
  }

  /// All segments except the last, or `None` when there are none.
  ///
  /// A single relative segment yields the current directory `.`; a root,
  /// including a UNC share, has no parent.
  pub fn parent(&self) -> Option<Path> {
    if self.segments.len() <= self.root_segment_count() {
      return None;
    }
    let (_, init) = self.segments.split_last()?;
    Some(Path {
      style: self.style,
      root: self.root,
      segments: init.to_vec(),
      trailing_separator: false,
    })
  }

  /// Compare with an explicit comparer.
  pub fn equals(&self, other: &Path, comparer: &PathComparer) -> bool {
    comparer.equals(self, other)
  }

  /// The same path rendered for another platform.
  ///
  /// Fails when a segment holds a character the target style rejects, or
  /// when a drive/UNC root is converted to the Unix style.
  pub fn with_style(&self, style: PathStyle) -> Result<Path> {
    if style == PathStyle::Unix && matches!(self.root, Some(PathRoot::Drive(_)) | Some(PathRoot::Unc)) {
      return Err(Error::invalid_path(self.full_path(), "root has no Unix equivalent"));
    }
    for segment in &self.segments {
      if let Some(c) = style.find_invalid_char(segment) {
        return Err(Error::invalid_path(self.full_path(), format!("invalid character {c:?}")));
      }
    }
    Ok(Path { style, ..self.clone() })
  }

  /// Anchor a relative path at `base`; absolute paths are returned as-is.
  ///
  /// The anchored path takes `base`'s style.
  pub fn make_absolute(&self, base: &DirectoryPath) -> Result<Path> {
    if self.is_absolute() {
      return Ok(self.clone());
    }
    base.path().combine(self)
  }

  /// Anchor a relative path at the environment's working directory.
  pub fn make_absolute_with(&self, environment: &dyn Environment) -> Result<Path> {
    if self.is_absolute() {
      return Ok(self.clone());
    }
    self.make_absolute(&environment.working_directory()?)
  }

  /// Leading segments that belong to the root rather than naming entries.
  pub(crate) fn root_segment_count(&self) -> usize {
    match self.root {
      Some(PathRoot::Unc) => UNC_ROOT_SEGMENTS.min(self.segments.len()),
      _ => 0,
    }
  }

  /// Same root and style, different segments.
  pub(crate) fn with_segments(&self, segments: Vec<String>, trailing_separator: bool) -> Path {
    Path {
      style: self.style,
      root: self.root,
      segments,
      trailing_separator,
    }
  }

  pub(crate) fn without_trailing_separator(mut self) -> Path {
    self.trailing_separator = false;
    self
  }
}

/// Split off the root marker and return the remainder.
///
/// A drive letter must be followed by a separator: `C:foo` and bare `C:`
/// mean "relative to drive C's own working directory", which a path value
/// cannot express.
fn split_root(raw: &str, style: PathStyle) -> Result<(Option<PathRoot>, &str)> {
  let mut chars = raw.chars();
  let first = chars.next();
  let second = chars.next();

  let split = match style {
    PathStyle::Unix => match first {
      Some(c) if PathStyle::is_separator(c) => (Some(PathRoot::Separator), raw),
      _ => (None, raw),
    },
    PathStyle::Windows => match (first, second) {
      (Some(a), Some(b)) if PathStyle::is_separator(a) && PathStyle::is_separator(b) => {
        (Some(PathRoot::Unc), &raw[2..])
      }
      (Some(letter), Some(':')) if letter.is_ascii_alphabetic() => {
        let rest = &raw[2..];
        if !rest.starts_with(PathStyle::is_separator) {
          return Err(Error::invalid_path(raw, "drive-relative paths are not supported"));
        }
        (Some(PathRoot::Drive(letter.to_ascii_uppercase())), rest)
      }
      (Some(c), _) if PathStyle::is_separator(c) => (Some(PathRoot::Separator), raw),
      _ => (None, raw),
    },
  };
  Ok(split)
}

impl PartialEq for Path {
  fn eq(&self, other: &Self) -> bool {
    self.style == other.style && PathComparer::for_style(self.style).equals(self, other)
  }
}

impl Eq for Path {}

impl Hash for Path {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.style.hash(state);
    PathComparer::for_style(self.style).hash(self, state);
  }
}

impl PartialOrd for Path {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Path {
  fn cmp(&self, other: &Self) -> Ordering {
    self
      .style
      .cmp(&other.style)
      .then_with(|| PathComparer::for_style(self.style).compare(self, other))
  }
}

impl fmt::Display for Path {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.full_path())
  }
}

impl FromStr for Path {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Self::parse(s)
  }
}

impl TryFrom<&str> for Path {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self> {
    Self::parse(value)
  }
}

impl Serialize for Path {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.full_path())
  }
}

impl<'de> Deserialize<'de> for Path {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Path::parse(&raw).map_err(serde::de::Error::custom)
  }
}

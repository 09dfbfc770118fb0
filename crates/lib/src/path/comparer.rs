use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use super::{Path, PathStyle};
use crate::platform::Platform;

/// Compares paths by root and normalized segments with a chosen case sensitivity.
///
/// Trailing separators and the path style are ignored. Use
/// [`PathComparer::for_platform`] to follow the target file system's rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathComparer {
  case_sensitive: bool,
}

impl PathComparer {
  pub const CASE_SENSITIVE: Self = Self { case_sensitive: true };
  pub const CASE_INSENSITIVE: Self = Self { case_sensitive: false };

  pub const fn new(case_sensitive: bool) -> Self {
    Self { case_sensitive }
  }

  /// Comparer matching the platform's default file system.
  pub fn for_platform(platform: &Platform) -> Self {
    Self::new(platform.is_path_case_sensitive())
  }

  /// Comparer matching the default sensitivity of a path style.
  pub const fn for_style(style: PathStyle) -> Self {
    Self::new(style.is_case_sensitive())
  }

  pub const fn is_case_sensitive(&self) -> bool {
    self.case_sensitive
  }

  pub fn equals(&self, a: &Path, b: &Path) -> bool {
    a.root() == b.root()
      && a.segments().len() == b.segments().len()
      && a
        .segments()
        .iter()
        .zip(b.segments())
        .all(|(x, y)| self.segment_eq(x, y))
  }

  /// Total order: root first, then segments lexicographically.
  pub fn compare(&self, a: &Path, b: &Path) -> Ordering {
    a.root().cmp(&b.root()).then_with(|| {
      let mut left = a.segments().iter();
      let mut right = b.segments().iter();
      loop {
        match (left.next(), right.next()) {
          (None, None) => return Ordering::Equal,
          (None, Some(_)) => return Ordering::Less,
          (Some(_), None) => return Ordering::Greater,
          (Some(x), Some(y)) => match self.segment_cmp(x, y) {
            Ordering::Equal => continue,
            other => return other,
          },
        }
      }
    })
  }

  /// Hash consistent with [`PathComparer::equals`].
  pub fn hash<H: Hasher>(&self, path: &Path, state: &mut H) {
    path.root().hash(state);
    path.segments().len().hash(state);
    for segment in path.segments() {
      if self.case_sensitive {
        segment.hash(state);
      } else {
        segment.to_lowercase().hash(state);
      }
    }
  }

  pub(crate) fn segment_eq(&self, a: &str, b: &str) -> bool {
    if self.case_sensitive {
      a == b
    } else {
      a == b || a.to_lowercase() == b.to_lowercase()
    }
  }

  fn segment_cmp(&self, a: &str, b: &str) -> Ordering {
    if self.case_sensitive {
      a.cmp(b)
    } else {
      a.to_lowercase().cmp(&b.to_lowercase())
    }
  }
}

impl Default for PathComparer {
  fn default() -> Self {
    Self::for_platform(&Platform::current())
  }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path syntax a [`Path`](super::Path) is normalized for and rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
  /// `/` separator, single `/` root, case-sensitive.
  Unix,
  /// `\` separator, drive-letter and UNC roots, case-insensitive.
  Windows,
}

/// Characters rejected in a Windows path segment, besides control characters.
const WINDOWS_RESERVED: &[char] = &['<', '>', '"', '|', '?', '*', ':'];

impl PathStyle {
  /// The style of the compile target.
  pub const fn native() -> Self {
    if cfg!(windows) { Self::Windows } else { Self::Unix }
  }

  /// Separator used when rendering.
  pub const fn separator(&self) -> char {
    match self {
      Self::Unix => '/',
      Self::Windows => '\\',
    }
  }

  /// Default case sensitivity of paths in this style.
  pub const fn is_case_sensitive(&self) -> bool {
    matches!(self, Self::Unix)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Unix => "unix",
      Self::Windows => "windows",
    }
  }

  /// Both separators are accepted on input regardless of style.
  pub(crate) fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
  }

  /// The first character not allowed inside a segment, if any.
  pub(crate) fn find_invalid_char(&self, segment: &str) -> Option<char> {
    match self {
      Self::Unix => segment.chars().find(|c| *c == '\0'),
      Self::Windows => segment.chars().find(|c| *c < ' ' || WINDOWS_RESERVED.contains(c)),
    }
  }
}

impl Default for PathStyle {
  fn default() -> Self {
    Self::native()
  }
}

impl fmt::Display for PathStyle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for PathStyle {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "unix" | "posix" => Ok(Self::Unix),
      "windows" | "win" => Ok(Self::Windows),
      other => Err(format!("unknown path style: {other}")),
    }
  }
}

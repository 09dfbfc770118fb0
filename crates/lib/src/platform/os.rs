use std::fmt;

use serde::{Deserialize, Serialize};

/// Operating system families the path and environment layers distinguish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", from = "String")]
pub enum PlatformFamily {
  Linux,
  MacOs,
  Windows,
  FreeBsd,
  Unknown,
}

impl PlatformFamily {
  /// Detect the current operating system family at runtime
  pub fn current() -> Self {
    Self::from_os_str(std::env::consts::OS)
  }

  /// Map a host OS identifier (as in `std::env::consts::OS`) to a family
  ///
  /// Unrecognized identifiers map to [`PlatformFamily::Unknown`].
  pub fn from_os_str(os: &str) -> Self {
    match os {
      "linux" | "android" => Self::Linux,
      "macos" | "darwin" | "ios" => Self::MacOs,
      "windows" => Self::Windows,
      "freebsd" => Self::FreeBsd,
      _ => Self::Unknown,
    }
  }

  /// Returns the lowercase string identifier for this family
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::Windows => "windows",
      Self::FreeBsd => "freebsd",
      Self::Unknown => "unknown",
    }
  }

  /// True for every family except Windows
  ///
  /// Unknown hosts are assumed to be POSIX-like.
  pub fn is_unix(&self) -> bool {
    !matches!(self, Self::Windows)
  }
}

impl From<PlatformFamily> for &'static str {
  fn from(family: PlatformFamily) -> Self {
    family.as_str()
  }
}

impl From<String> for PlatformFamily {
  fn from(os: String) -> Self {
    Self::from_os_str(&os)
  }
}

impl fmt::Display for PlatformFamily {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Processor architecture of the running process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", from = "String")]
pub enum PlatformArchitecture {
  X86,
  X64,
  Arm,
  Arm64,
  Unknown,
}

impl PlatformArchitecture {
  /// Detect the current process architecture at runtime
  pub fn current() -> Self {
    Self::from_arch_str(std::env::consts::ARCH)
  }

  /// Map a host architecture identifier (as in `std::env::consts::ARCH`)
  pub fn from_arch_str(arch: &str) -> Self {
    match arch {
      "x86" => Self::X86,
      "x86_64" => Self::X64,
      "arm" => Self::Arm,
      "aarch64" => Self::Arm64,
      _ => Self::Unknown,
    }
  }

  /// Returns the lowercase string identifier for this architecture
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X86 => "x86",
      Self::X64 => "x86_64",
      Self::Arm => "arm",
      Self::Arm64 => "aarch64",
      Self::Unknown => "unknown",
    }
  }

  /// True for 64-bit word sizes
  pub fn is_64bit(&self) -> bool {
    matches!(self, Self::X64 | Self::Arm64)
  }
}

impl From<PlatformArchitecture> for &'static str {
  fn from(arch: PlatformArchitecture) -> Self {
    arch.as_str()
  }
}

impl From<String> for PlatformArchitecture {
  fn from(arch: String) -> Self {
    Self::from_arch_str(&arch)
  }
}

impl fmt::Display for PlatformArchitecture {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

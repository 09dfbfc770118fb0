pub mod arch;
pub mod os;

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

pub use arch::PlatformArchitecture;
pub use os::PlatformFamily;

use crate::path::PathStyle;

/// Host platform identity: OS family plus process architecture (e.g., "x86_64-linux")
///
/// Immutable once constructed. Use [`Platform::current`] for the running host
/// or [`Platform::new`] to describe another one (tests, fakes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
  pub family: PlatformFamily,
  pub arch: PlatformArchitecture,
}

static CURRENT: OnceLock<Platform> = OnceLock::new();

impl Platform {
  /// Create a platform identifier
  pub fn new(family: PlatformFamily, arch: PlatformArchitecture) -> Self {
    Self { family, arch }
  }

  /// The running host, detected once per process
  ///
  /// Never fails: unrecognized hosts report `Unknown` variants.
  pub fn current() -> Self {
    *CURRENT.get_or_init(Self::detect)
  }

  /// Query the host identifiers without consulting the cache
  pub fn detect() -> Self {
    Self {
      family: PlatformFamily::current(),
      arch: PlatformArchitecture::current(),
    }
  }

  pub fn family(&self) -> PlatformFamily {
    self.family
  }

  pub fn architecture(&self) -> PlatformArchitecture {
    self.arch
  }

  pub fn is_unix(&self) -> bool {
    self.family.is_unix()
  }

  pub fn is_windows(&self) -> bool {
    self.family == PlatformFamily::Windows
  }

  pub fn is_64bit(&self) -> bool {
    self.arch.is_64bit()
  }

  /// Path syntax used by this platform
  pub fn path_style(&self) -> PathStyle {
    if self.is_windows() {
      PathStyle::Windows
    } else {
      PathStyle::Unix
    }
  }

  /// Whether the default file system of this platform distinguishes case
  ///
  /// Windows (NTFS) and macOS (APFS/HFS+ default) are case-insensitive.
  pub fn is_path_case_sensitive(&self) -> bool {
    !matches!(self.family, PlatformFamily::Windows | PlatformFamily::MacOs)
  }

  /// Whether environment variable names distinguish case
  pub fn is_environment_case_sensitive(&self) -> bool {
    !self.is_windows()
  }

  /// Returns the platform triple string (e.g., "aarch64-darwin")
  pub fn triple(&self) -> String {
    format!("{}-{}", self.arch, self.family)
  }
}

impl Default for Platform {
  fn default() -> Self {
    Self::current()
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}

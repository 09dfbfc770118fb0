//! Access to process-wide environment state.
//!
//! Code that needs the working directory, the home directory or environment
//! variables takes an [`Environment`] instead of calling the OS directly, so
//! tests can substitute a [`FakeEnvironment`].
//!
//! The working directory is process-global: changing it through one
//! [`SystemEnvironment`] is visible to every other instance and to any code
//! resolving relative paths. This layer adds no locking; callers that need
//! atomic sequences around a working-directory change must serialize them
//! themselves.

mod fake;
mod system;
mod variables;

pub use fake::FakeEnvironment;
pub use system::SystemEnvironment;
pub use variables::EnvironmentVariables;

use crate::error::{Error, Result};
use crate::path::DirectoryPath;
use crate::platform::Platform;

/// Environment and platform queries.
pub trait Environment {
  /// The current working directory, queried on every call.
  fn working_directory(&self) -> Result<DirectoryPath>;

  /// Change the working directory.
  ///
  /// Fails with [`Error::InvalidArgument`] for a relative path.
  fn set_working_directory(&self, path: &DirectoryPath) -> Result<()>;

  /// The current user's home/profile directory.
  fn home_directory(&self) -> Result<DirectoryPath>;

  fn platform(&self) -> &Platform;

  /// Look up one variable; `None` when unset or not valid Unicode.
  fn environment_variable(&self, name: &str) -> Option<String>;

  /// Snapshot of all variables.
  fn environment_variables(&self) -> EnvironmentVariables;
}

/// Variable name as compared under the given case rule.
///
/// Every case-insensitive comparison of names goes through here, so a
/// snapshot lookup and a single-variable lookup always agree.
pub(crate) fn fold_key(key: &str, case_sensitive: bool) -> String {
  if case_sensitive {
    key.to_string()
  } else {
    key.to_uppercase()
  }
}

pub(crate) fn keys_match(key: &str, name: &str, case_sensitive: bool) -> bool {
  key == name || (!case_sensitive && fold_key(key, false) == fold_key(name, false))
}

/// A relative path has no unambiguous meaning as a working directory.
pub(crate) fn ensure_absolute(path: &DirectoryPath) -> Result<()> {
  if path.is_relative() {
    return Err(Error::InvalidArgument(format!(
      "working directory can not be set to a relative path: {path}"
    )));
  }
  Ok(())
}

use std::path::Path as StdPath;

use tracing::{debug, warn};

use super::{Environment, EnvironmentVariables, ensure_absolute, keys_match};
use crate::error::{Error, Result};
use crate::path::DirectoryPath;
use crate::platform::Platform;

/// The live host environment.
#[derive(Debug, Clone)]
pub struct SystemEnvironment {
  platform: Platform,
  initial_working_directory: Option<DirectoryPath>,
}

impl SystemEnvironment {
  /// Capture the current working directory and hold `platform` for the
  /// lifetime of the instance.
  pub fn new(platform: Platform) -> Self {
    let initial_working_directory = match current_dir(&platform) {
      Ok(dir) => Some(dir),
      Err(e) => {
        warn!(error = %e, "could not capture the initial working directory");
        None
      }
    };

    Self {
      platform,
      initial_working_directory,
    }
  }

  /// The working directory at construction time.
  pub fn initial_working_directory(&self) -> Option<&DirectoryPath> {
    self.initial_working_directory.as_ref()
  }
}

impl Default for SystemEnvironment {
  fn default() -> Self {
    Self::new(Platform::current())
  }
}

impl Environment for SystemEnvironment {
  fn working_directory(&self) -> Result<DirectoryPath> {
    current_dir(&self.platform)
  }

  fn set_working_directory(&self, path: &DirectoryPath) -> Result<()> {
    ensure_absolute(path)?;
    let full_path = path.full_path();
    std::env::set_current_dir(&full_path).map_err(|e| Error::from_io(&full_path, e))?;
    debug!(path = %full_path, "changed working directory");
    Ok(())
  }

  fn home_directory(&self) -> Result<DirectoryPath> {
    let home = dirs::home_dir().ok_or(Error::NoHomeDirectory)?;
    to_directory_path(&home, &self.platform)
  }

  fn platform(&self) -> &Platform {
    &self.platform
  }

  fn environment_variable(&self, name: &str) -> Option<String> {
    if let Some(value) = std::env::var_os(name) {
      return value.into_string().ok();
    }
    if self.platform.is_environment_case_sensitive() {
      return None;
    }
    std::env::vars_os()
      .find(|(key, _)| keys_match(&key.to_string_lossy(), name, false))
      .and_then(|(_, value)| value.into_string().ok())
  }

  fn environment_variables(&self) -> EnvironmentVariables {
    EnvironmentVariables::collect(
      std::env::vars_os().map(|(key, value)| (key.to_string_lossy().into_owned(), value.into_string().ok())),
      self.platform.is_environment_case_sensitive(),
    )
  }
}

fn current_dir(platform: &Platform) -> Result<DirectoryPath> {
  let cwd = std::env::current_dir().map_err(|e| Error::from_io(".", e))?;
  to_directory_path(&cwd, platform)
}

/// Convert an OS path, dropping Windows verbatim prefixes (`\\?\`).
fn to_directory_path(path: &StdPath, platform: &Platform) -> Result<DirectoryPath> {
  let path = dunce::simplified(path);
  let raw = path
    .to_str()
    .ok_or_else(|| Error::invalid_path(path.to_string_lossy(), "path is not valid Unicode"))?;
  DirectoryPath::parse_with(raw, platform.path_style())
}

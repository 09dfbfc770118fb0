use std::sync::{Mutex, PoisonError};

use tracing::debug;

use super::{Environment, EnvironmentVariables, ensure_absolute, keys_match};
use crate::error::{Error, Result};
use crate::path::{DirectoryPath, Path, PathStyle};
use crate::platform::{Platform, PlatformArchitecture, PlatformFamily};

/// In-memory environment for tests.
///
/// Holds its own working directory, home directory and variable list; nothing
/// here touches the process. Variables keep insertion order and may contain
/// keys that differ only by case, like a raw host environment block.
#[derive(Debug)]
pub struct FakeEnvironment {
  platform: Platform,
  working_directory: Mutex<DirectoryPath>,
  home_directory: Option<DirectoryPath>,
  variables: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeEnvironment {
  /// A fake rooted at `/` (or `C:\`) with a conventional home directory.
  pub fn new(platform: Platform) -> Self {
    let (root, home) = match platform.path_style() {
      PathStyle::Unix => ("/", "/home/user"),
      PathStyle::Windows => ("C:\\", "C:\\Users\\user"),
    };
    let style = platform.path_style();

    Self {
      platform,
      working_directory: Mutex::new(fixed_directory(root, style)),
      home_directory: Some(fixed_directory(home, style)),
      variables: Mutex::new(Vec::new()),
    }
  }

  pub fn unix() -> Self {
    Self::new(Platform::new(PlatformFamily::Linux, PlatformArchitecture::X64))
  }

  pub fn windows() -> Self {
    Self::new(Platform::new(PlatformFamily::Windows, PlatformArchitecture::X64))
  }

  pub fn with_working_directory(self, path: DirectoryPath) -> Self {
    *self.working_directory.lock().unwrap_or_else(PoisonError::into_inner) = path;
    self
  }

  /// `None` simulates a host without a user profile.
  pub fn with_home_directory(mut self, path: Option<DirectoryPath>) -> Self {
    self.home_directory = path;
    self
  }

  pub fn with_variable(self, name: &str, value: Option<&str>) -> Self {
    self.set_environment_variable(name, value);
    self
  }

  /// Append a raw variable entry.
  ///
  /// An exact key match is overwritten; keys differing only by case are
  /// appended so snapshot deduplication can be exercised.
  pub fn set_environment_variable(&self, name: &str, value: Option<&str>) {
    let mut variables = self.variables.lock().unwrap_or_else(PoisonError::into_inner);
    let value = value.map(str::to_string);
    match variables.iter_mut().find(|(key, _)| key == name) {
      Some(entry) => entry.1 = value,
      None => variables.push((name.to_string(), value)),
    }
  }

  pub fn remove_environment_variable(&self, name: &str) {
    let case_sensitive = self.platform.is_environment_case_sensitive();
    self
      .variables
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .retain(|(key, _)| !keys_match(key, name, case_sensitive));
  }
}

impl Default for FakeEnvironment {
  fn default() -> Self {
    Self::new(Platform::current())
  }
}

impl Environment for FakeEnvironment {
  fn working_directory(&self) -> Result<DirectoryPath> {
    Ok(self.working_directory.lock().unwrap_or_else(PoisonError::into_inner).clone())
  }

  fn set_working_directory(&self, path: &DirectoryPath) -> Result<()> {
    ensure_absolute(path)?;
    debug!(path = %path, "changed fake working directory");
    *self.working_directory.lock().unwrap_or_else(PoisonError::into_inner) = path.clone();
    Ok(())
  }

  fn home_directory(&self) -> Result<DirectoryPath> {
    self.home_directory.clone().ok_or(Error::NoHomeDirectory)
  }

  fn platform(&self) -> &Platform {
    &self.platform
  }

  fn environment_variable(&self, name: &str) -> Option<String> {
    let case_sensitive = self.platform.is_environment_case_sensitive();
    let variables = self.variables.lock().unwrap_or_else(PoisonError::into_inner);
    variables
      .iter()
      .find(|(key, _)| keys_match(key, name, case_sensitive))
      .and_then(|(_, value)| value.clone())
  }

  fn environment_variables(&self) -> EnvironmentVariables {
    let variables = self.variables.lock().unwrap_or_else(PoisonError::into_inner);
    EnvironmentVariables::collect(variables.iter().cloned(), self.platform.is_environment_case_sensitive())
  }
}

/// Parse one of the literal defaults above.
fn fixed_directory(raw: &str, style: PathStyle) -> DirectoryPath {
  DirectoryPath::parse_with(raw, style).unwrap_or_else(|_| DirectoryPath::from(Path::current(style)))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_follow_platform_style() {
    let unix = FakeEnvironment::unix();
    assert_eq!(unix.working_directory().unwrap().full_path(), "/");
    assert_eq!(unix.home_directory().unwrap().full_path(), "/home/user");

    let windows = FakeEnvironment::windows();
    assert_eq!(windows.working_directory().unwrap().full_path(), "C:\\");
    assert_eq!(windows.home_directory().unwrap().full_path(), "C:\\Users\\user");
  }

  #[test]
  fn set_working_directory_rejects_relative_paths_even_if_they_exist() {
    let env = FakeEnvironment::unix();
    let relative = DirectoryPath::parse_with("home", PathStyle::Unix).unwrap();
    assert!(matches!(
      env.set_working_directory(&relative),
      Err(Error::InvalidArgument(_))
    ));
    assert_eq!(env.working_directory().unwrap().full_path(), "/");
  }

  #[test]
  fn set_working_directory_updates_state() {
    let env = FakeEnvironment::unix();
    let target = DirectoryPath::parse_with("/srv/app", PathStyle::Unix).unwrap();
    env.set_working_directory(&target).unwrap();
    assert_eq!(env.working_directory().unwrap(), target);
  }

  #[test]
  fn missing_home_directory() {
    let env = FakeEnvironment::unix().with_home_directory(None);
    assert!(matches!(env.home_directory(), Err(Error::NoHomeDirectory)));
  }

  #[test]
  fn windows_snapshot_deduplicates_case_insensitively() {
    let env = FakeEnvironment::windows()
      .with_variable("PATH", Some("/bin"))
      .with_variable("path", Some("/usr/bin"));

    let vars = env.environment_variables();
    assert_eq!(vars.len(), 1);
    assert_eq!(vars.get("Path"), Some("/bin"));
    assert_eq!(env.environment_variable("pAtH").as_deref(), Some("/bin"));
  }

  #[test]
  fn lookup_and_snapshot_agree_on_non_ascii_names() {
    let env = FakeEnvironment::windows().with_variable("GRÜN_DIR", Some("C:\\green"));
    assert_eq!(env.environment_variable("grün_dir").as_deref(), Some("C:\\green"));
    assert_eq!(env.environment_variables().get("grün_dir"), Some("C:\\green"));
  }

  #[test]
  fn unix_snapshot_keeps_case_variants() {
    let env = FakeEnvironment::unix()
      .with_variable("PATH", Some("/bin"))
      .with_variable("path", Some("/usr/bin"));

    assert_eq!(env.environment_variables().len(), 2);
    assert_eq!(env.environment_variable("path").as_deref(), Some("/usr/bin"));
    assert_eq!(env.environment_variable("Path"), None);
  }

  #[test]
  fn set_overwrites_and_remove_deletes() {
    let env = FakeEnvironment::unix().with_variable("EDITOR", Some("vi"));
    env.set_environment_variable("EDITOR", Some("nvim"));
    assert_eq!(env.environment_variable("EDITOR").as_deref(), Some("nvim"));

    env.remove_environment_variable("EDITOR");
    assert_eq!(env.environment_variable("EDITOR"), None);
  }

  #[test]
  fn make_absolute_uses_fake_working_directory() {
    let env = FakeEnvironment::unix().with_working_directory(DirectoryPath::parse_with("/work", PathStyle::Unix).unwrap());
    let path = Path::parse_with("src/lib.rs", PathStyle::Unix).unwrap();
    assert_eq!(path.make_absolute_with(&env).unwrap().full_path(), "/work/src/lib.rs");
  }
}

//! Environment behavior through the trait, against both implementations.

use hostio_lib::{
  DirectoryPath, Environment, Error, FakeEnvironment, Platform, PlatformArchitecture, PlatformFamily, SystemEnvironment,
};
use serial_test::serial;

use super::common::{temp_dir, unix_dir};

/// Resolve a tool's config directory the way a CLI would: `$XDG_CONFIG_HOME`
/// when set, `~/.config` otherwise.
fn config_directory(env: &dyn Environment) -> Result<DirectoryPath, Error> {
  if let Some(xdg) = env.environment_variable("XDG_CONFIG_HOME") {
    return DirectoryPath::parse_with(&xdg, env.platform().path_style());
  }
  env.home_directory()?.combine_with_directory(".config")
}

#[test]
fn fake_environment_drives_config_lookup() {
  let env = FakeEnvironment::unix();
  assert_eq!(config_directory(&env).unwrap(), unix_dir("/home/user/.config"));

  env.set_environment_variable("XDG_CONFIG_HOME", Some("/etc/xdg"));
  assert_eq!(config_directory(&env).unwrap(), unix_dir("/etc/xdg"));

  let homeless = FakeEnvironment::unix().with_home_directory(None);
  assert!(matches!(config_directory(&homeless), Err(Error::NoHomeDirectory)));
}

#[test]
#[serial]
fn system_environment_drives_config_lookup() {
  temp_env::with_var("XDG_CONFIG_HOME", Some("/custom/config"), || {
    let env = SystemEnvironment::default();
    assert_eq!(config_directory(&env).unwrap(), DirectoryPath::parse("/custom/config").unwrap());
  });
}

#[test]
fn relative_working_directory_always_fails() {
  let env = FakeEnvironment::unix();
  for raw in [".", "..", "home", "does/not/exist"] {
    let relative = unix_dir(raw);
    assert!(matches!(env.set_working_directory(&relative), Err(Error::InvalidArgument(_))), "{raw}");
  }
}

#[test]
#[serial]
fn working_directory_changes_are_process_wide() {
  let (_temp, target) = temp_dir();
  let first = SystemEnvironment::default();
  let second = SystemEnvironment::new(Platform::current());
  let original = first.working_directory().unwrap();

  first.set_working_directory(&target).unwrap();
  let seen_by_second = second.working_directory().unwrap();
  first.set_working_directory(&original).unwrap();

  assert_eq!(seen_by_second, target);
  assert_eq!(second.initial_working_directory(), Some(&original));
}

#[test]
fn duplicate_keys_on_case_insensitive_host() {
  let windows = FakeEnvironment::new(Platform::new(PlatformFamily::Windows, PlatformArchitecture::X64))
    .with_variable("PATH", Some("/bin"))
    .with_variable("path", Some("/usr/bin"));

  let vars = windows.environment_variables();
  let matching: Vec<_> = vars.iter().filter(|(k, _)| k.eq_ignore_ascii_case("path")).collect();
  assert_eq!(matching, vec![("PATH", Some("/bin"))]);
}

#[test]
fn platform_is_held_for_the_lifetime_of_the_environment() {
  let platform = Platform::new(PlatformFamily::FreeBsd, PlatformArchitecture::Arm64);
  let env = SystemEnvironment::new(platform);
  assert_eq!(*env.platform(), platform);
  assert_eq!(env.platform().triple(), "aarch64-freebsd");
}

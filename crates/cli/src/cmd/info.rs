//! Info command implementation.
//!
//! Shows what the library detected about the host.

use anyhow::Result;
use serde::Serialize;

use hostio_lib::{Environment, SystemEnvironment};

use crate::output::{OutputFormat, or_none, print_json, print_stat, print_success};

#[derive(Serialize)]
struct InfoReport {
  triple: String,
  family: String,
  architecture: String,
  path_style: String,
  path_case_sensitive: bool,
  environment_case_sensitive: bool,
  working_directory: Option<String>,
  home_directory: Option<String>,
}

pub fn cmd_info(output: OutputFormat) -> Result<()> {
  let env = SystemEnvironment::default();
  let platform = env.platform();

  let report = InfoReport {
    triple: platform.triple(),
    family: platform.family().to_string(),
    architecture: platform.architecture().to_string(),
    path_style: platform.path_style().to_string(),
    path_case_sensitive: platform.is_path_case_sensitive(),
    environment_case_sensitive: platform.is_environment_case_sensitive(),
    working_directory: env.working_directory().ok().map(|d| d.full_path()),
    home_directory: env.home_directory().ok().map(|d| d.full_path()),
  };

  if output.is_json() {
    print_json(&report)?;
  } else {
    print_success(&format!("Platform: {}", report.triple));
    print_stat("Family", &report.family);
    print_stat("Architecture", &report.architecture);
    print_stat("Path style", &report.path_style);
    print_stat("Case-sensitive paths", &report.path_case_sensitive.to_string());
    print_stat("Case-sensitive env", &report.environment_case_sensitive.to_string());
    print_stat("Working directory", &or_none(report.working_directory.as_deref()));
    print_stat("Home directory", &or_none(report.home_directory.as_deref()));
  }

  Ok(())
}

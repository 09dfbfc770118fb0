//! Ls command implementation.
//!
//! Lists entries through the real file system, resolving the directory
//! against the process working directory.

use anyhow::{Context, Result};

use hostio_lib::{DirectoryPath, Environment, FileSystem, SearchScope, SystemEnvironment, SystemFileSystem};

use crate::output::{OutputFormat, print_info, print_json, symbols};

pub fn cmd_ls(dir: Option<&str>, filter: &str, recursive: bool, dirs: bool, output: OutputFormat) -> Result<()> {
  let env = SystemEnvironment::default();
  let fs = SystemFileSystem::new();

  let directory = match dir {
    Some(raw) => DirectoryPath::parse(raw)
      .with_context(|| format!("Invalid directory {:?}", raw))?
      .make_absolute_with(&env)?,
    None => env.working_directory().context("Failed to read the working directory")?,
  };
  let scope = if recursive {
    SearchScope::Recursive
  } else {
    SearchScope::Current
  };

  let entries: Vec<String> = if dirs {
    fs.directories(&directory, filter, scope)
      .with_context(|| format!("Failed to list {}", directory))?
      .iter()
      .map(|d| d.full_path())
      .collect()
  } else {
    fs.files(&directory, filter, scope)
      .with_context(|| format!("Failed to list {}", directory))?
      .iter()
      .map(|f| f.full_path())
      .collect()
  };

  if output.is_json() {
    print_json(&entries)?;
  } else if entries.is_empty() {
    print_info(&format!("Nothing matching {:?} in {}", filter, directory));
  } else {
    for entry in &entries {
      println!("  {} {}", symbols::INFO, entry);
    }
  }

  Ok(())
}

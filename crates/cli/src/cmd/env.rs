//! Env command implementation.

use anyhow::{Result, bail};

use hostio_lib::{Environment, SystemEnvironment};

use crate::output::{OutputFormat, or_none, print_error, print_json, print_stat};

pub fn cmd_env(name: Option<&str>, output: OutputFormat) -> Result<()> {
  let env = SystemEnvironment::default();

  let Some(name) = name else {
    let variables = env.environment_variables();
    if output.is_json() {
      print_json(&variables)?;
    } else {
      for (key, value) in variables.iter() {
        print_stat(key, &or_none(value));
      }
    }
    return Ok(());
  };

  match env.environment_variable(name) {
    Some(value) if output.is_json() => print_json(&serde_json::json!({ "name": name, "value": value }))?,
    Some(value) => println!("{}", value),
    None => {
      print_error(&format!("{} is not set", name));
      bail!("environment variable {} is not set", name);
    }
  }

  Ok(())
}

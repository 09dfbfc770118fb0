//! Path command implementation.
//!
//! Parses a path in the requested style and prints its normalized parts.

use anyhow::{Context, Result};
use serde::Serialize;

use hostio_lib::{FilePath, Path, PathRoot, PathStyle};

use crate::output::{OutputFormat, or_none, print_json, print_stat, print_success};

#[derive(Serialize)]
struct PathReport {
  input: String,
  style: PathStyle,
  rendered: String,
  root: Option<String>,
  segments: Vec<String>,
  relative: bool,
  trailing_separator: bool,
  filename: Option<String>,
  extension: Option<String>,
}

fn describe_root(root: PathRoot) -> String {
  match root {
    PathRoot::Separator => "separator".to_string(),
    PathRoot::Drive(letter) => format!("drive {}:", letter),
    PathRoot::Unc => "unc".to_string(),
  }
}

pub fn cmd_path(raw: &str, style: PathStyle, collapse: bool, output: OutputFormat) -> Result<()> {
  let mut path = Path::parse_with(raw, style).with_context(|| format!("Failed to parse {:?}", raw))?;
  if collapse {
    path = path.collapse();
  }

  let file = FilePath::try_from(path.clone()).ok();
  let report = PathReport {
    input: raw.to_string(),
    style,
    rendered: path.full_path(),
    root: path.root().map(describe_root),
    segments: path.segments().to_vec(),
    relative: path.is_relative(),
    trailing_separator: path.has_trailing_separator(),
    filename: file.as_ref().map(|f| f.filename().to_string()),
    extension: file.as_ref().and_then(|f| f.extension()).map(str::to_string),
  };

  if output.is_json() {
    print_json(&report)?;
  } else {
    print_success(&report.rendered);
    print_stat("Style", report.style.as_str());
    print_stat("Root", &or_none(report.root.as_deref()));
    print_stat("Segments", &report.segments.join(", "));
    print_stat("Relative", &report.relative.to_string());
    print_stat("Trailing separator", &report.trailing_separator.to_string());
    print_stat("Filename", &or_none(report.filename.as_deref()));
    print_stat("Extension", &or_none(report.extension.as_deref()));
  }

  Ok(())
}

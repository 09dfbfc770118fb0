use anyhow::Result;
use clap::{Parser, Subcommand};
use hostio_lib::PathStyle;
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use cmd::{cmd_env, cmd_info, cmd_ls, cmd_path};
use output::OutputFormat;

/// hostio - inspect paths, environment and files the way the host sees them
#[derive(Parser)]
#[command(name = "hostio")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show platform, working directory and home directory
  Info,

  /// Print one environment variable, or all of them
  Env {
    /// Variable name (lookup follows the platform's case rules)
    name: Option<String>,
  },

  /// Parse a path and show how it breaks down
  Path {
    /// The raw path text
    raw: String,

    /// Path style to parse with (defaults to the host's)
    #[arg(short, long)]
    style: Option<PathStyle>,

    /// Resolve `..` segments before printing
    #[arg(short, long)]
    collapse: bool,
  },

  /// List files (or directories) under a directory
  Ls {
    /// Directory to list (default: working directory)
    dir: Option<String>,

    /// Wildcard filter on entry names
    #[arg(short, long, default_value = "*")]
    filter: String,

    /// Descend into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// List directories instead of files
    #[arg(short, long)]
    dirs: bool,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Info => cmd_info(cli.output),
    Commands::Env { name } => cmd_env(name.as_deref(), cli.output),
    Commands::Path { raw, style, collapse } => cmd_path(&raw, style.unwrap_or_default(), collapse, cli.output),
    Commands::Ls {
      dir,
      filter,
      recursive,
      dirs,
    } => cmd_ls(dir.as_deref(), &filter, recursive, dirs, cli.output),
  }
}

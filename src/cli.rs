//! # CLI Module
//!
//! Command-line interface for the go-license tool. Argument parsing uses
//! clap; the command loads and validates the YAML configuration, expands the
//! positional arguments into a flat file list, and dispatches to the
//! processing core.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::load_config;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::{info_log, processor, verbose_log};

/// Config file consulted when `--config` is not given.
pub const DEFAULT_CONFIG_FILENAME: &str = ".golicense.yml";

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "Write or verify license headers for Go files",
  after_help = "Examples:
  # Add license headers from the default configuration
  go-license .

  # Verify headers without modifying files (exits non-zero on mismatch)
  go-license --verify --config license.yml .

  # Strip license headers
  go-license --remove --config license.yml src/
"
)]
pub struct Cli {
  /// Files or directories to process. Directories are walked recursively.
  #[arg(value_name = "FILES", default_value = ".")]
  pub files: Vec<String>,

  /// The YAML configuration file for the license check
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Verify that files have proper license headers applied
  #[arg(long)]
  pub verify: bool,

  /// Remove the license header from files (no-op if verify is true)
  #[arg(long)]
  pub remove: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors and the verify report
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output
  #[arg(long, value_name = "WHEN", value_enum, default_value_t = ColorMode::Auto)]
  pub colors: ColorMode,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

/// Runs the license command with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
  init_tracing(cli.quiet, cli.verbose);
  if cli.verbose > 0 {
    set_verbose();
  } else if cli.quiet {
    set_quiet();
  }
  cli.colors.apply();

  let config_path = cli
    .config
    .clone()
    .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));
  let config = load_config(&config_path).with_context(|| format!("failed to load {}", config_path.display()))?;
  let param = config.to_param()?;

  let files = collect_input_files(&cli.files)?;
  debug!("collected {} candidate files", files.len());

  // The verify-suppresses-remove policy lives in run_license.
  let outcome = processor::run_license(&files, &param, cli.verify, cli.remove, &mut std::io::stdout())?;
  for file in &outcome.modified {
    if cli.remove {
      info_log!("Removed license from: {file}");
    } else {
      info_log!("Added license to: {file}");
    }
  }
  if !outcome.ok {
    process::exit(1);
  }
  Ok(())
}

/// Expands the positional arguments into a flat list of file paths.
///
/// Plain files pass through; directories are walked recursively. Paths are
/// reported the way they were given, with any leading `./` stripped so the
/// verify report stays stable.
fn collect_input_files(args: &[String]) -> Result<Vec<String>> {
  let mut files = Vec::new();

  for arg in args {
    let path = Path::new(arg);
    if path.is_file() {
      files.push(normalize(arg));
    } else if path.is_dir() {
      for entry in WalkDir::new(path) {
        let entry = entry.with_context(|| format!("failed to walk directory {arg}"))?;
        if entry.file_type().is_file() {
          files.push(normalize(&entry.path().to_string_lossy()));
        }
      }
    } else {
      verbose_log!("Skipping: {arg} (no such file or directory)");
    }
  }

  Ok(files)
}

fn normalize(path: &str) -> String {
  path.strip_prefix("./").unwrap_or(path).to_string()
}

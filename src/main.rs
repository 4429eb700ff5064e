//! # go-license
//!
//! Write or verify license headers for Go files.

use anyhow::Result;

use go_license::cli::{Cli, run};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run(cli)
}

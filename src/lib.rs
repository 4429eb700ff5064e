//! # go-license
//!
//! A tool that writes, verifies or removes standardized license headers in Go
//! source files.
//!
//! The expected header is configured once for the whole project, with named
//! per-path overrides for directories or files that carry a different
//! license. Header templates may contain the `{{YEAR}}` placeholder, which
//! matches any four-digit year when verifying and resolves to the current
//! year when writing.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use go_license::config::load_config;
//! use go_license::processor;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = load_config(Path::new("license.yml"))?;
//!     let param = config.to_param()?;
//!
//!     let files = vec!["main.go".to_string(), "internal/server.go".to_string()];
//!     let modified = processor::license_files(&files, &param)?;
//!
//!     for file in modified {
//!         println!("added header to {file}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`licenser`] - Header templates: add, strip and match with year handling
//! * [`processor`] - Batch routing and the verify/license/unlicense operations
//! * [`config`] - YAML configuration, schema upgrade and validation
//!
//! [`licenser`]: crate::licenser
//! [`processor`]: crate::processor
//! [`config`]: crate::config

pub mod cli;
pub mod config;
pub mod file_io;
pub mod licenser;
pub mod logging;
pub mod matcher;
pub mod params;
pub mod processor;

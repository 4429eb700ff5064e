//! # Params Module
//!
//! Resolved, validated runtime parameters for a license run. Produced once
//! per invocation from the configuration layer and treated as immutable for
//! the remainder of the run.

use crate::licenser::Licenser;
use crate::matcher::Exclude;

/// Resolved project parameters for a single license run.
#[derive(Debug, Clone)]
pub struct ProjectParam {
  /// The default licenser, applied to any `*.go` file not claimed by a
  /// custom header.
  pub licenser: Licenser,

  /// Custom header parameters. Used to give certain directories or files a
  /// header that differs from the default.
  pub custom_headers: Vec<CustomHeaderParam>,

  /// Files and directories excluded from consideration for verifying,
  /// applying or removing licenses.
  pub exclude: Exclude,
}

/// A named header override for a set of include paths.
#[derive(Debug, Clone)]
pub struct CustomHeaderParam {
  /// Identifier for this custom header. Must be unique and non-blank.
  pub name: String,

  /// Licenser for this header.
  pub licenser: Licenser,

  /// Paths for which this custom header is applicable. If multiple custom
  /// headers match a file, the one with the longest path match is used; ties
  /// at equal length are broken by lexicographically smaller name.
  pub include_paths: Vec<String>,
}

//! # Configuration Module
//!
//! YAML configuration for the license check: a default header template,
//! named custom headers bound to include paths, and an exclusion block.
//!
//! Legacy schema variants are upgraded to the current (v0) shape by
//! [`upgrade_config`] before anything else sees them, and
//! [`ProjectConfig::to_param`] validates the document and produces the
//! resolved [`ProjectParam`] the processing core consumes. Validation failures
//! aggregate every violation found rather than stopping at the first.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::debug;

use crate::licenser::Licenser;
use crate::matcher::Exclude;
use crate::params::{CustomHeaderParam, ProjectParam};

/// Project configuration, current (v0) schema.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
  /// The expected license header. All applicable files are expected to start
  /// with this header followed by a newline. Occurrences of `{{YEAR}}` are
  /// treated specially: when generating a license the current year is
  /// substituted, and when verifying any 4-digit string is a match.
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub header: String,

  /// Custom header entries giving certain directories or files a header that
  /// differs from `header`.
  #[serde(default, rename = "custom-headers", skip_serializing_if = "Vec::is_empty")]
  pub custom_headers: Vec<CustomHeaderConfig>,

  /// Files and directories excluded from consideration.
  #[serde(default)]
  pub exclude: ExcludeConfig,
}

/// One named custom header entry.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomHeaderConfig {
  /// Identifier for this entry. Must be unique and non-blank.
  #[serde(default)]
  pub name: String,

  /// The expected license header for this entry. Same `{{YEAR}}` treatment
  /// as the default header.
  #[serde(default)]
  pub header: String,

  /// Paths for which this custom header is applicable.
  #[serde(default)]
  pub paths: Vec<String>,
}

/// Exclusion block: name patterns and literal paths.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExcludeConfig {
  /// Regular expressions matched against each path component.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub names: Vec<String>,

  /// Literal paths (files or directory prefixes).
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub paths: Vec<String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("failed to read config file {path}: {source}")]
  Read { path: PathBuf, source: std::io::Error },

  /// The config document is not valid YAML for the expected schema.
  #[error("failed to unmarshal configuration as YAML: {source}")]
  Parse {
    #[source]
    source: serde_yaml::Error,
  },

  /// The config document declares a version this tool does not understand.
  #[error("unsupported configuration version: {0}")]
  UnsupportedVersion(String),

  /// The config document is not a YAML mapping.
  #[error("configuration must be a YAML mapping")]
  NotAMapping,

  /// A custom header entry has a blank name.
  #[error("custom header name cannot be blank")]
  BlankName,

  /// Two or more custom header entries share a name. Lists every duplicated
  /// name, sorted.
  #[error("custom header(s) defined multiple times: {}", .0.join(", "))]
  DuplicateNames(Vec<String>),

  /// The same path is claimed by more than one custom header entry. One line
  /// per colliding path (paths sorted), listing the claiming entry names in
  /// declaration order.
  #[error("the same path is defined by multiple custom header entries:\n\t{}", .0.join("\n\t"))]
  PathCollisions(Vec<String>),

  /// A header template could not be compiled into a match pattern.
  #[error("invalid header template: {source}")]
  InvalidTemplate {
    #[source]
    source: regex::Error,
  },

  /// An exclude name entry is not a valid regular expression.
  #[error("invalid exclude name pattern: {source}")]
  InvalidExcludeName {
    #[source]
    source: regex::Error,
  },
}

impl ProjectConfig {
  /// Validates this configuration and resolves it into a [`ProjectParam`].
  ///
  /// # Errors
  ///
  /// Returns a [`ConfigError`] for blank or duplicated custom header names,
  /// paths claimed by more than one entry, or unparseable patterns. Name and
  /// path violations are aggregated across the whole document.
  pub fn to_param(&self) -> Result<ProjectParam, ConfigError> {
    let mut custom_headers = Vec::with_capacity(self.custom_headers.len());
    for entry in &self.custom_headers {
      custom_headers.push(entry.to_param()?);
    }

    validate_custom_header_params(&custom_headers)?;

    Ok(ProjectParam {
      licenser: new_licenser(&self.header)?,
      custom_headers,
      exclude: Exclude::new(&self.exclude.names, &self.exclude.paths)
        .map_err(|source| ConfigError::InvalidExcludeName { source })?,
    })
  }
}

impl CustomHeaderConfig {
  fn to_param(&self) -> Result<CustomHeaderParam, ConfigError> {
    if self.name.is_empty() {
      return Err(ConfigError::BlankName);
    }
    Ok(CustomHeaderParam {
      name: self.name.clone(),
      licenser: new_licenser(&self.header)?,
      include_paths: self.paths.clone(),
    })
  }
}

fn new_licenser(template: &str) -> Result<Licenser, ConfigError> {
  Licenser::new(template).map_err(|source| ConfigError::InvalidTemplate { source })
}

/// Checks name uniqueness and exact-path-claim uniqueness across all custom
/// header entries. Each class of violation is reported as one aggregate error.
fn validate_custom_header_params(params: &[CustomHeaderParam]) -> Result<(), ConfigError> {
  let mut seen = std::collections::HashSet::new();
  let mut duplicates = std::collections::BTreeSet::new();
  for param in params {
    if !seen.insert(param.name.as_str()) {
      duplicates.insert(param.name.clone());
    }
  }
  if !duplicates.is_empty() {
    return Err(ConfigError::DuplicateNames(duplicates.into_iter().collect()));
  }

  // Path -> claiming entry names, in declaration order.
  let mut claims: std::collections::BTreeMap<&str, Vec<&str>> = std::collections::BTreeMap::new();
  for param in params {
    for path in &param.include_paths {
      claims.entry(path).or_default().push(&param.name);
    }
  }
  let collisions: Vec<String> = claims
    .iter()
    .filter(|(_, names)| names.len() > 1)
    .map(|(path, names)| format!("{}: {}", path, names.join(", ")))
    .collect();
  if !collisions.is_empty() {
    return Err(ConfigError::PathCollisions(collisions));
  }

  Ok(())
}

/// Upgrades a raw configuration document to the current schema.
///
/// Pure text-to-text transformation: legacy documents (marked with
/// `legacy-config: true`) carry fields compatible with v0, so the upgrade
/// strips the marker; a `version` of `"0"` (or none) is current; anything
/// else is rejected. The returned document parses strictly as
/// [`ProjectConfig`].
pub fn upgrade_config(yaml: &str) -> Result<String, ConfigError> {
  let mut doc: Value = serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse { source })?;
  if doc.is_null() {
    return Ok(String::new());
  }
  let mapping = doc.as_mapping_mut().ok_or(ConfigError::NotAMapping)?;

  // Legacy documents carry a marker key but are otherwise field-compatible
  // with v0, so stripping the marker is the whole upgrade.
  if mapping.remove(&Value::from("legacy-config")).is_some() {
    debug!("upgrading legacy configuration document");
  }

  if let Some(version) = mapping.remove(&Value::from("version")) {
    let version = match version {
      Value::String(s) => s,
      Value::Number(n) => n.to_string(),
      other => format!("{other:?}"),
    };
    if !version.is_empty() && version != "0" {
      return Err(ConfigError::UnsupportedVersion(version));
    }
  }

  // Round-trip through the strict schema so unknown keys are rejected here,
  // before any file is touched.
  let cfg: ProjectConfig = serde_yaml::from_value(doc).map_err(|source| ConfigError::Parse { source })?;
  serde_yaml::to_string(&cfg).map_err(|source| ConfigError::Parse { source })
}

/// Loads a project configuration from a YAML file.
///
/// A missing file yields the empty configuration, matching the behavior of
/// running without any configuration at all.
pub fn load_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
  let contents = match std::fs::read_to_string(path) {
    Ok(contents) => contents,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
      debug!("config file {} not found, using empty configuration", path.display());
      return Ok(ProjectConfig::default());
    }
    Err(source) => {
      return Err(ConfigError::Read {
        path: path.to_path_buf(),
        source,
      });
    }
  };

  if contents.trim().is_empty() {
    return Ok(ProjectConfig::default());
  }

  let upgraded = upgrade_config(&contents)?;
  if upgraded.trim().is_empty() {
    return Ok(ProjectConfig::default());
  }
  serde_yaml::from_str(&upgraded).map_err(|source| ConfigError::Parse { source })
}

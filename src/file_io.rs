//! # File I/O Module
//!
//! Sequential file visitation for the processor: stat, read, hand the content
//! to a visitor, and collect which files the visitor changed (or would have
//! changed). Writing back preserves the file's original permission mode.

use std::fs::Permissions;
use std::path::Path;

use anyhow::{Context, Result};

/// Visits each file in order, reporting the paths the visitor flagged as
/// changed.
///
/// The visitor receives the path, the file's permissions as captured before
/// reading, and the full content. It returns `true` when the file changed (or
/// would change in a read-only pass); any write-back is the visitor's
/// responsibility, via [`write_with_permissions`].
///
/// # Errors
///
/// A stat or read failure on any file aborts the whole visitation with an
/// error naming the file. Writes already performed by the visitor are not
/// rolled back.
pub fn visit_files<F>(files: &[String], mut visitor: F) -> Result<Vec<String>>
where
  F: FnMut(&str, &Permissions, &str) -> Result<bool>,
{
  let mut modified = Vec::new();

  for file in files {
    let metadata = std::fs::metadata(file).with_context(|| format!("failed to stat {file}"))?;
    let content = std::fs::read_to_string(file).with_context(|| format!("failed to read {file}"))?;
    if visitor(file, &metadata.permissions(), &content)? {
      modified.push(file.clone());
    }
  }

  Ok(modified)
}

/// Writes `content` to `path` and restores the given permission mode.
pub fn write_with_permissions(path: &Path, content: &str, permissions: &Permissions) -> std::io::Result<()> {
  std::fs::write(path, content)?;
  std::fs::set_permissions(path, permissions.clone())
}

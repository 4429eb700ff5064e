//! # Processor Module
//!
//! The batch engine: routes each candidate file to its owning header rule,
//! runs the add/remove operation per rule group, and aggregates a sorted
//! report of touched paths.
//!
//! Three user-facing operations compose this: [`verify_files`] (read-only
//! check with a report), [`license_files`] (apply headers in place) and
//! [`unlicense_files`] (strip headers in place). [`run_license`] dispatches
//! between them with the policy that verify suppresses remove.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::file_io::{visit_files, write_with_permissions};
use crate::licenser::Licenser;
use crate::matcher::{is_go_file, path_literal_matches};
use crate::params::{CustomHeaderParam, ProjectParam};

/// The rewrite applied to each file in a rule group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderOp {
  /// Prepend the header to files that do not already carry it.
  Apply,
  /// Strip the header from files that carry it.
  Remove,
}

/// Verifies that all applicable files carry their expected license header.
///
/// Runs the add-detection pass without modifying anything. When files are
/// non-conforming, writes a report to `stdout` (count plus one tab-indented
/// sorted path per line) and returns `Ok(false)`. Returns `Ok(true)` when
/// every file conforms.
///
/// A `false` result is a normal negative outcome; I/O failures are returned
/// as errors and are distinguishable from it.
pub fn verify_files(files: &[String], param: &ProjectParam, stdout: &mut dyn Write) -> Result<bool> {
  let modified = process_files(files, param, false, HeaderOp::Apply)?;
  if modified.is_empty() {
    return Ok(true);
  }

  let plural = if modified.len() == 1 { "file does" } else { "files do" };
  let mut parts = vec![format!("{} {} not have the correct license header:", modified.len(), plural)];
  parts.extend(modified);
  writeln!(stdout, "{}", parts.join("\n\t")).context("failed to write verify report")?;
  Ok(false)
}

/// Applies license headers in place, returning the sorted list of files that
/// were rewritten.
pub fn license_files(files: &[String], param: &ProjectParam) -> Result<Vec<String>> {
  process_files(files, param, true, HeaderOp::Apply)
}

/// Removes license headers in place, returning the sorted list of files that
/// were rewritten.
pub fn unlicense_files(files: &[String], param: &ProjectParam) -> Result<Vec<String>> {
  process_files(files, param, true, HeaderOp::Remove)
}

/// Outcome of a [`run_license`] invocation.
#[derive(Debug)]
pub struct RunOutcome {
  /// False only when verification found non-conforming files.
  pub ok: bool,
  /// Sorted list of files rewritten in place. Always empty for verify.
  pub modified: Vec<String>,
}

/// Runs the license operation selected by the `verify` and `remove` flags.
///
/// Verify takes precedence: when both flags are set, remove has no effect.
pub fn run_license(
  files: &[String],
  param: &ProjectParam,
  verify: bool,
  remove: bool,
  stdout: &mut dyn Write,
) -> Result<RunOutcome> {
  if verify {
    let ok = verify_files(files, param, stdout)?;
    return Ok(RunOutcome { ok, modified: Vec::new() });
  }

  let modified = if remove {
    unlicense_files(files, param)?
  } else {
    license_files(files, param)?
  };
  Ok(RunOutcome { ok: true, modified })
}

fn process_files(files: &[String], param: &ProjectParam, modify: bool, op: HeaderOp) -> Result<Vec<String>> {
  // Nothing configured means nothing to check: no file is even read.
  if param.licenser.is_empty() && param.custom_headers.is_empty() {
    return Ok(Vec::new());
  }

  let go_files: Vec<&String> = files
    .iter()
    .filter(|f| is_go_file(f) && !param.exclude.matches(f))
    .collect();
  debug!("{} of {} input files are candidate Go files", go_files.len(), files.len());

  // Rule name -> files routed to it. Grouping is exclusive: each file is
  // claimed by at most one custom header, everything else falls through to
  // the default.
  let mut groups: HashMap<&str, Vec<String>> = HashMap::new();
  let mut default_files: Vec<String> = Vec::new();
  for file in go_files {
    match route(&param.custom_headers, file) {
      Some(rule) => groups.entry(rule.name.as_str()).or_default().push(file.clone()),
      None => default_files.push(file.clone()),
    }
  }

  let mut modified = Vec::new();

  for rule in &param.custom_headers {
    let group = groups.remove(rule.name.as_str()).unwrap_or_default();
    let curr = run_header_op(&group, &rule.licenser, modify, op)
      .with_context(|| format!("failed to process headers for matcher {}", rule.name))?;
    modified.extend(curr);
  }

  let curr = run_header_op(&default_files, &param.licenser, modify, op)
    .context("failed to process headers for default *.go matcher")?;
  modified.extend(curr);

  modified.sort();
  modified.dedup();
  Ok(modified)
}

/// Selects the custom header owning `file`, if any.
///
/// The rule whose matching include path is longest (by character length)
/// wins. When two different rules tie at the same length through different
/// path strings, the rule with the lexicographically smaller name wins, so
/// routing is deterministic regardless of declaration order.
fn route<'a>(custom_headers: &'a [CustomHeaderParam], file: &str) -> Option<&'a CustomHeaderParam> {
  let mut best: Option<(usize, &CustomHeaderParam)> = None;

  for rule in custom_headers {
    for include in &rule.include_paths {
      if !path_literal_matches(include, file) {
        continue;
      }
      let better = match best {
        None => true,
        Some((best_len, best_rule)) => {
          include.len() > best_len || (include.len() == best_len && rule.name < best_rule.name)
        }
      };
      if better {
        best = Some((include.len(), rule));
      }
    }
  }

  best.map(|(_, rule)| rule)
}

fn run_header_op(files: &[String], licenser: &Licenser, modify: bool, op: HeaderOp) -> Result<Vec<String>> {
  visit_files(files, |path, permissions, content| {
    let needs_change = match op {
      HeaderOp::Apply => !licenser.matches(content),
      HeaderOp::Remove => licenser.matches(content),
    };
    if !needs_change {
      return Ok(false);
    }

    if modify {
      let (new_content, phase) = match op {
        HeaderOp::Apply => (licenser.add(content), "new license"),
        HeaderOp::Remove => (licenser.remove(content), "license removed"),
      };
      write_with_permissions(Path::new(path), &new_content, permissions)
        .with_context(|| format!("failed to write {path} with {phase}"))?;
    }
    Ok(true)
  })
}

//! # Matcher Module
//!
//! Path predicates used to select and exclude candidate files: the Go
//! source-file suffix check, literal path containment for custom header
//! routing, and the configured exclusion matcher.

use regex::Regex;

/// Returns true if the path names a Go source file (file name ends with
/// `.go`).
pub fn is_go_file(path: &str) -> bool {
  let name = path.rsplit('/').next().unwrap_or(path);
  name.ends_with(".go")
}

/// Literal path containment: `include` matches `path` if the two are equal or
/// `path` is nested under `include` as a directory prefix.
pub fn path_literal_matches(include: &str, path: &str) -> bool {
  if include.is_empty() {
    return false;
  }
  path == include || path.starts_with(&format!("{include}/"))
}

/// Matcher over file paths built from the `exclude` configuration block.
///
/// `names` entries are regular expressions matched against every component of
/// the path (anchored, whole-component). `paths` entries are literal path
/// prefixes with the same containment semantics as custom header include
/// paths.
#[derive(Debug, Default, Clone)]
pub struct Exclude {
  names: Vec<Regex>,
  paths: Vec<String>,
}

impl Exclude {
  /// Builds an exclusion matcher from name patterns and literal paths.
  pub fn new(names: &[String], paths: &[String]) -> Result<Self, regex::Error> {
    let names = names
      .iter()
      .map(|n| Regex::new(&format!("^(?:{n})$")))
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Self {
      names,
      paths: paths.to_vec(),
    })
  }

  /// Returns true if the file should be excluded from consideration.
  pub fn matches(&self, path: &str) -> bool {
    if path.split('/').any(|part| self.names.iter().any(|n| n.is_match(part))) {
      return true;
    }
    self.paths.iter().any(|p| path_literal_matches(p, path))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_is_go_file() {
    assert!(is_go_file("foo.go"));
    assert!(is_go_file("bar/baz/foo.go"));
    assert!(!is_go_file("foo.txt"));
    assert!(!is_go_file("foo.go/bar"));
    assert!(!is_go_file("foo.got"));
    // A bare `.go` name still has the suffix and is processed.
    assert!(is_go_file(".go"));
    assert!(is_go_file("dir/.go"));
  }

  #[test]
  fn test_path_literal_matches() {
    assert!(path_literal_matches("dir", "dir"));
    assert!(path_literal_matches("dir", "dir/x.go"));
    assert!(path_literal_matches("dir/sub", "dir/sub/x.go"));
    assert!(!path_literal_matches("dir", "dirx/x.go"));
    assert!(!path_literal_matches("dir/sub", "dir/x.go"));
    assert!(!path_literal_matches("", "dir/x.go"));
  }

  #[test]
  fn test_exclude_by_name() {
    let exclude = Exclude::new(&["foo\\.go".to_string()], &[]).expect("valid patterns");
    assert!(exclude.matches("foo.go"));
    assert!(exclude.matches("bar/foo.go"));
    assert!(!exclude.matches("bar/other.go"));
    // Anchored: the pattern must match a whole component.
    assert!(!exclude.matches("bar/xfoo.gox"));
  }

  #[test]
  fn test_exclude_by_directory_name() {
    let exclude = Exclude::new(&["vendor".to_string()], &[]).expect("valid patterns");
    assert!(exclude.matches("vendor/dep/dep.go"));
    assert!(exclude.matches("sub/vendor/dep.go"));
    assert!(!exclude.matches("vendored/dep.go"));
  }

  #[test]
  fn test_exclude_by_path() {
    let exclude = Exclude::new(&[], &["generated/api".to_string()]).expect("valid patterns");
    assert!(exclude.matches("generated/api"));
    assert!(exclude.matches("generated/api/types.go"));
    assert!(!exclude.matches("generated/apiv2/types.go"));
    assert!(!exclude.matches("other/generated/api/types.go"));
  }

  #[test]
  fn test_exclude_invalid_pattern() {
    assert!(Exclude::new(&["(".to_string()], &[]).is_err());
  }
}

//! # Licenser Module
//!
//! A [`Licenser`] encapsulates a single license header template. It knows how
//! to prepend the header to file content, strip it, and test whether content
//! already starts with it.
//!
//! Templates may contain the [`YEAR_PLACEHOLDER`] token. When writing a
//! header, the placeholder is replaced with the current calendar year. When
//! matching existing content, any four ASCII digits are accepted in its place,
//! so a file licensed in an earlier year still verifies.

use chrono::Datelike;
use regex::Regex;

/// Placeholder token in header templates that stands for a copyright year.
pub const YEAR_PLACEHOLDER: &str = "{{YEAR}}";

/// A license header bound to one template.
///
/// There are exactly two behavioral shapes: a literal header matched by exact
/// prefix comparison, and a year-pattern header whose placeholder positions
/// match any four digits. Both require the header to be followed by a newline
/// and anchored at the very start of the content.
#[derive(Debug, Clone)]
pub enum Licenser {
  /// Header without a year placeholder; matching is a literal prefix check.
  Literal {
    /// The header text as written to files.
    header: String,
  },
  /// Header containing one or more year placeholders.
  YearPattern {
    /// The header text with placeholders resolved to the current year.
    /// Used only when adding, never when matching.
    header: String,
    /// Anchored pattern matching the header with `[0-9]{4}` at each
    /// placeholder position, including the trailing newline.
    pattern: Regex,
  },
}

impl Licenser {
  /// Creates a `Licenser` from a header template.
  ///
  /// If the template contains [`YEAR_PLACEHOLDER`], every occurrence becomes
  /// an independent four-digit wildcard in the match pattern, and the header
  /// written to files substitutes the current year.
  pub fn new(template: &str) -> Result<Self, regex::Error> {
    if !template.contains(YEAR_PLACEHOLDER) {
      return Ok(Licenser::Literal {
        header: template.to_string(),
      });
    }

    let escaped: Vec<String> = template.split(YEAR_PLACEHOLDER).map(regex::escape).collect();
    // ASCII digits only; \d would also accept Unicode decimal digits.
    let pattern = Regex::new(&format!("^{}\n", escaped.join("[0-9]{4}")))?;

    Ok(Licenser::YearPattern {
      header: template.replace(YEAR_PLACEHOLDER, &current_year()),
      pattern,
    })
  }

  /// Returns the header text used when writing, without the trailing newline.
  pub fn header(&self) -> &str {
    match self {
      Licenser::Literal { header } | Licenser::YearPattern { header, .. } => header,
    }
  }

  /// Prepends the header (and a newline) to `content`.
  ///
  /// Unconditional: callers are expected to have checked [`Licenser::matches`]
  /// first.
  pub fn add(&self, content: &str) -> String {
    format!("{}\n{}", self.header(), content)
  }

  /// Strips the matched header prefix, including its trailing newline.
  ///
  /// Content that does not start with the header is returned unchanged.
  pub fn remove(&self, content: &str) -> String {
    match self {
      Licenser::Literal { header } => {
        let prefix = format!("{header}\n");
        content.strip_prefix(&prefix).unwrap_or(content).to_string()
      }
      Licenser::YearPattern { pattern, .. } => match pattern.find(content) {
        Some(m) => content[m.end()..].to_string(),
        None => content.to_string(),
      },
    }
  }

  /// Returns true if `content` starts with this license header.
  ///
  /// Not necessarily a literal prefix match of [`Licenser::header`]: any
  /// four-digit year matches at a placeholder position.
  pub fn matches(&self, content: &str) -> bool {
    match self {
      Licenser::Literal { header } => content.starts_with(&format!("{header}\n")),
      Licenser::YearPattern { pattern, .. } => pattern.is_match(content),
    }
  }

  /// Returns true if no license header exists (degenerate no-op rule).
  pub fn is_empty(&self) -> bool {
    match self {
      Licenser::Literal { header } => header.is_empty(),
      Licenser::YearPattern { .. } => false,
    }
  }
}

/// The current calendar year, zero-padded to four digits.
fn current_year() -> String {
  format!("{:04}", chrono::Local::now().year())
}

//! Regular-expression matching behind a narrow interface.
//!
//! The kernel only talks to [`Matcher`]; [`Pattern`] is the implementation
//! backed by the `regex-automata` meta engine. Matches are handed out as owned
//! [`MatchToken`]s so callers never hold on to engine internals.

use std::ops::Range;

use regex_automata::{
  meta::Regex,
  util::{
    captures::Captures,
    interpolate,
  },
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid pattern '{pattern}': {message}")]
pub struct PatternError {
  pub pattern: String,
  pub message: String,
}

/// A match plus its capture groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchToken {
  /// The matched text.
  pub text:   String,
  /// Byte range of the match in the haystack.
  pub range:  Range<usize>,
  /// Positional groups; group 0 is the whole match. Groups that did not
  /// participate in the match are `None`.
  pub groups: Vec<Option<String>>,
  /// Group names, parallel to `groups`.
  pub names:  Vec<Option<String>>,
}

impl MatchToken {
  pub fn group(&self, idx: usize) -> Option<&str> {
    self.groups.get(idx)?.as_deref()
  }

  pub fn name(&self, name: &str) -> Option<&str> {
    let idx = self.names.iter().position(|n| n.as_deref() == Some(name))?;
    self.group(idx)
  }

  /// Named groups in declaration order.
  pub fn named(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
    self
      .names
      .iter()
      .zip(&self.groups)
      .filter_map(|(name, group)| Some((name.as_deref()?, group.as_deref())))
  }

  /// Expands `$1`, `${1}`, `$name` and `${name}` references in
  /// `replacement`. `$$` is a literal dollar sign, unknown groups expand to
  /// nothing.
  pub fn expand(&self, replacement: &str) -> String {
    let mut dst = String::with_capacity(replacement.len());
    interpolate::string(
      replacement,
      |idx, dst| {
        if let Some(group) = self.group(idx) {
          dst.push_str(group);
        }
      },
      |name| self.names.iter().position(|n| n.as_deref() == Some(name)),
      &mut dst,
    );
    dst
  }

  fn from_captures(haystack: &str, caps: &Captures) -> Option<MatchToken> {
    let mat = caps.get_match()?;
    let groups = (0..caps.group_len())
      .map(|idx| {
        caps
          .get_group(idx)
          .and_then(|span| haystack.get(span.range()))
          .map(str::to_owned)
      })
      .collect();
    let names = caps
      .group_info()
      .pattern_names(mat.pattern())
      .map(|name| name.map(str::to_owned))
      .collect();

    Some(MatchToken {
      text: haystack.get(mat.range())?.to_owned(),
      range: mat.range(),
      groups,
      names,
    })
  }
}

/// Pattern matching capability consumed by the kernel's pattern operations.
pub trait Matcher {
  /// The source of the pattern, used in error messages.
  fn as_str(&self) -> &str;

  fn is_match(&self, haystack: &str) -> bool;

  /// All non-overlapping matches, left to right.
  fn matches<'h>(&'h self, haystack: &'h str) -> impl Iterator<Item = MatchToken> + 'h;
}

#[derive(Debug, Clone)]
pub struct Pattern {
  source: String,
  regex:  Regex,
}

impl Pattern {
  pub fn new(source: &str) -> Result<Self, PatternError> {
    let regex = Regex::new(source).map_err(|err| {
      PatternError {
        pattern: source.to_owned(),
        message: err.to_string(),
      }
    })?;
    Ok(Self {
      source: source.to_owned(),
      regex,
    })
  }
}

impl Matcher for Pattern {
  fn as_str(&self) -> &str {
    &self.source
  }

  fn is_match(&self, haystack: &str) -> bool {
    self.regex.is_match(haystack)
  }

  fn matches<'h>(&'h self, haystack: &'h str) -> impl Iterator<Item = MatchToken> + 'h {
    self
      .regex
      .captures_iter(haystack)
      .filter_map(move |caps| MatchToken::from_captures(haystack, &caps))
  }
}

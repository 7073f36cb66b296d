//! Insertion, removal and replacement at grapheme cluster boundaries.
//!
//! Every search-and-replace operation returns a [`Replacement`] that reports
//! exactly how many replacements were made. Arguments are validated before
//! any output is built, so a rejected call never produces partial output.

use strand_core::grapheme::GraphemeSequence;
use strand_stdx::pattern::Matcher;

use crate::{
  error::{
    Result,
    ensure_limit,
    ensure_non_empty,
  },
  search::{
    cluster_matches,
    find_from,
    rfind_in,
  },
};

/// Resulting text and the number of replacements that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
  pub text:  String,
  pub count: usize,
}

impl Replacement {
  fn unchanged(text: &str) -> Self {
    Self {
      text:  text.to_owned(),
      count: 0,
    }
  }

  /// Whether anything was replaced.
  #[inline]
  pub fn replaced(&self) -> bool {
    self.count > 0
  }
}

/// Inserts `insertion` before cluster `position`.
///
/// A negative position counts from the end, so `-1` inserts before the last
/// cluster. Positions out of range clamp to the start or end.
pub fn insert(text: &str, insertion: &str, position: isize) -> String {
  let seq = GraphemeSequence::new(text);
  let at = seq.byte_offset(seq.clamp_offset(position));

  let mut out = String::with_capacity(text.len() + insertion.len());
  out.push_str(&text[..at]);
  out.push_str(insertion);
  out.push_str(&text[at..]);
  out
}

/// Replaces up to `limit` occurrences of `needle`, left to right.
pub fn replace(
  text: &str,
  needle: &str,
  replacement: &str,
  limit: Option<isize>,
) -> Result<Replacement> {
  ensure_non_empty("needle", needle)?;
  let limit = ensure_limit(limit)?;
  let seq = GraphemeSequence::new(text);

  let mut out = String::with_capacity(text.len());
  let mut cursor = 0;
  let mut count = 0;
  while limit.is_none_or(|limit| count < limit) {
    let Some(found) = find_from(&seq, needle, cursor) else {
      break;
    };
    out.push_str(seq.slice(cursor..found.start));
    out.push_str(replacement);
    cursor = found.end;
    count += 1;
  }
  out.push_str(seq.tail(cursor));

  tracing::trace!(needle, count, "replaced occurrences");
  Ok(Replacement { text: out, count })
}

/// Removes up to `limit` occurrences of `needle`.
pub fn remove(text: &str, needle: &str, limit: Option<isize>) -> Result<Replacement> {
  replace(text, needle, "", limit)
}

pub fn replace_first(text: &str, needle: &str, replacement: &str) -> Result<Replacement> {
  replace(text, needle, replacement, Some(1))
}

pub fn replace_last(text: &str, needle: &str, replacement: &str) -> Result<Replacement> {
  ensure_non_empty("needle", needle)?;
  let seq = GraphemeSequence::new(text);
  let Some(found) = rfind_in(&seq, needle, 0..seq.len()) else {
    return Ok(Replacement::unchanged(text));
  };

  let mut out = String::with_capacity(text.len() + replacement.len());
  out.push_str(seq.head(found.start));
  out.push_str(replacement);
  out.push_str(seq.tail(found.end));
  Ok(Replacement {
    text:  out,
    count: 1,
  })
}

/// Replaces every `(needle, replacement)` pair in a single left to right
/// pass.
///
/// At each cluster the first pair whose needle matches wins. Inserted text is
/// never scanned again, so `[("a", "b"), ("b", "c")]` turns `"ab"` into
/// `"bc"`.
pub fn replace_each(text: &str, pairs: &[(&str, &str)], limit: Option<isize>) -> Result<Replacement> {
  for (needle, _) in pairs {
    ensure_non_empty("needle", needle)?;
  }
  let limit = ensure_limit(limit)?;
  let seq = GraphemeSequence::new(text);

  let mut out = String::with_capacity(text.len());
  let mut copied = 0;
  let mut idx = 0;
  let mut count = 0;
  while idx < seq.len() && limit.is_none_or(|limit| count < limit) {
    let hit = pairs.iter().find_map(|(needle, replacement)| {
      seq
        .match_at(idx, needle)
        .map(|end| (end, *replacement))
    });
    match hit {
      Some((end, replacement)) => {
        out.push_str(seq.slice(copied..idx));
        out.push_str(replacement);
        count += 1;
        idx = end;
        copied = end;
      },
      None => idx += 1,
    }
  }
  out.push_str(seq.tail(copied));

  tracing::trace!(pairs = pairs.len(), count, "replaced each");
  Ok(Replacement { text: out, count })
}

/// Replaces up to `limit` matches of `pattern`. `$1` and `${name}` in
/// `replacement` expand to the corresponding capture group.
///
/// Matches that start or end inside a cluster are left alone.
pub fn replace_match(
  text: &str,
  pattern: &impl Matcher,
  replacement: &str,
  limit: Option<isize>,
) -> Result<Replacement> {
  let limit = ensure_limit(limit)?;

  let mut out = String::with_capacity(text.len());
  let mut cursor = 0;
  let mut count = 0;
  for token in cluster_matches(text, pattern).take(limit.unwrap_or(usize::MAX)) {
    out.push_str(&text[cursor..token.range.start]);
    out.push_str(&token.expand(replacement));
    cursor = token.range.end;
    count += 1;
  }
  out.push_str(&text[cursor..]);

  tracing::trace!(pattern = pattern.as_str(), count, "replaced matches");
  Ok(Replacement { text: out, count })
}

//! Grapheme-aware search within a string.
//!
//! All positions handed in and out of this module are grapheme cluster
//! indices. Matching is cluster-atomic: a needle only matches when it starts
//! and ends on cluster boundaries, so `"👋"` is not found inside `"👋🏿"` and
//! `"e"` is not found inside `"e\u{0301}"`. See [`crate::codepoint`] for the
//! code-point granular variants.
//!
//! # Offsets
//!
//! - Negative offsets count back from the end, `-1` being the last cluster.
//! - Offsets that place the scan start outside the text yield `None`, never an
//!   error.
//! - The empty needle matches everywhere.
//!
//! # Examples
//!
//! ```
//! use strand_lib::search::{between, count, index_of_last, Overlap};
//!
//! assert_eq!(index_of_last("a🇮🇸b🇮🇸", "🇮🇸", 0), Some(3));
//! assert_eq!(between("f(x, y)", "(", ")").unwrap(), "x, y");
//! assert_eq!(count("aaaa", "aa", Overlap::Overlapping).unwrap(), 3);
//! ```

use std::ops::Range;

use serde::{
  Deserialize,
  Serialize,
};
use strand_core::grapheme::GraphemeSequence;
use strand_stdx::pattern::{
  MatchToken,
  Matcher,
};

use crate::error::{
  Error,
  Result,
  ensure_limit,
  ensure_non_empty,
};

/// How [`count`] advances after a hit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Overlap {
  /// Continue after the full match.
  #[default]
  Disjoint,
  /// Continue one cluster after the start of the match.
  Overlapping,
}

/// First match of `needle` starting at or after cluster `from`, as a range of
/// cluster indices.
pub(crate) fn find_from(seq: &GraphemeSequence, needle: &str, from: usize) -> Option<Range<usize>> {
  if from > seq.len() {
    return None;
  }
  if needle.is_empty() {
    return Some(from..from);
  }

  let text = seq.as_str();
  let mut cursor = seq.byte_offset(from);
  while let Some(pos) = text[cursor..].find(needle) {
    let start = cursor + pos;
    if let Some(idx) = seq.index_of_byte(start)
      && let Some(end) = seq.match_at(idx, needle)
    {
      return Some(idx..end);
    }
    // Retry one code point further on, a rejected candidate may overlap a
    // valid one.
    cursor = start + text[start..].chars().next().map_or(1, char::len_utf8);
  }
  None
}

/// Last match of `needle` lying entirely within the clusters `within`.
pub(crate) fn rfind_in(
  seq: &GraphemeSequence,
  needle: &str,
  within: Range<usize>,
) -> Option<Range<usize>> {
  if within.start > within.end || within.start > seq.len() {
    return None;
  }
  let within = within.start..within.end.min(seq.len());
  if needle.is_empty() {
    return Some(within.end..within.end);
  }

  let text = seq.as_str();
  let floor = seq.byte_offset(within.start);
  let mut end = seq.byte_offset(within.end);
  while let Some(pos) = text[floor..end].rfind(needle) {
    let start = floor + pos;
    if let Some(idx) = seq.index_of_byte(start)
      && let Some(stop) = seq.match_at(idx, needle)
    {
      return Some(idx..stop);
    }
    // Any earlier candidate ends at least one byte before this one does.
    end = start + needle.len() - 1;
    while !text.is_char_boundary(end) {
      end -= 1;
    }
  }
  None
}

/// Returns `true` if `needle` occurs in `haystack` as a run of whole clusters.
/// The empty needle is always contained.
pub fn contains(haystack: &str, needle: &str) -> bool {
  needle.is_empty() || find_from(&GraphemeSequence::new(haystack), needle, 0).is_some()
}

pub fn starts_with(haystack: &str, needle: &str) -> bool {
  GraphemeSequence::new(haystack).match_at(0, needle).is_some()
}

pub fn ends_with(haystack: &str, needle: &str) -> bool {
  if needle.is_empty() {
    return true;
  }
  if !haystack.ends_with(needle) {
    return false;
  }
  GraphemeSequence::new(haystack)
    .index_of_byte(haystack.len() - needle.len())
    .is_some()
}

/// Cluster index of the first match at or after `offset`.
pub fn index_of_first(haystack: &str, needle: &str, offset: isize) -> Option<usize> {
  let seq = GraphemeSequence::new(haystack);
  let start = seq.resolve_offset(offset)?;
  find_from(&seq, needle, start).map(|found| found.start)
}

/// Cluster index of the right-most match starting at or after `offset`.
pub fn index_of_last(haystack: &str, needle: &str, offset: isize) -> Option<usize> {
  let seq = GraphemeSequence::new(haystack);
  let start = seq.resolve_offset(offset)?;
  rfind_in(&seq, needle, start..seq.len()).map(|found| found.start)
}

fn delimited<'a>(text: &'a str, from: &str, to: &str) -> Result<GraphemeSequence<'a>> {
  ensure_non_empty("from", from)?;
  ensure_non_empty("to", to)?;
  Ok(GraphemeSequence::new(text))
}

/// Text between the first `from` and the first `to` following it.
///
/// Without `from` the whole text is returned; without a following `to` the
/// text after `from` is returned.
pub fn between<'a>(text: &'a str, from: &str, to: &str) -> Result<&'a str> {
  let seq = delimited(text, from, to)?;
  let Some(open) = find_from(&seq, from, 0) else {
    return Ok(text);
  };
  Ok(match find_from(&seq, to, open.end) {
    Some(close) => seq.slice(open.end..close.start),
    None => seq.tail(open.end),
  })
}

/// Text between the first `from` and the last `to`.
pub fn between_furthest<'a>(text: &'a str, from: &str, to: &str) -> Result<&'a str> {
  let seq = delimited(text, from, to)?;
  let Some(open) = find_from(&seq, from, 0) else {
    return Ok(text);
  };
  Ok(match rfind_in(&seq, to, open.end..seq.len()) {
    Some(close) => seq.slice(open.end..close.start),
    None => seq.tail(open.end),
  })
}

/// Text between the last `from` that is followed by a `to`, and the last `to`.
pub fn between_last<'a>(text: &'a str, from: &str, to: &str) -> Result<&'a str> {
  let seq = delimited(text, from, to)?;
  let Some(last_open) = rfind_in(&seq, from, 0..seq.len()) else {
    return Ok(text);
  };
  if let Some(close) = rfind_in(&seq, to, 0..seq.len())
    && let Some(open) = rfind_in(&seq, from, 0..close.start)
  {
    return Ok(seq.slice(open.end..close.start));
  }
  Ok(seq.tail(last_open.end))
}

/// Number of occurrences of `needle`.
pub fn count(haystack: &str, needle: &str, overlap: Overlap) -> Result<usize> {
  ensure_non_empty("needle", needle)?;
  let seq = GraphemeSequence::new(haystack);

  let mut count = 0;
  let mut cursor = 0;
  while let Some(found) = find_from(&seq, needle, cursor) {
    count += 1;
    cursor = match overlap {
      Overlap::Disjoint => found.end,
      Overlap::Overlapping => found.start + 1,
    };
  }
  Ok(count)
}

/// Splits `text` around `separator`.
///
/// An empty separator splits into single clusters. With a `limit`, at most
/// that many segments are returned and the last one holds the rest of the
/// text.
pub fn split<'a>(text: &'a str, separator: &str, limit: Option<isize>) -> Result<Vec<&'a str>> {
  let limit = ensure_limit(limit)?;
  if limit == Some(0) {
    return Ok(Vec::new());
  }
  let at_limit = |parts: &Vec<&str>| limit.is_some_and(|limit| parts.len() + 1 == limit);
  let seq = GraphemeSequence::new(text);
  let mut parts = Vec::new();

  if separator.is_empty() {
    for idx in 0..seq.len() {
      if at_limit(&parts) {
        parts.push(seq.tail(idx));
        return Ok(parts);
      }
      parts.push(seq.slice(idx..idx + 1));
    }
    return Ok(parts);
  }

  let mut cursor = 0;
  while !at_limit(&parts) {
    let Some(found) = find_from(&seq, separator, cursor) else {
      break;
    };
    parts.push(seq.slice(cursor..found.start));
    cursor = found.end;
  }
  parts.push(seq.tail(cursor));
  Ok(parts)
}

/// Matches of `pattern` that start and end on cluster boundaries, left to
/// right. Matches that would split a cluster are skipped.
pub(crate) fn cluster_matches<'h, M: Matcher>(
  haystack: &'h str,
  pattern: &'h M,
) -> impl Iterator<Item = MatchToken> + 'h {
  let seq = GraphemeSequence::new(haystack);
  pattern.matches(haystack).filter(move |token| {
    let atomic = seq.index_of_byte(token.range.start).is_some()
      && seq.index_of_byte(token.range.end).is_some();
    if !atomic {
      tracing::trace!(range = ?token.range, "skipped match splitting a cluster");
    }
    atomic
  })
}

pub fn contains_pattern(haystack: &str, pattern: &impl Matcher) -> bool {
  pattern.is_match(haystack) && match_first(haystack, pattern).is_some()
}

/// First match of `pattern` on cluster boundaries, if any.
pub fn match_first(haystack: &str, pattern: &impl Matcher) -> Option<MatchToken> {
  cluster_matches(haystack, pattern).next()
}

/// First match of `pattern`, failing with [`Error::NoMatch`] when there is
/// none.
pub fn match_required(haystack: &str, pattern: &impl Matcher) -> Result<MatchToken> {
  match_first(haystack, pattern).ok_or_else(|| {
    tracing::debug!(pattern = pattern.as_str(), "required match missing");
    Error::NoMatch {
      pattern:  pattern.as_str().to_owned(),
      haystack: haystack.to_owned(),
    }
  })
}

/// Every non-overlapping match of `pattern` on cluster boundaries, left to
/// right.
pub fn match_all(haystack: &str, pattern: &impl Matcher) -> Vec<MatchToken> {
  cluster_matches(haystack, pattern).collect()
}

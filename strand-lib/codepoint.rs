//! Code-point granular counterparts of the grapheme operations.
//!
//! Indices here count `char`s and matches may begin or end inside a grapheme
//! cluster, so `"👋"` is found inside `"👋🏿"`. Offsets follow the same
//! conventions as [`crate::search`].

use strand_stdx::pattern::{
  MatchToken,
  Matcher,
};

use crate::{
  error::{
    Result,
    ensure_limit,
    ensure_non_empty,
  },
  replace::Replacement,
  search::Overlap,
};

/// Number of code points in `text`.
#[must_use]
pub fn length(text: &str) -> usize {
  text.chars().count()
}

/// Byte offset of code point `idx`, or `None` past the end.
fn byte_of(text: &str, idx: usize) -> Option<usize> {
  text
    .char_indices()
    .map(|(pos, _)| pos)
    .chain(std::iter::once(text.len()))
    .nth(idx)
}

fn char_of(text: &str, byte_idx: usize) -> usize {
  text[..byte_idx].chars().count()
}

fn clamp_offset(len: usize, offset: isize) -> usize {
  if offset < 0 {
    len.saturating_sub(offset.unsigned_abs())
  } else {
    offset.unsigned_abs().min(len)
  }
}

fn resolve_offset(len: usize, offset: isize) -> Option<usize> {
  if offset < 0 {
    len.checked_sub(offset.unsigned_abs())
  } else {
    Some(offset.unsigned_abs()).filter(|&idx| idx <= len)
  }
}

/// Code points from `offset` on, at most `length` of them. Negative values
/// count from the end and out of range values clamp.
pub fn substring(text: &str, offset: isize, length: Option<isize>) -> &str {
  let len = self::length(text);
  let start = clamp_offset(len, offset);
  let end = match length {
    None => len,
    Some(length) if length < 0 => len.saturating_sub(length.unsigned_abs()),
    Some(length) => start.saturating_add(length.unsigned_abs()).min(len),
  };
  if end <= start {
    return "";
  }
  let from = byte_of(text, start).unwrap_or(text.len());
  let to = byte_of(text, end).unwrap_or(text.len());
  &text[from..to]
}

pub fn contains(haystack: &str, needle: &str) -> bool {
  haystack.contains(needle)
}

/// Code-point index of the first match at or after `offset`.
pub fn index_of_first(haystack: &str, needle: &str, offset: isize) -> Option<usize> {
  let start = resolve_offset(length(haystack), offset)?;
  let from = byte_of(haystack, start)?;
  haystack[from..]
    .find(needle)
    .map(|pos| char_of(haystack, from + pos))
}

/// Code-point index of the right-most match starting at or after `offset`.
pub fn index_of_last(haystack: &str, needle: &str, offset: isize) -> Option<usize> {
  let start = resolve_offset(length(haystack), offset)?;
  let from = byte_of(haystack, start)?;
  haystack[from..]
    .rfind(needle)
    .map(|pos| char_of(haystack, from + pos))
}

/// Number of occurrences of `needle`, overlapping ones advancing a single
/// code point.
pub fn count(haystack: &str, needle: &str, overlap: Overlap) -> Result<usize> {
  ensure_non_empty("needle", needle)?;
  if overlap == Overlap::Disjoint {
    return Ok(haystack.matches(needle).count());
  }

  let mut count = 0;
  let mut cursor = 0;
  while let Some(pos) = haystack[cursor..].find(needle) {
    let start = cursor + pos;
    count += 1;
    cursor = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
  }
  Ok(count)
}

/// Replaces up to `limit` occurrences of `needle`, left to right.
pub fn replace(
  text: &str,
  needle: &str,
  replacement: &str,
  limit: Option<isize>,
) -> Result<Replacement> {
  ensure_non_empty("needle", needle)?;
  let limit = ensure_limit(limit)?.unwrap_or(usize::MAX);

  let mut out = String::with_capacity(text.len());
  let mut cursor = 0;
  let mut count = 0;
  for (start, found) in text.match_indices(needle).take(limit) {
    out.push_str(&text[cursor..start]);
    out.push_str(replacement);
    cursor = start + found.len();
    count += 1;
  }
  out.push_str(&text[cursor..]);

  tracing::trace!(needle, count, "replaced code point occurrences");
  Ok(Replacement { text: out, count })
}

pub fn remove(text: &str, needle: &str, limit: Option<isize>) -> Result<Replacement> {
  replace(text, needle, "", limit)
}

pub fn replace_first(text: &str, needle: &str, replacement: &str) -> Result<Replacement> {
  replace(text, needle, replacement, Some(1))
}

pub fn replace_last(text: &str, needle: &str, replacement: &str) -> Result<Replacement> {
  ensure_non_empty("needle", needle)?;
  let Some(start) = text.rfind(needle) else {
    return Ok(Replacement {
      text:  text.to_owned(),
      count: 0,
    });
  };

  let mut out = String::with_capacity(text.len() + replacement.len());
  out.push_str(&text[..start]);
  out.push_str(replacement);
  out.push_str(&text[start + needle.len()..]);
  Ok(Replacement {
    text:  out,
    count: 1,
  })
}

/// Splits `text` around `separator`, an empty separator yielding single code
/// points. `limit` behaves as in [`crate::search::split`].
pub fn split<'a>(text: &'a str, separator: &str, limit: Option<isize>) -> Result<Vec<&'a str>> {
  let limit = ensure_limit(limit)?;
  match limit {
    Some(0) => Ok(Vec::new()),
    Some(limit) if separator.is_empty() => {
      let mut parts: Vec<&str> = Vec::new();
      for (pos, ch) in text.char_indices() {
        if parts.len() + 1 == limit {
          parts.push(&text[pos..]);
          return Ok(parts);
        }
        parts.push(&text[pos..pos + ch.len_utf8()]);
      }
      Ok(parts)
    },
    None if separator.is_empty() => {
      Ok(
        text
          .char_indices()
          .map(|(pos, ch)| &text[pos..pos + ch.len_utf8()])
          .collect(),
      )
    },
    Some(limit) => Ok(text.splitn(limit, separator).collect()),
    None => Ok(text.split(separator).collect()),
  }
}

/// Every non-overlapping match of `pattern`, including those that start or
/// end inside a cluster.
pub fn match_all(haystack: &str, pattern: &impl Matcher) -> Vec<MatchToken> {
  pattern.matches(haystack).collect()
}

/// Replaces up to `limit` matches of `pattern` wherever they fall, expanding
/// `$1` and `${name}` references.
pub fn replace_match(
  text: &str,
  pattern: &impl Matcher,
  replacement: &str,
  limit: Option<isize>,
) -> Result<Replacement> {
  let limit = ensure_limit(limit)?.unwrap_or(usize::MAX);

  let mut out = String::with_capacity(text.len());
  let mut cursor = 0;
  let mut count = 0;
  for token in pattern.matches(text).take(limit) {
    out.push_str(&text[cursor..token.range.start]);
    out.push_str(&token.expand(replacement));
    cursor = token.range.end;
    count += 1;
  }
  out.push_str(&text[cursor..]);
  Ok(Replacement { text: out, count })
}

#[cfg(test)]
mod test {
  use strand_stdx::pattern::Pattern;

  use super::*;
  use crate::Error;

  const WAVE: &str = "👋";
  const WAVE_DARK: &str = "👋🏿";

  #[test]
  fn matches_inside_clusters() {
    assert!(contains(WAVE_DARK, WAVE));
    assert!(!crate::search::contains(WAVE_DARK, WAVE));
    assert!(contains("cafe\u{0301}", "cafe"));
    assert_eq!(length(WAVE_DARK), 2);
    assert_eq!(length("a\u{0301}"), 2);
  }

  #[test]
  fn substring_by_code_point() {
    assert_eq!(substring(WAVE_DARK, 0, Some(1)), WAVE);
    assert_eq!(substring(WAVE_DARK, -1, None), "🏿");
    assert_eq!(substring("héllo", 1, Some(2)), "él");
    assert_eq!(substring("héllo", 2, Some(-2)), "l");
    assert_eq!(substring("héllo", 4, Some(-2)), "");
    assert_eq!(substring("héllo", 100, None), "");
    assert_eq!(substring("héllo", -100, Some(1)), "h");
  }

  #[test]
  fn indices_count_code_points() {
    let text = format!("a{WAVE_DARK}b{WAVE}");
    assert_eq!(index_of_first(&text, WAVE, 0), Some(1));
    assert_eq!(index_of_first(&text, WAVE, 2), Some(4));
    assert_eq!(index_of_first(&text, "b", -2), Some(3));
    assert_eq!(index_of_last(&text, WAVE, 0), Some(4));
    assert_eq!(index_of_last(&text, "a", 1), None);
    assert_eq!(index_of_first(&text, "a", 6), None);
    assert_eq!(index_of_first(&text, "", 5), Some(5));
  }

  #[test]
  fn count_and_replace() {
    let text = format!("{WAVE}{WAVE_DARK}{WAVE}");
    assert_eq!(count(&text, WAVE, Overlap::Disjoint).unwrap(), 3);
    assert_eq!(count("aaaa", "aa", Overlap::Overlapping).unwrap(), 3);
    assert_eq!(count("aaaa", "aa", Overlap::Disjoint).unwrap(), 2);

    let res = replace(&text, WAVE, "x", None).unwrap();
    assert_eq!(res.text, "xx🏿x");
    assert_eq!(res.count, 3);

    let res = replace(&text, WAVE, "x", Some(2)).unwrap();
    assert_eq!(res.text, format!("xx🏿{WAVE}"));
    assert_eq!(res.count, 2);

    assert!(matches!(
      count("a", "", Overlap::Disjoint),
      Err(Error::InvalidArgument { name: "needle", .. })
    ));
    assert!(replace("a", "a", "b", Some(-1)).is_err());
  }

  #[test]
  fn mutations_split_clusters() {
    let res = remove(WAVE_DARK, WAVE, None).unwrap();
    assert_eq!(res.text, "🏿");
    assert_eq!(res.count, 1);

    let text = format!("{WAVE}{WAVE_DARK}");
    let res = replace_first(&text, WAVE, "x").unwrap();
    assert_eq!(res.text, format!("x{WAVE_DARK}"));
    let res = replace_last(&text, WAVE, "x").unwrap();
    assert_eq!(res.text, format!("{WAVE}x🏿"));
    assert!(res.replaced());
    assert!(!replace_last("abc", "z", "x").unwrap().replaced());
    assert!(replace_last("abc", "", "x").is_err());
  }

  #[test]
  fn split_by_code_point() {
    assert_eq!(split(WAVE_DARK, "", None).unwrap(), vec![WAVE, "🏿"]);
    assert_eq!(split(&format!("a{WAVE_DARK}b"), WAVE, None).unwrap(), vec!["a", "🏿b"]);
    assert_eq!(split("a,b,c", ",", Some(2)).unwrap(), vec!["a", "b,c"]);
    assert_eq!(split("abc", "", Some(2)).unwrap(), vec!["a", "bc"]);
    assert_eq!(split("abc", ",", Some(0)).unwrap(), Vec::<&str>::new());
    assert_eq!(split("", "", None).unwrap(), Vec::<&str>::new());
    assert!(split("abc", ",", Some(-1)).is_err());
  }

  #[test]
  fn patterns_ignore_cluster_boundaries() {
    let wave = Pattern::new(WAVE).unwrap();
    assert_eq!(match_all(WAVE_DARK, &wave).len(), 1);
    let res = replace_match(WAVE_DARK, &wave, "x", None).unwrap();
    assert_eq!(res.text, "x🏿");
    assert_eq!(res.count, 1);

    let empty = Pattern::new("").unwrap();
    let res = replace_match(&format!("\u{e9}{WAVE_DARK}"), &empty, "-", None).unwrap();
    assert_eq!(res.text, format!("-\u{e9}-{WAVE}-🏿-"));
    assert_eq!(res.count, 4);
  }
}

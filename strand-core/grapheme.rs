//! Utility functions to address the unicode graphemes of a string.
//!
//! A [`GraphemeSequence`] is a read-only view of a `&str` as a list of
//! grapheme clusters (UAX #29). Every offset handed to it is counted in
//! clusters, so flags, ZWJ emoji, skin-tone modifiers and combining marks are
//! never split. The free boundary functions at the bottom work on raw byte
//! offsets and are used to snap arbitrary positions onto cluster boundaries.

use std::{
  iter,
  ops::Range,
};

use thiserror::Error;
use unicode_segmentation::{
  GraphemeCursor,
  UnicodeSegmentation,
};

/// Extended grapheme clusters unless the `legacy-clusters` feature is enabled.
const EXTENDED: bool = !cfg!(feature = "legacy-clusters");

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("input is not valid UTF-8 (first invalid byte at offset {valid_up_to}): {bytes:?}")]
pub struct EncodingError {
  pub bytes:       Vec<u8>,
  pub valid_up_to: usize,
}

/// A string split into grapheme clusters.
///
/// `bounds` holds the byte offset of every cluster start followed by the
/// length of the text, so cluster `i` spans `bounds[i]..bounds[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphemeSequence<'a> {
  text:   &'a str,
  bounds: Vec<usize>,
}

impl<'a> GraphemeSequence<'a> {
  pub fn new(text: &'a str) -> Self {
    let bounds = text
      .grapheme_indices(EXTENDED)
      .map(|(idx, _)| idx)
      .chain(iter::once(text.len()))
      .collect();
    Self { text, bounds }
  }

  /// Segments raw bytes, failing if they are not valid UTF-8.
  pub fn from_utf8(bytes: &'a [u8]) -> Result<Self, EncodingError> {
    match std::str::from_utf8(bytes) {
      Ok(text) => Ok(Self::new(text)),
      Err(err) => {
        Err(EncodingError {
          bytes:       bytes.to_vec(),
          valid_up_to: err.valid_up_to(),
        })
      },
    }
  }

  #[inline]
  pub fn as_str(&self) -> &'a str {
    self.text
  }

  /// Number of grapheme clusters.
  #[inline]
  pub fn len(&self) -> usize {
    self.bounds.len() - 1
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn get(&self, idx: usize) -> Option<&'a str> {
    self.byte_range(idx).map(|range| &self.text[range])
  }

  pub fn byte_range(&self, idx: usize) -> Option<Range<usize>> {
    if idx >= self.len() {
      return None;
    }
    Some(self.bounds[idx]..self.bounds[idx + 1])
  }

  /// Byte offset at which cluster `idx` starts, clamped to the text length.
  #[inline]
  pub fn byte_offset(&self, idx: usize) -> usize {
    self.bounds[idx.min(self.len())]
  }

  /// Cluster index starting exactly at `byte_idx`, or `None` if `byte_idx` is
  /// not a cluster boundary. The text length maps to `len()`.
  #[inline]
  pub fn index_of_byte(&self, byte_idx: usize) -> Option<usize> {
    self.bounds.binary_search(&byte_idx).ok()
  }

  /// Index of the last cluster boundary at or before `byte_idx`.
  pub fn floor_index(&self, byte_idx: usize) -> usize {
    match self.bounds.binary_search(&byte_idx) {
      Ok(idx) => idx,
      // bounds[0] == 0 so the insertion point is never 0
      Err(idx) => idx - 1,
    }
  }

  pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'a str> + ExactSizeIterator + '_ {
    let text = self.text;
    self.bounds.windows(2).map(move |w| &text[w[0]..w[1]])
  }

  /// Text of clusters `range.start..range.end`. Both ends clamp to `len()`
  /// and an inverted range is empty.
  pub fn slice(&self, range: Range<usize>) -> &'a str {
    let start = self.byte_offset(range.start);
    let end = self.byte_offset(range.end).max(start);
    &self.text[start..end]
  }

  /// Text from cluster `idx` to the end.
  #[inline]
  pub fn tail(&self, idx: usize) -> &'a str {
    &self.text[self.byte_offset(idx)..]
  }

  /// Text before cluster `idx`.
  #[inline]
  pub fn head(&self, idx: usize) -> &'a str {
    &self.text[..self.byte_offset(idx)]
  }

  /// Resolves a possibly negative cluster offset, clamping to `0..=len()`.
  pub fn clamp_offset(&self, offset: isize) -> usize {
    let len = self.len();
    if offset < 0 {
      len.saturating_sub(offset.unsigned_abs())
    } else {
      offset.unsigned_abs().min(len)
    }
  }

  /// Resolves a possibly negative cluster offset, returning `None` when it
  /// falls outside `0..=len()`.
  pub fn resolve_offset(&self, offset: isize) -> Option<usize> {
    let len = self.len();
    if offset < 0 {
      len.checked_sub(offset.unsigned_abs())
    } else {
      Some(offset.unsigned_abs()).filter(|&idx| idx <= len)
    }
  }

  /// Clusters from `offset` on, at most `length` of them.
  ///
  /// A negative `offset` counts back from the end and a negative `length`
  /// stops that many clusters before the end. Out of range values clamp.
  pub fn substring(&self, offset: isize, length: Option<isize>) -> &'a str {
    let len = self.len();
    let start = self.clamp_offset(offset);
    let end = match length {
      None => len,
      Some(length) if length < 0 => len.saturating_sub(length.unsigned_abs()),
      Some(length) => start.saturating_add(length.unsigned_abs()).min(len),
    };
    self.slice(start..end)
  }

  /// Matches `needle` at cluster `idx` without splitting a cluster on either
  /// end. Returns the index of the cluster following the match.
  ///
  /// The empty needle matches at every index up to and including `len()`.
  pub fn match_at(&self, idx: usize, needle: &str) -> Option<usize> {
    let start = *self.bounds.get(idx)?;
    if !self.text.as_bytes()[start..].starts_with(needle.as_bytes()) {
      return None;
    }
    self.index_of_byte(start + needle.len())
  }

  /// Clusters in reverse order, each cluster left intact.
  pub fn reverse(&self) -> String {
    let mut out = String::with_capacity(self.text.len());
    self.iter().rev().for_each(|g| out.push_str(g));
    out
  }
}

/// Number of grapheme clusters in `text`.
#[must_use]
pub fn length(text: &str) -> usize {
  text.graphemes(EXTENDED).count()
}

/// See [`GraphemeSequence::substring`].
#[must_use]
pub fn substring(text: &str, offset: isize, length: Option<isize>) -> &str {
  GraphemeSequence::new(text).substring(offset, length)
}

/// The cluster at `idx`, counting back from the end when negative.
#[must_use]
pub fn at(text: &str, idx: isize) -> Option<&str> {
  let seq = GraphemeSequence::new(text);
  let idx = seq.resolve_offset(idx)?;
  seq.get(idx)
}

/// See [`GraphemeSequence::reverse`].
#[must_use]
pub fn reverse(text: &str) -> String {
  text.graphemes(EXTENDED).rev().collect()
}

#[must_use]
pub fn nth_prev_grapheme_boundary(text: &str, byte_idx: usize, n: usize) -> usize {
  assert!(text.is_char_boundary(byte_idx));

  let mut byte_idx = byte_idx;
  let mut gc = GraphemeCursor::new(byte_idx, text.len(), EXTENDED);

  for _ in 0..n {
    // The whole text is handed over as a single chunk, so the cursor never
    // asks for more context.
    match gc.prev_boundary(text, 0) {
      Ok(None) => return 0,
      Ok(Some(idx)) => byte_idx = idx,
      Err(_) => unreachable!(),
    }
  }
  byte_idx
}

#[must_use]
pub fn nth_next_grapheme_boundary(text: &str, byte_idx: usize, n: usize) -> usize {
  assert!(text.is_char_boundary(byte_idx));

  let mut byte_idx = byte_idx;
  let mut gc = GraphemeCursor::new(byte_idx, text.len(), EXTENDED);

  for _ in 0..n {
    match gc.next_boundary(text, 0) {
      Ok(None) => return text.len(),
      Ok(Some(idx)) => byte_idx = idx,
      Err(_) => unreachable!(),
    }
  }
  byte_idx
}

/// Finds the next grapheme boundary after the given byte position.
#[must_use]
#[inline(always)]
pub fn next_grapheme_boundary(text: &str, byte_idx: usize) -> usize {
  nth_next_grapheme_boundary(text, byte_idx, 1)
}

/// Finds the previous grapheme boundary before the given byte position.
#[must_use]
#[inline(always)]
pub fn prev_grapheme_boundary(text: &str, byte_idx: usize) -> usize {
  nth_prev_grapheme_boundary(text, byte_idx, 1)
}

/// Returns `true` if `byte_idx` sits between two grapheme clusters.
#[must_use]
pub fn is_grapheme_boundary(text: &str, byte_idx: usize) -> bool {
  if byte_idx > text.len() || !text.is_char_boundary(byte_idx) {
    return false;
  }
  let mut gc = GraphemeCursor::new(byte_idx, text.len(), EXTENDED);
  match gc.is_boundary(text, 0) {
    Ok(is_boundary) => is_boundary,
    Err(_) => unreachable!(),
  }
}

/// Returns the passed byte index if it's already a grapheme boundary,
/// or the next grapheme boundary byte index if not.
#[must_use]
pub fn ensure_grapheme_boundary_next(text: &str, byte_idx: usize) -> usize {
  // Clamp to valid range
  let byte_idx = floor_char_boundary(text, byte_idx.min(text.len()));

  if is_grapheme_boundary(text, byte_idx) {
    byte_idx
  } else {
    next_grapheme_boundary(text, byte_idx)
  }
}

/// Returns the passed byte index if it's already a grapheme boundary,
/// or the prev grapheme boundary byte index if not.
#[must_use]
pub fn ensure_grapheme_boundary_prev(text: &str, byte_idx: usize) -> usize {
  // Clamp to valid range
  let byte_idx = floor_char_boundary(text, byte_idx.min(text.len()));

  if is_grapheme_boundary(text, byte_idx) {
    byte_idx
  } else {
    prev_grapheme_boundary(text, byte_idx)
  }
}

fn floor_char_boundary(text: &str, mut byte_idx: usize) -> usize {
  while !text.is_char_boundary(byte_idx) {
    byte_idx -= 1;
  }
  byte_idx
}

//! Padding and truncation measured in grapheme clusters.

use serde::{
  Deserialize,
  Serialize,
};
use strand_core::grapheme::{
  GraphemeSequence,
  ensure_grapheme_boundary_prev,
};

use crate::error::{
  Error,
  Result,
};

/// Side(s) on which [`pad`] adds text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PadMode {
  Start,
  #[default]
  End,
  /// Split the deficit evenly, the odd cluster going to the end.
  Both,
}

/// Pads `text` to `target` clusters with `pad` repeated as needed.
///
/// `pad` may span several clusters; it is tiled and cut off once the deficit
/// is filled. Text already `target` clusters long or longer is returned as is.
pub fn pad(text: &str, target: usize, pad: &str, mode: PadMode) -> Result<String> {
  let deficit = target.saturating_sub(GraphemeSequence::new(text).len());
  if deficit == 0 {
    return Ok(text.to_owned());
  }
  let fill = GraphemeSequence::new(pad);
  if fill.is_empty() {
    return Err(Error::invalid_argument(
      "pad",
      pad,
      "must not be empty when padding is needed",
    ));
  }

  let (before, after) = match mode {
    PadMode::Start => (deficit, 0),
    PadMode::End => (0, deficit),
    PadMode::Both => (deficit / 2, deficit - deficit / 2),
  };
  let mut out = String::with_capacity(text.len() + deficit);
  tile(&mut out, &fill, before);
  out.push_str(text);
  tile(&mut out, &fill, after);

  tracing::trace!(clusters = target, deficit, ?mode, "padded");
  Ok(out)
}

#[inline]
pub fn pad_start(text: &str, target: usize, with: &str) -> Result<String> {
  pad(text, target, with, PadMode::Start)
}

#[inline]
pub fn pad_end(text: &str, target: usize, with: &str) -> Result<String> {
  pad(text, target, with, PadMode::End)
}

#[inline]
pub fn pad_both(text: &str, target: usize, with: &str) -> Result<String> {
  pad(text, target, with, PadMode::Both)
}

/// Appends `clusters` clusters of `fill`, starting over from its first
/// cluster whenever it runs out.
fn tile(out: &mut String, fill: &GraphemeSequence, clusters: usize) {
  for _ in 0..clusters / fill.len() {
    out.push_str(fill.as_str());
  }
  out.push_str(fill.head(clusters % fill.len()));
}

/// Keeps the first `position` clusters of `text`, appending `ellipsis` if
/// anything was cut off.
pub fn cut(text: &str, position: usize, ellipsis: &str) -> String {
  let seq = GraphemeSequence::new(text);
  truncated(text, seq.byte_offset(position), ellipsis)
}

/// Keeps at most `position` bytes of `text` without splitting a cluster,
/// appending `ellipsis` if anything was cut off.
///
/// A position inside a cluster drops that whole cluster.
pub fn cut_bytes(text: &str, position: usize, ellipsis: &str) -> String {
  truncated(text, ensure_grapheme_boundary_prev(text, position), ellipsis)
}

fn truncated(text: &str, end: usize, ellipsis: &str) -> String {
  if end >= text.len() {
    return text.to_owned();
  }
  let mut out = String::with_capacity(end + ellipsis.len());
  out.push_str(&text[..end]);
  out.push_str(ellipsis);
  out
}

#![no_main]

mod common;

use libfuzzer_sys::fuzz_target;
use strand_core::grapheme::{
  GraphemeSequence,
  is_grapheme_boundary,
};
use strand_lib::{
  pad,
  replace,
  search::{
    self,
    Overlap,
  },
};

use crate::common::scenario_from_bytes;

fn assert_on_boundary(text: &str, part: &str) {
  let offset = part.as_ptr() as usize - text.as_ptr() as usize;
  assert!(is_grapheme_boundary(text, offset));
  assert!(is_grapheme_boundary(text, offset + part.len()));
}

fuzz_target!(|data: &[u8]| {
  let scenario = scenario_from_bytes(data);
  let text = scenario.text.as_str();
  let seq = GraphemeSequence::new(text);
  assert_eq!(seq.iter().collect::<String>(), text);

  for op in &scenario.ops {
    let offset = op.offset as isize;
    let length = Some(op.length as isize);
    let needle = op.needle.as_str();

    match op.kind % 8 {
      0 => {
        let part = seq.substring(offset, length);
        if !part.is_empty() {
          assert_on_boundary(text, part);
        }
      },
      1 => {
        if let Some(idx) = search::index_of_first(text, needle, offset) {
          assert!(seq.match_at(idx, needle).is_some());
        }
      },
      2 => {
        if let Some(idx) = search::index_of_last(text, needle, offset) {
          assert!(seq.match_at(idx, needle).is_some());
        }
      },
      3 => {
        let disjoint = search::count(text, needle, Overlap::Disjoint);
        let overlapping = search::count(text, needle, Overlap::Overlapping);
        if let (Ok(disjoint), Ok(overlapping)) = (disjoint, overlapping) {
          assert!(overlapping >= disjoint);
        }
      },
      4 => {
        if let Ok(res) = replace::replace(text, needle, "", length) {
          assert!(res.text.len() <= text.len());
        }
      },
      5 => {
        if let Ok(parts) = search::split(text, needle, None) {
          assert_eq!(parts.join(needle), text);
        }
      },
      6 => {
        let out = pad::cut_bytes(text, op.offset.unsigned_abs() as usize, "");
        assert!(text.starts_with(&out));
        assert!(is_grapheme_boundary(text, out.len()));
      },
      _ => {
        let out = pad::cut(text, op.offset.unsigned_abs() as usize, "");
        assert!(text.starts_with(&out));
        let _ = seq.reverse();
      },
    }
  }
});

//! Benchmarks for grapheme-related operations in strand-core.
//!
//! Run with: `cargo bench -p strand-core`

use divan::{
  Bencher,
  black_box,
};
use strand_core::grapheme::{
  GraphemeSequence,
  ensure_grapheme_boundary_next,
  ensure_grapheme_boundary_prev,
  length,
  next_grapheme_boundary,
  prev_grapheme_boundary,
  reverse,
  substring,
};

fn main() {
  divan::main();
}

// Test data generators.

fn repeat_to(line: &str, size: usize) -> String {
  let mut s = String::with_capacity(size + line.len());
  while s.len() < size {
    s.push_str(line);
  }
  // Truncate at char boundary
  while s.len() > size {
    s.pop();
  }
  s
}

fn make_ascii_text(size: usize) -> String {
  repeat_to("The quick brown fox jumps over the lazy dog. ", size)
}

fn make_cjk_text(size: usize) -> String {
  // Each CJK char is 3 bytes in UTF-8
  repeat_to("漢字文字測試中文日本語韓國語", size)
}

fn make_emoji_text(size: usize) -> String {
  // Skin tones, flags and ZWJ families: every cluster spans several code points
  repeat_to("👋🏿🇮🇸👨‍👩‍👧‍👦🎉🚀", size)
}

fn make_combining_text(size: usize) -> String {
  // "a\u{0301}" = á (a + combining acute), 3 bytes per grapheme
  repeat_to("a\u{0301}", size)
}

const SIZES: &[usize] = &[100, 10_000, 1_000_000];

mod segment {
  use super::*;

  #[divan::bench(args = SIZES)]
  fn ascii(bencher: Bencher, size: usize) {
    let text = make_ascii_text(size);
    bencher.bench(|| GraphemeSequence::new(black_box(&text)).len());
  }

  #[divan::bench(args = SIZES)]
  fn cjk(bencher: Bencher, size: usize) {
    let text = make_cjk_text(size);
    bencher.bench(|| GraphemeSequence::new(black_box(&text)).len());
  }

  #[divan::bench(args = SIZES)]
  fn emoji(bencher: Bencher, size: usize) {
    let text = make_emoji_text(size);
    bencher.bench(|| GraphemeSequence::new(black_box(&text)).len());
  }

  #[divan::bench(args = SIZES)]
  fn combining(bencher: Bencher, size: usize) {
    let text = make_combining_text(size);
    bencher.bench(|| length(black_box(&text)));
  }
}

mod address {
  use super::*;

  #[divan::bench(args = SIZES)]
  fn substring_tail(bencher: Bencher, size: usize) {
    let text = make_emoji_text(size);
    bencher.bench(|| substring(black_box(&text), black_box(-10), None).len());
  }

  #[divan::bench(args = SIZES)]
  fn reverse_emoji(bencher: Bencher, size: usize) {
    let text = make_emoji_text(size);
    bencher.bench(|| reverse(black_box(&text)));
  }
}

mod boundary {
  use super::*;

  const SIZE: usize = 10_000;

  #[divan::bench]
  fn next_ascii(bencher: Bencher) {
    let text = make_ascii_text(SIZE);
    let mid = text.len() / 2;

    bencher.bench(|| next_grapheme_boundary(black_box(&text), black_box(mid)));
  }

  #[divan::bench]
  fn prev_combining(bencher: Bencher) {
    let text = make_combining_text(SIZE);
    let mid = text.len() / 2 / 3 * 3;

    bencher.bench(|| prev_grapheme_boundary(black_box(&text), black_box(mid)));
  }

  #[divan::bench]
  fn ensure_next_emoji(bencher: Bencher) {
    let text = make_emoji_text(SIZE);
    let mid = text.len() / 2;

    bencher.bench(|| ensure_grapheme_boundary_next(black_box(&text), black_box(mid)));
  }

  #[divan::bench]
  fn ensure_prev_emoji(bencher: Bencher) {
    let text = make_emoji_text(SIZE);
    let mid = text.len() / 2;

    bencher.bench(|| ensure_grapheme_boundary_prev(black_box(&text), black_box(mid)));
  }
}

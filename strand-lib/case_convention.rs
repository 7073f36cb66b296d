//! Case conversion over grapheme clusters.
//!
//! Word splitting for the camel/pascal/snake/kebab styles works on clusters
//! classified by their first code point:
//! - every separator cluster (whitespace or punctuation, see
//!   [`char_is_separator`]) ends the current word, so a run of separators
//!   produces empty words that the snake and kebab joiners keep as doubled
//!   separators,
//! - a non-uppercase alphanumeric followed by an uppercase letter starts a new
//!   word (`fooBar`),
//! - an uppercase run followed by a lowercase letter gives its last capital to
//!   the next word (`HTTPServer` → `HTTP`, `Server`).

use std::ops::Range;

use serde::{
  Deserialize,
  Serialize,
};
use smallvec::SmallVec;
use strand_core::{
  chars::{
    char_has_case,
    char_is_separator,
  },
  grapheme::GraphemeSequence,
};

use crate::Tendril;

/// Target style for [`convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseStyle {
  Camel,
  Pascal,
  Kebab,
  Snake,
  Upper,
  Lower,
}

pub fn convert(text: &str, style: CaseStyle) -> Tendril {
  let mut res = Tendril::new();
  convert_with(text, style, &mut res);
  res
}

pub fn convert_with(text: &str, style: CaseStyle, buf: &mut Tendril) {
  match style {
    CaseStyle::Camel => to_camel_case_with(text, buf),
    CaseStyle::Pascal => to_pascal_case_with(text, buf),
    CaseStyle::Kebab => to_kebab_case_with(text, buf),
    CaseStyle::Snake => to_snake_case_with(text, buf),
    CaseStyle::Upper => to_upper_case_with(text, buf),
    CaseStyle::Lower => to_lower_case_with(text, buf),
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
  Separator,
  Upper,
  /// Lowercase letters, digits and uncased letters.
  Lower,
  /// Anything else that belongs to a word, e.g. emoji.
  Other,
}

fn classify(cluster: &str) -> Class {
  match cluster.chars().next() {
    Some(c) if char_is_separator(c) => Class::Separator,
    Some(c) if c.is_uppercase() => Class::Upper,
    Some(c) if c.is_alphanumeric() => Class::Lower,
    _ => Class::Other,
  }
}

/// Byte ranges of the words in `text`.
fn words(text: &str) -> SmallVec<[Range<usize>; 8]> {
  let mut words = SmallVec::new();
  let seq = GraphemeSequence::new(text);
  if seq.is_empty() {
    return words;
  }

  let mut start = 0;
  // (class, byte start) of the previous two clusters
  let mut prev: Option<(Class, usize)> = None;
  let mut prev_prev: Option<Class> = None;

  for (idx, cluster) in seq.iter().enumerate() {
    let pos = seq.byte_offset(idx);
    let class = classify(cluster);

    match (prev_prev, prev, class) {
      (_, _, Class::Separator) => {
        words.push(start..pos);
        start = pos + cluster.len();
      },
      (_, Some((Class::Lower, _)), Class::Upper) => {
        words.push(start..pos);
        start = pos;
      },
      (Some(Class::Upper), Some((Class::Upper, prev_pos)), Class::Lower) if prev_pos > start => {
        words.push(start..prev_pos);
        start = prev_pos;
      },
      _ => {},
    }

    prev_prev = prev.map(|(class, _)| class);
    prev = Some((class, pos));
  }
  words.push(start..text.len());
  words
}

fn push_lower(word: &str, buf: &mut Tendril) {
  word.chars().for_each(|c| buf.extend(c.to_lowercase()));
}

fn push_capitalized(word: &str, buf: &mut Tendril) {
  let mut chars = word.chars();
  if let Some(first) = chars.next() {
    buf.extend(first.to_uppercase());
  }
  chars.for_each(|c| buf.extend(c.to_lowercase()));
}

pub fn to_pascal_case(text: &str) -> Tendril {
  let mut res = Tendril::new();
  to_pascal_case_with(text, &mut res);
  res
}

pub fn to_pascal_case_with(text: &str, buf: &mut Tendril) {
  for word in words(text) {
    push_capitalized(&text[word], buf);
  }
}

pub fn to_camel_case(text: &str) -> Tendril {
  let mut res = Tendril::new();
  to_camel_case_with(text, &mut res);
  res
}

pub fn to_camel_case_with(text: &str, buf: &mut Tendril) {
  let mut first_word = true;
  for word in words(text).into_iter().filter(|word| !word.is_empty()) {
    if first_word {
      push_lower(&text[word], buf);
      first_word = false;
    } else {
      push_capitalized(&text[word], buf);
    }
  }
}

pub fn to_upper_case(text: &str) -> Tendril {
  let mut res = Tendril::new();
  to_upper_case_with(text, &mut res);
  res
}

pub fn to_upper_case_with(text: &str, buf: &mut Tendril) {
  text.chars().for_each(|c| buf.extend(c.to_uppercase()));
}

pub fn to_lower_case(text: &str) -> Tendril {
  let mut res = Tendril::new();
  to_lower_case_with(text, &mut res);
  res
}

pub fn to_lower_case_with(text: &str, buf: &mut Tendril) {
  push_lower(text, buf);
}

pub fn to_snake_case(text: &str) -> Tendril {
  let mut res = Tendril::new();
  to_snake_case_with(text, &mut res);
  res
}

pub fn to_snake_case_with(text: &str, buf: &mut Tendril) {
  to_separated_case_with(text, buf, '_');
}

pub fn to_kebab_case(text: &str) -> Tendril {
  let mut res = Tendril::new();
  to_kebab_case_with(text, &mut res);
  res
}

pub fn to_kebab_case_with(text: &str, buf: &mut Tendril) {
  to_separated_case_with(text, buf, '-');
}

/// Shared implementation for snake_case and kebab-case. Empty words are kept,
/// so `a__b` stays `a__b`.
fn to_separated_case_with(text: &str, buf: &mut Tendril, sep: char) {
  for (idx, word) in words(text).into_iter().enumerate() {
    if idx > 0 {
      buf.push(sep);
    }
    push_lower(&text[word], buf);
  }
}

/// Upper-cases the first cluster, leaving the rest of `text` untouched.
pub fn capitalize(text: &str) -> Tendril {
  map_first(text, |c, buf| buf.extend(c.to_uppercase()))
}

/// Lower-cases the first cluster, leaving the rest of `text` untouched.
pub fn decapitalize(text: &str) -> Tendril {
  map_first(text, |c, buf| buf.extend(c.to_lowercase()))
}

fn map_first(text: &str, map: impl FnOnce(char, &mut Tendril)) -> Tendril {
  let mut res = Tendril::new();
  let mut chars = text.chars();
  match chars.next() {
    Some(first) if char_has_case(first) => {
      map(first, &mut res);
      res.push_str(chars.as_str());
    },
    _ => res.push_str(text),
  }
  res
}

#[cfg(test)]
mod test {
  use super::*;

  fn words_of(text: &str) -> Vec<&str> {
    words(text).into_iter().map(|w| &text[w]).collect()
  }

  #[test]
  fn test_words() {
    assert_eq!(words_of("TTTest"), vec!["TT", "Test"]);
    assert_eq!(words_of("HTTPServer"), vec!["HTTP", "Server"]);
    assert_eq!(words_of("getHTTPResponse"), vec!["get", "HTTP", "Response"]);
    assert_eq!(words_of("helloWorld"), vec!["hello", "World"]);
    assert_eq!(words_of("test__test"), vec!["test", "", "test"]);
    assert_eq!(words_of("_lead"), vec!["", "lead"]);
    assert_eq!(words_of("abc1Def"), vec!["abc1", "Def"]);
    assert_eq!(words_of("ABC"), vec!["ABC"]);
    assert_eq!(words_of("A"), vec!["A"]);
    assert_eq!(words_of(""), Vec::<&str>::new());
    assert_eq!(words_of("emoji👋🏿Case"), vec!["emoji👋🏿Case"]);
  }

  #[test]
  fn test_to_pascal_case() {
    assert_eq!(to_pascal_case("hello_world").as_str(), "HelloWorld");
    assert_eq!(to_pascal_case("HELLO_WORLD").as_str(), "HelloWorld");
    assert_eq!(to_pascal_case("hello-world").as_str(), "HelloWorld");
    assert_eq!(to_pascal_case("helloWorld").as_str(), "HelloWorld");
    assert_eq!(to_pascal_case("TTTest").as_str(), "TtTest");
    assert_eq!(to_pascal_case("__leading__").as_str(), "Leading");
    assert_eq!(to_pascal_case("").as_str(), "");
    assert_eq!(to_pascal_case("a").as_str(), "A");
  }

  #[test]
  fn test_to_camel_case() {
    assert_eq!(to_camel_case("test_test").as_str(), "testTest");
    assert_eq!(to_camel_case("hello_world").as_str(), "helloWorld");
    assert_eq!(to_camel_case("HELLO_WORLD").as_str(), "helloWorld");
    assert_eq!(to_camel_case("hello-world").as_str(), "helloWorld");
    assert_eq!(to_camel_case("HelloWorld").as_str(), "helloWorld");
    assert_eq!(to_camel_case("TTTest").as_str(), "ttTest");
    assert_eq!(to_camel_case("__leading__").as_str(), "leading");
    assert_eq!(to_camel_case("").as_str(), "");
    assert_eq!(to_camel_case("A").as_str(), "a");
  }

  #[test]
  fn test_to_upper_case() {
    assert_eq!(to_upper_case("hello").as_str(), "HELLO");
    assert_eq!(to_upper_case("Hello World").as_str(), "HELLO WORLD");
    assert_eq!(to_upper_case("").as_str(), "");
    assert_eq!(to_upper_case("café").as_str(), "CAFÉ");
    assert_eq!(to_upper_case("straße").as_str(), "STRASSE");
  }

  #[test]
  fn test_to_lower_case() {
    assert_eq!(to_lower_case("HELLO").as_str(), "hello");
    assert_eq!(to_lower_case("Hello World").as_str(), "hello world");
    assert_eq!(to_lower_case("").as_str(), "");
    assert_eq!(to_lower_case("CAFÉ").as_str(), "café");
  }

  #[test]
  fn test_to_snake_case() {
    assert_eq!(to_snake_case("helloWorld").as_str(), "hello_world");
    assert_eq!(to_snake_case("HelloWorld").as_str(), "hello_world");
    assert_eq!(to_snake_case("hello-world").as_str(), "hello_world");
    assert_eq!(to_snake_case("hello world").as_str(), "hello_world");
    assert_eq!(to_snake_case("HELLO_WORLD").as_str(), "hello_world");

    // Acronyms and consecutive uppercase
    assert_eq!(to_snake_case("HTTPServer").as_str(), "http_server");
    assert_eq!(to_snake_case("getHTTPResponse").as_str(), "get_http_response");

    // Separator runs are kept
    assert_eq!(to_snake_case("test__test").as_str(), "test__test");
    assert_eq!(to_snake_case("a - b").as_str(), "a___b");

    // Edge cases
    assert_eq!(to_snake_case("").as_str(), "");
    assert_eq!(to_snake_case("A").as_str(), "a");
    assert_eq!(to_snake_case("already_snake").as_str(), "already_snake");
  }

  #[test]
  fn test_to_kebab_case() {
    assert_eq!(to_kebab_case("TTTest").as_str(), "tt-test");
    assert_eq!(to_kebab_case("helloWorld").as_str(), "hello-world");
    assert_eq!(to_kebab_case("hello_world").as_str(), "hello-world");
    assert_eq!(to_kebab_case("HELLO-WORLD").as_str(), "hello-world");
    assert_eq!(to_kebab_case("test__test").as_str(), "test--test");
    assert_eq!(to_kebab_case("-leading").as_str(), "-leading");
    assert_eq!(to_kebab_case("already-kebab").as_str(), "already-kebab");
    assert_eq!(to_kebab_case("ÉcoleNormale").as_str(), "école-normale");
  }

  #[test]
  fn test_capitalize() {
    assert_eq!(capitalize("hello world").as_str(), "Hello world");
    assert_eq!(capitalize("hELLO").as_str(), "HELLO");
    assert_eq!(capitalize("e\u{0301}cole").as_str(), "E\u{0301}cole");
    assert_eq!(capitalize("漢字").as_str(), "漢字");
    assert_eq!(capitalize("👋🏿hi").as_str(), "👋🏿hi");
    assert_eq!(capitalize("").as_str(), "");

    assert_eq!(decapitalize("Hello World").as_str(), "hello World");
    assert_eq!(decapitalize("ÉCOLE").as_str(), "éCOLE");
    assert_eq!(decapitalize("1ABC").as_str(), "1ABC");
  }

  #[test]
  fn test_convert_styles() {
    assert_eq!(convert("some words", CaseStyle::Pascal).as_str(), "SomeWords");
    assert_eq!(convert("some words", CaseStyle::Upper).as_str(), "SOME WORDS");
    let mut buf = Tendril::from("x:");
    convert_with("someWords", CaseStyle::Kebab, &mut buf);
    assert_eq!(buf.as_str(), "x:some-words");

    let style: CaseStyle = serde_json::from_str("\"snake\"").unwrap();
    assert_eq!(style, CaseStyle::Snake);
    assert_eq!(serde_json::to_string(&CaseStyle::Camel).unwrap(), "\"camel\"");
  }
}

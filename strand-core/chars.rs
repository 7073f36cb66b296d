//! Character classes used by tokenizers and case mapping.

#[inline]
pub fn char_is_line_ending(ch: char) -> bool {
  matches!(
    ch,
    '\u{000A}' // Line Feed
      | '\u{000B}' // Vertical Tab
      | '\u{000C}' // Form Feed
      | '\u{000D}' // Carriage Return
      | '\u{0085}' // Next Line
      | '\u{2028}' // Line Separator
      | '\u{2029}' // Paragraph Separator
  )
}

#[inline]
pub fn char_is_whitespace(ch: char) -> bool {
  match ch {
      '\u{0009}' | // Character Tabulation
      '\u{0020}' | // Space
      '\u{00A0}' | // No-break Space
      '\u{180E}' | // Mongolian Vowel Separator
      '\u{202F}' | // Narrow No-break Space
      '\u{205F}' | // Medium Mathematical Space
      '\u{3000}' | // Ideographic Space
      '\u{FEFF}'   // Zero Width No-break Space
      => true,

      // En Quad, Em Quad, En Space, Em Space, Three-per-em Space,
      // Four-per-em Space, Six-per-em Space, Figure Space,
      // Punctuation Space, Thin Space, Hair Space, Zero Width Space.
      ch if ('\u{2000}' ..= '\u{200B}').contains(&ch) => true,

      _ => false,
    }
}

#[inline]
pub fn char_is_punctuation(ch: char) -> bool {
  use unicode_general_category::{
    GeneralCategory,
    get_general_category,
  };

  matches!(
    get_general_category(ch),
    GeneralCategory::OtherPunctuation
      | GeneralCategory::OpenPunctuation
      | GeneralCategory::ClosePunctuation
      | GeneralCategory::InitialPunctuation
      | GeneralCategory::FinalPunctuation
      | GeneralCategory::ConnectorPunctuation
      | GeneralCategory::DashPunctuation
      | GeneralCategory::MathSymbol
      | GeneralCategory::CurrencySymbol
      | GeneralCategory::ModifierSymbol
  )
}

/// Characters that split words when converting between case styles.
///
/// `_` counts as a separator. Symbols outside the punctuation classes (emoji,
/// `OtherSymbol`) stay inside words.
#[inline]
pub fn char_is_separator(ch: char) -> bool {
  if ch.is_alphanumeric() {
    return false;
  }
  char_is_line_ending(ch) || ch.is_whitespace() || char_is_whitespace(ch) || char_is_punctuation(ch)
}

/// Returns `true` when upper or lower casing `ch` produces something else.
#[inline]
pub fn char_has_case(ch: char) -> bool {
  ch.is_uppercase()
    || ch.is_lowercase()
    || ch.to_uppercase().ne(std::iter::once(ch))
    || ch.to_lowercase().ne(std::iter::once(ch))
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn classes() {
    assert!(char_is_line_ending('\n'));
    assert!(char_is_line_ending('\u{2028}'));
    assert!(!char_is_line_ending(' '));
    assert!(char_is_whitespace('\u{3000}'));
    assert!(char_is_whitespace('\u{200B}'));
    assert!(!char_is_whitespace('\u{200D}'));
    assert!(char_is_punctuation('-'));
    assert!(char_is_punctuation('$'));
    assert!(!char_is_punctuation('😀'));
  }

  #[test]
  fn separators() {
    for ch in [' ', '-', '_', '.', '\t', '\n', '\u{3000}', '/'] {
      assert!(char_is_separator(ch), "{ch:?} should separate words");
    }
    for ch in ['a', 'Z', '7', 'é', '漢', '😀', '\u{0301}'] {
      assert!(!char_is_separator(ch), "{ch:?} should not separate words");
    }
  }

  #[test]
  fn case_mapping() {
    assert!(char_has_case('a'));
    assert!(char_has_case('Ä'));
    assert!(char_has_case('ß'));
    assert!(!char_has_case('漢'));
    assert!(!char_has_case('😀'));
    assert!(!char_has_case('1'));
  }
}

//! Strict parsing of numeric and boolean literals.
//!
//! The accepted grammar is deliberately narrower than `str::parse`:
//!
//! | kind    | grammar (anchored)                                        |
//! |---------|-----------------------------------------------------------|
//! | bool    | `true`, `TRUE`, `false`, `FALSE` or `[0-9]+`              |
//! | integer | `-?(0\|[1-9][0-9]*)`                                      |
//! | float   | `-?(0\|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`         |
//!
//! Floats additionally accept `NAN`, `NaN`, `-NAN`, `-NaN`, `INF`,
//! `Infinity`, `-INF` and `-Infinity`. A float literal fails with
//! [`ParseErrorKind::PrecisionLoss`] when writing its value out without an
//! exponent takes more than [`MAX_SIGNIFICANT_DIGITS`] significant digits, or
//! when a non-zero literal underflows to zero.

use once_cell::sync::Lazy;
use regex_automata::meta::Regex;
use thiserror::Error;

/// Significant decimal digits an `f64` always holds exactly.
pub const MAX_SIGNIFICANT_DIGITS: u32 = f64::DIGITS;

static BOOL_DIGITS: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^[0-9]+$").expect("bool grammar should compile")
});

static INTEGER: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^-?(?:0|[1-9][0-9]*)$").expect("integer grammar should compile")
});

static FLOAT: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?$")
    .expect("float grammar should compile")
});

/// A successfully classified literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
  Integer(i64),
  Float(f64),
  Bool(bool),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
  #[error("does not match the strict grammar")]
  InvalidFormat,
  #[error("is out of range")]
  Overflow,
  #[error("cannot be represented without losing precision")]
  PrecisionLoss,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{target} literal {literal:?} {kind}")]
pub struct ParseError {
  pub literal: String,
  pub target:  &'static str,
  pub kind:    ParseErrorKind,
}

impl ParseError {
  fn new(literal: &str, target: &'static str, kind: ParseErrorKind) -> Self {
    tracing::debug!(literal, into = target, %kind, "rejected literal");
    Self {
      literal: literal.to_owned(),
      target,
      kind,
    }
  }
}

pub type Result<T> = std::result::Result<T, ParseError>;

pub fn to_bool(literal: &str) -> Result<bool> {
  match literal {
    "true" | "TRUE" => Ok(true),
    "false" | "FALSE" => Ok(false),
    digits if BOOL_DIGITS.is_match(digits) => Ok(digits.bytes().any(|b| b != b'0')),
    _ => Err(ParseError::new(literal, "bool", ParseErrorKind::InvalidFormat)),
  }
}

pub fn to_int(literal: &str) -> Result<i64> {
  if !INTEGER.is_match(literal) {
    return Err(ParseError::new(literal, "integer", ParseErrorKind::InvalidFormat));
  }
  // The grammar leaves range as the only way parsing can fail.
  literal
    .parse()
    .map_err(|_| ParseError::new(literal, "integer", ParseErrorKind::Overflow))
}

pub fn to_float(literal: &str) -> Result<f64> {
  match literal {
    "NAN" | "NaN" | "-NAN" | "-NaN" => return Ok(f64::NAN),
    "INF" | "Infinity" => return Ok(f64::INFINITY),
    "-INF" | "-Infinity" => return Ok(f64::NEG_INFINITY),
    _ => {},
  }
  if !FLOAT.is_match(literal) {
    return Err(ParseError::new(literal, "float", ParseErrorKind::InvalidFormat));
  }

  let value: f64 = literal
    .parse()
    .map_err(|_| ParseError::new(literal, "float", ParseErrorKind::InvalidFormat))?;
  if !value.is_finite() {
    return Err(ParseError::new(literal, "float", ParseErrorKind::Overflow));
  }

  let digits = significant_digits(literal);
  if digits > MAX_SIGNIFICANT_DIGITS as usize || (value == 0.0 && digits > 0) {
    return Err(ParseError::new(literal, "float", ParseErrorKind::PrecisionLoss));
  }
  Ok(value)
}

/// Classifies `literal` as a bool word, an integer or a float, in that order.
pub fn parse(literal: &str) -> Result<Literal> {
  match literal {
    "true" | "TRUE" | "false" | "FALSE" => to_bool(literal).map(Literal::Bool),
    _ if INTEGER.is_match(literal) => to_int(literal).map(Literal::Integer),
    _ if FLOAT.is_match(literal) || literal.trim_start_matches('-').starts_with(['N', 'I']) => {
      to_float(literal).map(Literal::Float)
    },
    _ => Err(ParseError::new(literal, "number", ParseErrorKind::InvalidFormat)),
  }
}

/// Number of significant digits needed to write the value of a literal that
/// matched the float grammar in positional notation.
///
/// `1e20` needs 21 (`100000000000000000000`), `0.00120` needs 2.
fn significant_digits(literal: &str) -> usize {
  let unsigned = literal.strip_prefix('-').unwrap_or(literal);
  let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
    Some((mantissa, exponent)) => {
      let saturated = if exponent.starts_with('-') {
        i64::MIN
      } else {
        i64::MAX
      };
      (mantissa, exponent.parse::<i64>().unwrap_or(saturated))
    },
    None => (unsigned, 0),
  };
  let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

  // value = digits * 10^scale
  let digits = format!("{int_part}{frac_part}");
  let digits = digits.trim_start_matches('0');
  let trimmed = digits.trim_end_matches('0');
  if trimmed.is_empty() {
    return 0;
  }
  let trailing_zeros = (digits.len() - trimmed.len()) as i64;
  let scale = exponent
    .saturating_sub(frac_part.len() as i64)
    .saturating_add(trailing_zeros);

  if scale >= 0 {
    trimmed.len().saturating_add(usize::try_from(scale).unwrap_or(usize::MAX))
  } else {
    trimmed.len()
  }
}

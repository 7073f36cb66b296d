//! Failures shared by the search, replace and padding operations.
//!
//! "Not found" is never an error here: locate operations return `Option`.
//! Numeric parsing has its own error type in [`crate::numeric`].

use strand_core::grapheme::EncodingError;
use strand_stdx::pattern::PatternError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
  /// Raised by no operation here since they all take `&str`. Lets callers
  /// that segment raw bytes with `GraphemeSequence::from_utf8` use `?` into
  /// this error type.
  #[error(transparent)]
  Encoding(#[from] EncodingError),
  #[error("invalid argument `{name}` ({value:?}): {reason}")]
  InvalidArgument {
    name:   &'static str,
    value:  String,
    reason: &'static str,
  },
  #[error("pattern '{pattern}' has no match in {haystack:?}")]
  NoMatch { pattern: String, haystack: String },
  #[error(transparent)]
  Pattern(#[from] PatternError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
  pub(crate) fn invalid_argument(
    name: &'static str,
    value: impl ToString,
    reason: &'static str,
  ) -> Self {
    let value = value.to_string();
    tracing::debug!(name, %value, reason, "rejected argument");
    Error::InvalidArgument {
      name,
      value,
      reason,
    }
  }
}

/// Rejects an empty needle or delimiter.
pub(crate) fn ensure_non_empty(name: &'static str, value: &str) -> Result<()> {
  if value.is_empty() {
    return Err(Error::invalid_argument(name, value, "must not be empty"));
  }
  Ok(())
}

/// Validates an optional count limit, `None` meaning unlimited.
pub(crate) fn ensure_limit(limit: Option<isize>) -> Result<Option<usize>> {
  match limit {
    Some(limit) if limit < 0 => Err(Error::invalid_argument(
      "limit",
      limit,
      "must not be negative",
    )),
    Some(limit) => Ok(Some(limit.unsigned_abs())),
    None => Ok(None),
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn messages_carry_the_offending_value() {
    let err = ensure_limit(Some(-3)).unwrap_err();
    assert_eq!(
      err,
      Error::InvalidArgument {
        name:   "limit",
        value:  "-3".into(),
        reason: "must not be negative",
      }
    );
    assert_eq!(
      err.to_string(),
      "invalid argument `limit` (\"-3\"): must not be negative"
    );

    let err = ensure_non_empty("needle", "").unwrap_err();
    assert_eq!(
      err.to_string(),
      "invalid argument `needle` (\"\"): must not be empty"
    );
  }

  #[test]
  fn limits() {
    assert_eq!(ensure_limit(None), Ok(None));
    assert_eq!(ensure_limit(Some(0)), Ok(Some(0)));
    assert_eq!(ensure_limit(Some(7)), Ok(Some(7)));
  }

  #[test]
  fn encoding_errors_convert() {
    fn count_clusters(bytes: &[u8]) -> Result<usize> {
      Ok(strand_core::grapheme::GraphemeSequence::from_utf8(bytes)?.len())
    }

    assert_eq!(count_clusters("e\u{0301}".as_bytes()), Ok(1));
    let err = count_clusters(&[0xc3]).unwrap_err();
    assert!(matches!(err, Error::Encoding(EncodingError { valid_up_to: 0, .. })));
  }
}

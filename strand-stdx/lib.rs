//! Thin wrappers around external capabilities the text kernel consumes.

pub mod pattern;

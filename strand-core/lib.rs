//! Grapheme-cluster addressing and character classification shared by the
//! rest of the strand workspace.

pub mod chars;
pub mod grapheme;

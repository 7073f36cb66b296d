use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod case_convention;
pub mod codepoint;
pub mod error;
pub mod numeric;
pub mod pad;
pub mod replace;
pub mod search;

pub use error::{
  Error,
  Result,
};

pub type Tendril = SmartString<LazyCompact>;

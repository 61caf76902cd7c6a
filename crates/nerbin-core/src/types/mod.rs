pub mod doc;
pub mod span;

pub use doc::{Doc, Token};
pub use span::{AlignmentMode, Span};

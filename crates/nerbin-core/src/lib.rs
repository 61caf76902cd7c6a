//! # Nerbin Core
//!
//! The building blocks of the nerbin corpus builder: blank language
//! pipelines that tokenize raw text, a document model with character-to-token
//! span alignment, IOB tagging, and the binary document store.
//!
//! ## Quick Start
//!
//! ```rust
//! use nerbin_core::pipeline::{Language, Tokenizer};
//! use nerbin_core::store::DocBin;
//! use nerbin_core::types::AlignmentMode;
//!
//! let tokenizer = Tokenizer::new(Language::English).unwrap();
//! let mut doc = tokenizer.tokenize("what is the price of polo?");
//! let span = doc.char_span(21, 25, "PrdName", AlignmentMode::Strict).unwrap();
//! doc.set_ents(vec![span]);
//!
//! let mut bin = DocBin::new();
//! bin.add(doc);
//! let restored = DocBin::from_bytes(&bin.to_bytes().unwrap()).unwrap();
//! assert_eq!(restored.docs()[0].ents()[0].label, "PrdName");
//! ```
pub mod error;
pub mod pipeline;
pub mod store;
pub mod types;

// Re-export primary API
pub use error::{NerbinError, Result};
pub use pipeline::{IobTag, Language, Tokenizer, doc_to_iob, iob_to_spans};
pub use store::{DocBin, write_bytes};
pub use types::{AlignmentMode, Doc, Span, Token};

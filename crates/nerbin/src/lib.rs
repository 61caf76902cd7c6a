//! # Nerbin
//!
//! Build named-entity-recognition training corpora from character-offset
//! annotations.
//!
//! This crate re-exports the tokenizer and document store from
//! [`nerbin_core`] and the conversion pipeline from [`nerbin_builder`].
//!
//! ```
//! use nerbin::{CorpusBuilder, EntitySpec, Example};
//!
//! let builder = CorpusBuilder::from_language("en").unwrap();
//! let report = builder.build(&[Example::new(
//!     "what is the price of polo?",
//!     vec![EntitySpec::new(21, 25, "PrdName")],
//! )]);
//!
//! let doc = &report.docbin.docs()[0];
//! assert_eq!(doc.span_text(&doc.ents()[0]).as_deref(), Some("polo"));
//! ```

pub use nerbin_builder::{
    BuilderConfig, ConversionReport, CorpusBuilder, DatasetFormat, EntityOutcome, EntitySpec,
    Example, ExampleReport, IobRecord, MismatchReason, builtin_dataset, convert, export_iob,
    load_dataset, parse_dataset, read_dataset,
};
pub use nerbin_core::{
    AlignmentMode, Doc, DocBin, IobTag, Language, NerbinError, Result, Span, Token, Tokenizer,
    doc_to_iob, iob_to_spans, write_bytes,
};

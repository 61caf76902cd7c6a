//! # Nerbin Builder
//!
//! Builds named-entity-recognition training corpora: loads character-offset
//! examples, tokenizes them with a blank language pipeline, aligns entity
//! offsets to token boundaries, and writes the annotated documents to a
//! binary document store.

pub mod config;
pub mod convert;
pub mod data;
pub mod export;

pub use config::BuilderConfig;
pub use convert::{
    ConversionReport, CorpusBuilder, EntityOutcome, ExampleReport, MismatchReason, convert,
};
pub use data::{
    DatasetFormat, EntitySpec, Example, builtin_dataset, load_dataset, parse_dataset, read_dataset,
};
pub use export::{IobRecord, export_iob};

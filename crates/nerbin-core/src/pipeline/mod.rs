pub mod iob;
pub mod language;
pub mod punctuation;
pub mod tokenizer;

pub use iob::{IobTag, doc_to_iob, iob_to_spans};
pub use language::Language;
pub use punctuation::AffixRules;
pub use tokenizer::Tokenizer;

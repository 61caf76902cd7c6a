//! IOB export of a document store, one JSON object per line.

use std::io::Write;

use nerbin_core::error::{NerbinError, Result};
use nerbin_core::pipeline::doc_to_iob;
use nerbin_core::store::DocBin;
use nerbin_core::types::Doc;
use serde::{Deserialize, Serialize};

/// Token texts and their IOB tags for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IobRecord {
    pub tokens: Vec<String>,
    pub ner_tags: Vec<String>,
}

impl IobRecord {
    pub fn from_doc(doc: &Doc) -> Self {
        Self {
            tokens: doc.tokens().iter().map(|t| t.text.clone()).collect(),
            ner_tags: doc_to_iob(doc).iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Write every document of `docbin` as an [`IobRecord`] JSON line.
/// Returns the number of lines written.
pub fn export_iob<W: Write>(docbin: &DocBin, mut writer: W) -> Result<usize> {
    for doc in docbin.docs() {
        let json = serde_json::to_string(&IobRecord::from_doc(doc))
            .map_err(|e| NerbinError::Encode(e.to_string()))?;
        writeln!(writer, "{json}")?;
    }
    writer.flush()?;
    Ok(docbin.len())
}

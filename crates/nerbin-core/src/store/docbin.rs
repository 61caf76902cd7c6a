//! # Binary Document Store
//!
//! `DocBin` collects documents and serializes them into a compact binary
//! container: a short header followed by a zlib-compressed `bincode`
//! payload. Token and label strings are interned in a sorted table so the
//! same documents always produce the same bytes.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{NerbinError, Result};
use crate::types::{Doc, Span};

/// File signature at the start of every store.
pub const MAGIC: &[u8; 4] = b"NRBN";

/// Current payload layout version.
pub const FORMAT_VERSION: u16 = 1;

const HEADER_LEN: usize = MAGIC.len() + 2;

#[derive(Debug, Serialize, Deserialize)]
struct Payload {
    strings: Vec<String>,
    docs: Vec<DocRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct DocRecord {
    orths: Vec<u32>,
    spaces: Vec<bool>,
    /// `(start token, end token, label id)`
    ents: Vec<(u32, u32, u32)>,
}

/// An ordered collection of annotated documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocBin {
    docs: Vec<Doc>,
}

impl DocBin {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a document.
    pub fn add(&mut self, doc: Doc) {
        self.docs.push(doc);
    }

    /// Appends every document of `other`, keeping order.
    pub fn merge(&mut self, other: DocBin) {
        self.docs.extend(other.docs);
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Returns `true` if the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// The documents, in insertion order.
    pub fn docs(&self) -> &[Doc] {
        &self.docs
    }

    /// Consumes the store, returning its documents.
    pub fn into_docs(self) -> Vec<Doc> {
        self.docs
    }

    /// Serializes the store.
    ///
    /// # Errors
    ///
    /// Returns `NerbinError::Encode` if the payload cannot be encoded or a
    /// string id or entity bound does not fit in 32 bits.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let table: BTreeSet<&str> = self
            .docs
            .iter()
            .flat_map(|doc| {
                doc.tokens()
                    .iter()
                    .map(|t| t.text.as_str())
                    .chain(doc.ents().iter().map(|s| s.label.as_str()))
            })
            .collect();
        let ids = table
            .iter()
            .enumerate()
            .map(|(i, s)| Ok((*s, to_u32(i, "string id")?)))
            .collect::<Result<HashMap<&str, u32>>>()?;

        let docs = self
            .docs
            .iter()
            .map(|doc| {
                let ents = doc
                    .ents()
                    .iter()
                    .map(|s| {
                        Ok((
                            to_u32(s.start, "entity start")?,
                            to_u32(s.end, "entity end")?,
                            ids[s.label.as_str()],
                        ))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(DocRecord {
                    orths: doc.tokens().iter().map(|t| ids[t.text.as_str()]).collect(),
                    spaces: doc.tokens().iter().map(|t| t.whitespace).collect(),
                    ents,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let payload = Payload {
            strings: table.into_iter().map(String::from).collect(),
            docs,
        };
        let encoded = bincode::serialize(&payload).map_err(|e| NerbinError::Encode(e.to_string()))?;

        let mut out = Vec::with_capacity(HEADER_LEN + encoded.len() / 2);
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        let mut encoder = ZlibEncoder::new(out, Compression::default());
        encoder.write_all(&encoded)?;
        let bytes = encoder.finish()?;

        debug!(docs = self.docs.len(), bytes = bytes.len(), "serialized document store");
        Ok(bytes)
    }

    /// Deserializes a store produced by [`DocBin::to_bytes`].
    ///
    /// # Errors
    ///
    /// Returns `NerbinError::CorruptStore` for a bad header or inconsistent
    /// contents, and `NerbinError::Decode` if the payload cannot be decoded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN || &bytes[..MAGIC.len()] != MAGIC {
            return Err(NerbinError::CorruptStore("missing store signature".into()));
        }
        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != FORMAT_VERSION {
            return Err(NerbinError::CorruptStore(format!(
                "unsupported format version {version}"
            )));
        }

        let mut decoded = Vec::new();
        ZlibDecoder::new(&bytes[HEADER_LEN..])
            .read_to_end(&mut decoded)
            .map_err(|e| NerbinError::Decode(e.to_string()))?;
        let payload: Payload =
            bincode::deserialize(&decoded).map_err(|e| NerbinError::Decode(e.to_string()))?;

        let lookup = |id: u32| {
            payload
                .strings
                .get(id as usize)
                .ok_or_else(|| NerbinError::CorruptStore(format!("string id {id} out of range")))
        };

        let mut docs = Vec::with_capacity(payload.docs.len());
        for (n, record) in payload.docs.iter().enumerate() {
            if record.orths.len() != record.spaces.len() {
                return Err(NerbinError::CorruptStore(format!(
                    "document {n}: {} tokens but {} whitespace flags",
                    record.orths.len(),
                    record.spaces.len()
                )));
            }
            let words = record
                .orths
                .iter()
                .zip(&record.spaces)
                .map(|(id, space)| lookup(*id).map(|w| (w.as_str(), *space)))
                .collect::<Result<Vec<_>>>()?;
            let mut doc = Doc::from_words(words);

            let mut ents = Vec::with_capacity(record.ents.len());
            for &(start, end, label) in &record.ents {
                let (start, end) = (start as usize, end as usize);
                if start >= end || end > doc.len() {
                    return Err(NerbinError::CorruptStore(format!(
                        "document {n}: entity [{start}, {end}) outside {} tokens",
                        doc.len()
                    )));
                }
                ents.push(Span::new(start, end, lookup(label)?.as_str()));
            }
            doc.set_ents(ents);
            docs.push(doc);
        }

        Ok(Self { docs })
    }

    /// Serializes the store and writes it to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns `NerbinError::Io` if the file cannot be written, including when
    /// the parent directory does not exist.
    pub fn to_disk(&self, path: impl AsRef<Path>) -> Result<()> {
        write_bytes(&self.to_bytes()?, path)
    }

    /// Reads a store written by [`DocBin::to_disk`].
    ///
    /// # Errors
    ///
    /// Returns `NerbinError::Io` if the file cannot be read, and the errors of
    /// [`DocBin::from_bytes`] if its contents are not a valid store.
    pub fn from_disk(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }
}

fn to_u32(n: usize, what: &str) -> Result<u32> {
    u32::try_from(n).map_err(|_| NerbinError::Encode(format!("{what} {n} does not fit in 32 bits")))
}

/// Writes serialized store bytes to `path`, creating or truncating the file.
///
/// Parent directories are never created. Bytes are fully encoded before the
/// file is opened, so an encoding failure leaves no file behind.
pub fn write_bytes(bytes: &[u8], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote document store");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Language, Tokenizer};
    use crate::types::AlignmentMode;

    fn sample() -> DocBin {
        let tokenizer = Tokenizer::new(Language::English).unwrap();
        let mut bin = DocBin::new();

        let mut doc = tokenizer.tokenize("what is the price of polo?");
        let span = doc.char_span(21, 25, "PrdName", AlignmentMode::Strict).unwrap();
        doc.set_ents(vec![span]);
        bin.add(doc);

        bin.add(tokenizer.tokenize("My favourite website is  youtube "));
        bin
    }

    #[test]
    fn test_roundtrip_preserves_docs() {
        let bin = sample();
        let back = DocBin::from_bytes(&bin.to_bytes().unwrap()).unwrap();

        assert_eq!(back, bin);
        assert_eq!(back.docs()[0].ents()[0].label, "PrdName");
        assert_eq!(back.docs()[1].text(), "My favourite website is  youtube ");
    }

    #[test]
    fn test_serialization_is_deterministic() {
        assert_eq!(sample().to_bytes().unwrap(), sample().to_bytes().unwrap());
    }

    #[test]
    fn test_empty_store_roundtrip() {
        let bytes = DocBin::new().to_bytes().unwrap();
        assert!(bytes.starts_with(MAGIC));
        assert!(DocBin::from_bytes(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_bad_header() {
        assert!(matches!(
            DocBin::from_bytes(b"nope"),
            Err(NerbinError::CorruptStore(_))
        ));

        let mut bytes = sample().to_bytes().unwrap();
        bytes[4] = 9;
        assert!(matches!(
            DocBin::from_bytes(&bytes),
            Err(NerbinError::CorruptStore(_))
        ));
    }

    #[test]
    fn test_rejects_truncated_payload() {
        let bytes = sample().to_bytes().unwrap();
        let truncated = &bytes[..bytes.len() / 2];
        assert!(matches!(
            DocBin::from_bytes(truncated),
            Err(NerbinError::Decode(_))
        ));
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut a = sample();
        let b = sample();
        a.merge(b);
        assert_eq!(a.len(), 4);
        assert_eq!(a.docs()[2].text(), "what is the price of polo?");
    }

    #[test]
    fn test_disk_roundtrip_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.nerbin");

        DocBin::new().to_disk(&path).unwrap();
        sample().to_disk(&path).unwrap();

        let back = DocBin::from_disk(&path).unwrap();
        assert_eq!(back.len(), 2);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_wide_indices_are_an_encode_error() {
        assert_eq!(to_u32(7, "entity end").unwrap(), 7);
        let err = to_u32(u32::MAX as usize + 1, "entity end").unwrap_err();
        assert!(matches!(err, NerbinError::Encode(ref msg) if msg.starts_with("entity end")));
    }

    #[test]
    fn test_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("train.nerbin");

        let err = sample().to_disk(&path).unwrap_err();
        assert!(matches!(err, NerbinError::Io(_)));
        assert!(!path.exists());
    }
}

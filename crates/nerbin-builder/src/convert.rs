//! # Corpus Conversion
//!
//! Turns character-offset examples into annotated documents and writes them
//! to a binary document store. Entities whose offsets do not fall on token
//! boundaries are skipped with a warning; the document itself is always kept.

use std::fmt;
use std::path::Path;

use nerbin_core::error::Result;
use nerbin_core::pipeline::{Language, Tokenizer};
use nerbin_core::store::{DocBin, write_bytes};
use nerbin_core::types::{AlignmentMode, Doc, Span};
use tracing::{debug, info, warn};

use crate::config::BuilderConfig;
use crate::data::{EntitySpec, Example};

/// Why an entity could not be aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchReason {
    /// Characters `[start, end)` of the text, clamped to its bounds.
    pub snippet: String,
    /// Alignment mode that rejected the span.
    pub mode: AlignmentMode,
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "the character span '{}' does not align with token boundaries",
            self.snippet
        )
    }
}

/// Result of aligning one requested entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityOutcome {
    /// The entity was mapped onto tokens and attached to the document.
    Aligned(Span),
    /// The entity was dropped; the rest of the example is unaffected.
    SkippedMismatch {
        entity: EntitySpec,
        reason: MismatchReason,
    },
}

impl EntityOutcome {
    pub fn is_aligned(&self) -> bool {
        matches!(self, EntityOutcome::Aligned(_))
    }
}

/// Alignment outcomes for one example, in entity order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleReport {
    pub outcomes: Vec<EntityOutcome>,
}

impl ExampleReport {
    /// Spans that were attached to the document.
    pub fn aligned(&self) -> impl Iterator<Item = &Span> {
        self.outcomes.iter().filter_map(|o| match o {
            EntityOutcome::Aligned(span) => Some(span),
            EntityOutcome::SkippedMismatch { .. } => None,
        })
    }

    /// Entities that were skipped, with the reason.
    pub fn skipped(&self) -> impl Iterator<Item = (&EntitySpec, &MismatchReason)> {
        self.outcomes.iter().filter_map(|o| match o {
            EntityOutcome::SkippedMismatch { entity, reason } => Some((entity, reason)),
            EntityOutcome::Aligned(_) => None,
        })
    }
}

/// Everything produced by one conversion run.
#[derive(Debug, Clone, Default)]
pub struct ConversionReport {
    /// One document per input example, in input order.
    pub docbin: DocBin,
    /// One report per input example, in input order.
    pub examples: Vec<ExampleReport>,
}

impl ConversionReport {
    pub fn aligned_count(&self) -> usize {
        self.examples.iter().map(|e| e.aligned().count()).sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.examples.iter().map(|e| e.skipped().count()).sum()
    }
}

/// Converts examples into annotated documents with a blank pipeline.
#[derive(Debug, Clone)]
pub struct CorpusBuilder {
    tokenizer: Tokenizer,
    alignment_mode: AlignmentMode,
}

impl CorpusBuilder {
    /// Create a builder with the given configuration.
    pub fn new(config: BuilderConfig) -> Result<Self> {
        Ok(Self {
            tokenizer: Tokenizer::new(config.language)?,
            alignment_mode: config.alignment_mode,
        })
    }

    /// Create a strict-alignment builder from a language code such as `"en"`.
    pub fn from_language(code: &str) -> Result<Self> {
        Self::new(BuilderConfig::new().with_language(Language::from_code(code)?))
    }

    /// Tokenize one example and attach every entity that aligns.
    pub fn annotate(&self, example: &Example) -> (Doc, ExampleReport) {
        let mut doc = self.tokenizer.tokenize(&example.text);
        let mut report = ExampleReport::default();
        let mut ents = Vec::new();

        for entity in &example.entities {
            let span = doc.char_span(entity.start, entity.end, &entity.label, self.alignment_mode);
            match span {
                Some(span) => {
                    ents.push(span.clone());
                    report.outcomes.push(EntityOutcome::Aligned(span));
                }
                None => {
                    let reason = MismatchReason {
                        snippet: doc.char_slice(entity.start, entity.end),
                        mode: self.alignment_mode,
                    };
                    warn!(
                        "Skipping entity {entity} in the following text because {reason}:\n\n{:?}\n",
                        example.text
                    );
                    report.outcomes.push(EntityOutcome::SkippedMismatch {
                        entity: entity.clone(),
                        reason,
                    });
                }
            }
        }

        doc.set_ents(ents);
        (doc, report)
    }

    /// Convert every example, in order, without writing anything.
    pub fn build(&self, examples: &[Example]) -> ConversionReport {
        let mut report = ConversionReport::default();

        for example in examples {
            let (doc, example_report) = self.annotate(example);
            debug!(
                tokens = doc.len(),
                ents = doc.ents().len(),
                "annotated document"
            );
            report.docbin.add(doc);
            report.examples.push(example_report);
        }

        report
    }

    /// Convert every example and write the document store to `output_path`,
    /// replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns `NerbinError::Io` if the file cannot be written; nothing is
    /// retried and no partial file is left for a missing parent directory.
    pub fn convert(
        &self,
        examples: &[Example],
        output_path: impl AsRef<Path>,
    ) -> Result<ConversionReport> {
        let output_path = output_path.as_ref();
        let report = self.build(examples);

        let bytes = report.docbin.to_bytes()?;
        write_bytes(&bytes, output_path)?;

        info!(
            docs = report.docbin.len(),
            aligned = report.aligned_count(),
            skipped = report.skipped_count(),
            path = %output_path.display(),
            "wrote corpus"
        );
        Ok(report)
    }
}

/// Tokenize `examples` with a blank `language` pipeline, align their entities
/// strictly, and write the resulting corpus to `output_path`.
pub fn convert(
    language: &str,
    examples: &[Example],
    output_path: impl AsRef<Path>,
) -> Result<ConversionReport> {
    CorpusBuilder::from_language(language)?.convert(examples, output_path)
}

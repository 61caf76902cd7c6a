//! # IOB Tags for Named Entity Recognition
//!
//! Converts between entity spans on a [`Doc`] and per-token tags in the
//! IOB (Inside-Outside-Begin) scheme.

use std::fmt;
use std::str::FromStr;

use crate::types::{Doc, Span};

/// IOB tag for a single token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IobTag {
    /// First token of an entity.
    Begin(String),
    /// Continuation of the entity opened by a `Begin` with the same label.
    Inside(String),
    /// Token outside any entity.
    Outside,
}

impl IobTag {
    /// The entity label, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            IobTag::Begin(label) | IobTag::Inside(label) => Some(label),
            IobTag::Outside => None,
        }
    }

    /// Check if this is a "Begin" tag.
    pub fn is_begin(&self) -> bool {
        matches!(self, IobTag::Begin(_))
    }

    /// Check if this is an "Inside" tag.
    pub fn is_inside(&self) -> bool {
        matches!(self, IobTag::Inside(_))
    }

    /// Check if transitioning from `from` tag to `to` tag is valid.
    ///
    /// An `Inside` tag may only follow a `Begin` or `Inside` of the same label.
    pub fn is_valid_transition(from: &IobTag, to: &IobTag) -> bool {
        match to {
            IobTag::Inside(label) => from.label() == Some(label.as_str()),
            _ => true,
        }
    }
}

impl fmt::Display for IobTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IobTag::Begin(label) => write!(f, "B-{label}"),
            IobTag::Inside(label) => write!(f, "I-{label}"),
            IobTag::Outside => write!(f, "O"),
        }
    }
}

impl FromStr for IobTag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split_once('-') {
            _ if s == "O" => Ok(IobTag::Outside),
            Some(("B", label)) if !label.is_empty() => Ok(IobTag::Begin(label.to_string())),
            Some(("I", label)) if !label.is_empty() => Ok(IobTag::Inside(label.to_string())),
            _ => Err(format!("invalid IOB tag: {s:?}")),
        }
    }
}

/// Tags every token of `doc` from its attached spans.
///
/// Spans are applied in attachment order; a span that overlaps tokens
/// already tagged by an earlier span is left out.
pub fn doc_to_iob(doc: &Doc) -> Vec<IobTag> {
    let mut tags = vec![IobTag::Outside; doc.len()];

    for span in doc.ents() {
        if span.is_empty() || span.end > tags.len() {
            continue;
        }
        if tags[span.start..span.end].iter().any(|t| *t != IobTag::Outside) {
            continue;
        }
        tags[span.start] = IobTag::Begin(span.label.clone());
        for tag in &mut tags[span.start + 1..span.end] {
            *tag = IobTag::Inside(span.label.clone());
        }
    }

    tags
}

/// Decodes a tag sequence back into spans. A stray `Inside` tag (one that
/// does not continue an entity of the same label) opens a new span.
pub fn iob_to_spans(tags: &[IobTag]) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    let mut open: Option<Span> = None;

    for (i, tag) in tags.iter().enumerate() {
        match tag {
            IobTag::Inside(label)
                if open.as_ref().is_some_and(|s| s.label == *label) =>
            {
                if let Some(span) = open.as_mut() {
                    span.end = i + 1;
                }
            }
            IobTag::Begin(label) | IobTag::Inside(label) => {
                spans.extend(open.take());
                open = Some(Span::new(i, i + 1, label.clone()));
            }
            IobTag::Outside => spans.extend(open.take()),
        }
    }
    spans.extend(open);

    spans
}

use serde::{Deserialize, Serialize};

use super::span::{AlignmentMode, Span};

/// A token with its position in the original text.
///
/// Offsets count characters (Unicode scalar values), not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The token text, exactly as it appears in the original string.
    pub text: String,
    /// Start character offset in the original string.
    pub start: usize,
    /// End character offset (exclusive) in the original string.
    pub end: usize,
    /// Token index in the document.
    pub index: usize,
    /// Whether a single space follows the token.
    pub whitespace: bool,
}

impl Token {
    /// Returns `true` for tokens made only of whitespace.
    #[must_use]
    pub fn is_space(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

/// A tokenized text plus the entity spans attached to it.
///
/// Tokens cover the text exactly: each token's text followed by its trailing
/// space (if any) concatenates back to the original string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doc {
    text: String,
    tokens: Vec<Token>,
    ents: Vec<Span>,
}

impl Doc {
    /// Builds a document from consecutive words of `text` and their trailing-space flags.
    pub(crate) fn from_parts(text: &str, words: &[&str], spaces: &[bool]) -> Self {
        let mut tokens = Vec::with_capacity(words.len());
        let mut pos = 0;

        for (index, (word, space)) in words.iter().zip(spaces).enumerate() {
            let start = pos;
            let end = start + word.chars().count();
            tokens.push(Token {
                text: (*word).to_string(),
                start,
                end,
                index,
                whitespace: *space,
            });
            pos = end + usize::from(*space);
        }

        Self {
            text: text.to_string(),
            tokens,
            ents: Vec::new(),
        }
    }

    /// Rebuilds a document from `(word, trailing space)` pairs.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        let pairs: Vec<(S, bool)> = words.into_iter().collect();
        let mut text = String::new();
        for (word, space) in &pairs {
            text.push_str(word.as_ref());
            if *space {
                text.push(' ');
            }
        }
        let words: Vec<&str> = pairs.iter().map(|(w, _)| w.as_ref()).collect();
        let spaces: Vec<bool> = pairs.iter().map(|(_, s)| *s).collect();
        Self::from_parts(&text, &words, &spaces)
    }

    /// The original text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The tokens, in order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Token texts, in order.
    pub fn words(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the document has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Entity spans attached to the document.
    pub fn ents(&self) -> &[Span] {
        &self.ents
    }

    /// Replaces the entity spans. Spans must lie within the document; no
    /// overlap or duplicate checks are made.
    pub fn set_ents(&mut self, ents: Vec<Span>) {
        self.ents = ents;
    }

    /// Maps the character range `[start, end)` onto token boundaries.
    ///
    /// Returns `None` when the range is empty, out of bounds, or cannot be
    /// aligned under `mode`.
    ///
    /// # Examples
    /// ```
    /// use nerbin_core::pipeline::{Language, Tokenizer};
    /// use nerbin_core::types::AlignmentMode;
    ///
    /// let doc = Tokenizer::new(Language::English)
    ///     .unwrap()
    ///     .tokenize("what is the price of polo?");
    /// let span = doc.char_span(21, 25, "PrdName", AlignmentMode::Strict).unwrap();
    /// assert_eq!(doc.span_text(&span).as_deref(), Some("polo"));
    /// assert!(doc.char_span(21, 23, "PrdName", AlignmentMode::Strict).is_none());
    /// ```
    pub fn char_span(
        &self,
        start: usize,
        end: usize,
        label: &str,
        mode: AlignmentMode,
    ) -> Option<Span> {
        if start >= end || end > self.char_len() {
            return None;
        }

        let (first, last) = match mode {
            AlignmentMode::Strict => (
                self.tokens.binary_search_by_key(&start, |t| t.start).ok()?,
                self.tokens.binary_search_by_key(&end, |t| t.end).ok()?,
            ),
            AlignmentMode::Contract => (
                self.tokens.iter().position(|t| t.start >= start)?,
                self.tokens.iter().rposition(|t| t.end <= end)?,
            ),
            AlignmentMode::Expand => (
                self.tokens.iter().position(|t| t.end > start)?,
                self.tokens.iter().rposition(|t| t.start < end)?,
            ),
        };

        (first <= last).then(|| Span::new(first, last + 1, label))
    }

    /// Character range `[start, end)` covered by a span.
    pub fn span_chars(&self, span: &Span) -> Option<(usize, usize)> {
        if span.is_empty() {
            return None;
        }
        let first = self.tokens.get(span.start)?;
        let last = self.tokens.get(span.end - 1)?;
        Some((first.start, last.end))
    }

    /// Text covered by a span, without the last token's trailing space.
    pub fn span_text(&self, span: &Span) -> Option<String> {
        self.span_chars(span)
            .map(|(start, end)| self.char_slice(start, end))
    }

    /// Characters `[start, end)` of the text, clamped to its bounds.
    pub fn char_slice(&self, start: usize, end: usize) -> String {
        self.text
            .chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect()
    }
}

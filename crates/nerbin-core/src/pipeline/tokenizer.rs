//! # Blank Pipeline Tokenizer
//!
//! Splits raw text into word- and punctuation-level tokens using only the
//! generic rules of a language: whitespace splitting, special cases, affix
//! stripping and infix splitting. There is no learned vocabulary, so the
//! output depends only on the input text and the language.

use std::collections::HashMap;

use tracing::trace;

use crate::error::Result;
use crate::pipeline::language::Language;
use crate::pipeline::punctuation::AffixRules;
use crate::types::Doc;

/// Tokenizer for a blank language pipeline.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    language: Language,
    rules: AffixRules,
    special_cases: HashMap<String, Vec<String>>,
}

impl Tokenizer {
    /// Create a tokenizer for the given language.
    ///
    /// # Errors
    ///
    /// Returns `NerbinError::RegexError` if the affix patterns fail to compile.
    pub fn new(language: Language) -> Result<Self> {
        let mut special_cases = HashMap::new();
        let tables = Language::base_special_cases()
            .iter()
            .chain(language.special_cases());

        for (chunk, pieces) in tables {
            let pieces: Vec<String> = pieces.iter().map(|p| p.to_string()).collect();
            special_cases.insert(chunk.to_string(), pieces.clone());

            if chunk.chars().any(char::is_lowercase) {
                let mut capitalized = pieces.clone();
                capitalized[0] = capitalize(&capitalized[0]);
                special_cases
                    .entry(capitalize(chunk))
                    .or_insert(capitalized);

                let upper: Vec<String> = pieces.iter().map(|p| p.to_uppercase()).collect();
                special_cases.entry(chunk.to_uppercase()).or_insert(upper);
            }
        }

        Ok(Self {
            language,
            rules: AffixRules::new()?,
            special_cases,
        })
    }

    /// Create a tokenizer from a language code such as `"en"`.
    ///
    /// # Errors
    ///
    /// Returns `NerbinError::UnsupportedLanguage` for unknown codes.
    pub fn from_code(code: &str) -> Result<Self> {
        Self::new(Language::from_code(code)?)
    }

    /// The language this tokenizer was built for.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Tokenize text into a document with no entities.
    ///
    /// # Examples
    /// ```
    /// use nerbin_core::pipeline::{Language, Tokenizer};
    ///
    /// let tokenizer = Tokenizer::new(Language::English).unwrap();
    /// let doc = tokenizer.tokenize("what is the price of polo?");
    /// let texts: Vec<_> = doc.tokens().iter().map(|t| t.text.as_str()).collect();
    /// assert_eq!(texts, ["what", "is", "the", "price", "of", "polo", "?"]);
    /// ```
    pub fn tokenize(&self, text: &str) -> Doc {
        let mut words: Vec<&str> = Vec::new();
        let mut spaces: Vec<bool> = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            let rest = &text[pos..];
            let is_ws = rest.chars().next().is_some_and(char::is_whitespace);
            let run_len = rest
                .char_indices()
                .find(|(_, c)| c.is_whitespace() != is_ws)
                .map_or(rest.len(), |(i, _)| i);
            let run = &rest[..run_len];
            pos += run_len;

            if !is_ws {
                let pieces = self.split_chunk(run);
                spaces.extend(std::iter::repeat_n(false, pieces.len()));
                words.extend(pieces);
                continue;
            }

            // A single space after a token is that token's trailing whitespace.
            let mut run = run;
            if run.starts_with(' ') {
                if let Some(last) = spaces.last_mut() {
                    *last = true;
                    run = &run[1..];
                }
            }
            if !run.is_empty() {
                words.push(run);
                spaces.push(false);
            }
        }

        trace!(tokens = words.len(), "tokenized text");
        Doc::from_parts(text, &words, &spaces)
    }

    /// Split one whitespace-free chunk into consecutive token slices.
    fn split_chunk<'a>(&self, chunk: &'a str) -> Vec<&'a str> {
        let elisions = self.language.elisions();
        let mut prefixes = Vec::new();
        let mut suffixes = Vec::new();
        let mut core = chunk;
        let mut special = None;

        loop {
            if let Some(pieces) = self.special_cases.get(core) {
                special = Some(pieces);
                break;
            }
            if let Some(n) = self.rules.prefix_len(core, elisions) {
                prefixes.push(&core[..n]);
                core = &core[n..];
                continue;
            }
            if let Some(n) = self.rules.suffix_len(core) {
                let split = core.len() - n;
                suffixes.push(&core[split..]);
                core = &core[..split];
                continue;
            }
            break;
        }

        let mut out = prefixes;
        if let Some(pieces) = special {
            let mut offset = 0;
            for piece in pieces {
                out.push(&core[offset..offset + piece.len()]);
                offset += piece.len();
            }
        } else if self.rules.is_url(core) {
            out.push(core);
        } else {
            let mut last = 0;
            for (start, end) in self.rules.infixes(core) {
                if start > last {
                    out.push(&core[last..start]);
                }
                out.push(&core[start..end]);
                last = end;
            }
            if last < core.len() {
                out.push(&core[last..]);
            }
        }
        out.extend(suffixes.into_iter().rev());
        out
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> Tokenizer {
        Tokenizer::new(Language::English).unwrap()
    }

    fn texts(tokenizer: &Tokenizer, input: &str) -> Vec<String> {
        tokenizer
            .tokenize(input)
            .words()
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_tokenize_basic() {
        let doc = en().tokenize("what is the price of polo?");
        let tokens = doc.tokens();

        assert_eq!(
            doc.words(),
            ["what", "is", "the", "price", "of", "polo", "?"]
        );
        assert_eq!(tokens[5].start, 21);
        assert_eq!(tokens[5].end, 25);
        assert!(tokens[4].whitespace);
        assert!(!tokens[5].whitespace);
        assert_eq!(tokens[6].index, 6);
    }

    #[test]
    fn test_tokenize_hyphenated_word() {
        assert_eq!(
            texts(&en(), "what is the price of t-shirt?"),
            ["what", "is", "the", "price", "of", "t", "-", "shirt", "?"]
        );
    }

    #[test]
    fn test_tokenize_contractions() {
        assert_eq!(texts(&en(), "I don't know"), ["I", "do", "n't", "know"]);
        assert_eq!(texts(&en(), "Don't!"), ["Do", "n't", "!"]);
        assert_eq!(texts(&en(), "John's bag"), ["John", "'s", "bag"]);
    }

    #[test]
    fn test_tokenize_abbreviations_and_urls() {
        assert_eq!(
            texts(&en(), "Mr. Smith visited youtube.com."),
            ["Mr.", "Smith", "visited", "youtube.com", "."]
        );
        assert_eq!(texts(&en(), "(e.g. this)"), ["(", "e.g.", "this", ")"]);
    }

    #[test]
    fn test_tokenize_extra_whitespace() {
        let doc = en().tokenize("a  b\nc ");
        assert_eq!(doc.words(), ["a", " ", "b", "\n", "c"]);
        assert!(doc.tokens()[0].whitespace);
        assert!(!doc.tokens()[1].whitespace);
        assert!(doc.tokens()[4].whitespace);
        assert!(doc.tokens()[1].is_space());
    }

    #[test]
    fn test_tokenize_leading_whitespace() {
        let doc = en().tokenize("  hi");
        assert_eq!(doc.words(), ["  ", "hi"]);
        assert_eq!(doc.tokens()[1].start, 2);
    }

    #[test]
    fn test_tokenize_empty() {
        let doc = en().tokenize("");
        assert!(doc.is_empty());
        assert_eq!(doc.text(), "");
    }

    #[test]
    fn test_tokenize_round_trips_text() {
        let tokenizer = en();
        let inputs = [
            "My favourite website is youtube",
            "  spaced   out\ttext \n",
            "\"Quoted,\" she said... (twice)!",
            "Prices: $5, 10kg, 50% off -- now/later",
            "naïve café — “smart quotes”",
        ];
        for input in inputs {
            let doc = tokenizer.tokenize(input);
            let rebuilt: String = doc
                .tokens()
                .iter()
                .map(|t| format!("{}{}", t.text, if t.whitespace { " " } else { "" }))
                .collect();
            assert_eq!(rebuilt, input);

            let mut prev_end = 0;
            for token in doc.tokens() {
                assert!(token.start >= prev_end);
                assert!(token.end > token.start);
                prev_end = token.end;
            }
        }
    }

    #[test]
    fn test_tokenize_unicode_offsets_are_chars() {
        let doc = en().tokenize("café polo");
        assert_eq!(doc.tokens()[1].start, 5);
        assert_eq!(doc.tokens()[1].end, 9);
    }

    #[test]
    fn test_french_elision() {
        let fr = Tokenizer::new(Language::French).unwrap();
        assert_eq!(texts(&fr, "l'homme"), ["l'", "homme"]);
        assert_eq!(texts(&en(), "l'homme"), ["l'homme"]);
    }

    #[test]
    fn test_german_abbreviation() {
        let de = Tokenizer::from_code("de").unwrap();
        assert_eq!(texts(&de, "z.B. heute"), ["z.B.", "heute"]);
    }

    #[test]
    fn test_deterministic() {
        let a = en().tokenize("what is the price of jegging?");
        let b = en().tokenize("what is the price of jegging?");
        assert_eq!(a, b);
    }
}

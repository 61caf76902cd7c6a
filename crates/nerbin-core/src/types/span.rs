use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A labeled run of tokens `[start, end)` within a [`Doc`](super::Doc).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Index of the first token.
    pub start: usize,
    /// Index one past the last token.
    pub end: usize,
    /// Entity label, e.g. `"PrdName"`.
    pub label: String,
}

impl Span {
    /// Creates a new span over tokens `[start, end)`.
    #[must_use]
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// Number of tokens covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the span covers no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the two spans share at least one token.
    #[must_use]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}) {}", self.start, self.end, self.label)
    }
}

/// How character offsets that fall inside tokens are snapped to token boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentMode {
    /// Both offsets must sit exactly on token boundaries.
    #[default]
    Strict,
    /// Keep only tokens fully inside the character range.
    Contract,
    /// Keep every token that overlaps the character range.
    Expand,
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Contract => write!(f, "contract"),
            Self::Expand => write!(f, "expand"),
        }
    }
}

impl FromStr for AlignmentMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "contract" => Ok(Self::Contract),
            "expand" => Ok(Self::Expand),
            other => Err(format!(
                "unknown alignment mode {other:?} (expected strict, contract or expand)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_len_and_overlap() {
        let a = Span::new(2, 5, "ORG");
        let b = Span::new(4, 6, "LOC");
        let c = Span::new(5, 6, "LOC");
        assert_eq!(a.len(), 3);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(Span::new(3, 3, "X").is_empty());
    }

    #[test]
    fn alignment_mode_parse_and_display() {
        for mode in [AlignmentMode::Strict, AlignmentMode::Contract, AlignmentMode::Expand] {
            assert_eq!(mode.to_string().parse::<AlignmentMode>().unwrap(), mode);
        }
        assert_eq!("EXPAND".parse::<AlignmentMode>().unwrap(), AlignmentMode::Expand);
        assert!("loose".parse::<AlignmentMode>().is_err());
        assert_eq!(AlignmentMode::default(), AlignmentMode::Strict);
    }

    #[test]
    fn alignment_mode_serializes_lowercase() {
        let json = serde_json::to_string(&AlignmentMode::Contract).unwrap();
        assert_eq!(json, "\"contract\"");
    }
}

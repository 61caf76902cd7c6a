use nerbin_core::pipeline::Language;
use nerbin_core::types::AlignmentMode;

/// Configuration for the corpus builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Language of the blank pipeline used to tokenize examples
    pub language: Language,
    /// How entity offsets are snapped to token boundaries
    pub alignment_mode: AlignmentMode,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            language: Language::English,
            alignment_mode: AlignmentMode::Strict,
        }
    }
}

impl BuilderConfig {
    /// Create a new builder configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pipeline language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Set the alignment mode.
    pub fn with_alignment_mode(mut self, mode: AlignmentMode) -> Self {
        self.alignment_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuilderConfig::new();
        assert_eq!(config.language, Language::English);
        assert_eq!(config.alignment_mode, AlignmentMode::Strict);
    }

    #[test]
    fn test_builder_methods() {
        let config = BuilderConfig::new()
            .with_language(Language::German)
            .with_alignment_mode(AlignmentMode::Expand);
        assert_eq!(config.language, Language::German);
        assert_eq!(config.alignment_mode, AlignmentMode::Expand);
    }
}

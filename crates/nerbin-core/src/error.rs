use thiserror::Error;

/// Errors that can occur during nerbin core operations.
#[derive(Debug, Error)]
pub enum NerbinError {
    /// No blank pipeline exists for the requested language code.
    #[error("unsupported language code: {0:?}")]
    UnsupportedLanguage(String),

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// Reading or writing a document store failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document store payload could not be encoded.
    #[error("failed to encode document store: {0}")]
    Encode(String),

    /// The document store payload could not be decoded.
    #[error("failed to decode document store: {0}")]
    Decode(String),

    /// The document store decoded but its contents are inconsistent.
    #[error("corrupt document store: {0}")]
    CorruptStore(String),

    /// A training dataset could not be parsed.
    #[error("invalid dataset: {0}")]
    Dataset(String),
}

/// Result type alias for nerbin operations.
pub type Result<T> = std::result::Result<T, NerbinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = NerbinError::UnsupportedLanguage("tlh".into());
        assert_eq!(err.to_string(), "unsupported language code: \"tlh\"");

        let err = NerbinError::CorruptStore("string id 7 out of range".into());
        assert!(err.to_string().contains("string id 7"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: NerbinError = io.into();
        assert!(matches!(err, NerbinError::Io(_)));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NerbinError>();
    }
}

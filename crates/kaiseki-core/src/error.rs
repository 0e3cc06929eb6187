use std::path::PathBuf;

/// Failure reported by a tokenizer backend
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TokenizeError(pub String);

/// Fatal analysis failures. None of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Unsupported file extension: {0}")]
    UnsupportedFormat(String),

    #[error("Reference data unavailable at {}: {source}", path.display())]
    MissingReferenceData {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Tokenizer failed on {sentence:?}: {source}")]
    TokenizerFailure {
        sentence: String,
        #[source]
        source: TokenizeError,
    },

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            AnalysisError::UnsupportedFormat(_) => 2,
            AnalysisError::MissingReferenceData { .. } => 3,
            AnalysisError::TokenizerFailure { .. } => 4,
            AnalysisError::Extraction(_) | AnalysisError::Io(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let unsupported = AnalysisError::UnsupportedFormat(".pdf".into());
        let missing = AnalysisError::MissingReferenceData {
            path: PathBuf::from("data/vocab_freq.csv"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let tokenizer = AnalysisError::TokenizerFailure {
            sentence: "猫".into(),
            source: TokenizeError("boom".into()),
        };

        assert_eq!(unsupported.exit_code(), 2);
        assert_eq!(missing.exit_code(), 3);
        assert_eq!(tokenizer.exit_code(), 4);
    }

    #[test]
    fn test_missing_reference_message_names_path() {
        let err = AnalysisError::MissingReferenceData {
            path: PathBuf::from("data/kanji_freq.csv"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("data/kanji_freq.csv"));
    }
}

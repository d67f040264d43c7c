//! Error handling for the resume analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Lexicon or config data is malformed. Raised while building a
    /// [`Lexicon`](crate::processing::lexicon::Lexicon), never mid-analysis.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The NLP capability failed or is unavailable. Callers may retry.
    #[error("NLP adapter error: {0}")]
    Adapter(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl ResumeAnalyzerError {
    /// Only adapter failures are transient; everything else fails the same way twice.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ResumeAnalyzerError::Adapter(_))
    }
}

pub type Result<T> = std::result::Result<T, ResumeAnalyzerError>;

/// Embedding backends report `anyhow` errors
impl From<anyhow::Error> for ResumeAnalyzerError {
    fn from(err: anyhow::Error) -> Self {
        ResumeAnalyzerError::Adapter(err.to_string())
    }
}

impl From<toml::de::Error> for ResumeAnalyzerError {
    fn from(err: toml::de::Error) -> Self {
        ResumeAnalyzerError::Configuration(format!("Failed to parse config: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_adapter_errors_are_retryable() {
        assert!(ResumeAnalyzerError::Adapter("model offline".into()).is_retryable());
        assert!(!ResumeAnalyzerError::Configuration("bad regex".into()).is_retryable());
        assert!(!ResumeAnalyzerError::InvalidInput("empty".into()).is_retryable());
    }

    #[test]
    fn test_anyhow_maps_to_adapter() {
        let err: ResumeAnalyzerError = anyhow::anyhow!("tokenizer.json missing").into();
        assert!(matches!(err, ResumeAnalyzerError::Adapter(ref m) if m.contains("tokenizer.json")));
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizerError {
    /// Caller input was malformed (empty text, unknown level).
    #[error("{0}")]
    Validation(String),

    /// Tokenization, generation or decoding failed.
    #[error("{0}")]
    Generation(String),

    /// Startup settings were missing or unparsable.
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to fetch model artifact: {0}")]
    Artifact(String),

    #[error("Failed to send HTTP request: {0}")]
    Http(String),
}

impl SummarizerError {
    pub fn empty_text() -> Self {
        SummarizerError::Validation("empty text".to_string())
    }

    pub fn invalid_level() -> Self {
        SummarizerError::Validation("invalid level".to_string())
    }

    pub fn tokenization(cause: impl std::fmt::Display) -> Self {
        SummarizerError::Generation(format!("tokenization failed: {cause:#}"))
    }

    pub fn generation(cause: impl std::fmt::Display) -> Self {
        SummarizerError::Generation(format!("generation failed: {cause:#}"))
    }

    /// HTTP status the transport layer reports for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            SummarizerError::Validation(_) => 400,
            _ => 500,
        }
    }
}

impl From<reqwest::Error> for SummarizerError {
    fn from(error: reqwest::Error) -> Self {
        SummarizerError::Http(error.to_string())
    }
}

impl From<std::io::Error> for SummarizerError {
    fn from(error: std::io::Error) -> Self {
        SummarizerError::Artifact(error.to_string())
    }
}

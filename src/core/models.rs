use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SummarizerError;

/// Token ids as produced by the tokenizer and consumed by the generator.
pub type TokenSequence = Vec<u32>;

/// Requested summary detail level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Shortest,
    Normal,
    Elaborative,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Shortest, Level::Normal, Level::Elaborative];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Shortest => "shortest",
            Level::Normal => "normal",
            Level::Elaborative => "elaborative",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = SummarizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shortest" => Ok(Level::Shortest),
            "normal" => Ok(Level::Normal),
            "elaborative" => Ok(Level::Elaborative),
            _ => Err(SummarizerError::invalid_level()),
        }
    }
}

/// Incoming request. `level` stays raw until the orchestrator validates it,
/// so an unknown value is reported as a validation failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizationRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub level: String,
}

impl SummarizationRequest {
    pub fn new(text: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: level.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizationResponse {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

impl SummarizationResponse {
    pub fn generated(summary: String) -> Self {
        Self {
            summary,
            message: None,
        }
    }

    pub fn unchanged(text: String, message: &str) -> Self {
        Self {
            summary: text,
            message: Some(message.to_string()),
        }
    }
}

/// Decoding parameters derived per request from the encoded length and level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationPlan {
    pub min_length: usize,
    pub max_length: usize,
    pub num_beams: usize,
    pub length_penalty: f32,
}

/// Decoding policies applied to every generation regardless of level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationPolicy {
    pub no_repeat_ngram_size: usize,
    pub early_stopping: bool,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            no_repeat_ngram_size: 3,
            early_stopping: true,
        }
    }
}

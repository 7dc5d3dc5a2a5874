use std::sync::Arc;
use tracing::{debug, info};

use super::config::{AppConfig, DEFAULT_MAX_INPUT_TOKENS, DEFAULT_MIN_WORDS, MIN_INPUT_TOKENS};
use super::models::{GenerationPolicy, Level, SummarizationRequest, SummarizationResponse};
use super::planner;
use crate::errors::SummarizerError;
use crate::model::{Generator, TextTokenizer};

/// Returned in place of a summary when the input is too short to condense.
pub const NOT_MUCH_TO_SUMMARIZE: &str = "Not much to summarize in this email.";

/// Validates requests, plans decoding and drives the model.
///
/// The tokenizer and generator are shared read-only; per-request data
/// (encoded length, plan) lives on the stack of `summarize`.
pub struct Summarizer<T: ?Sized, G: ?Sized> {
    tokenizer: Arc<T>,
    generator: Arc<G>,
    policy: GenerationPolicy,
    max_input_tokens: usize,
    min_words: usize,
}

impl<T: ?Sized, G: ?Sized> Clone for Summarizer<T, G> {
    fn clone(&self) -> Self {
        Self {
            tokenizer: Arc::clone(&self.tokenizer),
            generator: Arc::clone(&self.generator),
            policy: self.policy,
            max_input_tokens: self.max_input_tokens,
            min_words: self.min_words,
        }
    }
}

impl<T, G> Summarizer<T, G>
where
    T: TextTokenizer + ?Sized,
    G: Generator + ?Sized,
{
    pub fn new(tokenizer: Arc<T>, generator: Arc<G>) -> Self {
        Self {
            tokenizer,
            generator,
            policy: GenerationPolicy::default(),
            max_input_tokens: DEFAULT_MAX_INPUT_TOKENS,
            min_words: DEFAULT_MIN_WORDS,
        }
    }

    pub fn from_config(tokenizer: Arc<T>, generator: Arc<G>, config: &AppConfig) -> Self {
        Self::new(tokenizer, generator)
            .with_policy(config.policy)
            .with_max_input_tokens(config.max_input_tokens)
            .with_min_words(config.min_words)
    }

    #[must_use]
    pub fn with_policy(mut self, policy: GenerationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the encoded-length cap. Values below `MIN_INPUT_TOKENS` are
    /// raised to it.
    #[must_use]
    pub fn with_max_input_tokens(mut self, max_input_tokens: usize) -> Self {
        self.max_input_tokens = max_input_tokens.max(MIN_INPUT_TOKENS);
        self
    }

    #[must_use]
    pub fn with_min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    /// Summarizes `request.text` at `request.level`.
    ///
    /// # Errors
    ///
    /// `SummarizerError::Validation` for empty text or an unknown level,
    /// `SummarizerError::Generation` when tokenization, generation or
    /// decoding fails. Nothing is retried.
    pub async fn summarize(
        &self,
        request: &SummarizationRequest,
    ) -> Result<SummarizationResponse, SummarizerError> {
        let text = request.text.as_str();
        if text.trim().is_empty() {
            return Err(SummarizerError::empty_text());
        }
        let level: Level = request.level.parse()?;

        let word_count = text.split_whitespace().count();
        if word_count < self.min_words {
            info!(word_count, %level, "Input below summarization threshold");
            return Ok(SummarizationResponse::unchanged(
                text.to_string(),
                NOT_MUCH_TO_SUMMARIZE,
            ));
        }

        let tokens = self
            .tokenizer
            .encode(text, self.max_input_tokens)
            .map_err(SummarizerError::tokenization)?;

        let plan = planner::plan(tokens.len(), level);
        info!(
            %level,
            word_count,
            encoded_length = tokens.len(),
            min_length = plan.min_length,
            max_length = plan.max_length,
            num_beams = plan.num_beams,
            length_penalty = plan.length_penalty,
            "Planned generation"
        );

        let output = self
            .generator
            .generate(&tokens, &plan, &self.policy)
            .await
            .map_err(SummarizerError::generation)?;

        let summary = self
            .tokenizer
            .decode(&output, true)
            .map_err(SummarizerError::generation)?;
        debug!(summary_chars = summary.chars().count(), "Decoded summary");

        Ok(SummarizationResponse::generated(summary))
    }
}

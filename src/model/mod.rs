//! Seams to the pretrained model: tokenization and beam-search generation.
//!
//! Both are loaded once at startup and shared read-only across requests.

pub mod generator;
pub mod tokenizer;

use async_trait::async_trait;

use crate::core::models::{GenerationPlan, GenerationPolicy, TokenSequence};

pub use generator::HttpGenerator;
pub use tokenizer::BartTokenizer;

pub trait TextTokenizer: Send + Sync {
    /// Encodes `text`, truncating to at most `max_tokens` ids including
    /// the sequence markers.
    fn encode(&self, text: &str, max_tokens: usize) -> anyhow::Result<TokenSequence>;

    fn decode(&self, tokens: &[u32], skip_special_tokens: bool) -> anyhow::Result<String>;
}

#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        tokens: &[u32],
        plan: &GenerationPlan,
        policy: &GenerationPolicy,
    ) -> anyhow::Result<TokenSequence>;
}

//! Beam-search generation delegated to a remote inference backend.
//!
//! The backend receives the encoder input ids together with the decoding
//! parameters and answers with the generated ids.

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use super::Generator;
use crate::core::models::{GenerationPlan, GenerationPolicy, TokenSequence};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    input_ids: &'a [u32],
    min_length: usize,
    max_length: usize,
    num_beams: usize,
    length_penalty: f32,
    no_repeat_ngram_size: usize,
    early_stopping: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    sequences: Vec<Vec<u32>>,
    #[serde(default)]
    output_ids: Option<Vec<u32>>,
}

impl GenerateResponse {
    fn into_first_sequence(self) -> Option<TokenSequence> {
        self.sequences
            .into_iter()
            .next()
            .or(self.output_ids)
            .filter(|ids| !ids.is_empty())
    }
}

pub struct HttpGenerator {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpGenerator {
    pub fn new(endpoint: String, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl Generator for HttpGenerator {
    async fn generate(
        &self,
        tokens: &[u32],
        plan: &GenerationPlan,
        policy: &GenerationPolicy,
    ) -> Result<TokenSequence> {
        let body = GenerateRequest {
            input_ids: tokens,
            min_length: plan.min_length,
            max_length: plan.max_length,
            num_beams: plan.num_beams,
            length_penalty: plan.length_penalty,
            no_repeat_ngram_size: policy.no_repeat_ngram_size,
            early_stopping: policy.early_stopping,
        };

        #[cfg(feature = "debug-logs")]
        info!("Generation request: {:?}", body);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            input_tokens = tokens.len(),
            num_beams = plan.num_beams,
            "Sending generation request"
        );

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| anyhow!("generator request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            bail!("generator returned {status}: {error_text}");
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("failed to parse generator response: {e}"))?;

        let sequence = parsed
            .into_first_sequence()
            .ok_or_else(|| anyhow!("generator returned no sequences"))?;

        info!(output_tokens = sequence.len(), "Generation finished");
        Ok(sequence)
    }
}

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use super::models::GenerationPolicy;

pub const DEFAULT_MODEL_DIR: &str = "saved_model";
pub const DEFAULT_MAX_INPUT_TOKENS: usize = 1024;
/// Smallest input budget: room for `<s>` and `</s>` only.
pub const MIN_INPUT_TOKENS: usize = 2;
pub const DEFAULT_MIN_WORDS: usize = 10;
pub const DEFAULT_GENERATOR_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_dir: PathBuf,
    pub generator_url: String,
    pub generator_api_key: Option<String>,
    pub generator_timeout_secs: u64,
    pub artifact_bucket: Option<String>,
    pub gcs_access_token: Option<String>,
    pub max_input_tokens: usize,
    pub min_words: usize,
    pub policy: GenerationPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = GenerationPolicy::default();

        let generator_url =
            env::var("GENERATOR_URL").map_err(|e| format!("GENERATOR_URL: {}", e))?;
        url::Url::parse(&generator_url).map_err(|e| format!("GENERATOR_URL: {}", e))?;

        let max_input_tokens = parse_var("MAX_INPUT_TOKENS", DEFAULT_MAX_INPUT_TOKENS)?;
        if max_input_tokens < MIN_INPUT_TOKENS {
            return Err("MAX_INPUT_TOKENS: must leave room for <s> and </s>".to_string());
        }

        Ok(Self {
            model_dir: env::var("MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_DIR)),
            generator_url,
            generator_api_key: non_empty_var("GENERATOR_API_KEY"),
            generator_timeout_secs: parse_var(
                "GENERATOR_TIMEOUT_SECS",
                DEFAULT_GENERATOR_TIMEOUT_SECS,
            )?,
            artifact_bucket: non_empty_var("ARTIFACT_BUCKET"),
            gcs_access_token: non_empty_var("GCS_ACCESS_TOKEN"),
            max_input_tokens,
            min_words: parse_var("MIN_WORDS", DEFAULT_MIN_WORDS)?,
            policy: GenerationPolicy {
                no_repeat_ngram_size: parse_var(
                    "NO_REPEAT_NGRAM_SIZE",
                    defaults.no_repeat_ngram_size,
                )?,
                early_stopping: parse_var("EARLY_STOPPING", defaults.early_stopping)?,
            },
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(name: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty_var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("{}: {}", name, e)),
        None => Ok(default),
    }
}

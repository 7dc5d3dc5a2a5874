use brevity::artifacts::ensure_artifacts;
use brevity::core::config::AppConfig;
use brevity::model::{BartTokenizer, Generator, HttpGenerator, TextTokenizer};
use brevity::{Summarizer, SummarizerError, api};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    brevity::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        SummarizerError::Config(e)
    })?;

    ensure_artifacts(&config).await?;

    let tokenizer: Arc<dyn TextTokenizer> = Arc::new(
        BartTokenizer::from_dir(&config.model_dir)
            .map_err(|e| Error::from(format!("Failed to load tokenizer: {e:#}")))?,
    );
    let generator: Arc<dyn Generator> = Arc::new(
        HttpGenerator::new(
            config.generator_url.clone(),
            config.generator_api_key.clone(),
            Duration::from_secs(config.generator_timeout_secs),
        )
        .map_err(|e| Error::from(format!("Failed to initialize generator: {e:#}")))?,
    );

    let summarizer = Summarizer::from_config(tokenizer, generator, &config);
    info!(model_dir = %config.model_dir.display(), "Model loaded, serving requests");

    let summarizer = &summarizer;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        api::handler(summarizer, event).await
    }))
    .await
}

// Downloads the model artifacts into MODEL_DIR ahead of deployment.

use brevity::SummarizerError;
use brevity::artifacts::{GcsStore, MODEL_FILES, fetch_artifacts};
use std::env;
use std::path::PathBuf;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    brevity::setup_logging();

    let bucket = env::var("ARTIFACT_BUCKET").map_err(|e| {
        error!("ARTIFACT_BUCKET: {}", e);
        SummarizerError::Config(format!("ARTIFACT_BUCKET: {e}"))
    })?;
    let model_dir = env::var("MODEL_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(brevity::core::config::DEFAULT_MODEL_DIR));
    let token = env::var("GCS_ACCESS_TOKEN").ok().filter(|t| !t.is_empty());

    info!(bucket = %bucket, model_dir = %model_dir.display(), "Fetching model artifacts");
    let store = GcsStore::new(bucket, token);
    fetch_artifacts(&store, &MODEL_FILES, &model_dir).await?;

    Ok(())
}

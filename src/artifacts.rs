//! One-time download of model artifacts from object storage.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{error, info};

use crate::core::config::AppConfig;
use crate::errors::SummarizerError;

/// Files the tokenizer and generator need in the model directory.
pub const MODEL_FILES: [&str; 7] = [
    "config.json",
    "generation_config.json",
    "merges.txt",
    "model.safetensors",
    "special_tokens_map.json",
    "tokenizer_config.json",
    "vocab.json",
];

const GCS_API_BASE: &str = "https://storage.googleapis.com/storage/v1";

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Writes object `name` to `dest`, replacing any existing file.
    /// Returns the number of bytes written.
    async fn download(&self, name: &str, dest: &Path) -> Result<u64, SummarizerError>;
}

/// Google Cloud Storage bucket read through the JSON API.
pub struct GcsStore {
    client: Client,
    bucket: String,
    access_token: Option<String>,
    base_url: String,
}

impl GcsStore {
    pub fn new(bucket: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            bucket: bucket.into(),
            access_token,
            base_url: GCS_API_BASE.to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn object_url(&self, name: &str) -> String {
        format!(
            "{}/b/{}/o/{}?alt=media",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.bucket),
            urlencoding::encode(name)
        )
    }
}

#[async_trait]
impl ArtifactStore for GcsStore {
    async fn download(&self, name: &str, dest: &Path) -> Result<u64, SummarizerError> {
        let mut request = self.client.get(self.object_url(name));
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SummarizerError::Artifact(format!(
                "gs://{}/{}: {} {}",
                self.bucket, name, status, error_text
            )));
        }

        // Stream into a sibling file so an interrupted body never leaves a
        // truncated artifact under the final name.
        let part = partial_path(dest);
        match stream_to_file(response, &part).await {
            Ok(written) => {
                tokio::fs::rename(&part, dest).await?;
                Ok(written)
            }
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(&part).await {
                    error!("Failed to remove {}: {}", part.display(), cleanup);
                }
                Err(e)
            }
        }
    }
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(OsString::from).unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}

async fn stream_to_file(response: reqwest::Response, path: &Path) -> Result<u64, SummarizerError> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut written = 0u64;
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

/// Downloads `files` from `store` into `dir`, creating `dir` if needed.
///
/// Existing files are overwritten. Stops at the first failure.
pub async fn fetch_artifacts(
    store: &dyn ArtifactStore,
    files: &[&str],
    dir: &Path,
) -> Result<(), SummarizerError> {
    tokio::fs::create_dir_all(dir).await?;

    for name in files {
        let dest = dir.join(name);
        info!("Downloading {} to {}", name, dest.display());
        let bytes = store.download(name, &dest).await.map_err(|e| {
            error!("Failed to download {}: {}", name, e);
            e
        })?;
        info!(file = %name, bytes, "Downloaded artifact");
    }

    info!("Model files downloaded successfully");
    Ok(())
}

/// Names from `files` with no regular file under `dir`.
#[must_use]
pub fn missing_artifacts<'a>(files: &[&'a str], dir: &Path) -> Vec<&'a str> {
    files
        .iter()
        .copied()
        .filter(|name| !dir.join(name).is_file())
        .collect()
}

/// Fetches the model files at startup when a bucket is configured and any
/// of them is missing locally.
pub async fn ensure_artifacts(config: &AppConfig) -> Result<(), SummarizerError> {
    let missing = missing_artifacts(&MODEL_FILES, &config.model_dir);
    if missing.is_empty() {
        return Ok(());
    }

    let Some(bucket) = &config.artifact_bucket else {
        info!(
            ?missing,
            "Model files missing and ARTIFACT_BUCKET not set; relying on local files"
        );
        return Ok(());
    };

    let store = GcsStore::new(bucket.clone(), config.gcs_access_token.clone());
    fetch_artifacts(&store, &MODEL_FILES, &config.model_dir).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_url_encodes_names() {
        let store = GcsStore::new("summarizer-model-safetensors", None);
        assert_eq!(
            store.object_url("model.safetensors"),
            "https://storage.googleapis.com/storage/v1/b/summarizer-model-safetensors/o/model.safetensors?alt=media"
        );
        assert!(store.object_url("dir/vocab.json").contains("/o/dir%2Fvocab.json?"));
    }

    #[test]
    fn partial_path_keeps_full_file_name() {
        assert_eq!(
            partial_path(Path::new("/m/model.safetensors")),
            PathBuf::from("/m/model.safetensors.part")
        );
        assert_eq!(
            partial_path(Path::new("vocab.json")),
            PathBuf::from("vocab.json.part")
        );
    }

    #[test]
    fn object_url_respects_custom_base() {
        let store = GcsStore::new("b", None).with_base_url("http://localhost:4443/storage/v1/");
        assert_eq!(
            store.object_url("x"),
            "http://localhost:4443/storage/v1/b/b/o/x?alt=media"
        );
    }
}

//! Brevity - an email summarization API backed by a pretrained BART model.
//!
//! A request carries a text and a detail level (`shortest`, `normal` or
//! `elaborative`). The level and the encoded input length decide the
//! decoding parameters handed to the model's beam search.
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda (API Gateway proxy events) for the HTTP endpoint
//! - the `tokenizers` crate for BART byte-level BPE
//! - a remote inference backend for beam-search generation
//! - Google Cloud Storage for the one-time model artifact download
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use std::time::Duration;
//! use brevity::core::models::SummarizationRequest;
//! use brevity::core::summarize::Summarizer;
//! use brevity::model::{BartTokenizer, HttpGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     brevity::setup_logging();
//!
//!     let tokenizer = BartTokenizer::from_dir(Path::new("saved_model"))?;
//!     let generator = HttpGenerator::new(
//!         "http://localhost:8080/generate".to_string(),
//!         None,
//!         Duration::from_secs(300),
//!     )?;
//!     let summarizer = Summarizer::new(Arc::new(tokenizer), Arc::new(generator));
//!
//!     let request = SummarizationRequest::new(
//!         "Hi team, the quarterly review has moved to Thursday at 3pm. \
//!          Please bring the updated figures and the draft roadmap.",
//!         "shortest",
//!     );
//!     let response = summarizer.summarize(&request).await?;
//!     println!("Summary: {}", response.summary);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod artifacts;
pub mod core;
pub mod errors;
pub mod model;

pub use crate::core::summarize::Summarizer;
pub use errors::SummarizerError;

/// Configure structured JSON logging for AWS Lambda environments.
///
/// Levels come from `RUST_LOG` and default to `info`. Calling this more
/// than once keeps the first subscriber.
///
/// # Example
///
/// ```
/// brevity::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Global subscriber already installed");
    }
}

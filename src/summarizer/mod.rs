mod http;

pub use http::HttpSummarizer;

use crate::config::Config;
use crate::error::SummarizerError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Request body sent to the summarization service
#[derive(Debug, Serialize)]
pub struct SummarizeRequest<'a> {
    pub sentences: &'a [String],
}

/// Response body returned by the summarization service
#[derive(Debug, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Summarize a batch of sentences into a single text
    async fn summarize(&self, sentences: &[String]) -> Result<String, SummarizerError>;
}

/// Create the summarizer configured for this run
pub fn create_summarizer(config: &Config) -> Result<Arc<dyn Summarizer>, SummarizerError> {
    let summarizer = HttpSummarizer::new(
        &config.summarizer.endpoint,
        Duration::from_secs(config.summarizer.timeout_sec),
    )?;
    Ok(Arc::new(summarizer))
}

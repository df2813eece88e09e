use super::{SummarizeRequest, SummarizeResponse, Summarizer};
use crate::error::SummarizerError;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::debug;

/// Summarizer backed by the summarization web service
pub struct HttpSummarizer {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpSummarizer {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, SummarizerError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            timeout,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> SummarizerError {
        if err.is_timeout() {
            SummarizerError::Timeout(self.timeout)
        } else {
            SummarizerError::Transport(err)
        }
    }
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn summarize(&self, sentences: &[String]) -> Result<String, SummarizerError> {
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(&SummarizeRequest { sentences })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(SummarizerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SummarizeResponse = serde_json::from_str(&body)
            .map_err(|e| SummarizerError::MalformedResponse(e.to_string()))?;

        debug!(
            "Summarized {} sentences in {:?}",
            sentences.len(),
            start.elapsed()
        );
        Ok(parsed.summary)
    }
}

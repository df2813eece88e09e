use crate::error::SummarizerError;
use crate::parser::split_sentences;
use crate::summarizer::Summarizer;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::timeout as tokio_timeout;
use tracing::{debug, warn};

use super::result::CellKey;

type Unit = JoinHandle<(CellKey, Option<Vec<String>>)>;

/// Summarize one batch of sentences, absorbing any failure.
///
/// The returned summary is split into sentences with the comment segmentation
/// rule. Failures and timeouts are logged and yield `None`.
pub async fn summarize_sentences(
    summarizer: &dyn Summarizer,
    sentences: &[String],
    call_timeout: Duration,
    label: &str,
) -> Option<Vec<String>> {
    let outcome = match tokio_timeout(call_timeout, summarizer.summarize(sentences)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(SummarizerError::Timeout(call_timeout)),
    };

    match outcome {
        Ok(summary) => {
            debug!(
                "Summarized {} ({} sentences) via {}",
                label,
                sentences.len(),
                summarizer.name()
            );
            Some(split_sentences(&summary))
        }
        Err(e) => {
            warn!("Summarization failed for {}: {}", label, e);
            None
        }
    }
}

/// Fans summarization units out onto the runtime and joins them as one batch.
///
/// Each unit targets its own cell. Units still running when the dispatcher is
/// dropped without joining are aborted.
pub(crate) struct Dispatcher {
    summarizer: Arc<dyn Summarizer>,
    semaphore: Arc<Semaphore>,
    call_timeout: Duration,
    units: FuturesUnordered<Unit>,
}

impl Dispatcher {
    pub fn new(
        summarizer: Arc<dyn Summarizer>,
        semaphore: Arc<Semaphore>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            summarizer,
            semaphore,
            call_timeout,
            units: FuturesUnordered::new(),
        }
    }

    /// Spawn a unit for a non-empty batch. Returns false when there was nothing to summarize.
    pub fn dispatch(&mut self, cell: CellKey, label: String, sentences: Vec<String>) -> bool {
        if sentences.is_empty() {
            return false;
        }

        let summarizer = self.summarizer.clone();
        let semaphore = self.semaphore.clone();
        let call_timeout = self.call_timeout;

        self.units.push(tokio::spawn(async move {
            // Acquire inside the unit so dispatching never waits on the pool
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    warn!("Summarization skipped for {}: {}", label, e);
                    return (cell, None);
                }
            };
            let summary =
                summarize_sentences(summarizer.as_ref(), &sentences, call_timeout, &label).await;
            (cell, summary)
        }));
        true
    }

    pub fn pending(&self) -> usize {
        self.units.len()
    }

    /// Wait for every dispatched unit and return the summaries that succeeded
    pub async fn join_all(mut self) -> Vec<(CellKey, Vec<String>)> {
        let mut units = std::mem::take(&mut self.units);
        let mut summaries = Vec::with_capacity(units.len());

        while let Some(result) = units.next().await {
            match result {
                Ok((cell, Some(summary))) => summaries.push((cell, summary)),
                Ok((_, None)) => {}
                Err(e) => {
                    warn!("Summarization task panicked: {}", e);
                }
            }
        }

        summaries
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        for unit in self.units.iter() {
            unit.abort();
        }
    }
}

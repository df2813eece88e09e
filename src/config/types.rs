use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Maximum summarization calls in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    /// Review dataset (YAML or JSON) read by the file-backed store
    #[serde(default = "default_dataset")]
    pub dataset: PathBuf,

    #[serde(default)]
    pub summarizer: SummarizerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct SummarizerConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-call timeout; an expired call counts as a failed summary
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_sec: default_timeout_sec(),
        }
    }
}

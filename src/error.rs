use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("Summarizer timeout must be at least 1 second")]
    ZeroTimeout,

    #[error("Invalid summarizer endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read dataset '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },
}

#[derive(Error, Debug)]
pub enum SummarizerError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Summarizer returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed summarizer response: {0}")]
    MalformedResponse(String),

    #[error("Summarization timed out after {0:?}")]
    Timeout(std::time::Duration),
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Data access failed: {0}")]
    Store(#[from] StoreError),

    #[error("Assignment {assignment_id} has no review questionnaire for round {round}")]
    MissingQuestionnaire { assignment_id: u64, round: usize },

    #[error("Question text '{text}' appears more than once in the rubric for round {round}")]
    DuplicateQuestionText { round: usize, text: String },

    #[error("Team name '{0}' is used by more than one reviewee")]
    DuplicateReviewee(String),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write report: {0}")]
    WriteReport(std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

//! Peer-review aggregation: weighted rubric scores per criterion, round and
//! reviewee, plus comment summaries from an external summarization service.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod rubric;
pub mod score;
pub mod store;
pub mod summarizer;

pub use engine::{Engine, EngineOptions, SummaryResult};

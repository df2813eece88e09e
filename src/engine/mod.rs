mod dispatch;
mod orchestrator;
mod result;


pub use dispatch::summarize_sentences;
pub use orchestrator::{Engine, EngineOptions};
pub use result::{
    QuestionSummary, RevieweeSummary, RoundSummary, SummaryMode, SummaryResult, ALL_REVIEWEES,
};

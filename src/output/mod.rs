mod report;
mod summary;

pub use report::build_markdown;
pub use summary::{write_summary, SummaryReport};

pub mod schema;
pub mod summarize;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "revsum")]
#[command(
    author,
    version,
    about = "Aggregate peer-review scores and summarize reviewer comments"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate scores and summarize comments for an assignment
    Summarize(SummarizeArgs),

    /// Print JSON Schema for config validation
    Schema,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupBy {
    /// One entry per reviewee (student and instructor view)
    Reviewee,
    /// All reviewees merged per question (instructor view)
    Criterion,
}

#[derive(Parser, Clone)]
pub struct SummarizeArgs {
    /// Assignment to summarize
    #[arg(short, long)]
    pub assignment: u64,

    /// How feedback is grouped
    #[arg(long, value_enum, default_value = "reviewee")]
    pub by: GroupBy,

    /// Summarize a single reviewee (team id) across all rounds
    #[arg(long, conflicts_with = "by")]
    pub reviewee: Option<u64>,

    /// Path to config file
    #[arg(short, long, default_value = "revsum.yaml")]
    pub config: PathBuf,

    /// Override review dataset path
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Override summarization service URL
    #[arg(long, env = "REVSUM_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Override max parallel summarization calls
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Override output directory
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Show plan without calling the summarization service
    #[arg(long)]
    pub dry_run: bool,
}

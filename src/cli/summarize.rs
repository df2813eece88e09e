use crate::cli::{GroupBy, SummarizeArgs};
use chrono::Local;
use revsum::config::Config;
use revsum::engine::{Engine, SummaryResult};
use revsum::model::{Assignment, Reviewee, Rubric};
use revsum::output::{write_summary, SummaryReport};
use revsum::rubric::resolve_rubrics;
use revsum::store::{FileStore, ReviewStore};
use std::sync::Arc;
use tracing::info;

pub async fn execute(args: SummarizeArgs) -> anyhow::Result<()> {
    // Load and validate config
    info!("Loading config from {:?}", args.config);
    let mut config = Config::load_or_default(&args.config)?;

    // Apply CLI overrides
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(report_dir) = &args.report_dir {
        config.report_dir = report_dir.clone();
    }
    if let Some(dataset) = &args.dataset {
        config.dataset = dataset.clone();
    }
    if let Some(endpoint) = &args.endpoint {
        config.summarizer.endpoint = endpoint.clone();
    }

    config.validate()?;

    info!("Loading dataset from {:?}", config.dataset);
    let store = Arc::new(FileStore::load(&config.dataset)?);
    let assignment = store.assignment(args.assignment)?;
    let rubrics = resolve_rubrics(store.as_ref(), &assignment).await?;

    if args.dry_run {
        info!("DRY RUN - no summarization calls will be made");
        let teams = store.teams_for_assignment(assignment.id).await?;
        print_execution_plan(&config, &assignment, &rubrics, &teams, &args);
        return Ok(());
    }

    let start = std::time::Instant::now();
    let engine = Engine::from_config(&config, store.clone())?;
    let result = match (args.reviewee, args.by) {
        (Some(reviewee_id), _) => {
            engine
                .summarize_single_reviewee(&rubrics, &assignment, reviewee_id)
                .await?
        }
        (None, GroupBy::Reviewee) => engine.summarize_by_reviewee(&assignment).await?,
        (None, GroupBy::Criterion) => engine.summarize_by_criterion(&assignment).await?,
    };
    let duration = start.elapsed();

    log_totals(&result);

    // Dated report directory (reports/YYYY-MM-DD/)
    let date_str = Local::now().format("%Y-%m-%d").to_string();
    let report_dir = config.report_dir.join(&date_str);
    let report = SummaryReport::new(result, duration.as_secs_f64());
    let (json_path, md_path) = write_summary(&report_dir, &report)?;

    println!("Wrote {}", json_path.display());
    println!("Wrote {}", md_path.display());
    Ok(())
}

fn log_totals(result: &SummaryResult) {
    let questions: usize = result
        .reviewees
        .iter()
        .flat_map(|r| &r.rounds)
        .map(|r| r.questions.len())
        .sum();
    let summarized: usize = result
        .reviewees
        .iter()
        .flat_map(|r| &r.rounds)
        .flat_map(|r| &r.questions)
        .filter(|q| !q.summary.is_empty())
        .count();

    info!(
        "Assignment {}: {} reviewees, {} question cells, {} summarized",
        result.assignment_id,
        result.reviewees.len(),
        questions,
        summarized
    );
    for reviewee in &result.reviewees {
        info!("  {}: {:.2}", reviewee.name, reviewee.avg_score);
    }
}

fn print_execution_plan(
    config: &Config,
    assignment: &Assignment,
    rubrics: &[Rubric],
    teams: &[Reviewee],
    args: &SummarizeArgs,
) {
    println!("\n=== Execution Plan ===\n");
    println!("Assignment: {} ({})", assignment.id, assignment.name);
    println!("Dataset: {:?}", config.dataset);
    println!("Summarizer: {}", config.summarizer.endpoint);
    println!("Concurrency: {}", config.concurrency);
    println!("Report dir: {:?}", config.report_dir);

    match args.reviewee {
        Some(id) => println!("Mode: single reviewee {}", id),
        None => match args.by {
            GroupBy::Reviewee => println!("Mode: by reviewee"),
            GroupBy::Criterion => println!("Mode: by criterion"),
        },
    }

    let shared = if assignment.varies_rubrics_by_round {
        ""
    } else {
        " (shared rubric)"
    };
    println!("\nRounds: {}{}", rubrics.len(), shared);
    for (round, rubric) in rubrics.iter().enumerate() {
        let scored = rubric.iter().filter(|q| !q.is_section_header()).count();
        println!(
            "  - round {}: {} questions, {} weighted criteria",
            round + 1,
            scored,
            rubric.iter().filter(|q| q.round_weight().is_some()).count()
        );
    }

    println!("\nReviewees:");
    for team in teams {
        println!("  - {} (id {})", team.name, team.id);
    }
    println!();
}

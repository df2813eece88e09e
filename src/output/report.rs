use super::SummaryReport;
use crate::engine::RevieweeSummary;

/// Render a run as a Markdown report
pub fn build_markdown(report: &SummaryReport) -> String {
    let result = &report.result;
    let mut md = String::new();

    md.push_str("# Review Summary\n\n");
    md.push_str(&format!("**Assignment:** {}\n", result.assignment_id));
    md.push_str(&format!("**Mode:** {}\n", result.mode));
    md.push_str(&format!("**Generated:** {}\n", report.timestamp));
    md.push_str(&format!("**Run:** {}\n", report.run_id));
    md.push_str(&format!("**Duration:** {:.1}s\n\n", report.duration_sec));

    // Overview table
    md.push_str("## Scores\n\n");
    md.push_str("| Reviewee | Overall |");
    let rounds = result
        .reviewees
        .iter()
        .map(|r| r.rounds.len())
        .max()
        .unwrap_or(0);
    for round in 0..rounds {
        md.push_str(&format!(" Round {} |", round + 1));
    }
    md.push('\n');
    md.push_str("|----------|---------|");
    md.push_str(&"---------|".repeat(rounds));
    md.push('\n');

    for reviewee in &result.reviewees {
        md.push_str(&format!("| {} | {:.2} |", reviewee.name, reviewee.avg_score));
        for round in 0..rounds {
            match reviewee.rounds.get(round) {
                Some(r) => md.push_str(&format!(" {:.2} |", r.avg_score)),
                None => md.push_str(" - |"),
            }
        }
        md.push('\n');
    }
    md.push('\n');

    for reviewee in &result.reviewees {
        push_reviewee(&mut md, reviewee);
    }

    md
}

fn push_reviewee(md: &mut String, reviewee: &RevieweeSummary) {
    md.push_str(&format!("## {}\n\n", reviewee.name));
    if !reviewee.reviewers.is_empty() {
        md.push_str(&format!("**Reviewers:** {}\n\n", reviewee.reviewers.join(", ")));
    }

    for round in &reviewee.rounds {
        md.push_str(&format!(
            "### Round {} ({:.2})\n\n",
            round.round + 1,
            round.avg_score
        ));

        for question in &round.questions {
            md.push_str(&format!(
                "#### {} ({:.2})\n\n",
                question.text, question.avg_score
            ));
            if question.summary.is_empty() {
                md.push_str("_No summary_\n\n");
            } else {
                for sentence in &question.summary {
                    md.push_str(&format!("- {}\n", sentence));
                }
                md.push('\n');
            }
        }
    }

    md.push_str("---\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{QuestionSummary, RoundSummary, SummaryMode, SummaryResult};

    fn report() -> SummaryReport {
        SummaryReport::new(
            SummaryResult {
                mode: SummaryMode::ByReviewee,
                assignment_id: 1,
                reviewees: vec![RevieweeSummary {
                    name: "Alpha".to_string(),
                    reviewers: vec!["ann".to_string(), "bob".to_string()],
                    avg_score: 85.0,
                    rounds: vec![RoundSummary {
                        round: 0,
                        avg_score: 85.0,
                        questions: vec![
                            QuestionSummary {
                                question_id: 1,
                                text: "Design".to_string(),
                                avg_score: 90.0,
                                summary: vec!["Clean modules.".to_string()],
                            },
                            QuestionSummary {
                                question_id: 2,
                                text: "Testing".to_string(),
                                avg_score: 80.0,
                                summary: Vec::new(),
                            },
                        ],
                    }],
                }],
            },
            0.2,
        )
    }

    #[test]
    fn test_markdown_lists_scores_and_summaries() {
        let md = build_markdown(&report());

        assert!(md.contains("| Reviewee | Overall | Round 1 |"));
        assert!(md.contains("| Alpha | 85.00 | 85.00 |"));
        assert!(md.contains("**Reviewers:** ann, bob"));
        assert!(md.contains("#### Design (90.00)\n\n- Clean modules.\n"));
        assert!(md.contains("#### Testing (80.00)\n\n_No summary_"));
    }
}

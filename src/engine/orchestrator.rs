use crate::config::Config;
use crate::error::{EngineError, SummarizerError};
use crate::model::{Assignment, Question, QuestionType, Reviewee, RevieweeId, Rubric};
use crate::parser::segment_comments;
use crate::rubric::{ensure_unique_text, resolve_rubrics};
use crate::score::calc_criterion_score;
use crate::store::ReviewStore;
use crate::summarizer::{create_summarizer, Summarizer};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use super::dispatch::Dispatcher;
use super::result::{
    CellKey, QuestionSummary, RevieweeSummary, RoundSummary, SummaryMode, SummaryResult,
    ALL_REVIEWEES,
};

#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Maximum summarization calls in flight
    pub concurrency: usize,

    /// Per-call limit; an expired call leaves its summary empty
    pub call_timeout: Duration,
}

impl From<&Config> for EngineOptions {
    fn from(config: &Config) -> Self {
        Self {
            concurrency: config.concurrency,
            call_timeout: Duration::from_secs(config.summarizer.timeout_sec),
        }
    }
}

/// Aggregates review scores and summarizes comments for an assignment.
///
/// Every entry point dispatches all of its summarization units, joins them once,
/// and only then computes round and reviewee averages.
pub struct Engine {
    store: Arc<dyn ReviewStore>,
    summarizer: Arc<dyn Summarizer>,
    semaphore: Arc<Semaphore>,
    options: EngineOptions,
}

impl Engine {
    pub fn new(
        store: Arc<dyn ReviewStore>,
        summarizer: Arc<dyn Summarizer>,
        options: EngineOptions,
    ) -> Self {
        let semaphore = Arc::new(Semaphore::new(options.concurrency.max(1)));
        Self {
            store,
            summarizer,
            semaphore,
            options,
        }
    }

    /// Build an engine talking to the configured summarization service
    pub fn from_config(
        config: &Config,
        store: Arc<dyn ReviewStore>,
    ) -> Result<Self, SummarizerError> {
        let summarizer = create_summarizer(config)?;
        Ok(Self::new(store, summarizer, EngineOptions::from(config)))
    }

    fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(
            self.summarizer.clone(),
            self.semaphore.clone(),
            self.options.call_timeout,
        )
    }

    async fn max_score(&self, question: &Question) -> Result<f64, EngineError> {
        match question.question_type {
            QuestionType::Checkbox => Ok(1.0),
            QuestionType::Criterion | QuestionType::SectionHeader | QuestionType::Other => Ok(self
                .store
                .max_score_for_questionnaire(question.questionnaire_id)
                .await?),
        }
    }

    /// Scores and summaries per reviewee, round and question
    pub async fn summarize_by_reviewee(
        &self,
        assignment: &Assignment,
    ) -> Result<SummaryResult, EngineError> {
        let start = std::time::Instant::now();
        let rubrics = resolve_rubrics(self.store.as_ref(), assignment).await?;

        let mut teams = self.store.teams_for_assignment(assignment.id).await?;
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        ensure_unique_names(&teams)?;

        info!(
            "Summarizing assignment {} by reviewee: {} reviewees, {} rounds",
            assignment.id,
            teams.len(),
            rubrics.len()
        );

        let mut dispatcher = self.dispatcher();
        let mut reviewees = Vec::with_capacity(teams.len());

        for (reviewee_idx, team) in teams.iter().enumerate() {
            let reviewers = self
                .store
                .reviewer_names_for_reviewee_and_assignment(team.id, assignment.id)
                .await?;
            let mut summary = RevieweeSummary::new(team.name.clone(), reviewers);

            for (round, rubric) in rubrics.iter().enumerate() {
                let mut round_summary = RoundSummary::new(round);

                for question in rubric.iter().filter(|q| !q.is_section_header()) {
                    let answers = self
                        .store
                        .answers_for_question_reviewee_round(
                            assignment.id,
                            team.id,
                            question.id,
                            round as u32 + 1,
                        )
                        .await?;
                    let max_score = self.max_score(question).await?;
                    let score = calc_criterion_score(&answers, max_score);
                    debug!(
                        "{} round {} '{}': {} answers, score {}",
                        team.name,
                        round + 1,
                        question.text,
                        answers.len(),
                        score
                    );

                    let cell = CellKey {
                        reviewee: reviewee_idx,
                        round,
                        question: round_summary.questions.len(),
                    };
                    let label = format!("{} round {} '{}'", team.name, round + 1, question.text);
                    dispatcher.dispatch(cell, label, segment_comments(&answers));
                    round_summary
                        .questions
                        .push(QuestionSummary::scored(question, score));
                }

                summary.rounds.push(round_summary);
            }

            reviewees.push(summary);
        }

        let result = self
            .complete(
                SummaryMode::ByReviewee,
                assignment,
                reviewees,
                dispatcher,
                &rubrics,
                assignment.rounds_of_reviews,
            )
            .await;
        info!(
            "Assignment {} summarized by reviewee in {:.1}s",
            assignment.id,
            start.elapsed().as_secs_f64()
        );
        Ok(result)
    }

    /// Scores and summaries per round and question, merging every reviewee's feedback
    pub async fn summarize_by_criterion(
        &self,
        assignment: &Assignment,
    ) -> Result<SummaryResult, EngineError> {
        let start = std::time::Instant::now();
        let rubrics = resolve_rubrics(self.store.as_ref(), assignment).await?;

        info!(
            "Summarizing assignment {} by criterion: {} rounds",
            assignment.id,
            rubrics.len()
        );

        let mut dispatcher = self.dispatcher();
        let mut summary = RevieweeSummary::new(ALL_REVIEWEES.to_string(), Vec::new());

        for (round, rubric) in rubrics.iter().enumerate() {
            let mut round_summary = RoundSummary::new(round);

            for question in rubric.iter().filter(|q| !q.is_section_header()) {
                // Answers from every round, as recorded against the question
                let answers = self
                    .store
                    .answers_for_question(assignment.id, question.id)
                    .await?;
                let max_score = self.max_score(question).await?;
                let score = calc_criterion_score(&answers, max_score);

                let cell = CellKey {
                    reviewee: 0,
                    round,
                    question: round_summary.questions.len(),
                };
                let label = format!("round {} '{}'", round + 1, question.text);
                dispatcher.dispatch(cell, label, segment_comments(&answers));
                round_summary
                    .questions
                    .push(QuestionSummary::scored(question, score));
            }

            summary.rounds.push(round_summary);
        }

        let result = self
            .complete(
                SummaryMode::ByCriterion,
                assignment,
                vec![summary],
                dispatcher,
                &rubrics,
                assignment.rounds_of_reviews,
            )
            .await;
        info!(
            "Assignment {} summarized by criterion in {:.1}s",
            assignment.id,
            start.elapsed().as_secs_f64()
        );
        Ok(result)
    }

    /// Scores and summaries for one reviewee with caller-supplied rubrics, one per round.
    /// Answers are not filtered by round.
    pub async fn summarize_single_reviewee(
        &self,
        rubrics: &[Rubric],
        assignment: &Assignment,
        reviewee_id: RevieweeId,
    ) -> Result<SummaryResult, EngineError> {
        for (round, rubric) in rubrics.iter().enumerate() {
            ensure_unique_text(round, rubric)?;
        }

        let name = self
            .store
            .teams_for_assignment(assignment.id)
            .await?
            .into_iter()
            .find(|t| t.id == reviewee_id)
            .map(|t| t.name)
            .unwrap_or_else(|| reviewee_id.to_string());
        let reviewers = self
            .store
            .reviewer_names_for_reviewee_and_assignment(reviewee_id, assignment.id)
            .await?;

        info!(
            "Summarizing reviewee {} of assignment {} across {} rounds",
            name,
            assignment.id,
            rubrics.len()
        );

        let mut dispatcher = self.dispatcher();
        let mut summary = RevieweeSummary::new(name, reviewers);

        for (round, rubric) in rubrics.iter().enumerate() {
            let mut round_summary = RoundSummary::new(round);

            for question in rubric.iter().filter(|q| !q.is_section_header()) {
                let answers = self
                    .store
                    .answers_for_question_and_reviewee(assignment.id, reviewee_id, question.id)
                    .await?;
                let max_score = self.max_score(question).await?;
                let score = calc_criterion_score(&answers, max_score);

                let cell = CellKey {
                    reviewee: 0,
                    round,
                    question: round_summary.questions.len(),
                };
                let label = format!("{} round {} '{}'", summary.name, round + 1, question.text);
                dispatcher.dispatch(cell, label, segment_comments(&answers));
                round_summary
                    .questions
                    .push(QuestionSummary::scored(question, score));
            }

            summary.rounds.push(round_summary);
        }

        Ok(self
            .complete(
                SummaryMode::SingleReviewee,
                assignment,
                vec![summary],
                dispatcher,
                rubrics,
                rubrics.len(),
            )
            .await)
    }

    /// Join all dispatched units, fill their cells, then compute round and reviewee averages
    async fn complete(
        &self,
        mode: SummaryMode,
        assignment: &Assignment,
        reviewees: Vec<RevieweeSummary>,
        dispatcher: Dispatcher,
        rubrics: &[Rubric],
        n_rounds: usize,
    ) -> SummaryResult {
        let dispatched = dispatcher.pending();
        let summaries = dispatcher.join_all().await;
        info!(
            "{} of {} summarization calls succeeded",
            summaries.len(),
            dispatched
        );

        let mut result = SummaryResult {
            mode,
            assignment_id: assignment.id,
            reviewees,
        };
        for (cell, sentences) in summaries {
            result.fill_summary(cell, sentences);
        }
        for reviewee in &mut result.reviewees {
            reviewee.finalize_scores(rubrics, n_rounds);
        }
        result
    }
}

fn ensure_unique_names(teams: &[Reviewee]) -> Result<(), EngineError> {
    let mut seen = HashSet::new();
    for team in teams {
        if !seen.insert(team.name.as_str()) {
            return Err(EngineError::DuplicateReviewee(team.name.clone()));
        }
    }
    Ok(())
}

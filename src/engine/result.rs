use crate::model::{AssignmentId, Question, QuestionId, Rubric};
use crate::score::{calc_reviewee_score, calc_round_score};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label of the single entry produced by the by-criterion view
pub const ALL_REVIEWEES: &str = "All reviewees";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryMode {
    ByReviewee,
    ByCriterion,
    SingleReviewee,
}

impl std::fmt::Display for SummaryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryMode::ByReviewee => write!(f, "by_reviewee"),
            SummaryMode::ByCriterion => write!(f, "by_criterion"),
            SummaryMode::SingleReviewee => write!(f, "single_reviewee"),
        }
    }
}

/// Scores and comment summaries nested by reviewee, round and question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResult {
    pub mode: SummaryMode,
    pub assignment_id: AssignmentId,
    pub reviewees: Vec<RevieweeSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevieweeSummary {
    pub name: String,

    /// Display only
    pub reviewers: Vec<String>,

    pub avg_score: f64,

    pub rounds: Vec<RoundSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSummary {
    /// 0-based
    pub round: usize,

    pub avg_score: f64,

    pub questions: Vec<QuestionSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub question_id: QuestionId,

    pub text: String,

    pub avg_score: f64,

    /// Summary sentences; empty when there was nothing to summarize or the call failed
    pub summary: Vec<String>,
}

/// Position of one question cell inside a result under construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CellKey {
    pub reviewee: usize,
    pub round: usize,
    pub question: usize,
}

impl SummaryResult {
    pub fn reviewee(&self, name: &str) -> Option<&RevieweeSummary> {
        self.reviewees.iter().find(|r| r.name == name)
    }

    pub fn summary(&self, reviewee: &str, round: usize, text: &str) -> Option<&[String]> {
        self.question(reviewee, round, text)
            .map(|q| q.summary.as_slice())
    }

    pub fn criterion_score(&self, reviewee: &str, round: usize, text: &str) -> Option<f64> {
        self.question(reviewee, round, text).map(|q| q.avg_score)
    }

    pub fn round_score(&self, reviewee: &str, round: usize) -> Option<f64> {
        self.reviewee(reviewee)?
            .rounds
            .get(round)
            .map(|r| r.avg_score)
    }

    pub fn reviewee_score(&self, reviewee: &str) -> Option<f64> {
        self.reviewee(reviewee).map(|r| r.avg_score)
    }

    pub fn reviewers(&self, reviewee: &str) -> Option<&[String]> {
        self.reviewee(reviewee).map(|r| r.reviewers.as_slice())
    }

    fn question(&self, reviewee: &str, round: usize, text: &str) -> Option<&QuestionSummary> {
        self.reviewee(reviewee)?
            .rounds
            .get(round)?
            .questions
            .iter()
            .find(|q| q.text == text)
    }

    /// Store a summary in its cell. Each cell is targeted by at most one unit,
    /// so a filled cell is never overwritten.
    pub(crate) fn fill_summary(&mut self, cell: CellKey, sentences: Vec<String>) -> bool {
        let Some(question) = self
            .reviewees
            .get_mut(cell.reviewee)
            .and_then(|r| r.rounds.get_mut(cell.round))
            .and_then(|r| r.questions.get_mut(cell.question))
        else {
            return false;
        };

        if !question.summary.is_empty() {
            return false;
        }
        question.summary = sentences;
        true
    }
}

impl RevieweeSummary {
    pub(crate) fn new(name: String, reviewers: Vec<String>) -> Self {
        Self {
            name,
            reviewers,
            avg_score: 0.0,
            rounds: Vec::new(),
        }
    }

    /// Compute round averages from criterion scores, then the overall average.
    /// `rubrics` is indexed by round.
    pub(crate) fn finalize_scores(&mut self, rubrics: &[Rubric], n_rounds: usize) {
        for round in &mut self.rounds {
            let criteria = rubrics.get(round.round).map(|r| r.as_slice()).unwrap_or(&[]);
            round.avg_score = calc_round_score(&round.criterion_scores(), criteria);
        }
        let round_scores: Vec<f64> = self.rounds.iter().map(|r| r.avg_score).collect();
        self.avg_score = calc_reviewee_score(&round_scores, n_rounds);
    }
}

impl RoundSummary {
    pub(crate) fn new(round: usize) -> Self {
        Self {
            round,
            avg_score: 0.0,
            questions: Vec::new(),
        }
    }

    pub fn criterion_scores(&self) -> HashMap<QuestionId, f64> {
        self.questions
            .iter()
            .map(|q| (q.question_id, q.avg_score))
            .collect()
    }
}

impl QuestionSummary {
    pub(crate) fn scored(question: &Question, avg_score: f64) -> Self {
        Self {
            question_id: question.id,
            text: question.text.clone(),
            avg_score,
            summary: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionType;
    use std::sync::Arc;

    fn criterion(id: QuestionId, text: &str, weight: f64) -> Question {
        Question {
            id,
            questionnaire_id: 1,
            text: text.to_string(),
            question_type: QuestionType::Criterion,
            weight: Some(weight),
            sequence: id as f64,
        }
    }

    fn result_with_one_round(rubric: &[Question], scores: &[f64]) -> SummaryResult {
        let mut round = RoundSummary::new(0);
        for (question, score) in rubric.iter().zip(scores) {
            round.questions.push(QuestionSummary::scored(question, *score));
        }
        let mut reviewee = RevieweeSummary::new("Team A".to_string(), vec!["ann".to_string()]);
        reviewee.rounds.push(round);
        SummaryResult {
            mode: SummaryMode::ByReviewee,
            assignment_id: 1,
            reviewees: vec![reviewee],
        }
    }

    #[test]
    fn test_accessors_follow_nesting() {
        let rubric = vec![criterion(1, "Clarity", 1.0), criterion(2, "Testing", 3.0)];
        let mut result = result_with_one_round(&rubric, &[60.0, 80.0]);
        result.reviewees[0].finalize_scores(&[Arc::new(rubric)], 1);

        assert_eq!(result.criterion_score("Team A", 0, "Testing"), Some(80.0));
        assert_eq!(result.round_score("Team A", 0), Some(75.0));
        assert_eq!(result.reviewee_score("Team A"), Some(75.0));
        assert_eq!(result.reviewers("Team A"), Some(&["ann".to_string()][..]));
        assert_eq!(result.summary("Team A", 0, "Clarity"), Some(&[][..]));
        assert!(result.round_score("Team A", 1).is_none());
        assert!(result.summary("Team B", 0, "Clarity").is_none());
    }

    #[test]
    fn test_fill_summary_targets_one_cell() {
        let rubric = vec![criterion(1, "Clarity", 1.0), criterion(2, "Testing", 1.0)];
        let mut result = result_with_one_round(&rubric, &[0.0, 0.0]);

        let cell = CellKey {
            reviewee: 0,
            round: 0,
            question: 1,
        };
        assert!(result.fill_summary(cell, vec!["Solid tests.".to_string()]));
        assert_eq!(
            result.summary("Team A", 0, "Testing"),
            Some(&["Solid tests.".to_string()][..])
        );
        assert_eq!(result.summary("Team A", 0, "Clarity"), Some(&[][..]));

        let missing = CellKey {
            reviewee: 0,
            round: 3,
            question: 0,
        };
        assert!(!result.fill_summary(missing, vec!["x".to_string()]));
    }

    #[test]
    fn test_serializes_mode_in_snake_case() {
        let result = result_with_one_round(&[], &[]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mode"], "by_reviewee");
        assert_eq!(json["reviewees"][0]["name"], "Team A");
    }
}

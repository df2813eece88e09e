use super::ReviewStore;
use crate::error::StoreError;
use crate::model::{
    Answer, Assignment, AssignmentId, ParticipantId, Question, QuestionId, Questionnaire,
    QuestionnaireId, Reviewee, RevieweeId,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

/// A reviewer assigned to review a team within an assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewMap {
    pub assignment_id: AssignmentId,
    pub reviewer_id: ParticipantId,
    pub reviewee_id: RevieweeId,
}

/// Snapshot of the review database, as stored in a YAML or JSON document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub assignments: Vec<Assignment>,

    #[serde(default)]
    pub questionnaires: Vec<Questionnaire>,

    #[serde(default)]
    pub questions: Vec<Question>,

    #[serde(default)]
    pub teams: Vec<Reviewee>,

    #[serde(default)]
    pub participants: Vec<Participant>,

    #[serde(default)]
    pub review_maps: Vec<ReviewMap>,

    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// `ReviewStore` over an in-memory dataset loaded from disk
#[derive(Debug, Clone, Default)]
pub struct FileStore {
    dataset: Dataset,
}

impl FileStore {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    /// Load a dataset document (JSON is accepted as YAML)
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| StoreError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let dataset: Dataset = serde_yaml::from_str(&content)?;
        debug!(
            "Loaded dataset {}: {} assignments, {} questions, {} answers",
            path.display(),
            dataset.assignments.len(),
            dataset.questions.len(),
            dataset.answers.len()
        );
        Ok(Self::new(dataset))
    }

    pub fn assignment(&self, assignment_id: AssignmentId) -> Result<Assignment, StoreError> {
        self.dataset
            .assignments
            .iter()
            .find(|a| a.id == assignment_id)
            .cloned()
            .ok_or(StoreError::NotFound {
                kind: "Assignment",
                id: assignment_id,
            })
    }

    fn answers_where(&self, predicate: impl Fn(&Answer) -> bool) -> Vec<Answer> {
        self.dataset
            .answers
            .iter()
            .filter(|a| predicate(a))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ReviewStore for FileStore {
    async fn answers_for_question_and_reviewee(
        &self,
        assignment_id: AssignmentId,
        reviewee_id: ParticipantId,
        question_id: QuestionId,
    ) -> Result<Vec<Answer>, StoreError> {
        Ok(self.answers_where(|a| {
            a.assignment_id == assignment_id
                && a.reviewee_id == reviewee_id
                && a.question_id == question_id
        }))
    }

    async fn answers_for_question(
        &self,
        assignment_id: AssignmentId,
        question_id: QuestionId,
    ) -> Result<Vec<Answer>, StoreError> {
        Ok(self.answers_where(|a| a.assignment_id == assignment_id && a.question_id == question_id))
    }

    async fn answers_for_question_reviewee_round(
        &self,
        assignment_id: AssignmentId,
        reviewee_id: RevieweeId,
        question_id: QuestionId,
        round_number: u32,
    ) -> Result<Vec<Answer>, StoreError> {
        Ok(self.answers_where(|a| {
            a.assignment_id == assignment_id
                && a.reviewee_id == reviewee_id
                && a.question_id == question_id
                && a.round == round_number
        }))
    }

    async fn questions_for_questionnaire(
        &self,
        questionnaire_id: QuestionnaireId,
    ) -> Result<Vec<Question>, StoreError> {
        let mut questions: Vec<Question> = self
            .dataset
            .questions
            .iter()
            .filter(|q| q.questionnaire_id == questionnaire_id)
            .cloned()
            .collect();
        questions.sort_by(|a, b| a.sequence.total_cmp(&b.sequence));
        Ok(questions)
    }

    async fn teams_for_assignment(
        &self,
        assignment_id: AssignmentId,
    ) -> Result<Vec<Reviewee>, StoreError> {
        let mut teams: Vec<Reviewee> = self
            .dataset
            .teams
            .iter()
            .filter(|t| t.assignment_id == assignment_id)
            .cloned()
            .collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(teams)
    }

    async fn reviewer_names_for_reviewee_and_assignment(
        &self,
        reviewee_id: RevieweeId,
        assignment_id: AssignmentId,
    ) -> Result<Vec<String>, StoreError> {
        let mut names: Vec<String> = Vec::new();
        for map in self
            .dataset
            .review_maps
            .iter()
            .filter(|m| m.assignment_id == assignment_id && m.reviewee_id == reviewee_id)
        {
            if let Some(participant) = self
                .dataset
                .participants
                .iter()
                .find(|p| p.id == map.reviewer_id)
            {
                if !names.contains(&participant.name) {
                    names.push(participant.name.clone());
                }
            }
        }
        Ok(names)
    }

    async fn max_score_for_questionnaire(
        &self,
        questionnaire_id: QuestionnaireId,
    ) -> Result<f64, StoreError> {
        self.dataset
            .questionnaires
            .iter()
            .find(|q| q.id == questionnaire_id)
            .map(|q| q.max_question_score)
            .ok_or(StoreError::NotFound {
                kind: "Questionnaire",
                id: questionnaire_id,
            })
    }
}

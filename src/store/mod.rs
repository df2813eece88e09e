mod file;

pub use file::{Dataset, FileStore, Participant, ReviewMap};

use crate::error::StoreError;
use crate::model::{
    Answer, AssignmentId, ParticipantId, Question, QuestionId, QuestionnaireId, Reviewee,
    RevieweeId,
};
use async_trait::async_trait;

/// Read-only queries the engine issues against the review database
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Answers to a question received by one reviewee, across all rounds
    async fn answers_for_question_and_reviewee(
        &self,
        assignment_id: AssignmentId,
        reviewee_id: ParticipantId,
        question_id: QuestionId,
    ) -> Result<Vec<Answer>, StoreError>;

    /// Answers to a question across every reviewee and round
    async fn answers_for_question(
        &self,
        assignment_id: AssignmentId,
        question_id: QuestionId,
    ) -> Result<Vec<Answer>, StoreError>;

    /// Answers to a question received by one reviewee in a 1-based round
    async fn answers_for_question_reviewee_round(
        &self,
        assignment_id: AssignmentId,
        reviewee_id: RevieweeId,
        question_id: QuestionId,
        round_number: u32,
    ) -> Result<Vec<Answer>, StoreError>;

    /// Questions of a questionnaire in rubric order
    async fn questions_for_questionnaire(
        &self,
        questionnaire_id: QuestionnaireId,
    ) -> Result<Vec<Question>, StoreError>;

    /// Teams of an assignment ordered by name
    async fn teams_for_assignment(
        &self,
        assignment_id: AssignmentId,
    ) -> Result<Vec<Reviewee>, StoreError>;

    async fn reviewer_names_for_reviewee_and_assignment(
        &self,
        reviewee_id: RevieweeId,
        assignment_id: AssignmentId,
    ) -> Result<Vec<String>, StoreError>;

    async fn max_score_for_questionnaire(
        &self,
        questionnaire_id: QuestionnaireId,
    ) -> Result<f64, StoreError>;
}

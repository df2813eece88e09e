use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub type AssignmentId = u64;
pub type QuestionId = u64;
pub type QuestionnaireId = u64;
pub type ParticipantId = u64;
pub type RevieweeId = u64;

/// An ordered rubric for one round. Rounds sharing a rubric share the same allocation.
pub type Rubric = Arc<Vec<Question>>;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Assignment {
    pub id: AssignmentId,

    #[serde(default)]
    pub name: String,

    pub rounds_of_reviews: usize,

    #[serde(default)]
    pub varies_rubrics_by_round: bool,

    /// Review questionnaire per round; index 0 is round 1.
    #[serde(default)]
    pub review_questionnaires: Vec<QuestionnaireId>,
}

impl Assignment {
    /// Questionnaire used for a 0-based round. Without per-round rubrics every
    /// round uses the first questionnaire.
    pub fn review_questionnaire_id(&self, round: usize) -> Option<QuestionnaireId> {
        if self.varies_rubrics_by_round {
            self.review_questionnaires.get(round).copied()
        } else {
            self.review_questionnaires.first().copied()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum QuestionType {
    Criterion,
    Checkbox,
    SectionHeader,
    #[serde(other)]
    Other,
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::Criterion => write!(f, "Criterion"),
            QuestionType::Checkbox => write!(f, "Checkbox"),
            QuestionType::SectionHeader => write!(f, "SectionHeader"),
            QuestionType::Other => write!(f, "Other"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Question {
    pub id: QuestionId,

    pub questionnaire_id: QuestionnaireId,

    #[serde(alias = "txt")]
    pub text: String,

    #[serde(rename = "type")]
    pub question_type: QuestionType,

    #[serde(default)]
    pub weight: Option<f64>,

    #[serde(default, alias = "seq")]
    pub sequence: f64,
}

impl Question {
    pub fn is_section_header(&self) -> bool {
        self.question_type == QuestionType::SectionHeader
    }

    /// Weight this question carries in a round average, if it carries any
    pub fn round_weight(&self) -> Option<f64> {
        match self.question_type {
            QuestionType::Criterion => self.weight.filter(|w| *w > 0.0),
            QuestionType::Checkbox | QuestionType::SectionHeader | QuestionType::Other => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Questionnaire {
    pub id: QuestionnaireId,

    #[serde(default)]
    pub name: String,

    pub max_question_score: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Answer {
    pub assignment_id: AssignmentId,

    pub question_id: QuestionId,

    pub reviewer_id: ParticipantId,

    pub reviewee_id: RevieweeId,

    /// 1-based review round
    pub round: u32,

    #[serde(default, alias = "answer")]
    pub score: Option<f64>,

    #[serde(default, alias = "comments")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Reviewee {
    pub id: RevieweeId,

    /// Owning assignment
    #[serde(alias = "parent_id")]
    pub assignment_id: AssignmentId,

    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(question_type: QuestionType, weight: Option<f64>) -> Question {
        Question {
            id: 1,
            questionnaire_id: 1,
            text: "Q".to_string(),
            question_type,
            weight,
            sequence: 1.0,
        }
    }

    #[test]
    fn test_round_weight_only_for_positive_criteria() {
        assert_eq!(question(QuestionType::Criterion, Some(2.0)).round_weight(), Some(2.0));
        assert_eq!(question(QuestionType::Criterion, Some(0.0)).round_weight(), None);
        assert_eq!(question(QuestionType::Criterion, None).round_weight(), None);
        assert_eq!(question(QuestionType::Checkbox, Some(1.0)).round_weight(), None);
        assert_eq!(question(QuestionType::Other, Some(3.0)).round_weight(), None);
    }

    #[test]
    fn test_unknown_question_type_parses_as_other() {
        let q: Question = serde_json::from_str(
            r#"{"id": 4, "questionnaire_id": 2, "txt": "Comments", "type": "TextArea", "seq": 3}"#,
        )
        .unwrap();
        assert_eq!(q.question_type, QuestionType::Other);
        assert_eq!(q.text, "Comments");
        assert_eq!(q.sequence, 3.0);
    }

    #[test]
    fn test_review_questionnaire_per_round() {
        let mut assignment = Assignment {
            id: 1,
            name: "A1".to_string(),
            rounds_of_reviews: 2,
            varies_rubrics_by_round: true,
            review_questionnaires: vec![10, 20],
        };
        assert_eq!(assignment.review_questionnaire_id(1), Some(20));
        assert_eq!(assignment.review_questionnaire_id(2), None);

        assignment.varies_rubrics_by_round = false;
        assert_eq!(assignment.review_questionnaire_id(1), Some(10));
    }
}

use crate::error::EngineError;
use crate::model::{Assignment, Question, Rubric};
use crate::store::ReviewStore;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Resolve the rubric of every round of an assignment, indexed by 0-based round.
///
/// When rubrics do not vary by round the questionnaire is queried once and every
/// round slot shares that rubric.
pub async fn resolve_rubrics(
    store: &dyn ReviewStore,
    assignment: &Assignment,
) -> Result<Vec<Rubric>, EngineError> {
    let rounds = assignment.rounds_of_reviews;
    let mut rubrics: Vec<Rubric> = Vec::with_capacity(rounds);

    if assignment.varies_rubrics_by_round {
        for round in 0..rounds {
            rubrics.push(fetch_rubric(store, assignment, round).await?);
        }
    } else if rounds > 0 {
        let shared = fetch_rubric(store, assignment, 0).await?;
        rubrics.resize(rounds, shared);
    }

    Ok(rubrics)
}

async fn fetch_rubric(
    store: &dyn ReviewStore,
    assignment: &Assignment,
    round: usize,
) -> Result<Rubric, EngineError> {
    let questionnaire_id =
        assignment
            .review_questionnaire_id(round)
            .ok_or(EngineError::MissingQuestionnaire {
                assignment_id: assignment.id,
                round: round + 1,
            })?;

    let questions = store.questions_for_questionnaire(questionnaire_id).await?;
    debug!(
        "Round {} uses questionnaire {} ({} questions)",
        round + 1,
        questionnaire_id,
        questions.len()
    );
    ensure_unique_text(round, &questions)?;
    Ok(Arc::new(questions))
}

/// Question text keys summary and score cells, so it must not repeat within a rubric
pub(crate) fn ensure_unique_text(round: usize, questions: &[Question]) -> Result<(), EngineError> {
    let mut seen = HashSet::new();
    for question in questions.iter().filter(|q| !q.is_section_header()) {
        if !seen.insert(question.text.as_str()) {
            return Err(EngineError::DuplicateQuestionText {
                round: round + 1,
                text: question.text.clone(),
            });
        }
    }
    Ok(())
}

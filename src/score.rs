//! Score math for criterion, round and reviewee averages.
//!
//! All functions are pure and total: degenerate input (no scored answers, no
//! weighted criteria, no rounds) resolves to `0.0` instead of NaN.

use crate::model::{Answer, Question, QuestionId};
use std::collections::HashMap;

/// Round half away from zero to two decimals
pub fn round2(value: f64) -> f64 {
    round_cents(value) / 100.0
}

/// `value * 100` rounded half away from zero.
///
/// A decimal tie such as 0.285 is stored slightly below the tie, so its scaled
/// product lands at 28.4999..; the unscaled check against `f + 0.5` bumps it.
fn round_cents(value: f64) -> f64 {
    let mut cents = (value * 100.0).round();
    if value > 0.0 {
        if (cents + 0.5) / 100.0 <= value {
            cents += 1.0;
        }
    } else if value < 0.0 && (cents - 0.5) / 100.0 >= value {
        cents -= 1.0;
    }
    cents
}

/// Average of the non-null scores as a percentage of `max_score`.
///
/// The ratio is rounded to two decimals before it is scaled by 100, so 0.456
/// becomes 46.0 rather than 45.6. With no scored answers (or a non-positive
/// ceiling) the raw sum is returned, which is 0.0 when nothing was scored.
pub fn calc_criterion_score(answers: &[Answer], max_score: f64) -> f64 {
    let (sum, count) = answers
        .iter()
        .filter_map(|a| a.score)
        .fold((0.0_f64, 0_usize), |(sum, n), score| (sum + score, n + 1));

    if count > 0 && max_score > 0.0 {
        round_cents(sum / (count as f64 * max_score))
    } else {
        sum
    }
}

/// Weighted average of criterion scores over the criteria that carry a positive weight
pub fn calc_round_score(criterion_scores: &HashMap<QuestionId, f64>, criteria: &[Question]) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;

    for question in criteria {
        if let Some(weight) = question.round_weight() {
            let score = criterion_scores.get(&question.id).copied().unwrap_or(0.0);
            weighted_sum += score * weight;
            weight_sum += weight;
        }
    }

    if weight_sum > 0.0 && weighted_sum > 0.0 {
        round2(weighted_sum / weight_sum)
    } else {
        0.0
    }
}

/// Mean of the round scores over `n_rounds`; an all-zero sum stays 0.0
pub fn calc_reviewee_score(round_scores: &[f64], n_rounds: usize) -> f64 {
    let sum: f64 = round_scores.iter().sum();

    if n_rounds > 0 && sum > 0.0 {
        round2(sum / n_rounds as f64)
    } else {
        round2(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionType;

    fn scored(score: Option<f64>) -> Answer {
        Answer {
            assignment_id: 1,
            question_id: 1,
            reviewer_id: 1,
            reviewee_id: 1,
            round: 1,
            score,
            comment: None,
        }
    }

    fn criterion(id: QuestionId, weight: Option<f64>) -> Question {
        Question {
            id,
            questionnaire_id: 1,
            text: format!("Criterion {}", id),
            question_type: QuestionType::Criterion,
            weight,
            sequence: id as f64,
        }
    }

    #[test]
    fn test_criterion_score_percentage() {
        let answers = vec![scored(Some(4.0)), scored(Some(5.0))];
        assert_eq!(calc_criterion_score(&answers, 5.0), 90.0);
    }

    #[test]
    fn test_criterion_score_rounds_before_scaling() {
        // 3 / (1 * 7) = 0.42857.. -> 0.43 -> 43.0
        let answers = vec![scored(Some(3.0))];
        let score = calc_criterion_score(&answers, 7.0);
        assert!((score - 43.0).abs() < 1e-9);
    }

    #[test]
    fn test_criterion_score_half_cent_ratio_rounds_up() {
        // 57 / 200 = 0.285 -> 0.29 -> 29.0
        let answers = vec![scored(Some(28.0)), scored(Some(29.0))];
        assert_eq!(calc_criterion_score(&answers, 100.0), 29.0);
    }

    #[test]
    fn test_round2_half_cent_ties() {
        assert_eq!(round2(0.285), 0.29);
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(-0.285), -0.29);
        assert_eq!(round2(0.284), 0.28);
        assert_eq!(round2(0.9), 0.9);
    }

    #[test]
    fn test_criterion_score_ignores_null_scores() {
        let answers = vec![scored(None), scored(Some(1.0)), scored(None)];
        assert_eq!(calc_criterion_score(&answers, 1.0), 100.0);
    }

    #[test]
    fn test_criterion_score_no_valid_answers_is_zero() {
        assert_eq!(calc_criterion_score(&[], 5.0), 0.0);
        assert_eq!(calc_criterion_score(&[scored(None), scored(None)], 5.0), 0.0);
    }

    #[test]
    fn test_criterion_score_zero_ceiling_returns_sum() {
        let answers = vec![scored(Some(2.0)), scored(Some(1.0))];
        assert_eq!(calc_criterion_score(&answers, 0.0), 3.0);
    }

    #[test]
    fn test_criterion_score_within_bounds() {
        for max in [1.0, 4.0, 5.0, 10.0] {
            for low in 0..=(max as u32) {
                let answers = vec![scored(Some(low as f64)), scored(Some(max))];
                let score = calc_criterion_score(&answers, max);
                assert!((0.0..=100.0).contains(&score), "{} out of range", score);
            }
        }
    }

    #[test]
    fn test_round_score_weighted_average() {
        let criteria = vec![criterion(1, Some(1.0)), criterion(2, Some(3.0))];
        let scores = HashMap::from([(1, 60.0), (2, 80.0)]);
        assert_eq!(calc_round_score(&scores, &criteria), 75.0);
    }

    #[test]
    fn test_round_score_constant_is_independent_of_weights() {
        let criteria = vec![
            criterion(1, Some(0.5)),
            criterion(2, Some(7.0)),
            criterion(3, Some(2.5)),
        ];
        let scores = HashMap::from([(1, 72.0), (2, 72.0), (3, 72.0)]);
        assert_eq!(calc_round_score(&scores, &criteria), 72.0);
    }

    #[test]
    fn test_round_score_skips_unweighted_and_non_criteria() {
        let mut checkbox = criterion(3, Some(5.0));
        checkbox.question_type = QuestionType::Checkbox;
        let criteria = vec![criterion(1, Some(2.0)), criterion(2, None), checkbox];
        let scores = HashMap::from([(1, 50.0), (2, 100.0), (3, 100.0)]);
        assert_eq!(calc_round_score(&scores, &criteria), 50.0);
    }

    #[test]
    fn test_round_score_degenerate_is_zero() {
        let criteria = vec![criterion(1, Some(0.0)), criterion(2, None)];
        let scores = HashMap::from([(1, 90.0), (2, 90.0)]);
        assert_eq!(calc_round_score(&scores, &criteria), 0.0);
        assert_eq!(calc_round_score(&HashMap::new(), &[criterion(1, Some(1.0))]), 0.0);
    }

    #[test]
    fn test_reviewee_score_average() {
        assert_eq!(calc_reviewee_score(&[80.0, 90.0], 2), 85.0);
        assert_eq!(calc_reviewee_score(&[100.0, 0.0, 0.0], 3), 33.33);
    }

    #[test]
    fn test_reviewee_score_zero_rounds() {
        assert_eq!(calc_reviewee_score(&[0.0, 0.0, 0.0], 3), 0.0);
        assert_eq!(calc_reviewee_score(&[0.0, 0.0, 0.0], 0), 0.0);
        assert_eq!(calc_reviewee_score(&[], 0), 0.0);
    }
}

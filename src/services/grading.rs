// src/services/grading.rs

use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::grading::{AnswerReview, SubmittedAnswer, TestResult};
use crate::models::question::Question;
use crate::repo;

/// Grades a submission against the stored correct options.
///
/// Grading is best-effort per item: an unknown question id (deleted since the
/// test was generated, or simply made up) yields a review entry with no
/// correct option rather than failing the whole submission.
pub async fn grade(
    pool: &SqlitePool,
    answers: &[SubmittedAnswer],
    pass_threshold: f64,
) -> Result<TestResult, AppError> {
    if answers.is_empty() {
        return Ok(summarize(Vec::new(), pass_threshold));
    }

    let question_ids: Vec<i64> = answers.iter().map(|a| a.question_id).collect();

    let correct_options = repo::question::correct_options_for(pool, &question_ids).await?;
    let questions = repo::question::find_by_ids(pool, &question_ids).await?;

    let results = review_answers(answers, &correct_options, &questions);
    Ok(summarize(results, pass_threshold))
}

/// Reviews each answer in submission order. Pure: same inputs, same output.
fn review_answers(
    answers: &[SubmittedAnswer],
    correct_options: &HashMap<i64, i64>,
    questions: &HashMap<i64, Question>,
) -> Vec<AnswerReview> {
    answers
        .iter()
        .map(|answer| {
            let correct_option_id = correct_options.get(&answer.question_id).copied();
            let is_correct = correct_option_id == Some(answer.selected_option_id);
            let explanation = questions
                .get(&answer.question_id)
                .and_then(|q| q.explanation.clone());

            AnswerReview {
                question_id: answer.question_id,
                selected_option_id: answer.selected_option_id,
                correct_option_id,
                is_correct,
                explanation,
            }
        })
        .collect()
}

/// Aggregates per-item reviews into totals. The percentage is rounded to two
/// decimals first; the pass decision uses the rounded value so it always
/// agrees with what the client sees.
fn summarize(results: Vec<AnswerReview>, pass_threshold: f64) -> TestResult {
    let total_questions = results.len() as i64;
    let correct_count = results.iter().filter(|r| r.is_correct).count() as i64;

    let percentage = if total_questions == 0 {
        0.0
    } else {
        round_two_decimals(correct_count as f64 * 100.0 / total_questions as f64)
    };

    TestResult {
        total_questions,
        correct_count,
        incorrect_count: total_questions - correct_count,
        percentage,
        passed: total_questions > 0 && percentage >= pass_threshold,
        results,
    }
}

fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

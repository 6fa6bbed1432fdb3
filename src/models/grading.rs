// src/models/grading.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One submitted (question, chosen option) pair.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubmittedAnswer {
    pub question_id: i64,
    pub selected_option_id: i64,
}

/// A full submission from one test run. May be empty.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GradeRequest {
    pub answers: Vec<SubmittedAnswer>,
}

/// Per-question grading outcome, reported in submission order.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AnswerReview {
    pub question_id: i64,
    pub selected_option_id: i64,

    /// None when the question is unknown or has no correct option on record.
    pub correct_option_id: Option<i64>,

    pub is_correct: bool,

    /// Review text of the question, when it has one.
    pub explanation: Option<String>,
}

/// Aggregate result of grading one submission.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TestResult {
    pub total_questions: i64,
    pub correct_count: i64,
    pub incorrect_count: i64,

    /// Percentage of correct answers in 0..=100, rounded to two decimals.
    /// 0 for an empty submission.
    pub percentage: f64,

    pub passed: bool,
    pub results: Vec<AnswerReview>,
}

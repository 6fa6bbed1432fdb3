// src/models/exam.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::config::{DEFAULT_EXAM_DURATION_MIN, DEFAULT_EXAM_SIZE};
use crate::models::question::TestQuestion;

/// Represents the 'exams' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Exam {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i64,

    /// Target composition size. The persisted question list may be shorter
    /// when the candidate pool could not cover it.
    pub question_count: i64,

    /// Main category of the exam, informational only. Composition draws from
    /// the whole candidate pool regardless.
    pub primary_category_id: Option<i64>,

    pub is_active: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// An exam together with its questions in persisted composition order.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExamDetail {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i64,
    pub question_count: i64,
    pub primary_category_id: Option<i64>,
    pub is_active: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub questions: Vec<TestQuestion>,
}

impl ExamDetail {
    pub fn from_parts(exam: Exam, questions: Vec<TestQuestion>) -> Self {
        Self {
            id: exam.id,
            name: exam.name,
            description: exam.description,
            duration_minutes: exam.duration_minutes,
            question_count: exam.question_count,
            primary_category_id: exam.primary_category_id,
            is_active: exam.is_active,
            created_at: exam.created_at,
            questions,
        }
    }
}

/// DTO for composing a new exam. The name is checked by the composer itself
/// so a blank name reports the same error as a missing one.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ComposeExamRequest {
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(default = "default_duration")]
    #[validate(range(min = 1))]
    pub duration_minutes: i64,
    #[serde(default = "default_question_count")]
    #[validate(range(min = 1))]
    pub question_count: i64,
    pub primary_category_id: Option<i64>,

    /// Explicit candidate pool of question ids. When omitted, every active
    /// question is a candidate.
    pub question_pool: Option<Vec<i64>>,
}

fn default_duration() -> i64 {
    DEFAULT_EXAM_DURATION_MIN
}

fn default_question_count() -> i64 {
    DEFAULT_EXAM_SIZE
}

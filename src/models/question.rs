// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use url::Url;
use utoipa::ToSchema;
use validator::Validate;

/// Question difficulty, stored as lowercase text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Question {
    pub id: i64,

    /// The text shown to the test-taker.
    pub prompt: String,

    /// Optional illustration, e.g. a photo of a traffic sign.
    pub image_url: Option<String>,

    /// Shown when reviewing a graded submission, whether or not the answer
    /// was correct.
    pub explanation: Option<String>,

    pub category_id: i64,
    pub difficulty: Difficulty,

    /// Inactive questions are kept for existing exams but never drawn again.
    pub is_active: bool,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Represents the 'answer_options' table. Authoring view, carries the
/// correctness flag and must never be sent to a test-taker mid-test.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct AnswerOption {
    pub id: i64,
    pub question_id: i64,
    pub body: String,
    pub is_correct: bool,

    /// Rendering order within the question. Not required to be unique.
    pub display_order: i64,
}

/// A question with its full option set, for authoring and review.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionDetail {
    pub id: i64,
    pub prompt: String,
    pub image_url: Option<String>,
    pub explanation: Option<String>,
    pub category_id: i64,
    pub difficulty: Difficulty,
    pub is_active: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub options: Vec<AnswerOption>,
}

impl QuestionDetail {
    pub fn from_parts(question: Question, options: Vec<AnswerOption>) -> Self {
        Self {
            id: question.id,
            prompt: question.prompt,
            image_url: question.image_url,
            explanation: question.explanation,
            category_id: question.category_id,
            difficulty: question.difficulty,
            is_active: question.is_active,
            created_at: question.created_at,
            options,
        }
    }
}

/// DTO for sending an option to a test-taker (excludes the correctness flag).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicAnswerOption {
    pub id: i64,
    pub body: String,
    pub display_order: i64,
}

/// DTO for sending a question to a test-taker (excludes correctness and
/// explanation, which would give the answer away).
#[derive(Debug, Serialize, ToSchema)]
pub struct TestQuestion {
    pub id: i64,
    pub prompt: String,
    pub image_url: Option<String>,
    pub options: Vec<PublicAnswerOption>,
}

impl TestQuestion {
    pub fn from_parts(question: Question, options: Vec<PublicAnswerOption>) -> Self {
        Self {
            id: question.id,
            prompt: question.prompt,
            image_url: question.image_url,
            options,
        }
    }
}

/// One option in a question-creation payload. Serialize is required: failed
/// validation embeds the offending field value in the error params.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateAnswerOptionRequest {
    pub body: String,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default = "default_display_order")]
    pub display_order: i64,
}

/// DTO for creating a new question together with its options.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 2000))]
    pub prompt: String,
    #[validate(custom(function = validate_image_url))]
    pub image_url: Option<String>,
    #[validate(length(max = 2000))]
    pub explanation: Option<String>,
    pub category_id: i64,
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[validate(custom(function = validate_options))]
    pub options: Vec<CreateAnswerOptionRequest>,
}

fn default_display_order() -> i64 {
    1
}

fn default_difficulty() -> Difficulty {
    Difficulty::Medium
}

fn default_active() -> bool {
    true
}

/// A question may carry any number of options (including none, for drafts),
/// but each option needs text and at most one may be marked correct.
fn validate_options(
    options: &[CreateAnswerOptionRequest],
) -> Result<(), validator::ValidationError> {
    let mut correct_count = 0;
    for opt in options {
        if opt.body.is_empty() {
            return Err(validator::ValidationError::new("option_body_cannot_be_empty"));
        }
        if opt.body.len() > 500 {
            return Err(validator::ValidationError::new("option_body_too_long"));
        }
        if opt.display_order < 1 {
            return Err(validator::ValidationError::new(
                "display_order_must_be_positive",
            ));
        }
        if opt.is_correct {
            correct_count += 1;
        }
    }
    if correct_count > 1 {
        return Err(validator::ValidationError::new("multiple_correct_options"));
    }
    Ok(())
}

fn validate_image_url(url: &str) -> Result<(), validator::ValidationError> {
    if Url::parse(url).is_err() {
        return Err(validator::ValidationError::new("invalid_image_url"));
    }
    Ok(())
}

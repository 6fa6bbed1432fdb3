// src/handlers/grading.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::AppError,
    models::grading::{GradeRequest, TestResult},
    services::grading,
};

/// Grades a submitted set of answers.
///
/// Accepts any mix of question ids, including ones that no longer exist;
/// those come back with `correct_option_id: null` and count as incorrect.
/// An empty submission grades to all zeros and does not pass.
#[utoipa::path(
    post,
    path = "/api/grade",
    request_body = GradeRequest,
    responses(
        (status = OK, body = TestResult, description = "Per-question review and totals"),
    ),
    tag = "grading"
)]
pub async fn grade_submission(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Json(payload): Json<GradeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = grading::grade(&pool, &payload.answers, config.pass_threshold).await?;
    Ok(Json(result))
}

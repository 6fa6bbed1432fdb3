// src/handlers/exam.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::exam::{ComposeExamRequest, Exam, ExamDetail},
    repo,
    services::composition,
    utils::html::clean_html,
};

/// Lists all active exams, without their question lists.
#[utoipa::path(
    get,
    path = "/api/exams",
    responses(
        (status = OK, body = Vec<Exam>, description = "All active exams"),
    ),
    tag = "exams"
)]
pub async fn list_exams(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let exams = repo::exam::list_active(&pool).await?;
    Ok(Json(exams))
}

/// Fetches one exam with its questions in composition order. The order is
/// stable: every read returns the same sequence.
#[utoipa::path(
    get,
    path = "/api/exams/{id}",
    params(
        ("id" = i64, Path, description = "Exam id"),
    ),
    responses(
        (status = OK, body = ExamDetail, description = "The exam with its ordered questions"),
        (status = NOT_FOUND, description = "No such exam"),
    ),
    tag = "exams"
)]
pub async fn get_exam(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let exam = repo::exam::find_by_id(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Exam not found".to_string()))?;

    let questions = repo::exam::questions_in_order(&pool, id).await?;
    let views = repo::question::load_public_views(&pool, questions).await?;

    Ok(Json(ExamDetail::from_parts(exam, views)))
}

/// Composes a new exam from the active question pool.
#[utoipa::path(
    post,
    path = "/api/exams",
    request_body = ComposeExamRequest,
    responses(
        (status = CREATED, body = ExamDetail, description = "The composed exam"),
        (status = BAD_REQUEST, description = "Invalid exam metadata"),
    ),
    tag = "exams"
)]
pub async fn create_exam(
    State(pool): State<SqlitePool>,
    Json(mut payload): Json<ComposeExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::InvalidExamMetadata(validation_errors.to_string()));
    }

    payload.name = clean_html(&payload.name);
    payload.description = payload.description.as_deref().map(clean_html);

    let mut rng = StdRng::seed_from_u64(rand::random());
    let detail = composition::compose_exam(&pool, &payload, &mut rng).await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

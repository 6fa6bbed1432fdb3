// src/handlers/question.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    error::AppError,
    models::question::{CreateQuestionRequest, Difficulty, Question, QuestionDetail},
    repo,
    utils::html::clean_html,
};

/// Query filters for listing questions.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuestionsParams {
    pub category_id: Option<i64>,
    pub difficulty: Option<Difficulty>,
}

/// Lists active questions, optionally filtered by category and difficulty.
/// Authoring view: options are not included, fetch the detail for those.
#[utoipa::path(
    get,
    path = "/api/questions",
    params(ListQuestionsParams),
    responses(
        (status = OK, body = Vec<Question>, description = "Matching active questions"),
    ),
    tag = "questions"
)]
pub async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(params): Query<ListQuestionsParams>,
) -> Result<impl IntoResponse, AppError> {
    let questions =
        repo::question::find_active(&pool, params.category_id, params.difficulty).await?;
    Ok(Json(questions))
}

/// Fetches one question with its full option set, correctness included.
#[utoipa::path(
    get,
    path = "/api/questions/{id}",
    params(
        ("id" = i64, Path, description = "Question id"),
    ),
    responses(
        (status = OK, body = QuestionDetail, description = "The question with its options"),
        (status = NOT_FOUND, description = "No such question"),
    ),
    tag = "questions"
)]
pub async fn get_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let detail = load_detail(&pool, id).await?;
    Ok(Json(detail))
}

/// Creates a question together with its options.
#[utoipa::path(
    post,
    path = "/api/questions",
    request_body = CreateQuestionRequest,
    responses(
        (status = CREATED, body = QuestionDetail, description = "Question created"),
        (status = BAD_REQUEST, description = "Validation failed or unknown category"),
    ),
    tag = "questions"
)]
pub async fn create_question(
    State(pool): State<SqlitePool>,
    Json(mut payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    // Sanitize free text before it is stored.
    payload.prompt = clean_html(&payload.prompt);
    payload.explanation = payload.explanation.as_deref().map(clean_html);
    for option in &mut payload.options {
        option.body = clean_html(&option.body);
    }

    let mut tx = pool.begin().await?;

    let question_id = repo::question::insert_with_options(&mut *tx, &payload)
        .await
        .map_err(|e| {
            if e.to_string().contains("FOREIGN KEY constraint") {
                AppError::BadRequest(format!(
                    "Category {} does not exist",
                    payload.category_id
                ))
            } else {
                tracing::error!("Failed to create question: {:?}", e);
                AppError::InternalServerError(e.to_string())
            }
        })?;

    tx.commit().await?;

    let detail = load_detail(&pool, question_id).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// Deletes a question unless a composed exam still references it.
#[utoipa::path(
    delete,
    path = "/api/questions/{id}",
    params(
        ("id" = i64, Path, description = "Question id"),
    ),
    responses(
        (status = NO_CONTENT, description = "Question deleted"),
        (status = NOT_FOUND, description = "No such question"),
        (status = CONFLICT, description = "An exam still references the question"),
    ),
    tag = "questions"
)]
pub async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if repo::question::is_exam_linked(&pool, id).await? {
        return Err(AppError::Conflict(
            "Question is part of a composed exam and cannot be deleted".to_string(),
        ));
    }

    let rows_affected = repo::question::delete(&pool, id).await.map_err(|e| {
        if e.to_string().contains("FOREIGN KEY constraint") {
            // Linked by an exam composed between the check above and now.
            AppError::Conflict(
                "Question is part of a composed exam and cannot be deleted".to_string(),
            )
        } else {
            tracing::error!("Failed to delete question: {:?}", e);
            AppError::InternalServerError(e.to_string())
        }
    })?;

    if rows_affected == 0 {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn load_detail(pool: &SqlitePool, id: i64) -> Result<QuestionDetail, AppError> {
    let question = repo::question::find_by_id(pool, id)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;
    let options = repo::question::options_for(pool, id).await?;

    Ok(QuestionDetail::from_parts(question, options))
}

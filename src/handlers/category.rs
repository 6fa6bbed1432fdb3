// src/handlers/category.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::category::{Category, CreateCategoryRequest},
    repo,
    utils::html::clean_html,
};

/// Lists every category.
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = OK, body = Vec<Category>, description = "All categories"),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let categories = repo::category::list_all(&pool).await?;
    Ok(Json(categories))
}

/// Creates a new category.
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = CREATED, body = Category, description = "Category created"),
        (status = BAD_REQUEST, description = "Validation failed"),
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let name = clean_html(&payload.name);
    let description = payload.description.as_deref().map(clean_html);

    let category = repo::category::insert(&pool, &name, description.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Failed to create category: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok((StatusCode::CREATED, Json(category)))
}

// src/handlers/seed.rs

use axum::{Json, extract::State, response::IntoResponse};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sqlx::SqlitePool;

use crate::{config::Config, error::AppError, seed};

/// Resets quiz content and loads the built-in demo dataset: the question
/// bank plus five composed exams. Development convenience endpoint.
#[utoipa::path(
    post,
    path = "/api/seed",
    responses(
        (status = OK, body = seed::SeedSummary, description = "What was created"),
    ),
    tag = "seed"
)]
pub async fn run_seed(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
) -> Result<impl IntoResponse, AppError> {
    let mut rng = StdRng::seed_from_u64(rand::random());
    let summary = seed::seed_demo_data(&pool, &config, &mut rng).await?;
    Ok(Json(summary))
}

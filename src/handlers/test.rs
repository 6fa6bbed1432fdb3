// src/handlers/test.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::IntoParams;

use crate::{
    config::DEFAULT_TEST_SIZE,
    error::AppError,
    models::question::{Difficulty, TestQuestion},
    repo,
    services::selection::{self, TestCriteria},
};

/// Query parameters for generating a random test.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GenerateTestParams {
    /// Number of questions to draw. Defaults to 10.
    #[serde(default = "default_count")]
    pub count: i64,
    pub difficulty: Option<Difficulty>,
}

fn default_count() -> i64 {
    DEFAULT_TEST_SIZE
}

/// Generates a random practice test for a category.
///
/// Each call draws freshly at random, so repeated calls return different
/// tests. The response carries no correctness markers; answers are checked
/// by POSTing the picks to the grading endpoint.
#[utoipa::path(
    get,
    path = "/api/tests/{category_id}",
    params(
        ("category_id" = i64, Path, description = "Category to draw from"),
        GenerateTestParams,
    ),
    responses(
        (status = OK, body = Vec<TestQuestion>, description = "The drawn test, in draw order"),
        (status = BAD_REQUEST, description = "Not enough questions, or bad count"),
        (status = NOT_FOUND, description = "No such category"),
    ),
    tag = "tests"
)]
pub async fn generate_test(
    State(pool): State<SqlitePool>,
    Path(category_id): Path<i64>,
    Query(params): Query<GenerateTestParams>,
) -> Result<impl IntoResponse, AppError> {
    if !repo::category::exists(&pool, category_id).await? {
        return Err(AppError::NotFound("Category not found".to_string()));
    }

    let criteria = TestCriteria {
        category_id,
        count: params.count,
        difficulty: params.difficulty,
    };

    // Per-request StdRng; ThreadRng is not Send across await points.
    let mut rng = StdRng::seed_from_u64(rand::random());
    let test = selection::select_test(&pool, &criteria, &mut rng).await?;

    Ok(Json(test))
}

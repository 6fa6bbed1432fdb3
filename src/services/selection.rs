// src/services/selection.rs

use rand::Rng;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::question::{Difficulty, TestQuestion};
use crate::repo;
use crate::services::sampling;

/// Criteria for a randomly generated practice test.
#[derive(Debug, Clone)]
pub struct TestCriteria {
    pub category_id: i64,
    pub count: i64,
    pub difficulty: Option<Difficulty>,
}

/// Draws a duplicate-free random test from the questions matching the
/// criteria. Unlike exam composition, a short pool is an error here: callers
/// asked for a test of a specific length and get exactly that, in draw order
/// and without correctness markers.
pub async fn select_test(
    pool: &SqlitePool,
    criteria: &TestCriteria,
    rng: &mut impl Rng,
) -> Result<Vec<TestQuestion>, AppError> {
    if criteria.count <= 0 {
        return Err(AppError::BadRequest(
            "count must be a positive integer".to_string(),
        ));
    }

    let eligible =
        repo::question::find_active(pool, Some(criteria.category_id), criteria.difficulty).await?;

    let requested = criteria.count as usize;
    if eligible.len() < requested {
        return Err(AppError::InsufficientQuestions {
            available: eligible.len(),
        });
    }

    let drawn = sampling::draw(rng, eligible, requested);
    let test = repo::question::load_public_views(pool, drawn).await?;

    Ok(test)
}

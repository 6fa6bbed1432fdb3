// src/services/composition.rs

use rand::Rng;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::exam::{ComposeExamRequest, ExamDetail};
use crate::repo;
use crate::services::sampling;

/// Composes and persists a new exam: draws up to `question_count` questions
/// from the candidate pool and stores them under dense positions 1..=K, in
/// draw order. A pool smaller than the target yields a shorter exam rather
/// than an error.
pub async fn compose_exam(
    pool: &SqlitePool,
    meta: &ComposeExamRequest,
    rng: &mut impl Rng,
) -> Result<ExamDetail, AppError> {
    if meta.name.trim().is_empty() {
        return Err(AppError::InvalidExamMetadata(
            "Exam name must not be empty".to_string(),
        ));
    }
    if meta.question_count <= 0 {
        return Err(AppError::InvalidExamMetadata(
            "question_count must be a positive integer".to_string(),
        ));
    }

    let candidates = repo::question::active_ids(pool, meta.question_pool.as_deref()).await?;
    let drawn = sampling::draw(rng, candidates, meta.question_count as usize);

    let mut tx = pool.begin().await?;

    let exam = repo::exam::insert(&mut *tx, meta).await.map_err(|e| {
        tracing::error!("Failed to insert exam: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    for (index, question_id) in drawn.iter().enumerate() {
        repo::exam::insert_link(&mut *tx, exam.id, *question_id, (index + 1) as i64)
            .await
            .map_err(|e| {
                tracing::error!("Failed to link question {} to exam {}: {:?}", question_id, exam.id, e);
                AppError::InternalServerError(e.to_string())
            })?;
    }

    tx.commit().await?;

    tracing::info!(
        "Composed exam {} ('{}') with {} of {} requested questions",
        exam.id,
        exam.name,
        drawn.len(),
        meta.question_count
    );

    // Read back through the persisted order so the response is exactly what
    // later reads will return.
    let questions = repo::exam::questions_in_order(pool, exam.id).await?;
    let views = repo::question::load_public_views(pool, questions).await?;

    Ok(ExamDetail::from_parts(exam, views))
}

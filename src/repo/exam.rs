// src/repo/exam.rs

use sqlx::{SqliteConnection, SqlitePool};

use crate::models::exam::{ComposeExamRequest, Exam};
use crate::models::question::Question;

pub async fn list_active(pool: &SqlitePool) -> Result<Vec<Exam>, sqlx::Error> {
    sqlx::query_as::<_, Exam>(
        r#"
        SELECT id, name, description, duration_minutes, question_count,
               primary_category_id, is_active, created_at
        FROM exams
        WHERE is_active = TRUE
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Exam>, sqlx::Error> {
    sqlx::query_as::<_, Exam>(
        r#"
        SELECT id, name, description, duration_minutes, question_count,
               primary_category_id, is_active, created_at
        FROM exams
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Inserts the exam row. `question_count` stores the composition target even
/// when the actual draw came up short.
pub async fn insert(
    conn: &mut SqliteConnection,
    meta: &ComposeExamRequest,
) -> Result<Exam, sqlx::Error> {
    sqlx::query_as::<_, Exam>(
        r#"
        INSERT INTO exams (name, description, duration_minutes, question_count, primary_category_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, description, duration_minutes, question_count,
                  primary_category_id, is_active, created_at
        "#,
    )
    .bind(&meta.name)
    .bind(&meta.description)
    .bind(meta.duration_minutes)
    .bind(meta.question_count)
    .bind(meta.primary_category_id)
    .fetch_one(&mut *conn)
    .await
}

/// Links one question into an exam at the given 1-based position.
pub async fn insert_link(
    conn: &mut SqliteConnection,
    exam_id: i64,
    question_id: i64,
    position: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO exam_questions (exam_id, question_id, position)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(exam_id)
    .bind(question_id)
    .bind(position)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// The exam's questions in persisted composition order.
pub async fn questions_in_order(
    pool: &SqlitePool,
    exam_id: i64,
) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT q.id, q.prompt, q.image_url, q.explanation, q.category_id,
               q.difficulty, q.is_active, q.created_at
        FROM exam_questions eq
        JOIN questions q ON q.id = eq.question_id
        WHERE eq.exam_id = $1
        ORDER BY eq.position
        "#,
    )
    .bind(exam_id)
    .fetch_all(pool)
    .await
}

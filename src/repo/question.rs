// src/repo/question.rs

use std::collections::HashMap;

use sqlx::{Sqlite, SqliteConnection, SqlitePool};

use crate::models::question::{
    AnswerOption, CreateQuestionRequest, Difficulty, PublicAnswerOption, Question, TestQuestion,
};

/// Active questions matching the optional category and difficulty filters.
pub async fn find_active(
    pool: &SqlitePool,
    category_id: Option<i64>,
    difficulty: Option<Difficulty>,
) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, prompt, image_url, explanation, category_id, difficulty, is_active, created_at
        FROM questions
        WHERE is_active = TRUE
          AND ($1 IS NULL OR category_id = $1)
          AND ($2 IS NULL OR difficulty = $2)
        ORDER BY id
        "#,
    )
    .bind(category_id)
    .bind(difficulty)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, prompt, image_url, explanation, category_id, difficulty, is_active, created_at
        FROM questions
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Keyed lookup of several questions at once.
pub async fn find_by_ids(
    pool: &SqlitePool,
    ids: &[i64],
) -> Result<HashMap<i64, Question>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut query_builder = sqlx::QueryBuilder::<Sqlite>::new(
        "SELECT id, prompt, image_url, explanation, category_id, difficulty, is_active, created_at
         FROM questions WHERE id IN (",
    );
    let mut separated = query_builder.separated(",");
    for id in ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(")");

    let questions: Vec<Question> = query_builder.build_query_as().fetch_all(pool).await?;

    Ok(questions.into_iter().map(|q| (q.id, q)).collect())
}

/// Ids of all active questions, optionally restricted to an explicit
/// candidate list. Unknown and inactive candidates are dropped silently.
pub async fn active_ids(
    pool: &SqlitePool,
    candidates: Option<&[i64]>,
) -> Result<Vec<i64>, sqlx::Error> {
    match candidates {
        None => {
            sqlx::query_scalar::<_, i64>(
                "SELECT id FROM questions WHERE is_active = TRUE ORDER BY id",
            )
            .fetch_all(pool)
            .await
        }
        Some([]) => Ok(Vec::new()),
        Some(ids) => {
            let mut query_builder = sqlx::QueryBuilder::<Sqlite>::new(
                "SELECT id FROM questions WHERE is_active = TRUE AND id IN (",
            );
            let mut separated = query_builder.separated(",");
            for id in ids {
                separated.push_bind(id);
            }
            separated.push_unseparated(") ORDER BY id");

            query_builder.build_query_scalar().fetch_all(pool).await
        }
    }
}

/// Full option rows of one question, in display order.
pub async fn options_for(
    pool: &SqlitePool,
    question_id: i64,
) -> Result<Vec<AnswerOption>, sqlx::Error> {
    sqlx::query_as::<_, AnswerOption>(
        r#"
        SELECT id, question_id, body, is_correct, display_order
        FROM answer_options
        WHERE question_id = $1
        ORDER BY display_order, id
        "#,
    )
    .bind(question_id)
    .fetch_all(pool)
    .await
}

/// Helper struct for grouping public option rows by question.
#[derive(sqlx::FromRow)]
struct PublicOptionRow {
    id: i64,
    question_id: i64,
    body: String,
    display_order: i64,
}

/// Public (correctness-free) options for a set of questions, grouped by
/// question id and sorted by display order.
pub async fn public_options_for(
    pool: &SqlitePool,
    question_ids: &[i64],
) -> Result<HashMap<i64, Vec<PublicAnswerOption>>, sqlx::Error> {
    if question_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut query_builder = sqlx::QueryBuilder::<Sqlite>::new(
        "SELECT id, question_id, body, display_order FROM answer_options WHERE question_id IN (",
    );
    let mut separated = query_builder.separated(",");
    for id in question_ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(") ORDER BY question_id, display_order, id");

    let rows: Vec<PublicOptionRow> = query_builder.build_query_as().fetch_all(pool).await?;

    let mut grouped: HashMap<i64, Vec<PublicAnswerOption>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.question_id)
            .or_default()
            .push(PublicAnswerOption {
                id: row.id,
                body: row.body,
                display_order: row.display_order,
            });
    }

    Ok(grouped)
}

/// The canonical correct option per question. Schema-level enforcement keeps
/// this unique; should legacy data ever carry several, the lowest option id
/// wins deterministically.
pub async fn correct_options_for(
    pool: &SqlitePool,
    question_ids: &[i64],
) -> Result<HashMap<i64, i64>, sqlx::Error> {
    if question_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut query_builder = sqlx::QueryBuilder::<Sqlite>::new(
        "SELECT question_id, id FROM answer_options WHERE is_correct = TRUE AND question_id IN (",
    );
    let mut separated = query_builder.separated(",");
    for id in question_ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(") ORDER BY question_id, id");

    let rows: Vec<(i64, i64)> = query_builder.build_query_as().fetch_all(pool).await?;

    let mut correct = HashMap::new();
    for (question_id, option_id) in rows {
        correct.entry(question_id).or_insert(option_id);
    }

    Ok(correct)
}

/// Turns question rows into test-taker views, attaching public options.
/// Preserves the order of `questions`.
pub async fn load_public_views(
    pool: &SqlitePool,
    questions: Vec<Question>,
) -> Result<Vec<TestQuestion>, sqlx::Error> {
    let ids: Vec<i64> = questions.iter().map(|q| q.id).collect();
    let mut options = public_options_for(pool, &ids).await?;

    Ok(questions
        .into_iter()
        .map(|question| {
            let opts = options.remove(&question.id).unwrap_or_default();
            TestQuestion::from_parts(question, opts)
        })
        .collect())
}

/// Inserts a question and its options as one unit. Runs inside the caller's
/// transaction.
pub async fn insert_with_options(
    conn: &mut SqliteConnection,
    req: &CreateQuestionRequest,
) -> Result<i64, sqlx::Error> {
    let question_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO questions (prompt, image_url, explanation, category_id, difficulty, is_active)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(&req.prompt)
    .bind(&req.image_url)
    .bind(&req.explanation)
    .bind(req.category_id)
    .bind(req.difficulty)
    .bind(req.is_active)
    .fetch_one(&mut *conn)
    .await?;

    for option in &req.options {
        sqlx::query(
            r#"
            INSERT INTO answer_options (question_id, body, is_correct, display_order)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(question_id)
        .bind(&option.body)
        .bind(option.is_correct)
        .bind(option.display_order)
        .execute(&mut *conn)
        .await?;
    }

    Ok(question_id)
}

/// True when any composed exam still references the question.
pub async fn is_exam_linked(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM exam_questions WHERE question_id = $1)",
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Deletes a question; its options cascade. Returns the affected row count.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM questions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

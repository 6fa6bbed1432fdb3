// src/seed.rs
//
// Demo dataset: the embedded driving-theory question bank plus five composed
// exams. Seeding is a development reset: it wipes questions, options and
// exams before re-inserting. Existing categories are kept as-is.

use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::config::{Config, DEFAULT_EXAM_DURATION_MIN, DEFAULT_EXAM_SIZE};
use crate::error::AppError;
use crate::models::category::Category;
use crate::models::exam::ComposeExamRequest;
use crate::models::question::{CreateAnswerOptionRequest, CreateQuestionRequest, Difficulty};
use crate::repo;
use crate::services::composition;

const QUESTION_BANK: &str = include_str!("../data/seed_questions.json");

/// One entry of the embedded question bank. `category_index` is 1-based into
/// the configured seed category list.
#[derive(Debug, Deserialize)]
struct SeedQuestion {
    prompt: String,
    explanation: Option<String>,
    category_index: usize,
    difficulty: Difficulty,
    options: Vec<SeedOption>,
}

#[derive(Debug, Deserialize)]
struct SeedOption {
    body: String,
    is_correct: bool,
    display_order: i64,
}

/// Counts reported after a seeding run.
#[derive(Debug, Serialize, ToSchema)]
pub struct SeedSummary {
    pub categories: usize,
    pub questions: usize,
    pub exams: usize,
}

/// Loads the demo dataset. Returns what was created.
pub async fn seed_demo_data(
    pool: &SqlitePool,
    config: &Config,
    rng: &mut impl Rng,
) -> Result<SeedSummary, AppError> {
    let bank: Vec<SeedQuestion> = serde_json::from_str(QUESTION_BANK)?;

    // Wipe quiz content. Link rows go first so the question deletes pass
    // their foreign key checks.
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM exam_questions")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM exams").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM answer_options")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM questions").execute(&mut *tx).await?;
    tx.commit().await?;

    let mut categories = repo::category::list_all(pool).await?;
    if categories.is_empty() {
        for seed in &config.seed_categories {
            let created =
                repo::category::insert(pool, &seed.name, seed.description.as_deref()).await?;
            categories.push(created);
        }
        tracing::info!("Created {} seed categories", categories.len());
    }

    let mut question_count = 0;
    for entry in bank {
        let category = categories
            .get(entry.category_index.saturating_sub(1))
            .ok_or_else(|| {
                AppError::InternalServerError(format!(
                    "Seed bank references category index {} but only {} categories exist",
                    entry.category_index,
                    categories.len()
                ))
            })?;

        let request = CreateQuestionRequest {
            prompt: entry.prompt,
            image_url: None,
            explanation: entry.explanation,
            category_id: category.id,
            difficulty: entry.difficulty,
            is_active: true,
            options: entry
                .options
                .into_iter()
                .map(|option| CreateAnswerOptionRequest {
                    body: option.body,
                    is_correct: option.is_correct,
                    display_order: option.display_order,
                })
                .collect(),
        };

        let mut tx = pool.begin().await?;
        repo::question::insert_with_options(&mut *tx, &request).await?;
        tx.commit().await?;
        question_count += 1;
    }

    // Five demo exams drawn from the full bank. With a bank smaller than the
    // default exam size the draws come up short, which composition tolerates.
    let exams = demo_exams(&categories);
    let exam_count = exams.len();
    for meta in &exams {
        composition::compose_exam(pool, meta, rng).await?;
    }

    tracing::info!(
        "Seeded {} questions and {} exams across {} categories",
        question_count,
        exam_count,
        categories.len()
    );

    Ok(SeedSummary {
        categories: categories.len(),
        questions: question_count,
        exams: exam_count,
    })
}

fn demo_exams(categories: &[Category]) -> Vec<ComposeExamRequest> {
    [
        (
            "Theory Exam 1",
            "First official theory exam with mixed questions",
            1,
        ),
        (
            "Theory Exam 2",
            "Second exam with an emphasis on traffic signs",
            0,
        ),
        ("Theory Exam 3", "Third exam focused on road safety", 2),
        (
            "Theory Exam 4",
            "Fourth exam with mechanics and maintenance questions",
            3,
        ),
        ("Theory Exam 5", "Fifth exam covering every category", 1),
    ]
    .into_iter()
    .map(|(name, description, category_index)| ComposeExamRequest {
        name: name.to_string(),
        description: Some(description.to_string()),
        duration_minutes: DEFAULT_EXAM_DURATION_MIN,
        question_count: DEFAULT_EXAM_SIZE,
        primary_category_id: categories.get(category_index).map(|c| c.id),
        question_pool: None,
    })
    .collect()
}

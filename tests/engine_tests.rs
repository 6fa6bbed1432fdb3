// tests/engine_tests.rs
//
// Exercises the selection, composition and grading services directly against
// an in-memory database, with seeded RNGs where determinism matters.

use std::collections::HashSet;

use autotest::error::AppError;
use autotest::models::exam::ComposeExamRequest;
use autotest::models::grading::SubmittedAnswer;
use autotest::models::question::Difficulty;
use autotest::repo;
use autotest::services::selection::{self, TestCriteria};
use autotest::services::{composition, grading};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    pool
}

async fn insert_category(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Inserts a question with two options; the first one is correct.
/// Returns (question_id, correct_option_id).
async fn insert_question(
    pool: &SqlitePool,
    category_id: i64,
    difficulty: &str,
    is_active: bool,
) -> (i64, i64) {
    let question_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO questions (prompt, category_id, difficulty, is_active)
        VALUES ('Right of way?', $1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(category_id)
    .bind(difficulty)
    .bind(is_active)
    .fetch_one(pool)
    .await
    .unwrap();

    let correct_option_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO answer_options (question_id, body, is_correct, display_order)
        VALUES ($1, 'Yield', TRUE, 1)
        RETURNING id
        "#,
    )
    .bind(question_id)
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query(
        r#"
        INSERT INTO answer_options (question_id, body, is_correct, display_order)
        VALUES ($1, 'Proceed', FALSE, 2)
        "#,
    )
    .bind(question_id)
    .execute(pool)
    .await
    .unwrap();

    (question_id, correct_option_id)
}

#[tokio::test]
async fn selector_draws_the_requested_count_without_duplicates() {
    let pool = test_pool().await;
    let category_id = insert_category(&pool, "Signs").await;

    let mut eligible = HashSet::new();
    for _ in 0..8 {
        let (id, _) = insert_question(&pool, category_id, "medium", true).await;
        eligible.insert(id);
    }

    let criteria = TestCriteria {
        category_id,
        count: 5,
        difficulty: None,
    };
    let mut rng = StdRng::seed_from_u64(1);

    let test = selection::select_test(&pool, &criteria, &mut rng)
        .await
        .unwrap();

    assert_eq!(test.len(), 5);
    let drawn: HashSet<i64> = test.iter().map(|q| q.id).collect();
    assert_eq!(drawn.len(), 5);
    assert!(drawn.is_subset(&eligible));
}

#[tokio::test]
async fn selector_skips_inactive_and_foreign_questions() {
    let pool = test_pool().await;
    let category_id = insert_category(&pool, "Signs").await;
    let other_category = insert_category(&pool, "Rules").await;

    let (eligible_id, _) = insert_question(&pool, category_id, "medium", true).await;
    insert_question(&pool, category_id, "medium", false).await; // Inactive
    insert_question(&pool, other_category, "medium", true).await; // Other category

    let criteria = TestCriteria {
        category_id,
        count: 1,
        difficulty: None,
    };
    let mut rng = StdRng::seed_from_u64(1);

    let test = selection::select_test(&pool, &criteria, &mut rng)
        .await
        .unwrap();

    assert_eq!(test.len(), 1);
    assert_eq!(test[0].id, eligible_id);
}

#[tokio::test]
async fn selector_honors_the_difficulty_filter() {
    let pool = test_pool().await;
    let category_id = insert_category(&pool, "Signs").await;

    let (hard_id, _) = insert_question(&pool, category_id, "hard", true).await;
    insert_question(&pool, category_id, "easy", true).await;
    insert_question(&pool, category_id, "medium", true).await;

    let criteria = TestCriteria {
        category_id,
        count: 1,
        difficulty: Some(Difficulty::Hard),
    };
    let mut rng = StdRng::seed_from_u64(1);

    let test = selection::select_test(&pool, &criteria, &mut rng)
        .await
        .unwrap();

    assert_eq!(test.len(), 1);
    assert_eq!(test[0].id, hard_id);
}

#[tokio::test]
async fn selector_reports_available_count_when_pool_is_short() {
    let pool = test_pool().await;
    let category_id = insert_category(&pool, "Signs").await;
    for _ in 0..3 {
        insert_question(&pool, category_id, "medium", true).await;
    }

    let criteria = TestCriteria {
        category_id,
        count: 10,
        difficulty: None,
    };
    let mut rng = StdRng::seed_from_u64(1);

    let err = selection::select_test(&pool, &criteria, &mut rng)
        .await
        .unwrap_err();

    match err {
        AppError::InsufficientQuestions { available } => assert_eq!(available, 3),
        other => panic!("Expected InsufficientQuestions, got {:?}", other),
    }
}

#[tokio::test]
async fn selector_is_deterministic_for_a_fixed_seed() {
    let pool = test_pool().await;
    let category_id = insert_category(&pool, "Signs").await;
    for _ in 0..12 {
        insert_question(&pool, category_id, "medium", true).await;
    }

    let criteria = TestCriteria {
        category_id,
        count: 6,
        difficulty: None,
    };

    let mut first_rng = StdRng::seed_from_u64(99);
    let mut second_rng = StdRng::seed_from_u64(99);

    let first: Vec<i64> = selection::select_test(&pool, &criteria, &mut first_rng)
        .await
        .unwrap()
        .iter()
        .map(|q| q.id)
        .collect();
    let second: Vec<i64> = selection::select_test(&pool, &criteria, &mut second_rng)
        .await
        .unwrap()
        .iter()
        .map(|q| q.id)
        .collect();

    assert_eq!(first, second);
}

fn exam_request(name: &str, question_count: i64, question_pool: Option<Vec<i64>>) -> ComposeExamRequest {
    ComposeExamRequest {
        name: name.to_string(),
        description: None,
        duration_minutes: 30,
        question_count,
        primary_category_id: None,
        question_pool,
    }
}

#[tokio::test]
async fn composition_persists_a_dense_order_that_rereads_stably() {
    let pool = test_pool().await;
    let category_id = insert_category(&pool, "Rules").await;
    for _ in 0..10 {
        insert_question(&pool, category_id, "medium", true).await;
    }

    let mut rng = StdRng::seed_from_u64(5);
    let exam = composition::compose_exam(&pool, &exam_request("Mock", 6, None), &mut rng)
        .await
        .unwrap();

    assert_eq!(exam.questions.len(), 6);

    let positions: Vec<i64> = sqlx::query_scalar(
        "SELECT position FROM exam_questions WHERE exam_id = $1 ORDER BY position",
    )
    .bind(exam.id)
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(positions, (1..=6).collect::<Vec<i64>>());

    let response_order: Vec<i64> = exam.questions.iter().map(|q| q.id).collect();
    for _ in 0..2 {
        let reread: Vec<i64> = repo::exam::questions_in_order(&pool, exam.id)
            .await
            .unwrap()
            .iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(reread, response_order);
    }
}

#[tokio::test]
async fn composition_caps_the_draw_at_the_pool_size() {
    let pool = test_pool().await;
    let category_id = insert_category(&pool, "Rules").await;
    for _ in 0..4 {
        insert_question(&pool, category_id, "medium", true).await;
    }

    let mut rng = StdRng::seed_from_u64(5);
    let exam = composition::compose_exam(&pool, &exam_request("Short", 30, None), &mut rng)
        .await
        .unwrap();

    // Target is persisted, the actual composition is the whole pool
    assert_eq!(exam.question_count, 30);
    assert_eq!(exam.questions.len(), 4);
}

#[tokio::test]
async fn composition_draws_only_from_an_explicit_pool() {
    let pool = test_pool().await;
    let category_id = insert_category(&pool, "Rules").await;

    let mut all_ids = Vec::new();
    for _ in 0..8 {
        let (id, _) = insert_question(&pool, category_id, "medium", true).await;
        all_ids.push(id);
    }
    let allowed: HashSet<i64> = all_ids[..3].iter().copied().collect();

    let mut rng = StdRng::seed_from_u64(5);
    let exam = composition::compose_exam(
        &pool,
        &exam_request("Subset", 30, Some(all_ids[..3].to_vec())),
        &mut rng,
    )
    .await
    .unwrap();

    assert_eq!(exam.questions.len(), 3);
    assert!(exam.questions.iter().all(|q| allowed.contains(&q.id)));
}

#[tokio::test]
async fn composition_rejects_a_blank_name_without_persisting() {
    let pool = test_pool().await;

    let mut rng = StdRng::seed_from_u64(5);
    let err = composition::compose_exam(&pool, &exam_request("  ", 10, None), &mut rng)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidExamMetadata(_)));

    let exam_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM exams")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(exam_count, 0);
}

#[tokio::test]
async fn grading_the_same_submission_twice_gives_identical_results() {
    let pool = test_pool().await;
    let category_id = insert_category(&pool, "Safety").await;

    let mut answers = Vec::new();
    for i in 0..6 {
        let (question_id, correct_option_id) =
            insert_question(&pool, category_id, "medium", true).await;
        answers.push(SubmittedAnswer {
            question_id,
            selected_option_id: if i % 2 == 0 {
                correct_option_id
            } else {
                correct_option_id + 1 // Wrong
            },
        });
    }

    let first = grading::grade(&pool, &answers, 70.0).await.unwrap();
    let second = grading::grade(&pool, &answers, 70.0).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.correct_count, 3);
    assert_eq!(first.percentage, 50.0);
    assert!(!first.passed);
}

#[tokio::test]
async fn grading_reviews_unknown_questions_without_failing() {
    let pool = test_pool().await;

    let answers = vec![SubmittedAnswer {
        question_id: 424242,
        selected_option_id: 1,
    }];

    let result = grading::grade(&pool, &answers, 70.0).await.unwrap();

    assert_eq!(result.total_questions, 1);
    assert_eq!(result.correct_count, 0);
    assert_eq!(result.results[0].correct_option_id, None);
    assert!(!result.results[0].is_correct);
}

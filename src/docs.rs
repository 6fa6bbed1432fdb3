// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models::category::{Category, CreateCategoryRequest};
use crate::models::exam::{ComposeExamRequest, Exam, ExamDetail};
use crate::models::grading::{AnswerReview, GradeRequest, SubmittedAnswer, TestResult};
use crate::models::question::{
    AnswerOption, CreateAnswerOptionRequest, CreateQuestionRequest, Difficulty, PublicAnswerOption,
    Question, QuestionDetail, TestQuestion,
};
use crate::seed::SeedSummary;

/// The OpenAPI document, served at /api-docs/openapi.json.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "AutoTest API",
        description = "Driving-theory test generation, exam composition and answer grading",
        version = "1.0.0"
    ),
    paths(
        handlers::meta::root,
        handlers::meta::health,
        handlers::category::list_categories,
        handlers::category::create_category,
        handlers::question::list_questions,
        handlers::question::get_question,
        handlers::question::create_question,
        handlers::question::delete_question,
        handlers::test::generate_test,
        handlers::grading::grade_submission,
        handlers::exam::list_exams,
        handlers::exam::get_exam,
        handlers::exam::create_exam,
        handlers::seed::run_seed,
    ),
    components(schemas(
        Category,
        CreateCategoryRequest,
        Question,
        QuestionDetail,
        AnswerOption,
        PublicAnswerOption,
        TestQuestion,
        CreateQuestionRequest,
        CreateAnswerOptionRequest,
        Difficulty,
        Exam,
        ExamDetail,
        ComposeExamRequest,
        GradeRequest,
        SubmittedAnswer,
        AnswerReview,
        TestResult,
        SeedSummary,
    )),
    tags(
        (name = "meta", description = "Service status"),
        (name = "categories", description = "Question categories"),
        (name = "questions", description = "Question bank management"),
        (name = "tests", description = "Random practice tests"),
        (name = "grading", description = "Answer checking and scoring"),
        (name = "exams", description = "Fixed-composition exams"),
        (name = "seed", description = "Demo data"),
    )
)]
pub struct ApiDoc;

// src/routes.rs

use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    docs::ApiDoc,
    handlers::{category, exam, grading, meta, question, seed, test},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Nests all sub-routers (categories, questions, tests, exams).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool + Config).
pub fn create_router(state: AppState) -> Router {
    // Wide-open CORS: browser clients are served from arbitrary origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let category_routes = Router::new().route(
        "/",
        get(category::list_categories).post(category::create_category),
    );

    let question_routes = Router::new()
        .route(
            "/",
            get(question::list_questions).post(question::create_question),
        )
        .route(
            "/{id}",
            get(question::get_question).delete(question::delete_question),
        );

    let test_routes = Router::new().route("/{category_id}", get(test::generate_test));

    let exam_routes = Router::new()
        .route("/", get(exam::list_exams).post(exam::create_exam))
        .route("/{id}", get(exam::get_exam));

    Router::new()
        .route("/", get(meta::root))
        .route("/health", get(meta::health))
        .nest("/api/categories", category_routes)
        .nest("/api/questions", question_routes)
        .nest("/api/tests", test_routes)
        .route("/api/grade", post(grading::grade_submission))
        .nest("/api/exams", exam_routes)
        .route("/api/seed", post(seed::run_seed))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

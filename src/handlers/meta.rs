// src/handlers/meta.rs

use axum::{Json, response::IntoResponse};

/// Service banner for the API root.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = OK, description = "Service banner"),
    ),
    tag = "meta"
)]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "AutoTest API is running!",
        "status": "ok"
    }))
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = OK, description = "Service is healthy"),
    ),
    tag = "meta"
)]
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

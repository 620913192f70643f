//! HTTP gateway (axum) for question lookup and answer evaluation.
//!
//! This module is primarily used by the `grader` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handler::{evaluate_handler, list_questions_handler, question_by_id_handler};
pub use state::{HandlerState, SharedEmbedder};

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/questions", get(list_questions_handler))
        .route("/questions/{id}", get(question_by_id_handler))
        .route("/evaluate", post(evaluate_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub questions: &'static str,
    pub embedding: &'static str,
    pub embedder_mode: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let questions_status = if state.questions.path().is_file() {
        "ready"
    } else {
        "missing"
    };

    // The model loads on the first evaluation request; "pending" here is
    // the normal state of a freshly started server, not a failure.
    let embedding_status = if state.embedder.is_loaded() {
        "ready"
    } else {
        "pending"
    };
    let embedder_mode = if state.embedder.is_stub() { "stub" } else { "real" };

    let components = ComponentStatus {
        http: "ready",
        questions: questions_status,
        embedding: embedding_status,
        embedder_mode,
    };

    (
        StatusCode::OK,
        Json(ReadyResponse {
            status: "ok",
            components,
        }),
    )
        .into_response()
}

//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{ErrorResponse, QueuedResponse, QuizAnswerRequest, TextRequest};
use super::AppState;
use crate::runtime::RuntimeClosed;
use crate::state_machine::{ChatView, Event};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Transcript and mode
        .route("/api/chat", get(get_chat))
        .route("/api/chat/stream", get(stream_chat))
        // User actions
        .route("/api/chat/submit", post(submit))
        .route("/api/chat/suggestion", post(select_suggestion))
        .route("/api/chat/quiz-answer", post(answer_quiz))
        .route("/api/chat/retry", post(retry))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Reads
// ============================================================

async fn get_chat(State(state): State<AppState>) -> Json<ChatView> {
    Json(state.chat.snapshot())
}

async fn stream_chat(State(state): State<AppState>) -> impl IntoResponse {
    sse_stream(state.chat.subscribe())
}

async fn get_version() -> &'static str {
    concat!("amr-steward ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Actions
// ============================================================

// Actions the coordinator ignores still answer `queued`; only a dead
// runtime is an error.

async fn submit(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    queue(&state, Event::Submit { text: req.text }).await
}

async fn select_suggestion(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    queue(&state, Event::SelectSuggestion { text: req.text }).await
}

async fn answer_quiz(
    State(state): State<AppState>,
    Json(req): Json<QuizAnswerRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    queue(
        &state,
        Event::SelectQuizOption {
            message_id: req.message_id,
            option: req.option,
        },
    )
    .await
}

async fn retry(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    queue(&state, Event::Retry { text: req.text }).await
}

async fn queue(state: &AppState, event: Event) -> Result<Json<QueuedResponse>, AppError> {
    state.chat.dispatch(event).await?;
    Ok(Json(QueuedResponse { queued: true }))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    Unavailable(String),
}

impl From<RuntimeClosed> for AppError {
    fn from(e: RuntimeClosed) -> Self {
        AppError::Unavailable(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        tracing::error!(status = %status, error = %message, "Request failed");
        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}

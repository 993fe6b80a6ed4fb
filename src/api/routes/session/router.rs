//! Router for the chat session API

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    routing::{get, post, put},
};

use super::public;
use crate::api::state::AppState;
use crate::session::SessionView;

type SharedState = Arc<AppState>;

/// Get the current session snapshot for rendering
async fn session_view(State(state): State<SharedState>) -> axum::Json<SessionView> {
    axum::Json(state.coordinator.snapshot().await)
}

/// Submit the next user message and respond with the session after the
/// request resolves. While it is in flight, concurrent reads of the
/// session observe the sending status and further submissions are
/// ignored.
async fn submit_message(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::MessageRequest>,
) -> axum::Json<SessionView> {
    let view = state.coordinator.submit(&payload.message).await;
    axum::Json(view)
}

/// Replace the system instruction used for subsequent messages
async fn update_system_instruction(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::SystemInstructionRequest>,
) -> axum::Json<SessionView> {
    let view = state
        .coordinator
        .update_system_instruction(&payload.instruction)
        .await;
    axum::Json(view)
}

/// Track the content of the input box
async fn update_pending_input(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::PendingInputRequest>,
) -> axum::Json<SessionView> {
    let view = state
        .coordinator
        .update_pending_input(&payload.input)
        .await;
    axum::Json(view)
}

/// Create the session router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(session_view))
        .route("/message", post(submit_message))
        .route("/system", put(update_system_instruction))
        .route("/input", put(update_pending_input))
}

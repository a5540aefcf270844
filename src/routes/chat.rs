use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let reply = state.relay.handle(&payload.prompt).await?;

    Ok(Json(ChatResponse { reply }))
}

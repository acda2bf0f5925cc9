//! Chat turn and reset endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use easel_core::session::SessionKey;

/// Request body for a chat turn.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Response body for a chat turn.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub image: Option<String>,
}

/// Response body for a reset.
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub status: String,
}

/// Run one chat turn.
/// POST /chat
pub async fn chat(
    State(state): State<AppState>,
    Extension(session): Extension<SessionKey>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatResponse>> {
    let message = match payload {
        Ok(Json(request)) => request.message.unwrap_or_default(),
        Err(rejection) => {
            return Err(ApiError::bad_request("Message is required")
                .with_details(rejection.body_text()))
        }
    };

    match state.orchestrator.handle_turn(&session, &message).await {
        Ok(reply) => Ok(Json(ChatResponse {
            response: reply.text,
            image: reply.image.map(|image| image.into_inner()),
        })),
        Err(err) if err.is_validation() => Err(ApiError::from(err)),
        Err(err) => {
            error!(
                session = %session,
                code = err.code().as_str(),
                error = %err,
                "Chat turn failed"
            );
            Err(ApiError::processing(&err, state.expose_error_details()))
        }
    }
}

/// Start a new conversation for the session.
/// POST /reset
pub async fn reset(
    State(state): State<AppState>,
    Extension(session): Extension<SessionKey>,
) -> ApiResult<Json<ResetResponse>> {
    state.orchestrator.reset(&session).await?;

    Ok(Json(ResetResponse {
        status: "Conversation reset".to_string(),
    }))
}

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::services::conversation;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, rename = "userLang")]
    pub user_lang: String,
    #[serde(default, rename = "userEmail")]
    pub user_email: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    // The credential is loaded fresh on every chat request; without it the
    // whole assistant is unusable and the user is told to run setup.
    let credential = state
        .credentials
        .load()
        .await
        .map_err(|e| AppError::Calendar(e.to_string()))?;
    if credential.is_none() {
        return Err(AppError::MissingCredential);
    }

    let session_key = if req.user_email.trim().is_empty() {
        addr.ip().to_string()
    } else {
        req.user_email.trim().to_string()
    };

    let reply =
        conversation::process_message(&state, &session_key, &req.message, &req.user_lang).await?;

    Ok(Json(ChatResponse { reply }))
}

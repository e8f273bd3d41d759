use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;

use crate::errors::AppError;
use crate::services::calendar::oauth;
use crate::state::AppState;

// GET /setup/google
pub async fn setup_google(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::temporary(&oauth::consent_url(&state.config))
}

#[derive(Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
}

// GET /auth/google/callback?code=...
pub async fn google_callback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CallbackQuery>,
) -> Result<Html<&'static str>, AppError> {
    let code = query
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("missing authorization code".to_string()))?;

    let client = reqwest::Client::new();
    let token = oauth::exchange_code(&client, &state.config, code)
        .await
        .map_err(|e| AppError::Calendar(e.to_string()))?;

    state
        .credentials
        .save(&token)
        .await
        .map_err(|e| AppError::Calendar(e.to_string()))?;

    tracing::info!("Google calendar connected");

    Ok(Html(
        "<h2>Kalender erfolgreich verbunden! Der Assistent ist einsatzbereit.</h2>",
    ))
}

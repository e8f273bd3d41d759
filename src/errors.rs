use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("bot is not connected; complete Google setup at /setup/google first")]
    MissingCredential,

    #[error("calendar error: {0}")]
    Calendar(String),

    #[error("AI provider error: {0}")]
    Ai(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingCredential | AppError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            // Upstream detail stays in the log; the caller gets a generic message.
            AppError::Calendar(_) | AppError::Ai(_) => (
                StatusCode::BAD_GATEWAY,
                "The booking assistant is temporarily unavailable. Please try again later."
                    .to_string(),
            ),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}

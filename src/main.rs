use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use terminbot::config::AppConfig;
use terminbot::handlers;
use terminbot::services::ai::openai::OpenAiProvider;
use terminbot::services::calendar::google::GoogleCalendarProvider;
use terminbot::services::calendar::oauth::{CredentialStore, FileTokenStore};
use terminbot::services::session::SessionStore;
use terminbot::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    anyhow::ensure!(
        !config.google_client_id.is_empty(),
        "GOOGLE_CLIENT_ID must be set"
    );
    anyhow::ensure!(
        !config.google_client_secret.is_empty(),
        "GOOGLE_CLIENT_SECRET must be set"
    );
    anyhow::ensure!(
        !config.google_redirect_uri.is_empty(),
        "GOOGLE_REDIRECT_URI must be set"
    );
    anyhow::ensure!(
        !config.openai_api_key.is_empty(),
        "OPENAI_API_KEY must be set"
    );

    let credentials: Arc<dyn CredentialStore> =
        Arc::new(FileTokenStore::new(config.token_file.clone()));
    let calendar = GoogleCalendarProvider::new(config.clone(), Arc::clone(&credentials));
    let llm = OpenAiProvider::new(config.openai_api_key.clone(), config.openai_model.clone());

    let state = Arc::new(AppState {
        config: config.clone(),
        sessions: SessionStore::new(),
        credentials,
        calendar: Box::new(calendar),
        llm: Box::new(llm),
    });

    let cors = if config.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let app = Router::new()
        .route("/", get(handlers::widget::index_page))
        .route("/widget.js", get(handlers::widget::widget_js))
        .route("/health", get(handlers::health::health))
        .route("/chat", post(handlers::chat::chat))
        .route("/setup/google", get(handlers::oauth::setup_google))
        .route("/auth/google/callback", get(handlers::oauth::google_callback))
        .route("/api/calendar/upcoming", get(handlers::calendar::upcoming))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

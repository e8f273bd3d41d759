//! Google OAuth: consent URL, code exchange, token refresh, and the
//! credential store the calendar gateway reads on every call.

use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::errors::AppError;

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/calendar",
    "https://www.googleapis.com/auth/calendar.events",
    "https://www.googleapis.com/auth/userinfo.email",
    "openid",
];

/// Refresh this long before the recorded expiry to absorb clock skew.
const EXPIRY_MARGIN_MS: i64 = 60_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Expiry of the access token, epoch milliseconds.
    pub expiry_date: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl GoogleToken {
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.expiry_date
            .map(|expiry| expiry - EXPIRY_MARGIN_MS <= now_ms)
            .unwrap_or(false)
    }
}

/// Storage for the single authorized credential. Loaded fresh on every
/// calendar call so the storage medium is swappable without touching the
/// booking logic.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load(&self) -> anyhow::Result<Option<GoogleToken>>;
    async fn save(&self, token: &GoogleToken) -> anyhow::Result<()>;
}

/// Credential persisted as a JSON file next to the server.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CredentialStore for FileTokenStore {
    async fn load(&self) -> anyhow::Result<Option<GoogleToken>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path).context("failed to read token file")?;
        let token = serde_json::from_str(&raw).context("failed to parse token file")?;
        Ok(Some(token))
    }

    async fn save(&self, token: &GoogleToken) -> anyhow::Result<()> {
        let raw = serde_json::to_string_pretty(token).context("failed to serialize token")?;
        std::fs::write(&self.path, raw).context("failed to write token file")?;
        Ok(())
    }
}

/// Consent-screen URL requesting offline calendar access.
pub fn consent_url(config: &AppConfig) -> String {
    let scope = SCOPES.join(" ");
    let query = serde_urlencoded::to_string([
        ("response_type", "code"),
        ("access_type", "offline"),
        ("prompt", "consent"),
        ("client_id", config.google_client_id.as_str()),
        ("redirect_uri", config.google_redirect_uri.as_str()),
        ("scope", scope.as_str()),
    ])
    .unwrap_or_default();
    format!("{AUTH_URL}?{query}")
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
}

impl TokenResponse {
    fn into_token(self) -> GoogleToken {
        GoogleToken {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expiry_date: self
                .expires_in
                .map(|secs| Utc::now().timestamp_millis() + secs * 1000),
            scope: self.scope,
            token_type: self.token_type,
        }
    }
}

/// Exchanges an authorization code for tokens.
pub async fn exchange_code(
    client: &reqwest::Client,
    config: &AppConfig,
    code: &str,
) -> anyhow::Result<GoogleToken> {
    let resp = client
        .post(TOKEN_URL)
        .form(&[
            ("code", code),
            ("client_id", config.google_client_id.as_str()),
            ("client_secret", config.google_client_secret.as_str()),
            ("redirect_uri", config.google_redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .context("failed to call Google token endpoint")?;

    let status = resp.status();
    let data: serde_json::Value = resp
        .json()
        .await
        .context("failed to parse Google token response")?;

    if !status.is_success() {
        anyhow::bail!("Google token exchange failed ({}): {}", status, data);
    }

    let token: TokenResponse =
        serde_json::from_value(data).context("unexpected Google token response shape")?;
    Ok(token.into_token())
}

async fn refresh_access_token(
    client: &reqwest::Client,
    config: &AppConfig,
    refresh_token: &str,
) -> anyhow::Result<GoogleToken> {
    let resp = client
        .post(TOKEN_URL)
        .form(&[
            ("refresh_token", refresh_token),
            ("client_id", config.google_client_id.as_str()),
            ("client_secret", config.google_client_secret.as_str()),
            ("grant_type", "refresh_token"),
        ])
        .send()
        .await
        .context("failed to call Google token endpoint")?;

    let status = resp.status();
    let data: serde_json::Value = resp
        .json()
        .await
        .context("failed to parse Google token response")?;

    if !status.is_success() {
        anyhow::bail!("Google token refresh failed ({}): {}", status, data);
    }

    let token: TokenResponse =
        serde_json::from_value(data).context("unexpected Google token response shape")?;
    Ok(token.into_token())
}

/// Loads the stored credential and returns a usable access token,
/// refreshing it first when the recorded expiry has passed. The refreshed
/// token is saved back; no stored token at all is the missing-credential
/// error that tells the user to run setup.
pub async fn valid_access_token(
    client: &reqwest::Client,
    config: &AppConfig,
    store: &dyn CredentialStore,
) -> Result<String, AppError> {
    let token = store
        .load()
        .await
        .map_err(|e| AppError::Calendar(e.to_string()))?
        .ok_or(AppError::MissingCredential)?;

    if token.is_expired(Utc::now().timestamp_millis()) {
        if let Some(refresh_token) = token.refresh_token.clone() {
            tracing::info!("access token expired, refreshing");
            let mut refreshed = refresh_access_token(client, config, &refresh_token)
                .await
                .map_err(|e| AppError::Calendar(e.to_string()))?;
            // Google omits the refresh token on refresh responses.
            if refreshed.refresh_token.is_none() {
                refreshed.refresh_token = Some(refresh_token);
            }
            store
                .save(&refreshed)
                .await
                .map_err(|e| AppError::Calendar(e.to_string()))?;
            return Ok(refreshed.access_token);
        }
    }

    Ok(token.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expiry_date: Option<i64>) -> GoogleToken {
        GoogleToken {
            access_token: "at".to_string(),
            refresh_token: Some("rt".to_string()),
            expiry_date,
            scope: None,
            token_type: Some("Bearer".to_string()),
        }
    }

    #[test]
    fn test_is_expired() {
        let now = 1_000_000_000;
        assert!(token(Some(now - 1)).is_expired(now));
        assert!(token(Some(now + EXPIRY_MARGIN_MS)).is_expired(now));
        assert!(!token(Some(now + EXPIRY_MARGIN_MS + 1)).is_expired(now));
        // No recorded expiry: use the token as-is.
        assert!(!token(None).is_expired(now));
    }

    #[test]
    fn test_consent_url_contains_scopes_and_client() {
        let config = AppConfig {
            port: 3011,
            google_client_id: "client-123".to_string(),
            google_client_secret: "secret".to_string(),
            google_redirect_uri: "http://localhost:3011/auth/google/callback".to_string(),
            openai_api_key: String::new(),
            openai_model: "gpt-4o-mini".to_string(),
            token_file: "token.json".to_string(),
            allowed_origins: vec![],
        };

        let url = consent_url(&config);
        assert!(url.starts_with(AUTH_URL));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("prompt=consent"));
        assert!(url.contains("calendar.events"));
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let path = std::env::temp_dir().join(format!("terminbot-token-{}.json", uuid::Uuid::new_v4()));
        let store = FileTokenStore::new(&path);

        assert!(store.load().await.unwrap().is_none());

        store.save(&token(Some(42))).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.access_token, "at");
        assert_eq!(loaded.refresh_token.as_deref(), Some("rt"));
        assert_eq!(loaded.expiry_date, Some(42));

        let _ = std::fs::remove_file(&path);
    }
}

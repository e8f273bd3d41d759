use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::ai::LlmProvider;
use crate::services::calendar::oauth::CredentialStore;
use crate::services::calendar::CalendarProvider;
use crate::services::session::SessionStore;

pub struct AppState {
    pub config: AppConfig,
    pub sessions: SessionStore,
    pub credentials: Arc<dyn CredentialStore>,
    pub calendar: Box<dyn CalendarProvider>,
    pub llm: Box<dyn LlmProvider>,
}

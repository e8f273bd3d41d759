use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use super::oauth::{self, CredentialStore};
use super::{CalendarEvent, CalendarProvider, CreatedEvent};
use crate::config::AppConfig;
use crate::errors::AppError;

const EVENTS_URL: &str = "https://www.googleapis.com/calendar/v3/calendars/primary/events";

pub struct GoogleCalendarProvider {
    config: AppConfig,
    credentials: Arc<dyn CredentialStore>,
    client: reqwest::Client,
}

impl GoogleCalendarProvider {
    pub fn new(config: AppConfig, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            config,
            credentials,
            client: reqwest::Client::new(),
        }
    }

    async fn access_token(&self) -> Result<String, AppError> {
        oauth::valid_access_token(&self.client, &self.config, self.credentials.as_ref()).await
    }

    async fn list_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        order_by_start: bool,
    ) -> Result<Vec<serde_json::Value>, AppError> {
        let token = self.access_token().await?;

        let mut query = vec![
            ("timeMin", start.to_rfc3339()),
            ("timeMax", end.to_rfc3339()),
            ("singleEvents", "true".to_string()),
        ];
        if order_by_start {
            query.push(("orderBy", "startTime".to_string()));
        }

        let resp = self
            .client
            .get(EVENTS_URL)
            .bearer_auth(&token)
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::Calendar(format!("failed to list events: {e}")))?;

        let status = resp.status();
        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| AppError::Calendar(format!("failed to parse events response: {e}")))?;

        if !status.is_success() {
            return Err(AppError::Calendar(format!(
                "calendar API error ({status}): {data}"
            )));
        }

        Ok(data["items"].as_array().cloned().unwrap_or_default())
    }
}

#[async_trait]
impl CalendarProvider for GoogleCalendarProvider {
    async fn is_slot_free(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let items = self.list_events(start, end, false).await?;
        Ok(items.is_empty())
    }

    async fn create_event(
        &self,
        summary: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        attendee_email: &str,
    ) -> Result<CreatedEvent, AppError> {
        let token = self.access_token().await?;

        let body = json!({
            "summary": summary,
            "start": { "dateTime": start.to_rfc3339() },
            "end": { "dateTime": end.to_rfc3339() },
            "attendees": [{ "email": attendee_email }],
            "conferenceData": {
                "createRequest": {
                    "requestId": format!("meet-{}", uuid::Uuid::new_v4()),
                    "conferenceSolutionKey": { "type": "hangoutsMeet" },
                },
            },
        });

        let resp = self
            .client
            .post(EVENTS_URL)
            .bearer_auth(&token)
            .query(&[("conferenceDataVersion", "1"), ("sendUpdates", "all")])
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Calendar(format!("failed to create event: {e}")))?;

        let status = resp.status();
        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| AppError::Calendar(format!("failed to parse event response: {e}")))?;

        if !status.is_success() {
            return Err(AppError::Calendar(format!(
                "calendar API error ({status}): {data}"
            )));
        }

        tracing::info!(
            event_id = data["id"].as_str().unwrap_or(""),
            attendee = attendee_email,
            "calendar event created"
        );

        Ok(CreatedEvent {
            id: data["id"].as_str().unwrap_or_default().to_string(),
            meet_link: data["hangoutLink"].as_str().map(str::to_string),
        })
    }

    async fn list_upcoming(&self, window_days: i64) -> Result<Vec<CalendarEvent>, AppError> {
        let now = Utc::now();
        let items = self
            .list_events(now, now + Duration::days(window_days), true)
            .await?;

        Ok(items
            .iter()
            .map(|item| CalendarEvent {
                summary: item["summary"].as_str().map(str::to_string),
                start: item["start"]["dateTime"]
                    .as_str()
                    .or_else(|| item["start"]["date"].as_str())
                    .map(str::to_string),
                end: item["end"]["dateTime"]
                    .as_str()
                    .or_else(|| item["end"]["date"].as_str())
                    .map(str::to_string),
            })
            .collect())
    }
}

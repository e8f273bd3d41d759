pub mod google;
pub mod oauth;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::AppError;

/// Event as returned by the upcoming-events listing.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEvent {
    pub summary: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Result of a successful event creation.
#[derive(Debug, Clone)]
pub struct CreatedEvent {
    pub id: String,
    pub meet_link: Option<String>,
}

/// Availability and booking operations on the primary calendar.
/// Failures propagate as request-level errors; no retry, no backoff.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// True iff no events overlap the half-open interval `[start, end)`.
    async fn is_slot_free(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<bool, AppError>;

    /// Creates the event, invites the attendee, requests a conferencing
    /// link, and asks the provider to notify all participants.
    async fn create_event(
        &self,
        summary: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        attendee_email: &str,
    ) -> Result<CreatedEvent, AppError>;

    /// Events in the next `window_days` days, ordered by start time.
    async fn list_upcoming(&self, window_days: i64) -> Result<Vec<CalendarEvent>, AppError>;
}

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::services::calendar::CalendarEvent;
use crate::state::AppState;

const UPCOMING_WINDOW_DAYS: i64 = 7;

// GET /api/calendar/upcoming
pub async fn upcoming(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    let events = state.calendar.list_upcoming(UPCOMING_WINDOW_DAYS).await?;
    Ok(Json(events))
}

//! The booking conversation: a linear per-session state machine that
//! collects date, time, duration, and email, then checks availability and
//! books the slot. Messages outside the flow get a free-form AI reply.

use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::errors::AppError;
use crate::models::{Session, Stage};
use crate::services::ai::smalltalk;
use crate::services::extract;
use crate::services::replies::Lang;
use crate::state::AppState;

pub async fn process_message(
    state: &Arc<AppState>,
    session_key: &str,
    message: &str,
    user_lang: &str,
) -> Result<String, AppError> {
    let mut session = state.sessions.get(session_key).unwrap_or_default();
    let lang = Lang::from_code(user_lang);

    tracing::info!(
        key = session_key,
        stage = session.stage.as_str(),
        "processing chat message"
    );

    let result = advance(state, &mut session, message, user_lang, lang).await;

    // Stage and slots mutated before an upstream failure are kept; a failed
    // booking attempt does not rewind the conversation.
    state.sessions.put(session_key, session);

    result
}

async fn advance(
    state: &Arc<AppState>,
    session: &mut Session,
    message: &str,
    user_lang: &str,
    lang: Lang,
) -> Result<String, AppError> {
    let text = message.to_lowercase();

    let reply = match session.stage {
        Stage::Start => {
            if text.contains("termin") || text.contains("appointment") {
                session.stage = Stage::AwaitingDate;
                lang.ask_date().to_string()
            } else {
                smalltalk::generate_reply(state.llm.as_ref(), message, user_lang)
                    .await
                    .map_err(|e| AppError::Ai(e.to_string()))?
            }
        }

        Stage::AwaitingDate => match extract::extract_date(&text) {
            Some(date) => {
                let reply = lang.ask_time(&date);
                session.data.date = Some(date);
                session.stage = Stage::AwaitingTime;
                reply
            }
            None => lang.date_reprompt().to_string(),
        },

        Stage::AwaitingTime => match extract::extract_time(&text) {
            Some(time) => {
                session.data.time = Some(time);
                session.stage = Stage::AwaitingDuration;
                lang.ask_duration().to_string()
            }
            None => lang.time_reprompt().to_string(),
        },

        Stage::AwaitingDuration => match extract::extract_duration(&text) {
            Some(minutes) => {
                session.data.duration_minutes = Some(minutes);
                session.stage = Stage::AwaitingEmail;
                lang.ask_email().to_string()
            }
            None => lang.duration_reprompt().to_string(),
        },

        Stage::AwaitingEmail => match extract::extract_email(&text) {
            Some(email) => {
                session.data.email = Some(email.clone());
                attempt_booking(state, session, &email, lang).await?
            }
            None => lang.email_reprompt().to_string(),
        },

        Stage::Completed => lang.already_completed().to_string(),
    };

    Ok(reply)
}

/// Checks availability for the collected slot and books it. A busy slot
/// loops the conversation back to time collection, keeping the date.
async fn attempt_booking(
    state: &Arc<AppState>,
    session: &mut Session,
    email: &str,
    lang: Lang,
) -> Result<String, AppError> {
    let (Some(date), Some(time), Some(duration)) = (
        session.data.date.clone(),
        session.data.time.clone(),
        session.data.duration_minutes,
    ) else {
        // Unreachable while slots fill in stage order.
        return Err(AppError::Calendar("booking data incomplete".to_string()));
    };

    let (start, end) =
        compose_interval(&date, &time, duration).map_err(|e| AppError::Calendar(e.to_string()))?;

    if !state.calendar.is_slot_free(start, end).await? {
        tracing::info!(%start, %end, "requested slot is busy");
        session.data.time = None;
        session.stage = Stage::AwaitingTime;
        return Ok(lang.slot_busy().to_string());
    }

    let event = state
        .calendar
        .create_event(lang.event_summary(), start, end, email)
        .await?;

    session.stage = Stage::Completed;
    Ok(lang.booked(&date, &time, email, event.meet_link.as_deref().unwrap_or("")))
}

/// Builds the booking interval from the collected slots. The extracted
/// date/time carry no zone; they are interpreted as UTC (documented policy).
/// Text that matched the extractors but is not a real calendar date or time
/// fails here, at booking time.
fn compose_interval(
    date: &str,
    time: &str,
    duration_minutes: u32,
) -> anyhow::Result<(DateTime<Utc>, DateTime<Utc>)> {
    let date = NaiveDate::parse_from_str(date, "%d.%m.%Y")
        .with_context(|| format!("'{date}' is not a valid calendar date"))?;

    let (hour, minute) = match time.split_once(':') {
        Some((h, m)) => (h.parse()?, m.parse()?),
        None => (time.parse()?, 0),
    };
    let time = NaiveTime::from_hms_opt(hour, minute, 0)
        .with_context(|| format!("{hour}:{minute:02} is not a valid time of day"))?;

    let start = Utc.from_utc_datetime(&date.and_time(time));
    let end = start + Duration::minutes(duration_minutes as i64);
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_interval() {
        let (start, end) = compose_interval("08.11.2025", "10:00", 60).unwrap();
        assert_eq!(start.to_rfc3339(), "2025-11-08T10:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2025-11-08T11:00:00+00:00");
    }

    #[test]
    fn test_compose_interval_hour_only_time() {
        let (start, end) = compose_interval("8.1.2025", "9", 30).unwrap();
        assert_eq!(start.to_rfc3339(), "2025-01-08T09:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2025-01-08T09:30:00+00:00");
    }

    #[test]
    fn test_compose_interval_rejects_implausible_date() {
        assert!(compose_interval("40.13.2025", "10:00", 60).is_err());
    }

    #[test]
    fn test_compose_interval_rejects_implausible_time() {
        assert!(compose_interval("08.11.2025", "99", 60).is_err());
    }
}

use serde::{Deserialize, Serialize};

/// Position in the fixed booking conversation. Transitions are linear except
/// the busy-slot loop back from `AwaitingEmail` to `AwaitingTime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Start,
    AwaitingDate,
    AwaitingTime,
    AwaitingDuration,
    AwaitingEmail,
    Completed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::AwaitingDate => "awaiting_date",
            Stage::AwaitingTime => "awaiting_time",
            Stage::AwaitingDuration => "awaiting_duration",
            Stage::AwaitingEmail => "awaiting_email",
            Stage::Completed => "completed",
        }
    }
}

/// Booking slots collected so far. Fields fill strictly in stage order:
/// a stage only advances once its slot was extracted, so a later field is
/// never set while an earlier one is absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingData {
    pub date: Option<String>,
    pub time: Option<String>,
    pub duration_minutes: Option<u32>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub stage: Stage,
    pub data: BookingData,
}

impl Session {
    pub fn new() -> Self {
        Self {
            stage: Stage::Start,
            data: BookingData::default(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

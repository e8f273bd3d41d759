//! Canned reply texts for the booking flow. Two hard-coded response
//! languages; everything else is out of scope for the widget.

/// Response language, chosen from the widget's `userLang` hint.
/// Unknown or empty hints fall back to German, the product default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    De,
    En,
}

impl Lang {
    pub fn from_code(code: &str) -> Self {
        if code.trim().to_lowercase().starts_with("en") {
            Lang::En
        } else {
            Lang::De
        }
    }

    pub fn ask_date(self) -> &'static str {
        match self {
            Lang::De => "Klar! Für wann möchten Sie den Termin vereinbaren?",
            Lang::En => "Sure! For when would you like to schedule the appointment?",
        }
    }

    pub fn date_reprompt(self) -> &'static str {
        match self {
            Lang::De => "Bitte geben Sie ein Datum an, z. B. 08.11.2025.",
            Lang::En => "Please provide a date, e.g. 08.11.2025.",
        }
    }

    pub fn ask_time(self, date: &str) -> String {
        match self {
            Lang::De => format!("Super! Zu welcher Uhrzeit am {date} würde es Ihnen passen?"),
            Lang::En => format!("Great! What time on {date} would suit you?"),
        }
    }

    pub fn time_reprompt(self) -> &'static str {
        match self {
            Lang::De => "Bitte geben Sie eine Uhrzeit an, z. B. 10:00 Uhr.",
            Lang::En => "Please provide a time, e.g. 10:00.",
        }
    }

    pub fn ask_duration(self) -> &'static str {
        match self {
            Lang::De => "Perfekt. Wie lange soll das Meeting dauern? (z. B. 30 oder 60 Minuten)",
            Lang::En => "Perfect. How long should the meeting be? (e.g. 30 or 60 minutes)",
        }
    }

    pub fn duration_reprompt(self) -> &'static str {
        match self {
            Lang::De => "Wie lange soll der Termin dauern (in Minuten)?",
            Lang::En => "How long should the appointment be (in minutes)?",
        }
    }

    pub fn ask_email(self) -> &'static str {
        match self {
            Lang::De => {
                "Alles klar. Bitte geben Sie Ihre E-Mail-Adresse an, damit ich den Termin eintragen kann."
            }
            Lang::En => "Got it. Please share your email address so I can book the appointment.",
        }
    }

    pub fn email_reprompt(self) -> &'static str {
        match self {
            Lang::De => "Bitte geben Sie eine gültige E-Mail-Adresse an.",
            Lang::En => "Please provide a valid email address.",
        }
    }

    pub fn slot_busy(self) -> &'static str {
        match self {
            Lang::De => {
                "Dieser Zeitraum ist leider schon belegt. Bitte schlagen Sie eine andere Zeit vor."
            }
            Lang::En => "That time is unfortunately already taken. Please suggest a different time.",
        }
    }

    pub fn event_summary(self) -> &'static str {
        match self {
            Lang::De => "Beratungstermin zur Finanzierung",
            Lang::En => "Financing consultation",
        }
    }

    pub fn booked(self, date: &str, time: &str, email: &str, meet_link: &str) -> String {
        match self {
            Lang::De => format!(
                "Termin am {date} um {time} wurde erfolgreich eingetragen.\n\
                 Einladung wurde an {email} gesendet.\n\
                 Google Meet Link: {meet_link}"
            ),
            Lang::En => format!(
                "Your appointment on {date} at {time} has been booked.\n\
                 An invitation was sent to {email}.\n\
                 Google Meet link: {meet_link}"
            ),
        }
    }

    pub fn already_completed(self) -> &'static str {
        match self {
            Lang::De => "Der Termin wurde bereits vereinbart. Möchten Sie noch etwas besprechen?",
            Lang::En => "Your appointment is already booked. Is there anything else you'd like to discuss?",
        }
    }
}

//! Slot extraction: pure pattern matchers that pull a single piece of
//! booking information out of free text. Callers lower-case the input first.
//! `None` means the slot was not found and the caller should re-prompt.

use once_cell::sync::Lazy;
use regex::Regex;

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{1,2}\.\d{1,2}\.\d{4}").unwrap());
static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{1,2}(:\d{2})?").unwrap());
static DURATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\s@]+@[^\s@]+\.[^\s@]+").unwrap());

/// First `D.M.YYYY` / `DD.MM.YYYY` substring, verbatim. No calendar-validity
/// check here; "40.13.2025" is accepted as text and only fails later when the
/// booking timestamps are composed.
pub fn extract_date(text: &str) -> Option<String> {
    DATE_RE.find(text).map(|m| m.as_str().to_string())
}

/// First `H` or `H:MM` substring.
pub fn extract_time(text: &str) -> Option<String> {
    TIME_RE.find(text).map(|m| m.as_str().to_string())
}

/// First run of digits, parsed as minutes.
pub fn extract_duration(text: &str) -> Option<u32> {
    DURATION_RE.find(text).and_then(|m| m.as_str().parse().ok())
}

/// First `local@domain.tld` substring with no embedded whitespace or `@`.
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

//! Display-date helpers.
//!
//! Records keep dates as entered text. These helpers produce the defaults used
//! for "today" and "now", and a long label for a day when the text parses.

use chrono::format::{Item, StrftimeItems};
use chrono::{Local, NaiveDate};
use tracing::warn;

/// Format of dates as stored and shown.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Format of times as stored and shown.
pub const DISPLAY_TIME_FORMAT: &str = "%H:%M";

/// Whether `format` is a strftime pattern chrono can render.
#[must_use]
pub fn is_valid_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Today's date in the given format, local clock.
///
/// An unrenderable format falls back to [`DISPLAY_DATE_FORMAT`].
#[must_use]
pub fn today(format: &str) -> String {
    format_now(format, DISPLAY_DATE_FORMAT)
}

/// The current time of day in the given format, local clock.
///
/// An unrenderable format falls back to [`DISPLAY_TIME_FORMAT`].
#[must_use]
pub fn now_time(format: &str) -> String {
    format_now(format, DISPLAY_TIME_FORMAT)
}

fn format_now(format: &str, fallback: &str) -> String {
    let format = if is_valid_format(format) {
        format
    } else {
        warn!("Invalid date/time format {:?}, using {:?}", format, fallback);
        fallback
    };
    Local::now().format(format).to_string()
}

/// Parse a `DD/MM/YYYY` date.
#[must_use]
pub fn parse_display_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DISPLAY_DATE_FORMAT).ok()
}

/// A long label for a day, e.g. "Monday, 01 January 2024".
///
/// Falls back to the text itself when it is not a `DD/MM/YYYY` date.
#[must_use]
pub fn describe_date(text: &str) -> String {
    parse_display_date(text).map_or_else(
        || text.trim().to_string(),
        |date| date.format("%A, %d %B %Y").to_string(),
    )
}

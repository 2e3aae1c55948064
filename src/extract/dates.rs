//! Localized Russian date parsing
//!
//! The source site prints dates as free text like "15 марта 2024" (genitive
//! month names, year optional). This module scans text for that pattern and
//! builds a timestamp in the configured timezone.

use chrono::{DateTime, Datelike, FixedOffset, LocalResult, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// 1-2 digit day, whitespace, Cyrillic month token, optional 4-digit year
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2})\s+([а-яё]+)(?:\s+(\d{4}))?").expect("date pattern is valid")
});

/// Outcome of scanning text for a date
///
/// `InvalidCalendar` (e.g. 30 February) is distinct from `NoMatch`: the
/// events policy drops records for both, but the distinction is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuDate {
    Parsed(DateTime<FixedOffset>),
    InvalidCalendar,
    NoMatch,
}

/// Genitive Russian month name to month number, None for unknown tokens.
///
/// An unknown month is treated as no match rather than silently mapping to
/// January; see DESIGN.md for the rationale behind this behavior change.
fn month_number(token: &str) -> Option<u32> {
    match token.to_lowercase().as_str() {
        "января" => Some(1),
        "февраля" => Some(2),
        "марта" => Some(3),
        "апреля" => Some(4),
        "мая" => Some(5),
        "июня" => Some(6),
        "июля" => Some(7),
        "августа" => Some(8),
        "сентября" => Some(9),
        "октября" => Some(10),
        "ноября" => Some(11),
        "декабря" => Some(12),
        _ => None,
    }
}

/// Current time in the given offset
pub fn now_in(offset: FixedOffset) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&offset)
}

/// Scans free text for a localized date. A missing year defaults to the
/// current year in the given offset.
pub fn parse_ru_date(text: &str, offset: FixedOffset) -> RuDate {
    let Some(caps) = DATE_RE.captures(text) else {
        return RuDate::NoMatch;
    };

    let Ok(day) = caps[1].parse::<u32>() else {
        return RuDate::NoMatch;
    };

    let Some(month) = month_number(&caps[2]) else {
        return RuDate::NoMatch;
    };

    let year = match caps.get(3) {
        Some(y) => match y.as_str().parse::<i32>() {
            Ok(year) => year,
            Err(_) => return RuDate::NoMatch,
        },
        None => now_in(offset).year(),
    };

    match offset.with_ymd_and_hms(year, month, day, 0, 0, 0) {
        LocalResult::Single(ts) => RuDate::Parsed(ts),
        _ => RuDate::InvalidCalendar,
    }
}

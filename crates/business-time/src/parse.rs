//! Timestamp parsing, kept apart from the engine.
//!
//! The diff engine only needs a [`NaiveDateTime`]; how one is obtained from
//! text is the job of a [`TimestampParser`]. [`NaturalParser`] is the default
//! implementation. It never reads the system clock on its own: the "now"
//! anchor is an explicit input, so parsing stays deterministic and testable.
//!
//! # Supported Expressions
//!
//! **Anchored**: `"now"`, `"today"`, `"tomorrow"`, `"yesterday"`
//!
//! **Dates**: `"2018-05-14"`, `"20th May 2018"`, `"May 20 2018"`,
//! optionally followed by a time (`"2018-05-14 09:00"`, `"2018-05-14T09:00:00"`)
//!
//! **Weekday-prefixed**: `"Monday 2018-05-14 09:00"`, `"Sunday 20th May 2018 19:00"`.
//! When the date does not fall on the named weekday, the date moves forward
//! to the next such weekday. A bare weekday (`"friday 10:00"`) resolves to
//! the first matching day on or after the anchor.
//!
//! **Time-of-day**: `"09:00"`, `"9am"`, `"5:30pm"`, `"noon"`, `"midnight"`,
//! `"end of business"`, applied to the anchor's date.
//!
//! **Passthrough**: RFC 3339 strings, reduced to their wall-clock reading.

use chrono::{DateTime, Datelike, Local, Month, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::error::{BusinessTimeError, Result};

/// Turns text into a timestamp the engine can step over.
pub trait TimestampParser {
    /// # Errors
    ///
    /// Returns [`BusinessTimeError::UnparseableTimestamp`] when the input
    /// cannot be resolved unambiguously.
    fn parse(&self, input: &str) -> Result<NaiveDateTime>;
}

/// Flexible English date/time parser anchored on an explicit "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NaturalParser {
    anchor: NaiveDateTime,
}

impl NaturalParser {
    pub fn new(anchor: NaiveDateTime) -> Self {
        Self { anchor }
    }

    /// A parser anchored on the local wall clock at the time of the call.
    pub fn now() -> Self {
        Self::new(Local::now().naive_local())
    }

    pub fn anchor(&self) -> NaiveDateTime {
        self.anchor
    }
}

impl TimestampParser for NaturalParser {
    fn parse(&self, input: &str) -> Result<NaiveDateTime> {
        let normalized = normalize_expression(input);

        try_passthrough_rfc3339(input.trim())
            .or_else(|| try_anchored(&normalized, &self.anchor))
            .or_else(|| try_dated(&normalized, &self.anchor))
            .or_else(|| try_time_of_day(&normalized, &self.anchor))
            .ok_or_else(|| {
                BusinessTimeError::UnparseableTimestamp(format!(
                    "cannot parse timestamp: '{}'",
                    input.trim()
                ))
            })
    }
}

/// Parse a time of day on its own: `"09:00"`, `"9am"`, `"noon"`.
pub(crate) fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let normalized = normalize_expression(s);
    named_time(&normalized).or_else(|| clock_time(&normalized))
}

// ── Expression parsers ──────────────────────────────────────────────────────

/// Lowercase, drop commas, collapse whitespace.
fn normalize_expression(s: &str) -> String {
    s.to_lowercase()
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn try_passthrough_rfc3339(s: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.naive_local())
        .ok()
}

fn try_anchored(s: &str, anchor: &NaiveDateTime) -> Option<NaiveDateTime> {
    let date = anchor.date();
    match s {
        "now" => Some(*anchor),
        "today" => date.and_hms_opt(0, 0, 0),
        "tomorrow" => date.succ_opt()?.and_hms_opt(0, 0, 0),
        "yesterday" => date.pred_opt()?.and_hms_opt(0, 0, 0),
        _ => None,
    }
}

/// `[weekday] <date> [time]`, or `<weekday> [time]`.
fn try_dated(s: &str, anchor: &NaiveDateTime) -> Option<NaiveDateTime> {
    let tokens: Vec<&str> = s.split(' ').collect();
    let (weekday, rest) = match tokens.split_first() {
        Some((first, rest)) => match weekday_named(first) {
            Some(weekday) => (Some(weekday), rest),
            None => (None, tokens.as_slice()),
        },
        None => return None,
    };

    let (date, inline_time, time_tokens) = match parse_date_prefix(rest) {
        Some(prefix) => (prefix.date, prefix.inline_time, &rest[prefix.consumed..]),
        // Bare weekday: resolve relative to the anchor date.
        None if weekday.is_some() => (anchor.date(), None, rest),
        None => return None,
    };

    let date = match weekday {
        Some(weekday) => next_weekday_on_or_after(date, weekday)?,
        None => date,
    };

    let time = if let Some(time) = inline_time {
        if !time_tokens.is_empty() {
            return None;
        }
        time
    } else if time_tokens.is_empty() {
        NaiveTime::from_hms_opt(0, 0, 0)?
    } else {
        let joined = time_tokens.join(" ");
        let time_str = joined.strip_prefix("at ").unwrap_or(&joined);
        named_time(time_str).or_else(|| clock_time(time_str))?
    };

    Some(date.and_time(time))
}

fn try_time_of_day(s: &str, anchor: &NaiveDateTime) -> Option<NaiveDateTime> {
    let time = named_time(s).or_else(|| clock_time(s))?;
    Some(anchor.date().and_time(time))
}

/// A date read from the start of a token list, with any time glued onto it
/// (`2018-05-14t09:00`) and the number of tokens consumed.
struct DatePrefix {
    date: NaiveDate,
    inline_time: Option<NaiveTime>,
    consumed: usize,
}

fn parse_date_prefix(tokens: &[&str]) -> Option<DatePrefix> {
    let first = *tokens.first()?;

    // "2018-05-14"
    if let Ok(date) = NaiveDate::parse_from_str(first, "%Y-%m-%d") {
        return Some(DatePrefix {
            date,
            inline_time: None,
            consumed: 1,
        });
    }
    // "2018-05-14t09:00:00"
    let glued = first.split_once('t').and_then(|(date_part, time_part)| {
        Some(DatePrefix {
            date: NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?,
            inline_time: Some(clock_time(time_part)?),
            consumed: 1,
        })
    });
    if glued.is_some() {
        return glued;
    }

    if tokens.len() < 3 {
        return None;
    }
    let year = tokens[2].parse::<i32>().ok()?;
    // "20th may 2018" or "may 20 2018"
    let (day, month) = match (day_of_month(tokens[0]), month_named(tokens[1])) {
        (Some(day), Some(month)) => (day, month),
        _ => (day_of_month(tokens[1])?, month_named(tokens[0])?),
    };

    NaiveDate::from_ymd_opt(year, month, day).map(|date| DatePrefix {
        date,
        inline_time: None,
        consumed: 3,
    })
}

fn next_weekday_on_or_after(date: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let days_ahead = (weekday.num_days_from_monday() as i64
        - date.weekday().num_days_from_monday() as i64
        + 7)
        % 7;
    date.checked_add_signed(chrono::Duration::days(days_ahead))
}

// ── Parsing helpers ─────────────────────────────────────────────────────────

/// `"mon"` or `"monday"`, any case.
fn weekday_named(s: &str) -> Option<Weekday> {
    s.parse().ok()
}

/// `"may"`, `"sep"` or `"september"`, as 1 to 12.
fn month_named(s: &str) -> Option<u32> {
    s.parse::<Month>().ok().map(|month| month.number_from_month())
}

fn day_of_month(s: &str) -> Option<u32> {
    let digits = s.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let suffix = &s[digits.len()..];
    if !matches!(suffix, "" | "st" | "nd" | "rd" | "th") {
        return None;
    }
    digits.parse().ok().filter(|day| (1..=31).contains(day))
}

/// Fixed points of the working day.
const NAMED_TIMES: &[(&str, u32)] = &[
    ("midnight", 0),
    ("morning", 9),
    ("noon", 12),
    ("midday", 12),
    ("end of business", 17),
    ("evening", 18),
];

fn named_time(s: &str) -> Option<NaiveTime> {
    NAMED_TIMES
        .iter()
        .find(|(name, _)| *name == s)
        .and_then(|&(_, hour)| NaiveTime::from_hms_opt(hour, 0, 0))
}

/// `"14:00"`, `"14:00:30"`, `"9am"`, `"5:30 pm"`.
fn clock_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    for format in ["%H:%M", "%H:%M:%S"] {
        if let Ok(time) = NaiveTime::parse_from_str(s, format) {
            return Some(time);
        }
    }

    let compact: String = s.split_whitespace().collect();
    let split = compact.len().checked_sub(2)?;
    let afternoon = match compact.get(split..)? {
        "am" => false,
        "pm" => true,
        _ => return None,
    };
    let clock = &compact[..split];
    let (hour, minute) = clock.split_once(':').unwrap_or((clock, "0"));
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    // 12am is midnight, 12pm is noon.
    let hour = hour % 12 + if afternoon { 12 } else { 0 };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

// ── Tests ───────────────────────────────────────────────────────────────────

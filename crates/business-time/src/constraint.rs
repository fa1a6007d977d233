//! Business-time predicates.
//!
//! A [`Constraint`] answers one question about an instant: does it count as
//! business time? It can also say, in a short fixed phrase, why. Leaf
//! constraints live here; [`crate::composite`] combines them.
//!
//! # Narrations
//!
//! | Constraint            | Accepted               | Rejected                   |
//! |-----------------------|------------------------|----------------------------|
//! | [`WeekdaysOnly`]      | `"a weekday"`          | `"the weekend"`            |
//! | [`DaysOfWeek`]        | `"a business day"`     | `"not a business day"`     |
//! | [`BetweenTimesOfDay`] | `"business hours"`     | `"outside business hours"` |
//! | [`Holidays`]          | `"not a holiday"`      | `"a holiday"`              |
//! | [`AnyTime`]           | `"business time"`      |                            |

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

use crate::error::{BusinessTimeError, Result};
use crate::parse::parse_time_of_day;

/// Minutes in a day; the exclusive upper bound written as `"24:00"`.
pub const MINUTES_PER_DAY: u32 = 1_440;

/// A predicate deciding whether an instant is business time.
///
/// Implementations must be pure: the same instant always yields the same
/// verdict and narration. The diff engine calls [`is_business_time`] once
/// per precision step and relies on nothing else about the implementation.
///
/// [`is_business_time`]: Constraint::is_business_time
pub trait Constraint: fmt::Debug + Send + Sync {
    fn is_business_time(&self, at: NaiveDateTime) -> bool;

    /// A short phrase describing the verdict for `at`.
    fn narrate(&self, at: NaiveDateTime) -> String;
}

/// Minutes since midnight, from the hour and minute only.
///
/// # Examples
///
/// ```
/// use business_time::minute_of_day;
/// use chrono::NaiveTime;
///
/// assert_eq!(minute_of_day(&NaiveTime::from_hms_opt(9, 0, 0).unwrap()), 540);
/// assert_eq!(minute_of_day(&NaiveTime::from_hms_opt(23, 59, 59).unwrap()), 1439);
/// ```
pub fn minute_of_day<T: Timelike>(at: &T) -> u32 {
    at.hour() * 60 + at.minute()
}

// ── WeekdaysOnly ────────────────────────────────────────────────────────────

/// Monday to Friday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekdaysOnly;

impl Constraint for WeekdaysOnly {
    fn is_business_time(&self, at: NaiveDateTime) -> bool {
        !matches!(at.weekday(), Weekday::Sat | Weekday::Sun)
    }

    fn narrate(&self, at: NaiveDateTime) -> String {
        if self.is_business_time(at) {
            "a weekday".to_string()
        } else {
            "the weekend".to_string()
        }
    }
}

// ── DaysOfWeek ──────────────────────────────────────────────────────────────

/// An arbitrary set of working weekdays, e.g. Sunday to Thursday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaysOfWeek {
    // Indexed by `num_days_from_monday`.
    days: [bool; 7],
}

impl DaysOfWeek {
    pub fn new(days: impl IntoIterator<Item = Weekday>) -> Self {
        let mut set = [false; 7];
        for day in days {
            set[day.num_days_from_monday() as usize] = true;
        }
        Self { days: set }
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.days[day.num_days_from_monday() as usize]
    }
}

impl Constraint for DaysOfWeek {
    fn is_business_time(&self, at: NaiveDateTime) -> bool {
        self.contains(at.weekday())
    }

    fn narrate(&self, at: NaiveDateTime) -> String {
        if self.is_business_time(at) {
            "a business day".to_string()
        } else {
            "not a business day".to_string()
        }
    }
}

// ── BetweenTimesOfDay ───────────────────────────────────────────────────────

/// A daily window `[min, max)` in minutes of the day.
///
/// The lower bound is inclusive and the upper bound exclusive, so adjacent
/// windows (09:00–17:00 and 17:00–01:00) never both claim the boundary
/// minute. When `min > max` the window wraps past midnight and holds the
/// minutes from `min` to the end of the day plus those before `max`. A
/// window with `min == max` contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetweenTimesOfDay {
    min: u32,
    max: u32,
}

impl BetweenTimesOfDay {
    /// Build a window from time-of-day strings such as `"09:00"`, `"9am"`
    /// or `"noon"`. `"24:00"` is accepted as the end of the day.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessTimeError::InvalidArgument`] if either bound cannot
    /// be read as a time of day.
    ///
    /// # Examples
    ///
    /// ```
    /// use business_time::{BetweenTimesOfDay, Constraint};
    /// use chrono::NaiveDate;
    ///
    /// let shift = BetweenTimesOfDay::new("09:30", "17:30").unwrap();
    /// let day = NaiveDate::from_ymd_opt(2018, 5, 14).unwrap();
    /// assert_eq!(shift.narrate(day.and_hms_opt(17, 29, 0).unwrap()), "business hours");
    /// assert_eq!(shift.narrate(day.and_hms_opt(17, 30, 0).unwrap()), "outside business hours");
    /// ```
    pub fn new(min: &str, max: &str) -> Result<Self> {
        Ok(Self {
            min: parse_bound(min)?,
            max: parse_bound(max)?,
        })
    }

    pub fn from_times(min: NaiveTime, max: NaiveTime) -> Self {
        Self {
            min: minute_of_day(&min),
            max: minute_of_day(&max),
        }
    }

    /// Inclusive lower bound, in minutes of the day.
    pub fn min_minute(&self) -> u32 {
        self.min
    }

    /// Exclusive upper bound, in minutes of the day (up to 1440).
    pub fn max_minute(&self) -> u32 {
        self.max
    }
}

impl Default for BetweenTimesOfDay {
    /// 09:00 to 17:00.
    fn default() -> Self {
        Self {
            min: 9 * 60,
            max: 17 * 60,
        }
    }
}

impl Constraint for BetweenTimesOfDay {
    fn is_business_time(&self, at: NaiveDateTime) -> bool {
        let minute = minute_of_day(&at);
        if self.min <= self.max {
            self.min <= minute && minute < self.max
        } else {
            minute >= self.min || minute < self.max
        }
    }

    fn narrate(&self, at: NaiveDateTime) -> String {
        if self.is_business_time(at) {
            "business hours".to_string()
        } else {
            "outside business hours".to_string()
        }
    }
}

fn parse_bound(s: &str) -> Result<u32> {
    if s.trim() == "24:00" {
        return Ok(MINUTES_PER_DAY);
    }
    parse_time_of_day(s)
        .map(|t| minute_of_day(&t))
        .ok_or_else(|| {
            BusinessTimeError::InvalidArgument(format!("invalid time of day: '{}'", s.trim()))
        })
}

// ── Holidays ────────────────────────────────────────────────────────────────

/// Excludes whole calendar dates. The dates themselves come from the caller;
/// no calendar is built in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Holidays {
    dates: BTreeSet<NaiveDate>,
}

impl Holidays {
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

impl Constraint for Holidays {
    fn is_business_time(&self, at: NaiveDateTime) -> bool {
        !self.is_holiday(at.date())
    }

    fn narrate(&self, at: NaiveDateTime) -> String {
        if self.is_business_time(at) {
            "not a holiday".to_string()
        } else {
            "a holiday".to_string()
        }
    }
}

// ── AnyTime ─────────────────────────────────────────────────────────────────

/// Accepts every instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyTime;

impl Constraint for AnyTime {
    fn is_business_time(&self, _at: NaiveDateTime) -> bool {
        true
    }

    fn narrate(&self, _at: NaiveDateTime) -> String {
        "business time".to_string()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

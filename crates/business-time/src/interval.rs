//! Fixed-granularity durations used as the diffing step.
//!
//! An [`Interval`] is an amount of a single unit ("15 minutes", "1 hour").
//! Intervals compare by their minute equivalent, so `Interval::minutes(60)`
//! and `Interval::hours(1)` are interchangeable.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BusinessTimeError, Result};

// ── IntervalUnit ────────────────────────────────────────────────────────────

/// The unit an [`Interval`] amount is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
}

impl IntervalUnit {
    /// Number of minutes in one unit.
    pub fn minutes(self) -> i64 {
        match self {
            IntervalUnit::Minutes => 1,
            IntervalUnit::Hours => 60,
            IntervalUnit::Days => 1_440,
            IntervalUnit::Weeks => 10_080,
        }
    }

    fn suffix(self) -> char {
        match self {
            IntervalUnit::Minutes => 'm',
            IntervalUnit::Hours => 'h',
            IntervalUnit::Days => 'd',
            IntervalUnit::Weeks => 'w',
        }
    }

    /// Parse a unit name: compact (`m`, `h`, `d`, `w`) or spelled out.
    fn parse(s: &str) -> Option<Self> {
        match s {
            "m" | "min" | "mins" | "minute" | "minutes" => Some(IntervalUnit::Minutes),
            "h" | "hr" | "hrs" | "hour" | "hours" => Some(IntervalUnit::Hours),
            "d" | "day" | "days" => Some(IntervalUnit::Days),
            "w" | "wk" | "wks" | "week" | "weeks" => Some(IntervalUnit::Weeks),
            _ => None,
        }
    }
}

// ── Interval ────────────────────────────────────────────────────────────────

/// An immutable, strictly positive duration at a chosen granularity.
///
/// # Examples
///
/// ```
/// use business_time::Interval;
///
/// let quarter = Interval::minutes(15).unwrap();
/// assert_eq!(quarter.to_minutes(), 15);
/// assert_eq!(Interval::minutes(60).unwrap(), Interval::hours(1).unwrap());
/// assert!(Interval::hours(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Interval {
    amount: u32,
    unit: IntervalUnit,
}

impl Interval {
    /// Build an interval of `amount` units.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessTimeError::InvalidArgument`] unless
    /// `0 < amount <= u32::MAX`.
    pub fn new(amount: i64, unit: IntervalUnit) -> Result<Self> {
        if amount <= 0 {
            return Err(BusinessTimeError::InvalidArgument(format!(
                "interval amount must be positive, got {amount}"
            )));
        }
        let amount = u32::try_from(amount).map_err(|_| {
            BusinessTimeError::InvalidArgument(format!("interval amount too large: {amount}"))
        })?;
        Ok(Self { amount, unit })
    }

    pub fn minutes(amount: i64) -> Result<Self> {
        Self::new(amount, IntervalUnit::Minutes)
    }

    pub fn hours(amount: i64) -> Result<Self> {
        Self::new(amount, IntervalUnit::Hours)
    }

    pub fn days(amount: i64) -> Result<Self> {
        Self::new(amount, IntervalUnit::Days)
    }

    pub fn weeks(amount: i64) -> Result<Self> {
        Self::new(amount, IntervalUnit::Weeks)
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn unit(&self) -> IntervalUnit {
        self.unit
    }

    /// The interval expressed in minutes. Always positive.
    pub fn to_minutes(&self) -> i64 {
        i64::from(self.amount) * self.unit.minutes()
    }

    /// The interval as a `chrono::Duration`, for advancing timestamps.
    pub(crate) fn to_duration(self) -> chrono::Duration {
        // amount <= u32::MAX weeks stays well inside chrono's range.
        chrono::Duration::minutes(self.to_minutes())
    }
}

impl Default for Interval {
    /// One hour.
    fn default() -> Self {
        Self {
            amount: 1,
            unit: IntervalUnit::Hours,
        }
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.to_minutes() == other.to_minutes()
    }
}

impl Eq for Interval {}

impl Hash for Interval {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_minutes().hash(state);
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_minutes().cmp(&other.to_minutes())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

/// Parse `"15m"`, `"1h"`, `"2d"`, `"1w"`, or spelled forms like
/// `"15 minutes"` and `"1 hour"`.
impl FromStr for Interval {
    type Err = BusinessTimeError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().to_lowercase();
        let digits_end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (number, unit) = trimmed.split_at(digits_end);

        if number.is_empty() {
            return Err(BusinessTimeError::InvalidArgument(format!(
                "expected a number at the start of interval '{}'",
                s.trim()
            )));
        }
        let amount: i64 = number.parse().map_err(|_| {
            BusinessTimeError::InvalidArgument(format!("invalid number in interval '{}'", s.trim()))
        })?;
        let unit = IntervalUnit::parse(unit.trim()).ok_or_else(|| {
            BusinessTimeError::InvalidArgument(format!("unknown unit in interval '{}'", s.trim()))
        })?;

        Self::new(amount, unit)
    }
}

impl TryFrom<String> for Interval {
    type Error = BusinessTimeError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Interval> for String {
    fn from(interval: Interval) -> Self {
        interval.to_string()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_convert_to_minutes() {
        assert_eq!(Interval::minutes(15).unwrap().to_minutes(), 15);
        assert_eq!(Interval::hours(2).unwrap().to_minutes(), 120);
        assert_eq!(Interval::days(1).unwrap().to_minutes(), 1_440);
        assert_eq!(Interval::weeks(1).unwrap().to_minutes(), 10_080);
    }

    #[test]
    fn test_non_positive_amount_is_rejected() {
        for amount in [0, -1, -60] {
            let err = Interval::minutes(amount).unwrap_err();
            assert!(matches!(err, BusinessTimeError::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_oversized_amount_is_rejected() {
        let err = Interval::minutes(i64::from(u32::MAX) + 1).unwrap_err();
        assert!(matches!(err, BusinessTimeError::InvalidArgument(_)));
    }

    #[test]
    fn test_equality_by_minute_equivalent() {
        assert_eq!(Interval::minutes(60).unwrap(), Interval::hours(1).unwrap());
        assert_eq!(Interval::hours(24).unwrap(), Interval::days(1).unwrap());
        assert_ne!(Interval::minutes(59).unwrap(), Interval::hours(1).unwrap());
        assert!(Interval::minutes(15).unwrap() < Interval::hours(1).unwrap());
    }

    #[test]
    fn test_equal_intervals_hash_alike() {
        use std::collections::HashSet;

        let set: HashSet<Interval> = [Interval::minutes(1_440).unwrap(), Interval::days(1).unwrap()]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_default_is_one_hour() {
        assert_eq!(Interval::default(), Interval::hours(1).unwrap());
    }

    #[test]
    fn test_parse_compact_and_spelled() {
        assert_eq!("15m".parse::<Interval>().unwrap(), Interval::minutes(15).unwrap());
        assert_eq!("1h".parse::<Interval>().unwrap(), Interval::hours(1).unwrap());
        assert_eq!("2D".parse::<Interval>().unwrap(), Interval::days(2).unwrap());
        assert_eq!("30 minutes".parse::<Interval>().unwrap(), Interval::minutes(30).unwrap());
        assert_eq!(" 1 week ".parse::<Interval>().unwrap(), Interval::weeks(1).unwrap());
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "h", "15", "15x", "0m", "-5m", "1h30m"] {
            assert!(input.parse::<Interval>().is_err(), "'{input}' should not parse");
        }
    }

    #[test]
    fn test_display_is_compact() {
        assert_eq!(Interval::minutes(15).unwrap().to_string(), "15m");
        assert_eq!(Interval::weeks(2).unwrap().to_string(), "2w");
    }

    #[test]
    fn test_serde_uses_compact_string() {
        let json = serde_json::to_string(&Interval::minutes(15).unwrap()).unwrap();
        assert_eq!(json, "\"15m\"");

        let back: Interval = serde_json::from_str("\"2h\"").unwrap();
        assert_eq!(back, Interval::hours(2).unwrap());

        assert!(serde_json::from_str::<Interval>("\"0h\"").is_err());
    }
}

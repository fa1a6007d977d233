//! The business-time context and diff engine.
//!
//! A [`BusinessTime`] is a timestamp together with the rules that define
//! business time for it: a constraint set (weekdays, 09:00 to 17:00 by
//! default) and a precision (one hour by default). Diffing two of them walks
//! the span between their timestamps in precision-sized steps and counts the
//! steps whose *starting* instant is business time.
//!
//! # Examples
//!
//! ```
//! use business_time::{BusinessTime, Interval};
//! use chrono::NaiveDate;
//!
//! let monday = NaiveDate::from_ymd_opt(2018, 5, 14).unwrap();
//! let start = BusinessTime::new(monday.and_hms_opt(9, 0, 0).unwrap());
//! let end = BusinessTime::new(monday.and_hms_opt(17, 0, 0).unwrap());
//! assert_eq!(start.diff_in_business_hours(&end), 8);
//!
//! let fine = start.with_precision(Interval::minutes(15).unwrap());
//! assert_eq!(fine.diff_in_partial_business_hours(&monday.and_hms_opt(10, 30, 0).unwrap()), 1.5);
//! ```

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::composite::All;
use crate::config::ScheduleConfig;
use crate::constraint::{BetweenTimesOfDay, Constraint, WeekdaysOnly};
use crate::error::Result;
use crate::interval::Interval;
use crate::parse::{NaturalParser, TimestampParser};

/// Anything that can stand at the far end of a diff.
pub trait AsTimestamp {
    fn as_timestamp(&self) -> NaiveDateTime;
}

impl AsTimestamp for NaiveDateTime {
    fn as_timestamp(&self) -> NaiveDateTime {
        *self
    }
}

impl AsTimestamp for BusinessTime {
    fn as_timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

/// A timestamp with its business-time configuration.
///
/// Cloning is cheap: constraints are shared immutably. A `BusinessTime` is
/// `Send + Sync`, so distinct values can be diffed from different threads.
#[derive(Debug, Clone)]
pub struct BusinessTime {
    timestamp: NaiveDateTime,
    constraints: All,
    precision: Interval,
}

impl BusinessTime {
    /// A context with the default constraints (weekdays, 09:00 to 17:00)
    /// and one-hour precision.
    pub fn new(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            constraints: default_constraints(),
            precision: Interval::default(),
        }
    }

    /// Parse `input` relative to the local wall clock.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessTimeError::UnparseableTimestamp`] if the input is
    /// not understood by [`NaturalParser`].
    ///
    /// [`BusinessTimeError::UnparseableTimestamp`]: crate::BusinessTimeError::UnparseableTimestamp
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with(input, &NaturalParser::now())
    }

    /// Parse `input` with a caller-supplied parser. Parser errors are
    /// returned unchanged.
    pub fn parse_with<P: TimestampParser + ?Sized>(input: &str, parser: &P) -> Result<Self> {
        parser.parse(input).map(Self::new)
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn precision(&self) -> Interval {
        self.precision
    }

    /// Replace the step used by subsequent diffs. Constraints are untouched.
    pub fn set_precision(&mut self, precision: Interval) {
        self.precision = precision;
    }

    pub fn with_precision(mut self, precision: Interval) -> Self {
        self.set_precision(precision);
        self
    }

    /// The configured constraints, combined with AND.
    pub fn constraints(&self) -> &All {
        &self.constraints
    }

    /// Append a constraint to the set.
    pub fn add_constraint<C: Constraint + 'static>(&mut self, constraint: C) {
        self.constraints.push(Arc::new(constraint));
    }

    /// Replace the whole constraint set.
    ///
    /// An empty set makes every instant business time.
    pub fn set_constraints(&mut self, constraints: Vec<Arc<dyn Constraint>>) {
        if constraints.is_empty() {
            warn!("empty constraint set configured; every instant counts as business time");
        }
        self.constraints = All::new(constraints);
    }

    pub fn with_constraints(mut self, constraints: Vec<Arc<dyn Constraint>>) -> Self {
        self.set_constraints(constraints);
        self
    }

    /// Replace constraints and precision with those described by `schedule`.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessTimeError::InvalidArgument`] if a constraint in the
    /// schedule cannot be built. On error `self` is left unchanged.
    ///
    /// [`BusinessTimeError::InvalidArgument`]: crate::BusinessTimeError::InvalidArgument
    pub fn apply_schedule(&mut self, schedule: &ScheduleConfig) -> Result<()> {
        let constraints = schedule.build_constraints()?;
        self.set_constraints(constraints);
        self.set_precision(schedule.precision);
        Ok(())
    }

    /// Whether this context's own timestamp is business time.
    pub fn is_business_time(&self) -> bool {
        self.constraints.is_business_time(self.timestamp)
    }

    /// Why this context's timestamp is, or is not, business time.
    pub fn narrate(&self) -> String {
        self.constraints.narrate(self.timestamp)
    }

    /// Business minutes between this timestamp and `other`, in whole
    /// precision steps.
    ///
    /// The span is scanned from the earlier timestamp to the later one, so
    /// the result does not depend on call direction. Each step counts fully
    /// or not at all, judged by its starting instant.
    pub fn diff_in_business_minutes<T: AsTimestamp + ?Sized>(&self, other: &T) -> i64 {
        let other = other.as_timestamp();
        let (start, end) = if self.timestamp <= other {
            (self.timestamp, other)
        } else {
            (other, self.timestamp)
        };

        let step_minutes = self.precision.to_minutes();
        let step = self.precision.to_duration();

        let mut business_steps: i64 = 0;
        let mut total_steps: i64 = 0;
        let mut cursor = start;
        while cursor < end {
            if self.constraints.is_business_time(cursor) {
                business_steps += 1;
            }
            total_steps += 1;
            // Past chrono's range means past `end` too.
            match cursor.checked_add_signed(step) {
                Some(next) => cursor = next,
                None => break,
            }
        }

        let minutes = business_steps * step_minutes;
        debug!(
            %start,
            %end,
            precision = %self.precision,
            total_steps,
            business_steps,
            minutes,
            "computed business-time diff"
        );
        minutes
    }

    /// Whole business hours between this timestamp and `other`.
    ///
    /// With a precision that does not divide an hour evenly, the total is
    /// floored to the hour.
    pub fn diff_in_business_hours<T: AsTimestamp + ?Sized>(&self, other: &T) -> i64 {
        self.diff_in_business_minutes(other) / 60
    }

    /// Business hours between this timestamp and `other`, keeping the
    /// fraction the precision allows (e.g. quarters of an hour with 15
    /// minute precision).
    pub fn diff_in_partial_business_hours<T: AsTimestamp + ?Sized>(&self, other: &T) -> f64 {
        self.diff_in_business_minutes(other) as f64 / 60.0
    }
}

/// Weekdays, 09:00 to 17:00.
pub fn default_constraints() -> All {
    All::default()
        .with(WeekdaysOnly)
        .with(BetweenTimesOfDay::default())
}

// ── Tests ───────────────────────────────────────────────────────────────────

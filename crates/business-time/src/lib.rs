//! # business-time
//!
//! Business-time arithmetic: how many working hours lie between two
//! instants, where "working" is defined by composable constraints.
//!
//! The engine steps from one timestamp to the other at a configurable
//! precision, asks the constraint set about each step's starting instant,
//! and adds up the steps that count. It performs no I/O and holds no shared
//! mutable state.
//!
//! ## Modules
//!
//! - [`business_time`]: the [`BusinessTime`] context and the diff engine
//! - [`constraint`]: the [`Constraint`] trait and leaf constraints
//! - [`composite`]: AND / OR / NOT over constraints
//! - [`interval`]: step sizes ("15 minutes", "1 hour")
//! - [`parse`]: the [`TimestampParser`] seam and its default implementation
//! - [`config`]: serde schedule descriptions
//! - [`error`]: error types
//!
//! ## Example
//!
//! ```
//! use business_time::{BusinessTime, NaturalParser};
//! use chrono::NaiveDate;
//!
//! let parser = NaturalParser::new(
//!     NaiveDate::from_ymd_opt(2018, 5, 21).unwrap().and_hms_opt(12, 0, 0).unwrap(),
//! );
//! let friday = BusinessTime::parse_with("Friday 2018-05-18 09:00", &parser).unwrap();
//! let monday = BusinessTime::parse_with("Monday 2018-05-21 10:00", &parser).unwrap();
//!
//! assert_eq!(friday.diff_in_business_hours(&monday), 9);
//! assert_eq!(monday.narrate(), "business time");
//! ```

pub mod business_time;
pub mod composite;
pub mod config;
pub mod constraint;
pub mod error;
pub mod interval;
pub mod parse;

pub use business_time::{default_constraints, AsTimestamp, BusinessTime};
pub use composite::{All, Any, Not};
pub use config::{ConstraintConfig, ScheduleConfig};
pub use constraint::{
    minute_of_day, AnyTime, BetweenTimesOfDay, Constraint, DaysOfWeek, Holidays, WeekdaysOnly,
    MINUTES_PER_DAY,
};
pub use error::{BusinessTimeError, Result};
pub use interval::{Interval, IntervalUnit};
pub use parse::{NaturalParser, TimestampParser};

//! Serializable schedule descriptions.
//!
//! A [`ScheduleConfig`] describes a constraint set and a precision as plain
//! data, so schedules can live in JSON (or any serde format) and be turned
//! into runtime constraints with [`ScheduleConfig::build_constraints`].
//! Reading the data from disk is up to the caller.
//!
//! ```
//! use business_time::ScheduleConfig;
//!
//! let schedule = ScheduleConfig::from_json(r#"{
//!     "constraints": [
//!         { "type": "days_of_week", "days": ["Mon", "Tue", "Wed", "Thu"] },
//!         { "type": "between_times_of_day", "min": "08:00", "max": "18:00" },
//!         { "type": "holidays", "dates": ["2018-12-25"] }
//!     ],
//!     "precision": "15m"
//! }"#).unwrap();
//! assert_eq!(schedule.build_constraints().unwrap().len(), 3);
//! ```

use std::sync::Arc;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::composite::{All, Any, Not};
use crate::constraint::{
    AnyTime, BetweenTimesOfDay, Constraint, DaysOfWeek, Holidays, WeekdaysOnly,
};
use crate::error::{BusinessTimeError, Result};
use crate::interval::Interval;

/// One constraint, as data. Composites nest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstraintConfig {
    WeekdaysOnly,
    DaysOfWeek {
        days: Vec<Weekday>,
    },
    BetweenTimesOfDay {
        min: String,
        max: String,
    },
    Holidays {
        dates: Vec<NaiveDate>,
    },
    AnyTime,
    All {
        constraints: Vec<ConstraintConfig>,
    },
    Any {
        constraints: Vec<ConstraintConfig>,
    },
    Not {
        constraint: Box<ConstraintConfig>,
    },
}

impl ConstraintConfig {
    /// Build the runtime constraint.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessTimeError::InvalidArgument`] if a time-of-day bound
    /// anywhere in the tree cannot be parsed.
    pub fn build(&self) -> Result<Arc<dyn Constraint>> {
        let constraint: Arc<dyn Constraint> = match self {
            ConstraintConfig::WeekdaysOnly => Arc::new(WeekdaysOnly),
            ConstraintConfig::DaysOfWeek { days } => {
                Arc::new(DaysOfWeek::new(days.iter().copied()))
            }
            ConstraintConfig::BetweenTimesOfDay { min, max } => {
                Arc::new(BetweenTimesOfDay::new(min, max)?)
            }
            ConstraintConfig::Holidays { dates } => Arc::new(Holidays::new(dates.iter().copied())),
            ConstraintConfig::AnyTime => Arc::new(AnyTime),
            ConstraintConfig::All { constraints } => Arc::new(All::new(build_all(constraints)?)),
            ConstraintConfig::Any { constraints } => Arc::new(Any::new(build_all(constraints)?)),
            ConstraintConfig::Not { constraint } => Arc::new(Not::new(constraint.build()?)),
        };
        Ok(constraint)
    }
}

fn build_all(configs: &[ConstraintConfig]) -> Result<Vec<Arc<dyn Constraint>>> {
    configs.iter().map(ConstraintConfig::build).collect()
}

fn default_constraint_configs() -> Vec<ConstraintConfig> {
    vec![
        ConstraintConfig::WeekdaysOnly,
        ConstraintConfig::BetweenTimesOfDay {
            min: "09:00".to_string(),
            max: "17:00".to_string(),
        },
    ]
}

/// A full schedule: constraints (combined with AND) and diff precision.
///
/// Missing fields fall back to the engine defaults: weekdays, 09:00 to
/// 17:00, one-hour precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_constraint_configs")]
    pub constraints: Vec<ConstraintConfig>,
    #[serde(default)]
    pub precision: Interval,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            constraints: default_constraint_configs(),
            precision: Interval::default(),
        }
    }
}

impl ScheduleConfig {
    /// Deserialize a schedule from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessTimeError::InvalidConfig`] on malformed JSON,
    /// unknown constraint types, or an invalid precision.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BusinessTimeError::InvalidConfig(e.to_string()))
    }

    /// Build the runtime constraint list.
    pub fn build_constraints(&self) -> Result<Vec<Arc<dyn Constraint>>> {
        build_all(&self.constraints)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

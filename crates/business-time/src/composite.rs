//! Constraints built from other constraints.
//!
//! - [`All`]: business time only when every member agrees (AND)
//! - [`Any`]: business time when at least one member agrees (OR)
//! - [`Not`]: inverts a single constraint
//!
//! Members are held as `Arc<dyn Constraint>`, so composites are cheap to
//! clone and nest arbitrarily.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::constraint::Constraint;

/// Narration of a composite that accepted (for [`All`]) or rejected (for
/// [`Any`]) an instant without a single member to blame.
pub const BUSINESS_TIME: &str = "business time";
pub const OUTSIDE_BUSINESS_TIME: &str = "outside business time";

// ── All ─────────────────────────────────────────────────────────────────────

/// Conjunction. An empty `All` accepts every instant.
///
/// Narrates the first member that rejects the instant, or
/// `"business time"` when none does. Narrate members individually for the
/// full picture.
#[derive(Debug, Clone, Default)]
pub struct All {
    members: Vec<Arc<dyn Constraint>>,
}

impl All {
    pub fn new(members: Vec<Arc<dyn Constraint>>) -> Self {
        Self { members }
    }

    /// Builder form of [`push`](Self::push).
    pub fn with<C: Constraint + 'static>(mut self, constraint: C) -> Self {
        self.members.push(Arc::new(constraint));
        self
    }

    pub fn push(&mut self, constraint: Arc<dyn Constraint>) {
        self.members.push(constraint);
    }

    pub fn members(&self) -> &[Arc<dyn Constraint>] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }
}

impl Constraint for All {
    fn is_business_time(&self, at: NaiveDateTime) -> bool {
        self.members.iter().all(|c| c.is_business_time(at))
    }

    fn narrate(&self, at: NaiveDateTime) -> String {
        self.members
            .iter()
            .find(|c| !c.is_business_time(at))
            .map(|c| c.narrate(at))
            .unwrap_or_else(|| BUSINESS_TIME.to_string())
    }
}

// ── Any ─────────────────────────────────────────────────────────────────────

/// Disjunction. An empty `Any` rejects every instant.
///
/// Narrates the first member that accepts the instant, or
/// `"outside business time"` when none does.
#[derive(Debug, Clone, Default)]
pub struct Any {
    members: Vec<Arc<dyn Constraint>>,
}

impl Any {
    pub fn new(members: Vec<Arc<dyn Constraint>>) -> Self {
        Self { members }
    }

    pub fn with<C: Constraint + 'static>(mut self, constraint: C) -> Self {
        self.members.push(Arc::new(constraint));
        self
    }

    pub fn members(&self) -> &[Arc<dyn Constraint>] {
        &self.members
    }
}

impl Constraint for Any {
    fn is_business_time(&self, at: NaiveDateTime) -> bool {
        self.members.iter().any(|c| c.is_business_time(at))
    }

    fn narrate(&self, at: NaiveDateTime) -> String {
        self.members
            .iter()
            .find(|c| c.is_business_time(at))
            .map(|c| c.narrate(at))
            .unwrap_or_else(|| OUTSIDE_BUSINESS_TIME.to_string())
    }
}

// ── Not ─────────────────────────────────────────────────────────────────────

/// Inverts a constraint. The narration is the inner constraint's, which
/// already describes the instant either way ("the weekend", "a holiday").
#[derive(Debug, Clone)]
pub struct Not {
    inner: Arc<dyn Constraint>,
}

impl Not {
    pub fn new(inner: Arc<dyn Constraint>) -> Self {
        Self { inner }
    }
}

impl Constraint for Not {
    fn is_business_time(&self, at: NaiveDateTime) -> bool {
        !self.inner.is_business_time(at)
    }

    fn narrate(&self, at: NaiveDateTime) -> String {
        self.inner.narrate(at)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{BetweenTimesOfDay, Holidays, WeekdaysOnly};
    use chrono::NaiveDate;

    fn may_2018(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 5, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn office_hours() -> All {
        All::default()
            .with(WeekdaysOnly)
            .with(BetweenTimesOfDay::default())
    }

    #[test]
    fn test_all_requires_every_member() {
        let all = office_hours();
        assert!(all.is_business_time(may_2018(14, 10, 0)));
        assert!(!all.is_business_time(may_2018(14, 18, 0)));
        assert!(!all.is_business_time(may_2018(19, 10, 0)));
    }

    #[test]
    fn test_all_narrates_first_rejecting_member() {
        let all = office_hours();
        assert_eq!(all.narrate(may_2018(14, 10, 0)), "business time");
        assert_eq!(all.narrate(may_2018(14, 18, 0)), "outside business hours");
        // Saturday evening: weekday check fails first.
        assert_eq!(all.narrate(may_2018(19, 18, 0)), "the weekend");
    }

    #[test]
    fn test_empty_all_accepts_everything() {
        let all = All::default();
        assert!(all.is_empty());
        assert!(all.is_business_time(may_2018(19, 3, 0)));
        assert_eq!(all.narrate(may_2018(19, 3, 0)), "business time");
    }

    #[test]
    fn test_all_push_appends() {
        let mut all = All::default();
        all.push(Arc::new(WeekdaysOnly));
        assert_eq!(all.len(), 1);
        assert!(!all.is_business_time(may_2018(20, 10, 0)));
    }

    #[test]
    fn test_any_accepts_when_one_member_does() {
        let shifts = Any::default()
            .with(BetweenTimesOfDay::new("06:00", "14:00").unwrap())
            .with(BetweenTimesOfDay::new("14:00", "22:00").unwrap());
        assert!(shifts.is_business_time(may_2018(14, 6, 0)));
        assert!(shifts.is_business_time(may_2018(14, 21, 59)));
        assert!(!shifts.is_business_time(may_2018(14, 22, 0)));
        assert_eq!(shifts.narrate(may_2018(14, 13, 0)), "business hours");
        assert_eq!(shifts.narrate(may_2018(14, 23, 0)), "outside business time");
    }

    #[test]
    fn test_empty_any_rejects_everything() {
        let any = Any::default();
        assert!(!any.is_business_time(may_2018(14, 10, 0)));
    }

    #[test]
    fn test_not_inverts_and_keeps_narration() {
        let weekends = Not::new(Arc::new(WeekdaysOnly));
        assert!(weekends.is_business_time(may_2018(19, 10, 0)));
        assert!(!weekends.is_business_time(may_2018(18, 10, 0)));
        assert_eq!(weekends.narrate(may_2018(19, 10, 0)), "the weekend");
    }

    #[test]
    fn test_nested_composites() {
        let holiday = NaiveDate::from_ymd_opt(2018, 5, 28).unwrap();
        let constraint = All::default()
            .with(office_hours())
            .with(Holidays::new([holiday]));
        assert!(!constraint.is_business_time(may_2018(28, 10, 0)));
        assert_eq!(constraint.narrate(may_2018(28, 10, 0)), "a holiday");
        assert!(constraint.is_business_time(may_2018(29, 10, 0)));
    }
}

use business_time::{BetweenTimesOfDay, BusinessTime, Constraint, Interval};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use proptest::prelude::*;

/// Monday 2018-05-14 00:00.
fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2018, 5, 14)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Up to four weeks after `epoch`, at minute resolution.
fn timestamp() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..4 * 7 * 24 * 60).prop_map(|m| epoch() + Duration::minutes(m))
}

/// Up to four weeks after `epoch`, on the hour.
fn hourly_timestamp() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..4 * 7 * 24).prop_map(|h| epoch() + Duration::hours(h))
}

fn precision() -> impl Strategy<Value = Interval> {
    prop_oneof![
        Just(Interval::minutes(15).unwrap()),
        Just(Interval::minutes(25).unwrap()),
        Just(Interval::hours(1).unwrap()),
        Just(Interval::hours(3).unwrap()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn diff_is_symmetric(a in timestamp(), b in timestamp(), p in precision()) {
        let forward = BusinessTime::new(a).with_precision(p);
        let backward = BusinessTime::new(b).with_precision(p);
        prop_assert_eq!(forward.diff_in_business_hours(&b), backward.diff_in_business_hours(&a));
        prop_assert_eq!(
            forward.diff_in_partial_business_hours(&b),
            backward.diff_in_partial_business_hours(&a)
        );
    }

    #[test]
    fn diff_of_equal_instants_is_zero(a in timestamp(), p in precision()) {
        let t = BusinessTime::new(a).with_precision(p);
        prop_assert_eq!(t.diff_in_business_hours(&a), 0);
        prop_assert_eq!(t.diff_in_partial_business_hours(&a), 0.0);
    }

    #[test]
    fn weekend_spans_are_zero(
        a in 0i64..2 * 24 * 60,
        b in 0i64..2 * 24 * 60,
        p in precision(),
    ) {
        let saturday = epoch() + Duration::days(5);
        let start = BusinessTime::new(saturday + Duration::minutes(a)).with_precision(p);
        let end = saturday + Duration::minutes(b);
        prop_assert_eq!(start.diff_in_business_minutes(&end), 0);
    }

    #[test]
    fn quarter_hour_precision_agrees_with_hourly_on_the_hour(
        a in hourly_timestamp(),
        b in hourly_timestamp(),
    ) {
        let hourly = BusinessTime::new(a);
        let quarterly = BusinessTime::new(a).with_precision(Interval::minutes(15).unwrap());
        prop_assert_eq!(
            quarterly.diff_in_partial_business_hours(&b),
            hourly.diff_in_business_hours(&b) as f64
        );
    }

    #[test]
    fn whole_hours_floor_partial_hours(a in timestamp(), b in timestamp(), p in precision()) {
        let t = BusinessTime::new(a).with_precision(p);
        let whole = t.diff_in_business_hours(&b);
        let partial = t.diff_in_partial_business_hours(&b);
        prop_assert!(whole as f64 <= partial);
        prop_assert!(partial < whole as f64 + 1.0);
    }

    #[test]
    fn time_of_day_window_is_half_open(min in 0u32..1440, max in 0u32..1440) {
        let day = epoch().date();
        let min_time = NaiveTime::from_hms_opt(min / 60, min % 60, 0).unwrap();
        let max_time = NaiveTime::from_hms_opt(max / 60, max % 60, 0).unwrap();
        let window = BetweenTimesOfDay::from_times(min_time, max_time);

        prop_assert!(!window.is_business_time(day.and_time(max_time)));
        prop_assert_eq!(window.is_business_time(day.and_time(min_time)), min != max);
    }

    #[test]
    fn window_and_its_complement_partition_the_day(
        min in 0u32..1440,
        max in 0u32..1440,
        minute in 0u32..1440,
    ) {
        prop_assume!(min != max);
        let time = |m: u32| NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap();
        let window = BetweenTimesOfDay::from_times(time(min), time(max));
        let complement = BetweenTimesOfDay::from_times(time(max), time(min));
        let at = epoch().date().and_time(time(minute));

        prop_assert!(window.is_business_time(at) ^ complement.is_business_time(at));
    }
}

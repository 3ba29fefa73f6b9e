use chrono::NaiveTime;
use duxcall_api::handlers::admin::parse_weekly_days;
use duxcall_core::{
    errors::CallError,
    models::schedule::{DayHours, WeeklyHoursInput},
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn input(dow: i16, is_closed: bool, open: Option<&str>, close: Option<&str>) -> WeeklyHoursInput {
    WeeklyHoursInput {
        dow,
        is_closed,
        open: open.map(str::to_string),
        close: close.map(str::to_string),
    }
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn test_full_week_parses() {
    let days: Vec<_> = (0..5)
        .map(|dow| input(dow, false, Some("09:00"), Some("17:00")))
        .chain([input(5, false, Some("09:00"), Some("12:00")), input(6, true, None, None)])
        .collect();

    let parsed = parse_weekly_days(&days).unwrap();

    assert_eq!(parsed.len(), 7);
    assert_eq!(parsed[0], (0, DayHours::open(time(9, 0), time(17, 0))));
    assert_eq!(parsed[5], (5, DayHours::open(time(9, 0), time(12, 0))));
    assert_eq!(parsed[6], (6, DayHours::closed()));
}

#[test]
fn test_closed_day_drops_times() {
    let parsed = parse_weekly_days(&[input(2, true, Some("09:00"), Some("17:00"))]).unwrap();

    assert_eq!(parsed[2], (2, DayHours::closed()));
}

#[rstest]
#[case(Some("09:00"), None)]
#[case(None, Some("17:00"))]
#[case(Some("  "), Some("17:00"))]
fn test_half_defined_day_is_closed(#[case] open: Option<&str>, #[case] close: Option<&str>) {
    let parsed = parse_weekly_days(&[input(1, false, open, close)]).unwrap();

    assert_eq!(parsed[1], (1, DayHours::closed()));
}

#[test]
fn test_seconds_are_accepted() {
    let parsed = parse_weekly_days(&[input(3, false, Some("13:00:00"), Some("16:00"))]).unwrap();

    assert_eq!(parsed[3], (3, DayHours::open(time(13, 0), time(16, 0))));
}

#[test]
fn test_single_day_submission_closes_the_rest_of_the_week() {
    let parsed = parse_weekly_days(&[input(0, false, Some("09:00"), Some("17:00"))]).unwrap();

    let expected: Vec<(i16, DayHours)> = (0..7)
        .map(|dow| {
            if dow == 0 {
                (dow, DayHours::open(time(9, 0), time(17, 0)))
            } else {
                (dow, DayHours::closed())
            }
        })
        .collect();
    assert_eq!(parsed, expected);
}

#[test]
fn test_empty_submission_closes_every_day() {
    let parsed = parse_weekly_days(&[]).unwrap();

    assert_eq!(parsed.len(), 7);
    assert!(parsed.iter().all(|(_, hours)| *hours == DayHours::closed()));
}

#[test]
fn test_days_come_back_in_order() {
    let parsed = parse_weekly_days(&[
        input(6, true, None, None),
        input(4, false, Some("10:00"), Some("11:00")),
    ])
    .unwrap();

    let order: Vec<i16> = parsed.iter().map(|(dow, _)| *dow).collect();
    assert_eq!(order, vec![0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(parsed[4].1, DayHours::open(time(10, 0), time(11, 0)));
}

#[rstest]
#[case(-1)]
#[case(7)]
fn test_out_of_range_day_is_rejected(#[case] dow: i16) {
    let result = parse_weekly_days(&[input(dow, true, None, None)]);

    assert!(matches!(result, Err(CallError::Validation(_))));
}

#[test]
fn test_duplicate_day_is_rejected() {
    let result = parse_weekly_days(&[input(4, true, None, None), input(4, true, None, None)]);

    assert!(matches!(result, Err(CallError::Validation(_))));
}

#[test]
fn test_malformed_time_is_rejected() {
    let result = parse_weekly_days(&[input(0, false, Some("25:00"), Some("17:00"))]);

    assert!(matches!(result, Err(CallError::Validation(_))));
}

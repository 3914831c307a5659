//! Integration tests for the timeline.
//!
//! This test file verifies:
//! - Daily and monthly splits over generated day-by-day data
//! - Day/month filters by label and by timestamp
//! - Loading a record file and splitting it end to end

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use tally_core::{
    load_records, render_text, CoreError, DateSelector, LoadOptions, Period, Record, Timeline,
    ValidationError, Value,
};

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// One record per day walking backwards from `start`.
fn timed_data(start: NaiveDateTime, days: i64) -> Vec<Record> {
    (0..days)
        .map(|i| {
            let pointer = start - Duration::days(i);
            Record::new()
                .with("id", i)
                .with("datetime", pointer)
                .with("month", pointer.format("%m").to_string())
                .with("year", pointer.format("%Y").to_string())
        })
        .collect()
}

fn scenario() -> Timeline {
    Timeline::new(vec![
        Record::new().with("datetime", at(2021, 1, 1)).with("month", "01"),
        Record::new().with("datetime", at(2021, 1, 2)).with("month", "01"),
        Record::new().with("datetime", at(2021, 2, 1)).with("month", "02"),
    ])
}

#[test]
fn test_daily_split_has_one_bucket_per_day() {
    let data = timed_data(Local::now().naive_local(), 10);
    let timeline = Timeline::new(data);
    let daily = timeline.split_daily(None, None);
    assert_eq!(daily.len(), 10, "10 days of data should yield 10 daily buckets");
}

#[test]
fn test_monthly_split_over_generated_data() {
    // 2021-03-10 back to 2021-02-19: 10 days in March, 10 in February
    let timeline = Timeline::new(timed_data(at(2021, 3, 10), 20));
    let monthly = timeline.split_monthly(None, None);

    assert_eq!(monthly.len(), 2);
    assert_eq!(monthly["202103"]["month"][&Value::from("03")], 10);
    assert_eq!(monthly["202102"]["month"][&Value::from("02")], 10);
    assert_eq!(monthly["202102"]["year"][&Value::from("2021")], 10);
    assert_eq!(monthly["202103"]["id"].len(), 10);
}

#[test]
fn test_scenario_split_monthly() {
    let monthly = scenario().split_monthly(None, None);
    let json = serde_json::to_value(tally_core::to_sorted(&monthly)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "202101": {"month": {"01": 2}},
            "202102": {"month": {"02": 1}}
        })
    );
}

#[test]
fn test_scenario_filter_by_day() {
    let timeline = scenario();
    let hits: Vec<&Record> = timeline.filter_by_day("20210101").unwrap().collect();
    assert_eq!(
        hits,
        vec![&Record::new().with("datetime", at(2021, 1, 1)).with("month", "01")]
    );
}

#[test]
fn test_scenario_empty_timeline() {
    assert!(Timeline::new(Vec::new()).split_daily(None, None).is_empty());
}

#[test]
fn test_filter_by_day_defaults_to_today() {
    let now = Local::now().naive_local();
    let timeline = Timeline::new(timed_data(now, 3));
    let today: Vec<_> = timeline.filter_by_day(DateSelector::Now).unwrap().collect();
    let this_month = timeline.filter_by_month(DateSelector::default()).unwrap().count();

    // skip the exact check if midnight passed since the data was generated
    if Period::Day.label(Local::now().naive_local()) == Period::Day.label(now) {
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].datetime("datetime"), Some(now));
        assert!(this_month >= 1);
    }
    assert!(this_month <= 3);
}

#[test]
fn test_invalid_label_is_rejected() {
    let timeline = scenario();
    let result = timeline.filter_by_day("2021-01-01").map(|it| it.count());
    match result {
        Err(CoreError::Validation(ValidationError::InvalidPeriodLabel { label, expected_len })) => {
            assert_eq!(label, "2021-01-01");
            assert_eq!(expected_len, 8);
        }
        other => panic!("expected InvalidPeriodLabel, got {:?}", other),
    }
}

#[test]
fn test_queries_are_idempotent() {
    let timeline = Timeline::new(timed_data(at(2021, 6, 1), 45));
    assert_eq!(
        timeline.split_daily(None, None),
        timeline.split_daily(None, None)
    );
    assert_eq!(
        timeline.split_monthly(Some(at(2021, 5, 1)), None),
        timeline.split_monthly(Some(at(2021, 5, 1)), None)
    );
    let first: Vec<_> = timeline.filter_by_month("202105").unwrap().collect();
    let second: Vec<_> = timeline.filter_by_month("202105").unwrap().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 31);
}

#[test]
fn test_load_then_split() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.jsonl");
    std::fs::write(
        &path,
        concat!(
            "{\"when\": \"2021-01-01 08:00:00\", \"status\": \"ok\"}\n",
            "{\"when\": \"2021-01-01 09:00:00\", \"status\": \"ok\"}\n",
            "{\"when\": \"2021-01-02\", \"status\": \"fail\"}\n",
            "{\"status\": \"orphan\"}\n",
        ),
    )
    .unwrap();

    let options = LoadOptions::default().with_date_key("when");
    let records = load_records(&path, &options).unwrap();
    let timeline = Timeline::with_date_key(records, "when");

    let daily = timeline.split_daily(None, None);
    let labels: HashSet<_> = daily.keys().cloned().collect();
    assert_eq!(labels, HashSet::from(["20210101".to_string(), "20210102".to_string()]));
    assert_eq!(daily["20210101"]["status"][&Value::from("ok")], 2);

    let text = render_text(&daily);
    assert_eq!(text, "20210101:\n  status: ok=2\n20210102:\n  status: fail=1\n");
}

//! Lookback labels and query windows.
//!
//! Run with: cargo test --test window_test

mod common;

use chrono::TimeDelta;
use climate_chart::chart::window::{parse_reference, Lookback, QueryWindow};
use climate_chart::error::ChartError;
use common::at;

#[test]
fn lookback_labels_map_to_durations() {
    let expected = [
        ("1 hour", TimeDelta::hours(1)),
        ("6 hours", TimeDelta::hours(6)),
        ("1 day", TimeDelta::hours(24)),
        ("3 days", TimeDelta::hours(72)),
        ("1 week", TimeDelta::hours(168)),
    ];

    for (label, duration) in expected {
        let lookback = Lookback::from_label(label).unwrap();
        assert_eq!(lookback.duration(), duration, "{label}");
        assert_eq!(lookback.label(), label);
    }

    let labels: Vec<&str> = Lookback::ALL.iter().map(|l| l.label()).collect();
    assert_eq!(labels, ["1 hour", "6 hours", "1 day", "3 days", "1 week"]);
}

#[test]
fn unknown_lookback_label_is_a_bad_request() {
    assert_eq!(Lookback::from_label("2 days"), None);
    assert_eq!(Lookback::from_label("1 Day"), None);
    assert!(matches!(
        "fortnight".parse::<Lookback>(),
        Err(ChartError::BadRequest(_))
    ));
}

#[test]
fn one_day_before_midnight_starts_the_previous_midnight() {
    let window = QueryWindow::ending_at(at("2020-01-02 00:00:00"), Lookback::OneDay).unwrap();

    assert_eq!(window.start, at("2020-01-01 00:00:00"));
    assert_eq!(window.end, at("2020-01-02 00:00:00"));
    assert_eq!(window.start_param(), "2020-01-01+00:00:00");
    assert_eq!(window.end_param(), "2020-01-02+00:00:00");
}

#[test]
fn window_crosses_month_and_year_boundaries() {
    let window = QueryWindow::ending_at(at("2021-03-02 05:30:15"), Lookback::OneWeek).unwrap();
    assert_eq!(window.start, at("2021-02-23 05:30:15"));

    let window = QueryWindow::ending_at(at("2020-01-01 02:00:00"), Lookback::SixHours).unwrap();
    assert_eq!(window.start_param(), "2019-12-31+20:00:00");
}

#[test]
fn reference_accepts_picker_formats() {
    let expected = at("2020-01-02 13:45:00");
    assert_eq!(parse_reference("2020-01-02 13:45:00").unwrap(), expected);
    assert_eq!(parse_reference("2020-01-02T13:45:00").unwrap(), expected);
    assert_eq!(parse_reference("2020-01-02T13:45").unwrap(), expected);
    assert_eq!(parse_reference(" 2020-01-02 13:45 ").unwrap(), expected);

    assert!(matches!(
        parse_reference("02/01/2020"),
        Err(ChartError::BadRequest(_))
    ));
}

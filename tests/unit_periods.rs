// tests/unit_periods.rs
use chrono::NaiveDate;
use scoretree_core::periods::{history_windows, Granularity};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

#[test]
fn months_end_with_the_previous_month_by_default() {
    let windows = history_windows(Granularity::Months, 3, false, date(2026, 8, 7));
    assert_eq!(windows.len(), 3);

    // Oldest first: May, June, July 2026.
    assert_eq!(windows[0].begin, date(2026, 5, 1));
    assert_eq!(windows[0].end, date(2026, 5, 31));
    assert_eq!(windows[1].begin, date(2026, 6, 1));
    assert_eq!(windows[1].end, date(2026, 6, 30));
    assert_eq!(windows[2].begin, date(2026, 7, 1));
    assert_eq!(windows[2].end, date(2026, 7, 31));

    let labels: Vec<&str> = windows.iter().map(|w| w.label.as_str()).collect();
    assert_eq!(labels, ["May 2026", "Jun 2026", "Jul 2026"]);
}

#[test]
fn current_flag_pulls_the_window_set_forward() {
    let windows = history_windows(Granularity::Months, 3, true, date(2026, 8, 7));
    assert_eq!(windows.len(), 3);
    assert_eq!(windows[0].begin, date(2026, 6, 1));
    assert_eq!(windows[2].begin, date(2026, 8, 1));
    assert_eq!(windows[2].end, date(2026, 8, 31));
    assert_eq!(windows[2].label, "Aug 2026");
}

#[test]
fn month_ends_respect_short_months() {
    let windows = history_windows(Granularity::Months, 1, false, date(2026, 3, 15));
    assert_eq!(windows[0].begin, date(2026, 2, 1));
    assert_eq!(windows[0].end, date(2026, 2, 28));
}

#[test]
fn month_ends_respect_leap_years() {
    let windows = history_windows(Granularity::Months, 1, false, date(2024, 3, 10));
    assert_eq!(windows[0].end, date(2024, 2, 29));
}

#[test]
fn day_windows_are_single_days() {
    let windows = history_windows(Granularity::Days, 2, false, date(2026, 8, 7));
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].begin, date(2026, 8, 5));
    assert_eq!(windows[0].end, date(2026, 8, 5));
    assert_eq!(windows[1].begin, date(2026, 8, 6));

    let labels: Vec<&str> = windows.iter().map(|w| w.label.as_str()).collect();
    assert_eq!(labels, ["Aug 05", "Aug 06"]);
}

#[test]
fn day_windows_can_include_today() {
    let windows = history_windows(Granularity::Days, 2, true, date(2026, 8, 7));
    assert_eq!(windows[0].begin, date(2026, 8, 6));
    assert_eq!(windows[1].begin, date(2026, 8, 7));
}

#[test]
fn day_windows_cross_month_boundaries() {
    let windows = history_windows(Granularity::Days, 2, false, date(2026, 8, 1));
    assert_eq!(windows[0].begin, date(2026, 7, 30));
    assert_eq!(windows[1].begin, date(2026, 7, 31));
    assert_eq!(windows[1].label, "Jul 31");
}

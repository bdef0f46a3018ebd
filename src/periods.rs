// src/periods.rs
//! Reporting-period computation: the timeline of month or day windows the
//! fetch layer queries, oldest first.

use chrono::{Datelike, Days, Months, NaiveDate};

/// Timeline granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Months,
    Days,
}

/// One reporting period: an inclusive date window plus its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodWindow {
    pub begin: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

/// Builds the reporting timeline counting back from `today`. The newest
/// window is the previous month/day unless `include_current` pulls the set
/// forward to include the current one; the window count stays `timeline`
/// either way. Period index 0 is the OLDEST window and indexes ascend
/// chronologically, so sorting per-period arrays by index restores
/// chronological order.
#[must_use]
pub fn history_windows(
    granularity: Granularity,
    timeline: u32,
    include_current: bool,
    today: NaiveDate,
) -> Vec<PeriodWindow> {
    let newest_offset: u64 = u64::from(!include_current);
    let mut windows = Vec::with_capacity(timeline as usize);
    for back in (0..u64::from(timeline)).rev() {
        let offset = newest_offset + back;
        windows.push(match granularity {
            Granularity::Months => month_window(today, offset),
            Granularity::Days => day_window(today, offset),
        });
    }
    windows
}

fn month_window(today: NaiveDate, offset: u64) -> PeriodWindow {
    let shifted = today
        .checked_sub_months(Months::new(offset as u32))
        .unwrap_or(today);
    let begin = shifted.with_day(1).unwrap_or(shifted);
    let end = last_of_month(begin);
    PeriodWindow {
        begin,
        end,
        label: begin.format("%b %Y").to_string(),
    }
}

fn day_window(today: NaiveDate, offset: u64) -> PeriodWindow {
    let day = today.checked_sub_days(Days::new(offset)).unwrap_or(today);
    PeriodWindow {
        begin: day,
        end: day,
        label: day.format("%b %d").to_string(),
    }
}

fn last_of_month(first: NaiveDate) -> NaiveDate {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

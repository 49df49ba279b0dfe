//! Monthly and yearly debit totals.
//!
//! Records without a date never contribute. Summaries are ordered newest
//! first, then the period containing the reference date is moved to the
//! front if it has any records.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use spendlens_parser::TransactionRecord;

use crate::models::{PeriodSummaries, PeriodSummary, PeriodTrend};
use crate::time::Period;

/// Aggregate debits per month and per year relative to `now`
pub fn aggregate_periods(records: &[TransactionRecord], now: NaiveDate) -> PeriodSummaries {
    PeriodSummaries {
        monthly: monthly_summaries(records, now),
        yearly: yearly_summaries(records, now),
    }
}

/// Debit totals per calendar month, current month first, then newest first
pub fn monthly_summaries(records: &[TransactionRecord], now: NaiveDate) -> Vec<PeriodSummary> {
    let mut totals: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for record in records {
        let Some(date) = record.date else { continue };
        *totals.entry((date.year(), date.month())).or_insert(0.0) += record.debit;
    }

    let mut summaries: Vec<PeriodSummary> = totals
        .into_iter()
        .rev()
        .map(|((year, month), total)| PeriodSummary::new(Period::Month { year, month }, total))
        .collect();

    pin_current(&mut summaries, Period::month_of(&now));
    summaries
}

/// Debit totals per calendar year, current year first, then newest first
pub fn yearly_summaries(records: &[TransactionRecord], now: NaiveDate) -> Vec<PeriodSummary> {
    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
    for record in records {
        let Some(date) = record.date else { continue };
        *totals.entry(date.year()).or_insert(0.0) += record.debit;
    }

    let mut summaries: Vec<PeriodSummary> = totals
        .into_iter()
        .rev()
        .map(|(year, total)| PeriodSummary::new(Period::Year { year }, total))
        .collect();

    pin_current(&mut summaries, Period::year_of(&now));
    summaries
}

/// Move the summary for `current` to the front, keeping the rest in order
fn pin_current(summaries: &mut Vec<PeriodSummary>, current: Period) {
    if let Some(idx) = summaries.iter().position(|s| s.period == current) {
        if idx > 0 {
            let summary = summaries.remove(idx);
            summaries.insert(0, summary);
        }
    }
}

/// Percent change between two totals, `None` when `previous` is zero
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        None
    } else {
        Some((current - previous) / previous * 100.0)
    }
}

/// Change of every summary against the one after it in the list.
///
/// The comparison follows list order, so a pinned current period is
/// compared against the newest of the remaining periods.
pub fn period_trends(summaries: &[PeriodSummary]) -> Vec<PeriodTrend> {
    summaries
        .iter()
        .enumerate()
        .map(|(idx, summary)| PeriodTrend {
            period_key: summary.period_key.clone(),
            change_pct: summaries
                .get(idx + 1)
                .and_then(|previous| percent_change(summary.total_debit, previous.total_debit)),
        })
        .collect()
}

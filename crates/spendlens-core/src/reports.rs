//! Dashboard report assembled from a session

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::period_trends;
use crate::models::{CategoryEntry, CategoryShare, PeriodSummary, TransactionPage};
use crate::session::Session;

/// A period total with its change against the next entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRow {
    pub period_key: String,
    pub total_debit: f64,
    pub change_pct: Option<f64>,
}

fn period_rows(summaries: &[PeriodSummary]) -> Vec<PeriodRow> {
    summaries
        .iter()
        .zip(period_trends(summaries))
        .map(|(summary, trend)| PeriodRow {
            period_key: summary.period_key.clone(),
            total_debit: summary.total_debit,
            change_pct: trend.change_pct,
        })
        .collect()
}

/// Category chart and table for the selected period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownReport {
    pub period_key: String,
    pub total: f64,
    pub chart: Vec<CategoryEntry>,
    pub table: Vec<CategoryShare>,
}

/// Everything the dashboard shows at one moment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub reference_date: NaiveDate,
    pub record_count: usize,
    pub dated_record_count: usize,
    pub monthly: Vec<PeriodRow>,
    pub yearly: Vec<PeriodRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<BreakdownReport>,
    pub transactions: TransactionPage,
}

impl DashboardReport {
    pub fn build(session: &Session, now: NaiveDate) -> Self {
        let summaries = session.period_summaries(now);
        let breakdown = session.selected_breakdown().map(|b| BreakdownReport {
            total: b.total(),
            table: b.shares(),
            period_key: b.period_key,
            chart: b.chart_categories,
        });

        Self {
            reference_date: now,
            record_count: session.record_count(),
            dated_record_count: session.dated_record_count(),
            monthly: period_rows(&summaries.monthly),
            yearly: period_rows(&summaries.yearly),
            breakdown,
            transactions: session.transaction_page(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendlens_config::Config;
    use spendlens_parser::TransactionRecord;

    fn tx(y: i32, m: u32, category: &str, debit: f64) -> TransactionRecord {
        TransactionRecord {
            date: NaiveDate::from_ymd_opt(y, m, 1),
            category: category.to_string(),
            debit,
            ..TransactionRecord::default()
        }
    }

    #[test]
    fn test_report_rows_carry_trends() {
        let records = vec![tx(2024, 2, "Food", 150.0), tx(2024, 1, "Food", 100.0)];
        let session = Session::with_records(&Config::default(), records);
        let report = DashboardReport::build(&session, NaiveDate::from_ymd_opt(2024, 2, 20).unwrap());

        assert_eq!(report.record_count, 2);
        assert_eq!(report.monthly[0].period_key, "February 2024");
        assert_eq!(report.monthly[0].change_pct, Some(50.0));
        assert_eq!(report.monthly[1].change_pct, None);
        assert_eq!(report.yearly.len(), 1);
        assert!(report.breakdown.is_none());
    }

    #[test]
    fn test_report_includes_selected_breakdown() {
        let records = vec![tx(2024, 1, "Rent", 300.0), tx(2024, 1, "Food", 100.0)];
        let mut session = Session::with_records(&Config::default(), records);
        session.select_period("2024");

        let report = DashboardReport::build(&session, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let breakdown = report.breakdown.unwrap();

        assert_eq!(breakdown.total, 400.0);
        assert_eq!(breakdown.chart.len(), 2);
        assert_eq!(breakdown.table[0].percentage, 75.0);
    }

    #[test]
    fn test_report_serializes() {
        let session = Session::with_records(&Config::default(), vec![tx(2024, 1, "Food", 1.0)]);
        let report = DashboardReport::build(&session, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["monthly"][0]["period_key"], "January 2024");
        assert_eq!(json["transactions"]["filtered_count"], 1);
        assert!(json.get("breakdown").is_none());
    }
}

//! Core data models for aggregated spending

use serde::{Deserialize, Serialize};
use spendlens_parser::TransactionRecord;

use super::time::Period;

/// Total debits for one month or year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Display key, "January 2024" or "2024"
    pub period_key: String,
    /// Sum of debits of the records falling in the period
    pub total_debit: f64,
    pub period: Period,
}

impl PeriodSummary {
    pub fn new(period: Period, total_debit: f64) -> Self {
        Self {
            period_key: period.key(),
            total_debit,
            period,
        }
    }
}

/// Monthly and yearly summaries, current period first when present
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummaries {
    pub monthly: Vec<PeriodSummary>,
    pub yearly: Vec<PeriodSummary>,
}

impl PeriodSummaries {
    pub fn is_empty(&self) -> bool {
        self.monthly.is_empty() && self.yearly.is_empty()
    }
}

/// Change of a summary against the entry that follows it in its list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTrend {
    pub period_key: String,
    /// Percent change, `None` without a comparable entry
    pub change_pct: Option<f64>,
}

/// Debit total of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    pub value: f64,
}

impl CategoryEntry {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Category entry with its share of the total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub name: String,
    pub value: f64,
    /// Percent of the breakdown total, 0 when the total is 0
    pub percentage: f64,
}

/// Category totals for one period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub period_key: String,
    /// Every category, largest first
    pub all_categories: Vec<CategoryEntry>,
    /// The largest categories plus one entry grouping the rest
    pub chart_categories: Vec<CategoryEntry>,
}

impl CategoryBreakdown {
    pub fn is_empty(&self) -> bool {
        self.all_categories.is_empty()
    }

    /// Sum of all category values
    pub fn total(&self) -> f64 {
        self.all_categories.iter().map(|c| c.value).sum()
    }

    /// Every category with its percentage of the total
    pub fn shares(&self) -> Vec<CategoryShare> {
        let total = self.total();
        self.all_categories
            .iter()
            .map(|c| CategoryShare {
                name: c.name.clone(),
                value: c.value,
                percentage: if total != 0.0 {
                    c.value / total * 100.0
                } else {
                    0.0
                },
            })
            .collect()
    }
}

/// One page of the filtered and sorted transaction list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionPage {
    pub items: Vec<TransactionRecord>,
    /// Records matching the search, across all pages
    pub filtered_count: usize,
    /// Debit total of all matching records
    pub total_debit: f64,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

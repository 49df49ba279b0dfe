//! Per-category debit totals for a selected period

use chrono::Datelike;
use spendlens_parser::TransactionRecord;

use crate::models::{CategoryBreakdown, CategoryEntry};
use crate::time::Period;

/// How a period key selects records
enum PeriodMatch<'a> {
    Year(i32),
    Month(&'a str),
}

impl<'a> PeriodMatch<'a> {
    fn from_key(period_key: &'a str) -> Self {
        match period_key.parse::<i32>() {
            Ok(year) => PeriodMatch::Year(year),
            Err(_) => PeriodMatch::Month(period_key),
        }
    }

    fn matches(&self, record: &TransactionRecord) -> bool {
        let Some(date) = record.date else { return false };
        match self {
            PeriodMatch::Year(year) => date.year() == *year,
            PeriodMatch::Month(key) => Period::month_of(&date).key() == *key,
        }
    }
}

/// Debit totals per category for the records in a period.
///
/// A key that parses as an integer selects a year; anything else is
/// compared against each record's month key, so an unknown key selects
/// nothing. Uncategorized records are left out. Categories keep first-seen
/// order; the result is unsorted.
pub fn category_totals(records: &[TransactionRecord], period_key: &str) -> Vec<CategoryEntry> {
    let selector = PeriodMatch::from_key(period_key);
    let mut totals: Vec<CategoryEntry> = Vec::new();

    for record in records
        .iter()
        .filter(|r| r.has_category() && selector.matches(r))
    {
        match totals.iter_mut().find(|entry| entry.name == record.category) {
            Some(entry) => entry.value += record.debit,
            None => totals.push(CategoryEntry::new(record.category.clone(), record.debit)),
        }
    }

    totals
}

/// Keep the first `top_n` entries and fold the rest into one labelled entry.
///
/// Expects entries sorted largest first. The grouped entry is only added
/// when something is left over.
pub fn collapse_categories(
    sorted: &[CategoryEntry],
    top_n: usize,
    others_label: &str,
) -> Vec<CategoryEntry> {
    if sorted.len() <= top_n {
        return sorted.to_vec();
    }

    let mut chart = sorted[..top_n].to_vec();
    let others: f64 = sorted[top_n..].iter().map(|c| c.value).sum();
    chart.push(CategoryEntry::new(others_label, others));
    chart
}

/// Sorted category totals and chart entries for one period
pub fn category_breakdown(
    records: &[TransactionRecord],
    period_key: &str,
    top_n: usize,
    others_label: &str,
) -> CategoryBreakdown {
    let mut all_categories = category_totals(records, period_key);
    // stable: equal totals keep first-seen order
    all_categories.sort_by(|a, b| b.value.total_cmp(&a.value));

    let chart_categories = collapse_categories(&all_categories, top_n, others_label);

    log::debug!(
        "Breakdown for {}: {} categories, {} chart entries",
        period_key,
        all_categories.len(),
        chart_categories.len()
    );

    CategoryBreakdown {
        period_key: period_key.to_string(),
        all_categories,
        chart_categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(y: i32, m: u32, category: &str, debit: f64) -> TransactionRecord {
        TransactionRecord {
            date: NaiveDate::from_ymd_opt(y, m, 10),
            category: category.to_string(),
            debit,
            ..TransactionRecord::default()
        }
    }

    fn names(entries: &[CategoryEntry]) -> Vec<&str> {
        entries.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_month_breakdown_sorted_descending() {
        let records = vec![
            record(2024, 3, "Grocery", 40.0),
            record(2024, 3, "Rent", 900.0),
            record(2024, 3, "Grocery", 60.0),
            record(2024, 4, "Travel", 500.0),
        ];
        let breakdown = category_breakdown(&records, "March 2024", 10, "Others");

        assert_eq!(names(&breakdown.all_categories), vec!["Rent", "Grocery"]);
        assert_eq!(breakdown.all_categories[1].value, 100.0);
        assert_eq!(breakdown.chart_categories, breakdown.all_categories);
    }

    #[test]
    fn test_year_key_selects_whole_year() {
        let records = vec![
            record(2023, 1, "Food", 10.0),
            record(2023, 12, "Food", 15.0),
            record(2024, 1, "Food", 100.0),
        ];
        let breakdown = category_breakdown(&records, "2023", 10, "Others");

        assert_eq!(breakdown.all_categories, vec![CategoryEntry::new("Food", 25.0)]);
    }

    #[test]
    fn test_unknown_key_selects_nothing() {
        let records = vec![record(2024, 1, "Food", 10.0)];
        assert!(category_breakdown(&records, "Smarch 2024", 10, "Others").is_empty());
        assert!(category_breakdown(&records, "2019", 10, "Others").is_empty());
        assert!(category_breakdown(&[], "2024", 10, "Others").is_empty());
    }

    #[test]
    fn test_undated_records_excluded() {
        let mut undated = record(2024, 1, "Food", 50.0);
        undated.date = None;
        let records = vec![undated, record(2024, 1, "Food", 5.0)];

        let breakdown = category_breakdown(&records, "January 2024", 10, "Others");
        assert_eq!(breakdown.total(), 5.0);
    }

    #[test]
    fn test_twelve_categories_collapse_to_eleven() {
        let records: Vec<TransactionRecord> = (1..=12)
            .map(|i| record(2024, 5, &format!("C{}", i), i as f64))
            .collect();
        let breakdown = category_breakdown(&records, "May 2024", 10, "Others");

        assert_eq!(breakdown.all_categories.len(), 12);
        assert_eq!(breakdown.chart_categories.len(), 11);
        assert_eq!(breakdown.chart_categories[0].name, "C12");
        assert_eq!(breakdown.chart_categories[9].name, "C3");

        let others = &breakdown.chart_categories[10];
        assert_eq!(others.name, "Others");
        assert_eq!(others.value, 3.0);

        let chart_total: f64 = breakdown.chart_categories.iter().map(|c| c.value).sum();
        assert_eq!(chart_total, breakdown.total());
    }

    #[test]
    fn test_exactly_top_n_has_no_others() {
        let sorted: Vec<CategoryEntry> = (0..10)
            .map(|i| CategoryEntry::new(format!("C{}", i), (10 - i) as f64))
            .collect();
        let chart = collapse_categories(&sorted, 10, "Others");
        assert_eq!(chart, sorted);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let records = vec![
            record(2024, 2, "Books", 20.0),
            record(2024, 2, "Games", 20.0),
            record(2024, 2, "Music", 30.0),
        ];
        let breakdown = category_breakdown(&records, "February 2024", 10, "Others");
        assert_eq!(names(&breakdown.all_categories), vec!["Music", "Books", "Games"]);
    }

    #[test]
    fn test_uncategorized_records_excluded() {
        let records = vec![record(2024, 6, "", 7.0), record(2024, 6, "Food", 3.0)];
        let totals = category_totals(&records, "June 2024");

        assert_eq!(totals, vec![CategoryEntry::new("Food", 3.0)]);
        assert!(category_breakdown(&[record(2024, 6, "", 7.0)], "2024", 10, "Others").is_empty());
    }

    #[test]
    fn test_custom_top_n_and_label() {
        let sorted = vec![
            CategoryEntry::new("A", 5.0),
            CategoryEntry::new("B", 4.0),
            CategoryEntry::new("C", 1.0),
        ];
        let chart = collapse_categories(&sorted, 1, "Rest");
        assert_eq!(chart, vec![CategoryEntry::new("A", 5.0), CategoryEntry::new("Rest", 5.0)]);
    }
}

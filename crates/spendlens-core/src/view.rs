//! Search, sort and pagination over the transaction list

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use spendlens_parser::TransactionRecord;

use crate::time::format_date;
use crate::types::{SortColumn, SortDirection};

// ==================== Search ====================

/// Check if any displayed field contains the lower-cased query.
///
/// Fields are the formatted date, card number, description, category and
/// both amounts with two decimals.
pub fn matches_query(record: &TransactionRecord, query_lower: &str, date_format: &str) -> bool {
    if query_lower.is_empty() {
        return true;
    }

    let date = record
        .date
        .as_ref()
        .and_then(|d| format_date(d, date_format))
        .map(|d| d.to_lowercase())
        .unwrap_or_default();

    [
        date,
        record.card_number.to_lowercase(),
        record.description.to_lowercase(),
        record.category.to_lowercase(),
        format!("{:.2}", record.debit),
        format!("{:.2}", record.credit),
    ]
    .iter()
    .any(|field| field.contains(query_lower))
}

/// Records matching a case-insensitive substring query, in input order
pub fn search<'a>(
    records: &'a [TransactionRecord],
    query: &str,
    date_format: &str,
) -> Vec<&'a TransactionRecord> {
    let query_lower = query.to_lowercase();
    records
        .iter()
        .filter(|r| matches_query(r, &query_lower, date_format))
        .collect()
}

// ==================== Sort ====================

/// Check if a record has a value in the column; missing values never move
fn has_value(column: SortColumn, record: &TransactionRecord) -> bool {
    match column {
        SortColumn::Date => record.date.is_some(),
        _ => true,
    }
}

/// Ascending comparison of two records that both have a value in `column`
pub fn compare_by(column: SortColumn, a: &TransactionRecord, b: &TransactionRecord) -> Ordering {
    match column {
        SortColumn::Date => a.date.cmp(&b.date),
        SortColumn::CardNumber => a.card_number.cmp(&b.card_number),
        SortColumn::Description => a.description.cmp(&b.description),
        SortColumn::Category => a.category.cmp(&b.category),
        SortColumn::Debit => a.debit.total_cmp(&b.debit),
        SortColumn::Credit => a.credit.total_cmp(&b.credit),
    }
}

/// Stable sort by a column.
///
/// Records without a value keep their positions; the others are sorted
/// among the remaining slots. Ties keep their relative order in both
/// directions.
pub fn sort_records(
    items: &mut [&TransactionRecord],
    column: SortColumn,
    direction: SortDirection,
) {
    let slots: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, r)| has_value(column, r))
        .map(|(idx, _)| idx)
        .collect();

    let mut sorted: Vec<&TransactionRecord> = slots.iter().map(|&idx| items[idx]).collect();
    sorted.sort_by(|a, b| direction.apply(compare_by(column, a, b)));

    for (idx, record) in slots.into_iter().zip(sorted) {
        items[idx] = record;
    }
}

// ==================== Pagination ====================

/// Position of one page within a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
    /// Slice bounds, empty when the page is past the end
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    /// Compute the window for a 1-based page
    pub fn new(total_items: usize, page: usize, page_size: usize) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            (total_items + page_size - 1) / page_size
        };

        let start = page
            .saturating_sub(1)
            .saturating_mul(page_size)
            .min(total_items);
        let last = page.saturating_mul(page_size);
        let end = if page == 0 { start } else { last.min(total_items) };

        Self {
            page,
            page_size,
            total_items,
            total_pages,
            has_next: page_size > 0 && last < total_items,
            has_previous: page > 1,
            start,
            end,
        }
    }
}

/// Items on a 1-based page; empty past the end
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let window = PageWindow::new(items.len(), page, page_size);
    &items[window.start..window.end]
}

/// Sum of debits
pub fn total_debit(items: &[&TransactionRecord]) -> f64 {
    items.iter().map(|r| r.debit).sum()
}

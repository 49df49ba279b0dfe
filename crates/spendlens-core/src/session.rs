//! Loaded record set plus the user's current view of it

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use spendlens_config::{ChartConfig, Config, ViewConfig};
use spendlens_parser::{SourceRef, TransactionRecord};

use crate::aggregate::aggregate_periods;
use crate::breakdown::category_breakdown;
use crate::error::{CoreError, CoreResult};
use crate::models::{CategoryBreakdown, PeriodSummaries, TransactionPage};
use crate::types::{SortColumn, SortDirection};
use crate::view::{paginate, search, sort_records, total_debit, PageWindow};

/// Search, sort, paging and period selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub search: String,
    pub sort_column: Option<SortColumn>,
    pub sort_direction: SortDirection,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
    pub selected_period: Option<String>,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            sort_column: None,
            sort_direction: SortDirection::default(),
            page: 1,
            page_size,
            selected_period: None,
        }
    }
}

/// One record set and the view over it.
///
/// Every derived value is recomputed from the records and the view state
/// on request, so nothing goes stale when either changes.
#[derive(Debug, Clone)]
pub struct Session {
    records: Vec<TransactionRecord>,
    view: ViewState,
    view_config: ViewConfig,
    chart_config: ChartConfig,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            records: Vec::new(),
            view: ViewState::new(config.view.default_page_size),
            view_config: config.view.clone(),
            chart_config: config.charts.clone(),
        }
    }

    pub fn with_records(config: &Config, records: Vec<TransactionRecord>) -> Self {
        let mut session = Self::new(config);
        session.replace_records(records);
        session
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Records that take part in period aggregation
    pub fn dated_record_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_dated()).count()
    }

    /// Swap in a new record set and reset the view
    pub fn replace_records(&mut self, records: Vec<TransactionRecord>) {
        log::info!("Replacing {} records with {}", self.records.len(), records.len());
        self.records = records;
        self.view = ViewState::new(self.view_config.default_page_size);
    }

    /// Load a fresh record set from a source.
    ///
    /// On failure the current records and view are kept.
    pub async fn load(&mut self, source: &SourceRef) -> CoreResult<usize> {
        log::info!("Loading records from {}", source.describe());
        let records = source.load().await?;
        let count = records.len();
        self.replace_records(records);
        Ok(count)
    }

    /// Drop all records and reset the view
    pub fn clear(&mut self) {
        self.replace_records(Vec::new());
    }

    // ==================== Periods ====================

    pub fn period_summaries(&self, now: NaiveDate) -> PeriodSummaries {
        aggregate_periods(&self.records, now)
    }

    /// Select a period and return its breakdown
    pub fn select_period(&mut self, period_key: &str) -> CategoryBreakdown {
        self.view.selected_period = Some(period_key.to_string());
        self.breakdown_for(period_key)
    }

    pub fn clear_selection(&mut self) {
        self.view.selected_period = None;
    }

    /// Breakdown of the selected period, if any
    pub fn selected_breakdown(&self) -> Option<CategoryBreakdown> {
        self.view
            .selected_period
            .as_deref()
            .map(|key| self.breakdown_for(key))
    }

    pub fn breakdown_for(&self, period_key: &str) -> CategoryBreakdown {
        category_breakdown(
            &self.records,
            period_key,
            self.chart_config.top_categories,
            &self.chart_config.others_label,
        )
    }

    // ==================== Transactions ====================

    pub fn set_search(&mut self, query: &str) {
        self.view.search = query.to_string();
    }

    /// Same column flips the direction; a new column sorts ascending
    pub fn toggle_sort(&mut self, column: SortColumn) {
        if self.view.sort_column == Some(column) {
            self.view.sort_direction = self.view.sort_direction.toggled();
        } else {
            self.view.sort_column = Some(column);
            self.view.sort_direction = SortDirection::Ascending;
        }
    }

    pub fn set_sort(&mut self, column: Option<SortColumn>, direction: SortDirection) {
        self.view.sort_column = column;
        self.view.sort_direction = direction;
    }

    /// Go to a 1-based page. Pages past the end are allowed and come back empty.
    pub fn set_page(&mut self, page: usize) -> CoreResult<()> {
        if page == 0 {
            log::warn!("Rejected page 0");
            return Err(CoreError::InvalidPage { page });
        }
        self.view.page = page;
        Ok(())
    }

    /// Change the page size to one of the offered sizes and go back to page 1
    pub fn set_page_size(&mut self, page_size: usize) -> CoreResult<()> {
        if !self.view_config.page_sizes.contains(&page_size) {
            log::warn!(
                "Rejected page size {}, allowed: {:?}",
                page_size,
                self.view_config.page_sizes
            );
            return Err(CoreError::InvalidPageSize {
                size: page_size,
                allowed: self.view_config.page_sizes.clone(),
            });
        }
        self.view.page_size = page_size;
        self.view.page = 1;
        Ok(())
    }

    /// Advance one page if there is a next page
    pub fn next_page(&mut self) -> bool {
        let filtered = self.filtered_records().len();
        let window = PageWindow::new(filtered, self.view.page, self.view.page_size);
        if window.has_next {
            self.view.page += 1;
        }
        window.has_next
    }

    /// Go back one page unless already on the first
    pub fn previous_page(&mut self) -> bool {
        if self.view.page > 1 {
            self.view.page -= 1;
            true
        } else {
            false
        }
    }

    /// Records matching the search, in the current sort order
    pub fn filtered_records(&self) -> Vec<&TransactionRecord> {
        let mut items = search(
            &self.records,
            &self.view.search,
            &self.view_config.date_display_format,
        );
        if let Some(column) = self.view.sort_column {
            sort_records(&mut items, column, self.view.sort_direction);
        }
        items
    }

    /// The current page with totals over every matching record
    pub fn transaction_page(&self) -> TransactionPage {
        let filtered = self.filtered_records();
        let window = PageWindow::new(filtered.len(), self.view.page, self.view.page_size);

        TransactionPage {
            items: paginate(&filtered, self.view.page, self.view.page_size)
                .iter()
                .map(|r| (*r).clone())
                .collect(),
            filtered_count: filtered.len(),
            total_debit: total_debit(&filtered),
            page: window.page,
            page_size: window.page_size,
            total_pages: window.total_pages,
            has_next: window.has_next,
            has_previous: window.has_previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendlens_config::DemoConfig;
    use spendlens_parser::{CsvFileSource, DemoSource, RecordParser};
    use std::sync::Arc;

    fn tx(date: (i32, u32, u32), description: &str, category: &str, debit: f64) -> TransactionRecord {
        TransactionRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
            card_number: "1234".to_string(),
            description: description.to_string(),
            category: category.to_string(),
            debit,
            credit: 0.0,
        }
    }

    fn sample() -> Vec<TransactionRecord> {
        vec![
            tx((2024, 1, 15), "Market", "Grocery", 100.0),
            tx((2024, 1, 20), "Cinema", "Entertainment", 50.0),
            tx((2023, 12, 5), "Bistro", "Restaurant", 30.0),
        ]
    }

    fn session() -> Session {
        Session::with_records(&Config::default(), sample())
    }

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(&Config::default());
        let view = session.view_state();

        assert_eq!(session.record_count(), 0);
        assert_eq!(view.page, 1);
        assert_eq!(view.page_size, 10);
        assert_eq!(view.sort_column, None);
        assert_eq!(view.sort_direction, SortDirection::Ascending);
        assert!(view.search.is_empty());
        assert!(session.transaction_page().items.is_empty());
        assert!(session.period_summaries(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).is_empty());
    }

    #[test]
    fn test_period_summaries_and_selection() {
        let mut session = session();
        let summaries = session.period_summaries(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());

        assert_eq!(summaries.monthly[0].period_key, "January 2024");
        assert_eq!(summaries.monthly[0].total_debit, 150.0);
        assert_eq!(summaries.yearly[1].period_key, "2023");

        assert!(session.selected_breakdown().is_none());
        let breakdown = session.select_period("January 2024");
        assert_eq!(breakdown.all_categories[0].name, "Grocery");
        assert_eq!(session.selected_breakdown(), Some(breakdown));

        session.clear_selection();
        assert!(session.selected_breakdown().is_none());
    }

    #[test]
    fn test_toggle_sort() {
        let mut session = session();

        session.toggle_sort(SortColumn::Debit);
        assert_eq!(session.view_state().sort_column, Some(SortColumn::Debit));
        assert_eq!(session.view_state().sort_direction, SortDirection::Ascending);

        session.toggle_sort(SortColumn::Debit);
        assert_eq!(session.view_state().sort_direction, SortDirection::Descending);
        let page = session.transaction_page();
        assert_eq!(page.items[0].description, "Market");

        session.toggle_sort(SortColumn::Date);
        assert_eq!(session.view_state().sort_column, Some(SortColumn::Date));
        assert_eq!(session.view_state().sort_direction, SortDirection::Ascending);
        assert_eq!(session.transaction_page().items[0].description, "Bistro");
    }

    #[test]
    fn test_search_filters_page_and_total() {
        let mut session = session();
        session.set_search("CINEMA");

        let page = session.transaction_page();
        assert_eq!(page.filtered_count, 1);
        assert_eq!(page.total_debit, 50.0);
        assert_eq!(page.items[0].category, "Entertainment");
    }

    #[test]
    fn test_total_covers_all_pages() {
        let records: Vec<TransactionRecord> = (1..=12)
            .map(|d| tx((2024, 2, d), &format!("item {}", d), "Misc", 10.0))
            .collect();
        let mut session = Session::with_records(&Config::default(), records);
        session.set_page_size(5).unwrap();
        session.set_page(3).unwrap();

        let page = session.transaction_page();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_debit, 120.0);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next);
        assert!(page.has_previous);
    }

    #[test]
    fn test_set_page_size_resets_page() {
        let mut session = session();
        session.set_page(4).unwrap();
        session.set_page_size(25).unwrap();

        assert_eq!(session.view_state().page, 1);
        assert_eq!(session.view_state().page_size, 25);
    }

    #[test]
    fn test_invalid_page_and_size_leave_state_unchanged() {
        let mut session = session();
        let before = session.view_state().clone();

        assert!(matches!(session.set_page(0), Err(CoreError::InvalidPage { page: 0 })));
        assert!(matches!(
            session.set_page_size(7),
            Err(CoreError::InvalidPageSize { size: 7, .. })
        ));
        assert_eq!(session.view_state(), &before);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let mut session = session();
        session.set_page(9).unwrap();

        let page = session.transaction_page();
        assert!(page.items.is_empty());
        assert_eq!(page.filtered_count, 3);
        assert!(!page.has_next);
    }

    #[test]
    fn test_next_and_previous_page() {
        let records: Vec<TransactionRecord> = (1..=7)
            .map(|d| tx((2024, 3, d), "x", "Misc", 1.0))
            .collect();
        let mut session = Session::with_records(&Config::default(), records);
        session.set_page_size(5).unwrap();

        assert!(!session.previous_page());
        assert!(session.next_page());
        assert_eq!(session.view_state().page, 2);
        assert!(!session.next_page());
        assert!(session.previous_page());
        assert_eq!(session.view_state().page, 1);
    }

    #[test]
    fn test_replace_records_resets_view() {
        let mut session = session();
        session.set_search("market");
        session.toggle_sort(SortColumn::Category);
        session.set_page(2).unwrap();
        session.select_period("2024");

        session.replace_records(vec![tx((2022, 5, 5), "New", "Travel", 9.0)]);
        assert_eq!(session.view_state(), &ViewState::new(10));
        assert_eq!(session.record_count(), 1);

        session.clear();
        assert_eq!(session.record_count(), 0);
        assert_eq!(session.dated_record_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_records() {
        let mut session = session();
        session.set_search("market");

        let missing: SourceRef = Arc::new(CsvFileSource::new(
            "/no/such/export.csv".into(),
            RecordParser::default(),
        ));
        let result = session.load(&missing).await;

        assert!(matches!(result, Err(CoreError::SourceNotFound { .. })));
        assert_eq!(session.record_count(), 3);
        assert_eq!(session.view_state().search, "market");
    }

    #[tokio::test]
    async fn test_load_replaces_records() {
        let mut session = session();
        let mut config = DemoConfig::default();
        config.min_records = 20;
        config.max_records = 20;
        config.seed = Some(8);
        let demo: SourceRef = Arc::new(DemoSource::new(
            config,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        ));

        assert_eq!(session.load(&demo).await.unwrap(), 20);
        assert_eq!(session.record_count(), 20);
        assert_eq!(session.dated_record_count(), 20);
    }

    #[test]
    fn test_dated_record_count() {
        let mut records = sample();
        records.push(TransactionRecord::default());
        let session = Session::with_records(&Config::default(), records);

        assert_eq!(session.record_count(), 4);
        assert_eq!(session.dated_record_count(), 3);
    }
}

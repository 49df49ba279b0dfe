//! Expense aggregation engine
//!
//! Turns a parsed record set into what the dashboard shows: monthly and
//! yearly debit totals, per-category breakdowns for a selected period, and
//! a searchable, sortable, paginated transaction list. All computations are
//! pure functions of the records and the view state; the reference date is
//! always passed in.

pub mod aggregate;
pub mod breakdown;
pub mod error;
pub mod models;
pub mod reports;
pub mod session;
pub mod time;
pub mod types;
pub mod view;

pub use aggregate::{aggregate_periods, percent_change, period_trends};
pub use breakdown::{category_breakdown, collapse_categories};
pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger, ErrorSeverity};
pub use models::{
    CategoryBreakdown, CategoryEntry, CategoryShare, PeriodSummaries, PeriodSummary, PeriodTrend,
    TransactionPage,
};
pub use reports::DashboardReport;
pub use session::{Session, ViewState};
pub use time::Period;
pub use types::{SortColumn, SortDirection};
pub use view::PageWindow;

pub use spendlens_parser::TransactionRecord;

// ==================== Tests ====================

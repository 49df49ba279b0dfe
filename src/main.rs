//! Spendlens main entry point

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::Parser;
use spendlens_config::{Config, ConfigError};
use spendlens_core::reports::{BreakdownReport, PeriodRow};
use spendlens_core::{
    CoreError, DashboardReport, DefaultErrorLogger, ErrorContext, ErrorLogger, Session, SortColumn,
    SortDirection,
};
use spendlens_parser::{CsvFileSource, DemoSource, RecordParser, SourceRef};
use spendlens_utils::{format_change, format_money, format_number, format_percentage, truncate};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "spendlens")]
#[command(version = "0.1.0")]
#[command(about = "Expense dashboard for semicolon-delimited bank exports", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "spendlens.yaml")]
    config: PathBuf,

    /// Transaction export to load
    #[arg(short, long, conflicts_with = "demo")]
    file: Option<PathBuf>,

    /// Generate demo transactions instead of reading a file
    #[arg(long)]
    demo: bool,

    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    now: Option<NaiveDate>,

    /// Case-insensitive search over the transaction list
    #[arg(short, long, default_value = "")]
    search: String,

    /// Sort column: date, card, description, category, debit, credit
    #[arg(long)]
    sort: Option<SortColumn>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Page of the transaction list (1-based)
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Transactions per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Period to break down by category, e.g. "January 2024" or "2024"
    #[arg(long)]
    period: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, config_found) = match Config::load(args.config.clone()) {
        Ok(config) => (config, true),
        Err(ConfigError::FileNotFound { .. }) => (Config::default(), false),
        Err(e) => bail!("Failed to load {}: {}", args.config.display(), e.to_details()),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if config_found {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::info!("No config at {}, using defaults", args.config.display());
    }

    let now = args.now.unwrap_or_else(|| Local::now().date_naive());
    let source = select_source(&args, &config, now)?;

    let mut session = Session::new(&config);
    let rt = Runtime::new()?;
    if let Err(e) = rt.block_on(session.load(&source)) {
        let context = ErrorContext::new("load".to_string())
            .with_data("source", serde_json::json!(source.describe()));
        DefaultErrorLogger.log_error(&e, &context);
        return Err(e).with_context(|| format!("Failed to load {}", source.describe()));
    }

    session.set_search(&args.search);
    if let Some(column) = args.sort {
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        session.set_sort(Some(column), direction);
    }
    if let Some(page_size) = args.page_size {
        if let Err(e) = session.set_page_size(page_size) {
            warn_rejected(&e, "set_page_size");
        }
    }
    if let Err(e) = session.set_page(args.page) {
        warn_rejected(&e, "set_page");
    }
    if let Some(period) = &args.period {
        session.select_period(period);
    }

    let report = DashboardReport::build(&session, now);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

/// A rejected view change leaves the previous view in place
fn warn_rejected(error: &CoreError, operation: &str) {
    let context = ErrorContext::new(operation.to_string())
        .with_data("code", serde_json::json!(error.code().to_string()));
    DefaultErrorLogger.log_warning(&error.to_string(), &context);
    eprintln!("warning: {}", error);
}

fn select_source(args: &Args, config: &Config, now: NaiveDate) -> anyhow::Result<SourceRef> {
    if args.demo {
        return Ok(Arc::new(DemoSource::new(config.demo.clone(), now)));
    }

    let path = match args.file.clone().or_else(|| config.data.input_path.clone()) {
        Some(path) => path,
        None => bail!("No input: pass --file <export> or --demo, or set data.input_path"),
    };
    let parser = RecordParser::from_config(&config.data, &config.parsing);
    Ok(Arc::new(CsvFileSource::new(path, parser)))
}

// ==================== Text Output ====================

fn print_report(report: &DashboardReport) {
    println!(
        "{} records ({} dated), reference date {}",
        format_number(report.record_count),
        format_number(report.dated_record_count),
        report.reference_date
    );

    print_periods("Monthly spending", &report.monthly);
    print_periods("Yearly spending", &report.yearly);

    if let Some(breakdown) = &report.breakdown {
        print_breakdown(breakdown);
    }

    let page = &report.transactions;
    println!();
    println!(
        "Transactions: {} matching, {} total debit (page {} of {})",
        format_number(page.filtered_count),
        format_money(page.total_debit),
        page.page,
        page.total_pages.max(1)
    );
    println!(
        "{:<10}  {:<6}  {:<32}  {:<16}  {:>12}  {:>12}",
        "Date", "Card", "Description", "Category", "Debit", "Credit"
    );
    for record in &page.items {
        let date = record
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<10}  {:<6}  {:<32}  {:<16}  {:>12}  {:>12}",
            date,
            truncate(&record.card_number, 6),
            truncate(&record.description, 32),
            truncate(&record.category, 16),
            format_money(record.debit),
            format_money(record.credit)
        );
    }
    if page.has_next {
        println!("... more on page {}", page.page + 1);
    }
}

fn print_periods(title: &str, rows: &[PeriodRow]) {
    println!();
    println!("{}", title);
    if rows.is_empty() {
        println!("  (no dated records)");
        return;
    }
    for row in rows {
        println!(
            "  {:<16}  {:>14}  {:>9}",
            row.period_key,
            format_money(row.total_debit),
            format_change(row.change_pct)
        );
    }
}

fn print_breakdown(breakdown: &BreakdownReport) {
    println!();
    println!(
        "Categories for {} ({})",
        breakdown.period_key,
        format_money(breakdown.total)
    );
    if breakdown.table.is_empty() {
        println!("  (no spending recorded)");
        return;
    }
    for share in &breakdown.table {
        println!(
            "  {:<20}  {:>14}  {:>7}",
            truncate(&share.name, 20),
            format_money(share.value),
            format_percentage(share.percentage)
        );
    }
    if breakdown.chart.len() < breakdown.table.len() {
        if let Some(others) = breakdown.chart.last() {
            println!(
                "  chart groups the {} smallest as \"{}\"",
                breakdown.table.len() + 1 - breakdown.chart.len(),
                others.name
            );
        }
    }
}

//! Synthetic transaction generator for trying the dashboard without an export

use async_trait::async_trait;
use chrono::{Duration, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use spendlens_config::DemoConfig;

use crate::error::ParseError;
use crate::types::TransactionRecord;
use crate::RecordSource;

/// Demo categories with their amount range
pub const DEMO_CATEGORIES: &[(&str, f64, f64)] = &[
    ("Grocery", 30.0, 200.0),
    ("Restaurant", 20.0, 150.0),
    ("Entertainment", 10.0, 100.0),
    ("Transportation", 5.0, 80.0),
    ("Utilities", 50.0, 300.0),
    ("Shopping", 20.0, 500.0),
    ("Travel", 200.0, 2000.0),
    ("Healthcare", 20.0, 300.0),
    ("Education", 50.0, 800.0),
    ("Housing", 500.0, 2000.0),
];

const COMPANIES: &[&str] = &[
    "Abbott Group",
    "Barton LLC",
    "Collins & Sons",
    "Dietrich Inc",
    "Emmerich Partners",
    "Feeney Trading",
    "Gislason Co",
    "Hartmann Ltd",
    "Kuhn Brothers",
    "Lindgren Holdings",
    "Mraz Supply",
    "Nolan & Reed",
];

/// Generates records spread over the months before a reference date
#[derive(Debug, Clone)]
pub struct DemoSource {
    config: DemoConfig,
    reference: NaiveDate,
}

impl DemoSource {
    pub fn new(config: DemoConfig, reference: NaiveDate) -> Self {
        Self { config, reference }
    }

    /// First date that can be generated
    pub fn start_date(&self) -> NaiveDate {
        self.reference
            .checked_sub_months(Months::new(self.config.months))
            .unwrap_or(self.reference)
    }

    /// Generate records, newest first
    pub fn generate(&self) -> Vec<TransactionRecord> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let min = self.config.min_records;
        let max = self.config.max_records.max(min);
        let count = rng.gen_range(min..=max);

        let start = self.start_date();
        let span_days = (self.reference - start).num_days().max(0);
        let credit_probability = if (0.0..=1.0).contains(&self.config.credit_probability) {
            self.config.credit_probability
        } else {
            0.0
        };

        let mut records: Vec<TransactionRecord> = (0..count)
            .map(|_| {
                let date = start + Duration::days(rng.gen_range(0..=span_days));
                let &(category, low, high) = DEMO_CATEGORIES
                    .choose(&mut rng)
                    .unwrap_or(&DEMO_CATEGORIES[0]);
                let amount = (rng.gen_range(low..=high) * 100.0).round() / 100.0;
                let company = COMPANIES.choose(&mut rng).copied().unwrap_or("Acme");
                let is_credit = rng.gen_bool(credit_probability);

                TransactionRecord {
                    date: Some(date),
                    card_number: format!("{:04}", rng.gen_range(0..10_000)),
                    description: format!("{} - {}", category, company),
                    category: category.to_string(),
                    debit: if is_credit { 0.0 } else { amount },
                    credit: if is_credit { amount } else { 0.0 },
                }
            })
            .collect();

        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }
}

#[async_trait]
impl RecordSource for DemoSource {
    async fn load(&self) -> Result<Vec<TransactionRecord>, ParseError> {
        let records = self.generate();
        log::info!(
            "Generated {} demo records from {} to {}",
            records.len(),
            self.start_date(),
            self.reference
        );
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("demo data ({} months before {})", self.config.months, self.reference)
    }
}

//! Semicolon-delimited transaction export parser

use chrono::{NaiveDate, NaiveDateTime};
use spendlens_config::{DataConfig, ParsingConfig};

use crate::types::{Field, ParseOutcome, TransactionRecord};

/// Line-based parser for bank transaction exports
#[derive(Debug, Clone)]
pub struct RecordParser {
    delimiter: char,
    date_formats: Vec<String>,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::from_config(&DataConfig::default(), &ParsingConfig::default())
    }
}

impl RecordParser {
    /// Create a parser with an explicit delimiter and date format list
    pub fn new(delimiter: char, date_formats: Vec<String>) -> Self {
        Self {
            delimiter,
            date_formats,
        }
    }

    /// Create a parser from configuration
    pub fn from_config(data: &DataConfig, parsing: &ParsingConfig) -> Self {
        Self::new(data.delimiter_char(), parsing.date_formats.clone())
    }

    /// Parse export content.
    ///
    /// A leading byte-order mark is ignored. The first line is the header.
    /// Every later line whose field count
    /// differs from the header's is dropped; everything else becomes a
    /// record, bad values falling back to their defaults.
    pub fn parse(&self, content: &str) -> ParseOutcome {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut lines = content.split('\n');
        let headers: Vec<Option<Field>> = match lines.next() {
            Some(line) => line
                .split(self.delimiter)
                .map(|h| h.trim().parse::<Field>().ok())
                .collect(),
            None => return ParseOutcome::default(),
        };

        let mut outcome = ParseOutcome::default();

        // Line number is 1-indexed, the header is line 1
        for (idx, line) in lines.enumerate() {
            let values: Vec<&str> = line.split(self.delimiter).map(str::trim).collect();
            if values.len() != headers.len() {
                if !line.trim().is_empty() {
                    log::debug!(
                        "Skipping line {}: {} fields, expected {}",
                        idx + 2,
                        values.len(),
                        headers.len()
                    );
                    outcome.skipped_rows += 1;
                }
                continue;
            }
            outcome.records.push(self.parse_row(&headers, &values));
        }

        outcome
    }

    /// Parse export content, keeping only the records
    pub fn parse_records(&self, content: &str) -> Vec<TransactionRecord> {
        self.parse(content).records
    }

    fn parse_row(&self, headers: &[Option<Field>], values: &[&str]) -> TransactionRecord {
        let mut record = TransactionRecord::default();

        for (header, raw) in headers.iter().zip(values) {
            let Some(field) = header else { continue };
            let value = strip_quotes(raw);
            match field {
                Field::Date => record.date = self.parse_date(value),
                Field::CardNumber => record.card_number = value.to_string(),
                Field::Description => record.description = value.to_string(),
                Field::Category => record.category = value.to_string(),
                Field::Debit => record.debit = parse_amount(value),
                Field::Credit => record.credit = parse_amount(value),
            }
        }

        record
    }

    /// Parse a date with the configured formats, first match wins
    pub fn parse_date(&self, raw: &str) -> Option<NaiveDate> {
        if raw.is_empty() {
            return None;
        }
        self.date_formats.iter().find_map(|format| {
            NaiveDate::parse_from_str(raw, format)
                .ok()
                .or_else(|| NaiveDateTime::parse_from_str(raw, format).ok().map(|dt| dt.date()))
        })
    }
}

/// Parse a monetary amount, `0.0` for empty, malformed or non-finite input
pub fn parse_amount(raw: &str) -> f64 {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Remove one leading and one trailing double quote, if present
fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

// ==================== Tests ====================

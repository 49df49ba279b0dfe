//! Common types for the transaction export parser

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of a transaction export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction date, `None` when the source value could not be parsed
    pub date: Option<NaiveDate>,
    pub card_number: String,
    pub description: String,
    /// May be empty
    pub category: String,
    pub debit: f64,
    pub credit: f64,
}

impl TransactionRecord {
    /// Check if the record carries a usable date
    pub fn is_dated(&self) -> bool {
        self.date.is_some()
    }

    /// Check if the record has a non-empty category
    pub fn has_category(&self) -> bool {
        !self.category.is_empty()
    }
}

/// Export column, identified by its exact header name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Date,
    CardNumber,
    Description,
    Category,
    Debit,
    Credit,
}

impl Field {
    /// All columns in export order
    pub const ALL: [Field; 6] = [
        Field::Date,
        Field::CardNumber,
        Field::Description,
        Field::Category,
        Field::Debit,
        Field::Credit,
    ];

    /// Header name as it appears in bank exports
    pub fn header(&self) -> &'static str {
        match self {
            Field::Date => "Date",
            Field::CardNumber => "Numero de Carte",
            Field::Description => "Description",
            Field::Category => "Categorie",
            Field::Debit => "Debit",
            Field::Credit => "Credit",
        }
    }
}

impl std::str::FromStr for Field {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Header names are matched case-sensitively
        match s {
            "Date" => Ok(Field::Date),
            "Numero de Carte" => Ok(Field::CardNumber),
            "Description" => Ok(Field::Description),
            "Categorie" => Ok(Field::Category),
            "Debit" => Ok(Field::Debit),
            "Credit" => Ok(Field::Credit),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.header())
    }
}

/// Result of parsing one export
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    /// Parsed records, in input order
    pub records: Vec<TransactionRecord>,
    /// Non-blank rows dropped because their field count did not match the header
    pub skipped_rows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_header_roundtrip() {
        for field in Field::ALL {
            assert_eq!(field.header().parse::<Field>(), Ok(field));
        }
    }

    #[test]
    fn test_field_is_case_sensitive() {
        assert!("date".parse::<Field>().is_err());
        assert!("numero de carte".parse::<Field>().is_err());
        assert!("DEBIT".parse::<Field>().is_err());
    }

    #[test]
    fn test_record_helpers() {
        let record = TransactionRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 15),
            category: "Grocery".to_string(),
            ..Default::default()
        };
        assert!(record.is_dated());
        assert!(record.has_category());
        assert!(!TransactionRecord::default().is_dated());
        assert!(!TransactionRecord::default().has_category());
    }
}

//! Basic types for the transaction view

use serde::{Deserialize, Serialize};

/// Column a transaction table can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Date,
    CardNumber,
    Description,
    Category,
    Debit,
    Credit,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        SortColumn::Date,
        SortColumn::CardNumber,
        SortColumn::Description,
        SortColumn::Category,
        SortColumn::Debit,
        SortColumn::Credit,
    ];
}

impl std::str::FromStr for SortColumn {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(SortColumn::Date),
            "card" | "card_number" | "numero de carte" => Ok(SortColumn::CardNumber),
            "description" => Ok(SortColumn::Description),
            "category" | "categorie" => Ok(SortColumn::Category),
            "debit" => Ok(SortColumn::Debit),
            "credit" => Ok(SortColumn::Credit),
            _ => Err(format!("Invalid sort column: {}", s)),
        }
    }
}

impl std::fmt::Display for SortColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortColumn::Date => write!(f, "date"),
            SortColumn::CardNumber => write!(f, "card_number"),
            SortColumn::Description => write!(f, "description"),
            SortColumn::Category => write!(f, "category"),
            SortColumn::Debit => write!(f, "debit"),
            SortColumn::Credit => write!(f, "credit"),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Ascending
    }
}

impl SortDirection {
    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Apply this direction to an ascending ordering
    pub fn apply(&self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(format!("Invalid sort direction: {}", s)),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "asc"),
            SortDirection::Descending => write!(f, "desc"),
        }
    }
}

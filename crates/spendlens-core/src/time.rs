//! Calendar periods used as aggregation keys

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// English month names, January first
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Name of a 1-based month number
pub fn month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_NAMES.get(idx as usize))
        .copied()
}

/// 1-based number of an English month name (exact match)
pub fn month_number(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| *m == name)
        .map(|idx| idx as u32 + 1)
}

/// Format a date, `None` when the format string is invalid
pub fn format_date(date: &NaiveDate, format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).ok()?;
    Some(out)
}

/// A calendar month or a calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Period {
    Month { year: i32, month: u32 },
    Year { year: i32 },
}

impl Period {
    /// The month containing a date
    pub fn month_of(date: &NaiveDate) -> Self {
        Period::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The year containing a date
    pub fn year_of(date: &NaiveDate) -> Self {
        Period::Year { year: date.year() }
    }

    pub fn year(&self) -> i32 {
        match self {
            Period::Month { year, .. } | Period::Year { year } => *year,
        }
    }

    /// Month number, `None` for a year
    pub fn month(&self) -> Option<u32> {
        match self {
            Period::Month { month, .. } => Some(*month),
            Period::Year { .. } => None,
        }
    }

    /// Canonical key: `"January 2024"` or `"2024"`
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Check if a date falls inside this period
    pub fn contains(&self, date: &NaiveDate) -> bool {
        match self {
            Period::Month { year, month } => date.year() == *year && date.month() == *month,
            Period::Year { year } => date.year() == *year,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Month { year, month } => {
                write!(f, "{} {}", month_name(*month).unwrap_or("Unknown"), year)
            }
            Period::Year { year } => write!(f, "{}", year),
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(year) = s.parse::<i32>() {
            return Ok(Period::Year { year });
        }
        let (name, year) = s
            .split_once(' ')
            .ok_or_else(|| format!("Invalid period: {}", s))?;
        let month = month_number(name).ok_or_else(|| format!("Invalid month: {}", name))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| format!("Invalid year: {}", year))?;
        Ok(Period::Month { year, month })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
        assert_eq!(month_number("March"), Some(3));
        assert_eq!(month_number("march"), None);
    }

    #[test]
    fn test_period_keys() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(Period::month_of(&date).key(), "January 2024");
        assert_eq!(Period::year_of(&date).key(), "2024");
    }

    #[test]
    fn test_period_from_str() {
        assert_eq!("2023".parse::<Period>(), Ok(Period::Year { year: 2023 }));
        assert_eq!(
            "February 2024".parse::<Period>(),
            Ok(Period::Month { year: 2024, month: 2 })
        );
        assert!("Febuary 2024".parse::<Period>().is_err());
        assert!("2024-02".parse::<Period>().is_err());
        assert!("".parse::<Period>().is_err());
    }

    #[test]
    fn test_period_contains() {
        let march = Period::Month { year: 2024, month: 3 };
        assert!(march.contains(&NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!march.contains(&NaiveDate::from_ymd_opt(2023, 3, 1).unwrap()));
        assert!(Period::Year { year: 2024 }.contains(&NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
        assert_eq!(march.year(), 2024);
        assert_eq!(march.month(), Some(3));
        assert_eq!(Period::Year { year: 2024 }.month(), None);
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(format_date(&date, "%Y-%m-%d").as_deref(), Some("2024-07-04"));
        assert_eq!(format_date(&date, "%m/%d/%Y").as_deref(), Some("07/04/2024"));
        assert_eq!(format_date(&date, "%Q"), None);
    }
}

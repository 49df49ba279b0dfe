//! Configuration management for spendlens
//!
//! This module handles loading, validation, and management of
//! spendlens configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Input data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the transaction export (optional, can be given on the command line)
    #[serde(default)]
    pub input_path: Option<PathBuf>,
    /// Field separator of the export
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            input_path: None,
            delimiter: default_delimiter(),
        }
    }
}

impl DataConfig {
    /// The delimiter as a single character
    pub fn delimiter_char(&self) -> char {
        self.delimiter.chars().next().unwrap_or(';')
    }
}

fn default_delimiter() -> String {
    ";".to_string()
}

/// Record parsing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// chrono format strings tried in order when parsing the `Date` column
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            date_formats: default_date_formats(),
        }
    }
}

fn default_date_formats() -> Vec<String> {
    vec![
        "%Y-%m-%d".to_string(),
        "%Y-%m-%dT%H:%M:%S".to_string(),
        "%Y-%m-%d %H:%M:%S".to_string(),
    ]
}

/// Transaction table settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Records per page when nothing else is selected
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Page sizes a user may pick from
    #[serde(default = "default_page_sizes")]
    pub page_sizes: Vec<usize>,
    /// Format used to display (and search) transaction dates
    #[serde(default = "default_date_display_format")]
    pub date_display_format: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            page_sizes: default_page_sizes(),
            date_display_format: default_date_display_format(),
        }
    }
}

fn default_page_size() -> usize {
    10
}

fn default_page_sizes() -> Vec<usize> {
    vec![5, 10, 25, 50, 100]
}

fn default_date_display_format() -> String {
    "%Y-%m-%d".to_string()
}

/// Chart and visualization settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Number of categories shown before the rest is grouped
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,
    /// Name of the grouped remainder
    #[serde(default = "default_others_label")]
    pub others_label: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            top_categories: default_top_categories(),
            others_label: default_others_label(),
        }
    }
}

fn default_top_categories() -> usize {
    10
}

fn default_others_label() -> String {
    "Others".to_string()
}

/// Synthetic data settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Smallest number of generated records
    #[serde(default = "default_min_records")]
    pub min_records: usize,
    /// Largest number of generated records
    #[serde(default = "default_max_records")]
    pub max_records: usize,
    /// How many months back from the reference date records are spread over
    #[serde(default = "default_months")]
    pub months: u32,
    /// Probability that a generated record is a credit instead of a debit
    #[serde(default = "default_credit_probability")]
    pub credit_probability: f64,
    /// Fixed RNG seed for reproducible output
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            min_records: default_min_records(),
            max_records: default_max_records(),
            months: default_months(),
            credit_probability: default_credit_probability(),
            seed: None,
        }
    }
}

fn default_min_records() -> usize {
    300
}

fn default_max_records() -> usize {
    500
}

fn default_months() -> u32 {
    24
}

fn default_credit_probability() -> f64 {
    0.05
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Input data settings
    #[serde(default)]
    pub data: DataConfig,
    /// Record parsing settings
    #[serde(default)]
    pub parsing: ParsingConfig,
    /// Transaction table settings
    #[serde(default)]
    pub view: ViewConfig,
    /// Chart settings
    #[serde(default)]
    pub charts: ChartConfig,
    /// Demo data settings
    #[serde(default)]
    pub demo: DemoConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::IoError { message: e.to_string() })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.delimiter.chars().count() != 1 {
            return Err(ConfigError::InvalidValue {
                field: "data.delimiter".to_string(),
                reason: "Delimiter must be exactly one character".to_string(),
            });
        }

        if self.parsing.date_formats.is_empty() {
            return Err(ConfigError::MissingField {
                field: "parsing.date_formats".to_string(),
            });
        }

        if self.view.page_sizes.iter().any(|&size| size == 0) {
            return Err(ConfigError::InvalidValue {
                field: "view.page_sizes".to_string(),
                reason: "Page sizes must be greater than 0".to_string(),
            });
        }

        if !self.view.page_sizes.contains(&self.view.default_page_size) {
            return Err(ConfigError::InvalidValue {
                field: "view.default_page_size".to_string(),
                reason: format!(
                    "Default page size must be one of {:?}",
                    self.view.page_sizes
                ),
            });
        }

        if self.charts.top_categories == 0 {
            return Err(ConfigError::InvalidValue {
                field: "charts.top_categories".to_string(),
                reason: "At least one category must be shown".to_string(),
            });
        }

        if self.demo.min_records > self.demo.max_records {
            return Err(ConfigError::InvalidValue {
                field: "demo.min_records".to_string(),
                reason: "min_records must not exceed max_records".to_string(),
            });
        }

        if self.demo.months == 0 {
            return Err(ConfigError::InvalidValue {
                field: "demo.months".to_string(),
                reason: "Demo data must span at least one month".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.demo.credit_probability) {
            return Err(ConfigError::InvalidValue {
                field: "demo.credit_probability".to_string(),
                reason: "Probability must be between 0 and 1".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}

// ==================== Tests ====================

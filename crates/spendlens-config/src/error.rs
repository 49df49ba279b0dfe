//! Error types for spendlens-config

use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Error codes for configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigErrorCode {
    /// File not found
    FileNotFound,
    /// Invalid YAML format
    InvalidYaml,
    /// Missing required field
    MissingField,
    /// Invalid field value
    InvalidValue,
    /// IO error
    IoError,
}

impl std::fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigErrorCode::FileNotFound => write!(f, "FILE_NOT_FOUND"),
            ConfigErrorCode::InvalidYaml => write!(f, "INVALID_YAML"),
            ConfigErrorCode::MissingField => write!(f, "MISSING_FIELD"),
            ConfigErrorCode::InvalidValue => write!(f, "INVALID_VALUE"),
            ConfigErrorCode::IoError => write!(f, "IO_ERROR"),
        }
    }
}

/// Detailed error information for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigErrorDetails {
    /// Error code
    pub code: ConfigErrorCode,
    /// Human-readable message
    pub message: String,
    /// Field path (for field-specific errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ConfigErrorDetails {
    /// Create a new error detail
    pub fn new(code: ConfigErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            field: None,
            suggestions: vec![],
        }
    }

    /// Add field information
    pub fn with_field(mut self, field: String) -> Self {
        self.field = Some(field);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ConfigErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref field) = self.field {
            write!(f, "\nField: {}", field)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigErrorSeverity {
    Warning,
    Error,
}

impl std::fmt::Display for ConfigErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigErrorSeverity::Warning => write!(f, "warning"),
            ConfigErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid YAML format: {message}")]
    InvalidYaml { message: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid field value: {field} - {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("IO error: {message}")]
    IoError { message: String },
}

impl ConfigError {
    /// Get the error code
    pub fn code(&self) -> ConfigErrorCode {
        match self {
            ConfigError::FileNotFound { .. } => ConfigErrorCode::FileNotFound,
            ConfigError::InvalidYaml { .. } => ConfigErrorCode::InvalidYaml,
            ConfigError::MissingField { .. } => ConfigErrorCode::MissingField,
            ConfigError::InvalidValue { .. } => ConfigErrorCode::InvalidValue,
            ConfigError::IoError { .. } => ConfigErrorCode::IoError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ConfigErrorSeverity {
        match self {
            // A missing file falls back to defaults in the binary
            ConfigError::FileNotFound { .. } => ConfigErrorSeverity::Warning,
            _ => ConfigErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ConfigErrorDetails {
        let mut details = ConfigErrorDetails::new(
            self.code(),
            self.to_string(),
        );

        match self {
            ConfigError::FileNotFound { .. } => {
                details = details.with_suggestion(
                    "Check if the config file path is correct.".to_string()
                );
                details = details.with_suggestion(
                    "Use --config flag to specify the config file path.".to_string()
                );
            }
            ConfigError::InvalidYaml { .. } => {
                details = details.with_suggestion(
                    "Compare your file with the output of --print-default-config.".to_string()
                );
            }
            ConfigError::MissingField { field } => {
                details = details.with_field(field.clone());
                details = details.with_suggestion(
                    format!("Add the '{}' field to your config file.", field)
                );
            }
            ConfigError::InvalidValue { field, reason } => {
                details = details.with_field(field.clone());
                details = details.with_suggestion(reason.clone());
            }
            ConfigError::IoError { .. } => {
                details = details.with_suggestion(
                    "Check that the config path is a readable UTF-8 file.".to_string(),
                );
            }
        }

        details
    }
}

/// Result type with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_code() {
        let error = ConfigError::FileNotFound {
            path: "/path/to/config.yaml".to_string()
        };
        assert_eq!(error.code(), ConfigErrorCode::FileNotFound);
        assert_eq!(error.code().to_string(), "FILE_NOT_FOUND");

        let error = ConfigError::MissingField {
            field: "parsing.date_formats".to_string()
        };
        assert_eq!(error.code(), ConfigErrorCode::MissingField);
    }

    #[test]
    fn test_config_error_severity() {
        let error = ConfigError::FileNotFound {
            path: "/path/to/config.yaml".to_string()
        };
        assert_eq!(error.severity(), ConfigErrorSeverity::Warning);

        let error = ConfigError::InvalidValue {
            field: "view.page_sizes".to_string(),
            reason: "Page sizes must be greater than 0".to_string(),
        };
        assert_eq!(error.severity(), ConfigErrorSeverity::Error);
    }

    #[test]
    fn test_details_carry_field() {
        let error = ConfigError::InvalidValue {
            field: "charts.top_categories".to_string(),
            reason: "At least one category must be shown".to_string(),
        };
        let details = error.to_details();
        assert_eq!(details.field.as_deref(), Some("charts.top_categories"));
        assert!(details.to_string().contains("INVALID_VALUE"));
        assert!(!details.suggestions.is_empty());
    }

    #[test]
    fn test_io_error_keeps_message() {
        let error = ConfigError::IoError {
            message: "Is a directory (os error 21)".to_string(),
        };
        assert_eq!(error.code(), ConfigErrorCode::IoError);
        assert_eq!(error.to_string(), "IO error: Is a directory (os error 21)");
        assert!(!error.to_details().suggestions.is_empty());
    }
}

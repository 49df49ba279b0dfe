//! Error types for spendlens-core
//!
//! Engine operations are total over their inputs; the errors here come from
//! rejected view changes and from the edges (loading records, reading
//! configuration). Each error carries a code, a severity and suggestions.

use serde::{Deserialize, Serialize};
use spendlens_config::error::ConfigError;
use spendlens_parser::ParseError;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Requested page number is out of range
    InvalidPage,
    /// Requested page size is not offered
    InvalidPageSize,
    /// Record source could not be found
    SourceNotFound,
    /// Record source failed to load
    LoadError,
    /// Configuration error
    ConfigError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::InvalidPage => write!(f, "INVALID_PAGE"),
            ErrorCode::InvalidPageSize => write!(f, "INVALID_PAGE_SIZE"),
            ErrorCode::SourceNotFound => write!(f, "SOURCE_NOT_FOUND"),
            ErrorCode::LoadError => write!(f, "LOAD_ERROR"),
            ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
        }
    }
}

/// Detailed error information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
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

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - the request was rejected, state unchanged
    Warning,
    /// Error - operation failed
    Error,
    /// Critical - the application cannot continue
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for spendlens-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid page: {page}")]
    InvalidPage { page: usize },

    #[error("Invalid page size: {size}")]
    InvalidPageSize { size: usize, allowed: Vec<usize> },

    #[error("Source not found: {path}")]
    SourceNotFound { path: String },

    #[error("Failed to load records: {message}")]
    LoadError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::InvalidPage { .. } => ErrorCode::InvalidPage,
            CoreError::InvalidPageSize { .. } => ErrorCode::InvalidPageSize,
            CoreError::SourceNotFound { .. } => ErrorCode::SourceNotFound,
            CoreError::LoadError { .. } => ErrorCode::LoadError,
            CoreError::ConfigError { .. } => ErrorCode::ConfigError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::InvalidPage { .. } => ErrorSeverity::Warning,
            CoreError::InvalidPageSize { .. } => ErrorSeverity::Warning,
            CoreError::SourceNotFound { .. } => ErrorSeverity::Error,
            CoreError::LoadError { .. } => ErrorSeverity::Error,
            CoreError::ConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::InvalidPage { .. } => {
                details = details.with_suggestion("Pages are numbered from 1.".to_string());
            }
            CoreError::InvalidPageSize { allowed, .. } => {
                details = details.with_detail(serde_json::json!({ "allowed": allowed }));
                details = details.with_suggestion(format!(
                    "Choose one of the offered page sizes: {:?}.",
                    allowed
                ));
            }
            CoreError::SourceNotFound { path } => {
                details = details.with_suggestion(format!(
                    "Check that '{}' exists and is readable.",
                    path
                ));
                details = details
                    .with_suggestion("Use --demo to explore generated data instead.".to_string());
            }
            CoreError::LoadError { message } => {
                details = details.with_detail(serde_json::json!({ "load_message": message }));
                details = details.with_suggestion(
                    "The export must be UTF-8 text with a header line.".to_string(),
                );
            }
            CoreError::ConfigError { .. } => {
                details = details.with_suggestion(
                    "Run with --print-default-config to see a valid configuration.".to_string(),
                );
            }
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<ParseError> for CoreError {
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::SourceNotFound { path } => CoreError::SourceNotFound { path },
            ParseError::InvalidSource { message } => CoreError::LoadError { message },
            ParseError::IoError(e) => CoreError::LoadError {
                message: e.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CoreError {
    fn from(error: ConfigError) -> Self {
        CoreError::ConfigError {
            message: error.to_string(),
        }
    }
}

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    pub fn new(operation: String) -> Self {
        Self {
            operation,
            data: serde_json::json!({}),
        }
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    fn log_warning(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        log::error!(
            target: "spendlens::error",
            "ERROR [{}] {} - Operation: {} - Context: {}",
            error.code(),
            error.to_details(),
            context.operation,
            context.data
        );
    }

    fn log_warning(&self, message: &str, context: &ErrorContext) {
        log::warn!(
            target: "spendlens::error",
            "WARNING: {} - Operation: {} - Context: {}",
            message,
            context.operation,
            context.data
        );
    }
}

// ==================== Tests ====================

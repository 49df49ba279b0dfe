//! Transaction export parser and record sources
//!
//! Turns semicolon-delimited bank exports into typed records, and provides
//! the async sources (file, demo) that hand finished record sets to the
//! engine.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

pub mod demo;
pub mod error;
pub mod parser;
pub mod types;

pub use demo::DemoSource;
pub use error::ParseError;
pub use parser::{parse_amount, RecordParser};
pub use types::{Field, ParseOutcome, TransactionRecord};

// ==================== Source Trait ====================

/// Source reference type
pub type SourceRef = Arc<dyn RecordSource>;

/// Something that produces a complete record set.
///
/// A load either yields every record or fails; callers keep their previous
/// records on failure.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Produce the full record set
    async fn load(&self) -> Result<Vec<TransactionRecord>, ParseError>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}

/// Reads a transaction export from disk
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    parser: RecordParser,
}

impl CsvFileSource {
    pub fn new(path: PathBuf, parser: RecordParser) -> Self {
        Self { path, parser }
    }
}

#[async_trait]
impl RecordSource for CsvFileSource {
    async fn load(&self) -> Result<Vec<TransactionRecord>, ParseError> {
        let metadata = match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ParseError::SourceNotFound {
                    path: self.path.to_string_lossy().to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_file() {
            return Err(ParseError::InvalidSource {
                message: format!("{} is not a file", self.path.display()),
            });
        }

        let bytes = tokio::fs::read(&self.path).await?;
        let content = String::from_utf8_lossy(&bytes);
        let outcome = self.parser.parse(&content);

        log::info!(
            "Loaded {} records from {} ({} malformed rows skipped)",
            outcome.records.len(),
            self.path.display(),
            outcome.skipped_rows
        );

        Ok(outcome.records)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

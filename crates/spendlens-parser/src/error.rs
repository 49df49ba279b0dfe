//! Error types for spendlens-parser

use thiserror::Error;
use std::io;

/// Failures of a record source. Row-level problems never end up here:
/// malformed rows are dropped and bad values fall back to defaults.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Source not found: {path}")]
    SourceNotFound { path: String },

    #[error("Invalid source: {message}")]
    InvalidSource { message: String },

    #[error("IO error")]
    IoError(#[from] io::Error),
}

//! Error types for the ledger pipeline
//!
//! Only failures that abort the whole run are modeled as Rust errors:
//! a missing input file, an I/O failure, or a malformed JSON batch.
//! Domain-rule violations (unknown accounts, insufficient funds, frozen
//! cards and so on) never surface here; they are recorded as log events
//! or error output records and processing continues.

use thiserror::Error;

/// Fatal errors that stop the batch run.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The input file does not exist.
    #[error("Input file not found: {path}")]
    FileNotFound { path: String },

    /// Reading the input or writing the output failed.
    #[error("I/O error: {message}")]
    Io { message: String },

    /// The input batch is not valid JSON or does not match the
    /// expected shape.
    #[error("Failed to parse input: {message}")]
    Parse { message: String },
}

impl LedgerError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        LedgerError::FileNotFound { path: path.into() }
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Parse {
            message: err.to_string(),
        }
    }
}

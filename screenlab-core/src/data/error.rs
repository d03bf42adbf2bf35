//! Structured error types for snapshot ingestion.
//!
//! Only fatal conditions live here. Per-cell coercion failures and missing
//! preamble fields are recoverable and never surface as errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("no input snapshot found: {searched}")]
    SourceNotFound { searched: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8")]
    Encoding { path: PathBuf },

    #[error("malformed tabular block: {0}")]
    MalformedTabularBlock(#[from] TabularError),
}

/// Why the tabular block could not be turned into a dataset.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TabularError {
    #[error("no header row after the {preamble}-line preamble")]
    MissingHeader { preamble: usize },

    #[error("required column '{column}' is missing (found: {})", .found.join(", "))]
    MissingColumn { column: String, found: Vec<String> },

    #[error("no data rows below the header on line {header_line}")]
    NoRows { header_line: usize },

    #[error("line {line}: expected at most {expected} fields, found {found}")]
    RowTooWide {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: unreadable record: {reason}")]
    UnreadableRecord { line: usize, reason: String },
}

impl IngestError {
    pub fn is_malformed_block(&self) -> bool {
        matches!(self, Self::MalformedTabularBlock(_))
    }

    pub fn is_source_not_found(&self) -> bool {
        matches!(self, Self::SourceNotFound { .. })
    }
}

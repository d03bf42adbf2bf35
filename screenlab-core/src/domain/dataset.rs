use serde::{Deserialize, Serialize};
use std::fmt;

use super::instrument::Instrument;

/// A recoverable per-cell problem found while loading.
///
/// The offending cell has already been replaced by a null; the note only
/// exists so the run can report what was lost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataQualityNote {
    /// 1-based line number in the snapshot file.
    pub line: usize,
    pub column: String,
    pub raw: String,
}

impl fmt::Display for DataQualityNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} value '{}' is not numeric, treated as missing",
            self.line, self.column, self.raw
        )
    }
}

/// The parsed tabular block of one snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    /// Retained column names in header order. Never contains a placeholder.
    pub columns: Vec<String>,
    /// Header names that matched the placeholder pattern and were dropped.
    pub dropped_columns: Vec<String>,
    pub instruments: Vec<Instrument>,
    pub notes: Vec<DataQualityNote>,
}

impl Dataset {
    /// Build a dataset directly from records, e.g. for tests and benches.
    pub fn from_instruments(instruments: Vec<Instrument>) -> Self {
        Self {
            columns: super::REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            dropped_columns: Vec::new(),
            instruments,
            notes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Non-null market caps in input order.
    pub fn mkt_caps(&self) -> impl Iterator<Item = f64> + '_ {
        self.instruments.iter().filter_map(|i| i.mkt_cap)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

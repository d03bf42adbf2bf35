//! Header inspection: which columns are kept and where the required ones sit.

use std::collections::HashSet;

use crate::domain::REQUIRED_COLUMNS;

use super::error::TabularError;

/// Prefix spreadsheet tools assign to blank header cells.
pub const PLACEHOLDER_PREFIX: &str = "Unnamed";

/// Blank header cells and auto-generated `Unnamed…` names are placeholders.
pub fn is_placeholder(header: &str) -> bool {
    let h = header.trim();
    h.is_empty() || h.starts_with(PLACEHOLDER_PREFIX)
}

/// Resolved header layout for one tabular block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    /// Retained `(field index, name)` pairs in header order.
    pub kept: Vec<(usize, String)>,
    pub dropped: Vec<String>,
    pub ticker: usize,
    pub name: usize,
    pub mkt_cap: usize,
    pub sector_code: usize,
    /// Number of fields in the header row.
    pub width: usize,
}

impl ColumnPlan {
    /// Classify header cells and locate the required columns.
    ///
    /// A repeated name gets a `.N` suffix (`Price`, `Price.1`, ...), so only
    /// the first occurrence can be a required column.
    pub fn from_headers<'a, I>(headers: I) -> Result<Self, TabularError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut kept = Vec::new();
        let mut dropped = Vec::new();
        let mut seen = HashSet::new();
        let mut width = 0;
        for (idx, raw) in headers.into_iter().enumerate() {
            width = idx + 1;
            if is_placeholder(raw) {
                dropped.push(raw.trim().to_string());
                continue;
            }
            let base = raw.trim();
            let mut name = base.to_string();
            let mut n = 1;
            while seen.contains(&name) {
                name = format!("{base}.{n}");
                n += 1;
            }
            seen.insert(name.clone());
            kept.push((idx, name));
        }

        let find = |column: &str| {
            kept.iter()
                .find(|(_, name)| name == column)
                .map(|(idx, _)| *idx)
        };

        let mut located = [0usize; 4];
        for (slot, column) in located.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = find(column).ok_or_else(|| TabularError::MissingColumn {
                column: column.to_string(),
                found: kept.iter().map(|(_, n)| n.clone()).collect(),
            })?;
        }
        let [ticker, name, mkt_cap, sector_code] = located;

        Ok(Self {
            kept,
            dropped,
            ticker,
            name,
            mkt_cap,
            sector_code,
            width,
        })
    }

    pub fn column_names(&self) -> Vec<String> {
        self.kept.iter().map(|(_, n)| n.clone()).collect()
    }

    /// Retained columns other than the four promoted fields.
    pub fn extra_columns(&self) -> impl Iterator<Item = &(usize, String)> + '_ {
        let promoted = [self.ticker, self.name, self.mkt_cap, self.sector_code];
        self.kept.iter().filter(move |(idx, _)| !promoted.contains(idx))
    }
}

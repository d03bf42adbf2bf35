//! Tabular block loading: CSV rows below the preamble into a [`Dataset`].
//!
//! Fatal problems (missing header, missing required column, no rows, rows
//! wider than the header, unreadable records) abort with a [`TabularError`]
//! carrying the offending column or line. A `MktCap` cell that is not a
//! number is recoverable: the value becomes `None` and a
//! [`DataQualityNote`] is recorded.

use std::collections::BTreeMap;

use crate::domain::{DataQualityNote, Dataset, Instrument, MKT_CAP};

use super::error::TabularError;
use super::metadata::PREAMBLE_LINES;
use super::schema::ColumnPlan;
use super::source::RawSource;

/// Coerce a raw market-cap cell to a number.
///
/// Thousands separators (literal commas) are stripped before parsing. Blank,
/// unparseable and non-finite values all yield `None`.
pub fn coerce_mkt_cap(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse the tabular block of `source` (everything after the preamble).
pub fn load_tabular(source: &RawSource) -> Result<Dataset, TabularError> {
    let body = source.body(PREAMBLE_LINES);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| TabularError::UnreadableRecord {
            line: PREAMBLE_LINES + 1,
            reason: e.to_string(),
        })?
        .clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(TabularError::MissingHeader {
            preamble: PREAMBLE_LINES,
        });
    }
    let header_line = PREAMBLE_LINES + headers.position().map_or(1, |p| p.line() as usize);

    let plan = ColumnPlan::from_headers(headers.iter())?;
    if !plan.dropped.is_empty() {
        tracing::debug!(dropped = ?plan.dropped, "dropped placeholder columns");
    }

    let mut instruments = Vec::new();
    let mut notes = Vec::new();

    for result in rdr.records() {
        let record = result.map_err(|e| TabularError::UnreadableRecord {
            line: PREAMBLE_LINES + e.position().map_or(0, |p| p.line() as usize),
            reason: e.to_string(),
        })?;
        let line = PREAMBLE_LINES + record.position().map_or(0, |p| p.line() as usize);

        // Whitespace-only lines are blank; all-empty delimited rows are not.
        if record.len() == 1 && record[0].trim().is_empty() {
            tracing::debug!(line, "skipping blank line");
            continue;
        }

        if record.len() > plan.width {
            return Err(TabularError::RowTooWide {
                line,
                expected: plan.width,
                found: record.len(),
            });
        }

        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let raw_cap = cell(plan.mkt_cap);
        let mkt_cap = coerce_mkt_cap(raw_cap);
        if mkt_cap.is_none() && !raw_cap.trim().is_empty() {
            tracing::warn!(
                line,
                column = MKT_CAP,
                raw = raw_cap,
                "non-numeric market cap treated as missing"
            );
            notes.push(DataQualityNote {
                line,
                column: MKT_CAP.to_string(),
                raw: raw_cap.to_string(),
            });
        }

        let sector = cell(plan.sector_code).trim();
        let mut extra = BTreeMap::new();
        for (idx, name) in plan.extra_columns() {
            extra.insert(name.clone(), cell(*idx).to_string());
        }

        instruments.push(Instrument {
            ticker: cell(plan.ticker).trim().to_string(),
            name: cell(plan.name).trim().to_string(),
            mkt_cap,
            sector_code: (!sector.is_empty()).then(|| sector.to_string()),
            extra,
        });
    }

    if instruments.is_empty() {
        return Err(TabularError::NoRows { header_line });
    }

    tracing::info!(
        rows = instruments.len(),
        columns = plan.kept.len(),
        coercion_failures = notes.len(),
        "loaded tabular block"
    );

    Ok(Dataset {
        columns: plan.column_names(),
        dropped_columns: plan.dropped,
        instruments,
        notes,
    })
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the tabular block: a single stock in the universe.
///
/// The four columns every snapshot must carry are promoted to named fields.
/// Every other retained column is passed through untouched in `extra`, keyed
/// by its header name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instrument {
    /// Nominal display key. Not guaranteed unique across a snapshot.
    pub ticker: String,
    pub name: String,
    /// Market capitalization in millions. `None` when the cell was blank or
    /// could not be coerced to a finite number.
    pub mkt_cap: Option<f64>,
    /// `None` when the cell was blank.
    pub sector_code: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl Instrument {
    /// Create an instrument with no pass-through columns.
    pub fn new(
        ticker: impl Into<String>,
        name: impl Into<String>,
        mkt_cap: Option<f64>,
        sector_code: Option<&str>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            mkt_cap,
            sector_code: sector_code.map(String::from),
            extra: BTreeMap::new(),
        }
    }

    /// Look up a pass-through column by header name.
    pub fn extra_value(&self, column: &str) -> Option<&str> {
        self.extra.get(column).map(|s| s.as_str())
    }

    pub fn has_mkt_cap(&self) -> bool {
        self.mkt_cap.is_some()
    }
}

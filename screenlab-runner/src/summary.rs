//! Summary statistics: pure functions over a loaded dataset.
//!
//! Null market caps are excluded from every market-cap figure, never treated
//! as zero. With nothing to aggregate, total / average / median are `0.0`.

use std::collections::HashSet;

use screenlab_core::Dataset;
use serde::{Deserialize, Serialize};

/// Headline figures for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Number of instrument records.
    pub count: usize,
    /// Number of records with a non-null market cap.
    pub valued_count: usize,
    pub total_mkt_cap: f64,
    pub avg_mkt_cap: f64,
    pub median_mkt_cap: f64,
    /// Distinct sector codes; a missing sector counts as one category.
    pub sector_count: usize,
}

impl SummaryStatistics {
    pub fn compute(dataset: &Dataset) -> Self {
        let caps: Vec<f64> = dataset.mkt_caps().collect();
        Self {
            count: dataset.len(),
            valued_count: caps.len(),
            total_mkt_cap: total(&caps),
            avg_mkt_cap: mean(&caps),
            median_mkt_cap: median(&caps),
            sector_count: distinct_sectors(dataset),
        }
    }
}

// ─── Individual statistics ──────────────────────────────────────────

pub fn total(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    total(values) / values.len() as f64
}

/// Median with midpoint averaging for even counts. Returns 0.0 for an
/// empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Number of distinct `sector_code` values, `None` included as its own
/// category.
pub fn distinct_sectors(dataset: &Dataset) -> usize {
    dataset
        .instruments
        .iter()
        .map(|i| i.sector_code.as_deref())
        .collect::<HashSet<_>>()
        .len()
}

//! Sector breakdown: instrument counts per sector code.

use std::collections::HashMap;

use screenlab_core::Dataset;
use serde::{Deserialize, Serialize};

/// One sector's share of the universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorShare {
    /// `None` groups every record with a blank sector code.
    pub sector_code: Option<String>,
    pub count: usize,
    /// `100 * count / total records`.
    pub percentage: f64,
}

/// Sector shares, largest first. Equal counts keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorBreakdown {
    pub rows: Vec<SectorShare>,
}

impl SectorBreakdown {
    pub fn compute(dataset: &Dataset) -> Self {
        let total = dataset.len();

        let mut order: Vec<Option<&str>> = Vec::new();
        let mut counts: HashMap<Option<&str>, usize> = HashMap::new();
        for inst in &dataset.instruments {
            let key = inst.sector_code.as_deref();
            let slot = counts.entry(key).or_insert_with(|| {
                order.push(key);
                0
            });
            *slot += 1;
        }

        let mut rows: Vec<SectorShare> = order
            .into_iter()
            .map(|key| {
                let count = counts[&key];
                SectorShare {
                    sector_code: key.map(String::from),
                    count,
                    percentage: 100.0 * count as f64 / total as f64,
                }
            })
            .collect();

        // Stable sort keeps first-seen order among equal counts.
        rows.sort_by(|a, b| b.count.cmp(&a.count));

        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_percentage(&self) -> f64 {
        self.rows.iter().map(|r| r.percentage).sum()
    }
}

//! Market-cap ranking: the top K instruments by descending `MktCap`.
//!
//! Records without a market cap never enter the ranking. Ties keep input
//! order, so re-ranking a ranking with a smaller K yields a prefix of it.

use screenlab_core::{Dataset, Instrument};
use serde::{Deserialize, Serialize};

use crate::format::truncate_chars;

/// Default ranking depth for the report table.
pub const DEFAULT_TOP_K: usize = 15;

/// Default maximum display length for instrument names.
pub const DEFAULT_NAME_MAX_CHARS: usize = 40;

/// One ranked row, projected to the columns the report shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedInstrument {
    pub ticker: String,
    /// Already truncated to the display length.
    pub name: String,
    pub mkt_cap: f64,
    pub sector_code: Option<String>,
}

impl RankedInstrument {
    fn project(inst: &Instrument, mkt_cap: f64, name_max_chars: usize) -> Self {
        Self {
            ticker: inst.ticker.clone(),
            name: truncate_chars(&inst.name, name_max_chars),
            mkt_cap,
            sector_code: inst.sector_code.clone(),
        }
    }
}

/// Top-K instruments ordered best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    entries: Vec<RankedInstrument>,
    k: usize,
}

impl Ranking {
    /// Rank `dataset` by market cap and keep the first `k` rows.
    pub fn top_k(dataset: &Dataset, k: usize, name_max_chars: usize) -> Self {
        let mut valued: Vec<(f64, &Instrument)> = dataset
            .instruments
            .iter()
            .filter_map(|i| i.mkt_cap.map(|cap| (cap, i)))
            .collect();
        sort_descending(&mut valued, |(cap, _)| *cap);

        let entries = valued
            .into_iter()
            .take(k)
            .map(|(cap, inst)| RankedInstrument::project(inst, cap, name_max_chars))
            .collect();
        Self { entries, k }
    }

    /// Re-rank this ranking keeping at most `k` rows.
    pub fn rerank(&self, k: usize) -> Self {
        let mut entries = self.entries.clone();
        sort_descending(&mut entries, |e| e.mkt_cap);
        entries.truncate(k);
        Self { entries, k }
    }

    pub fn entries(&self) -> &[RankedInstrument] {
        &self.entries
    }

    /// The requested depth. `len()` can be smaller when fewer records have a
    /// market cap.
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stable descending sort on an f64 key.
fn sort_descending<T>(items: &mut [T], key: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| key(b).total_cmp(&key(a)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(rows: &[(&str, Option<f64>, &str)]) -> Dataset {
        Dataset::from_instruments(
            rows.iter()
                .map(|(t, cap, s)| Instrument::new(*t, format!("{t} Corp"), *cap, Some(*s)))
                .collect(),
        )
    }

    #[test]
    fn reference_scenario_top_three() {
        let ds = dataset(&[
            ("A1", Some(100.0), "A"),
            ("B1", None, "B"),
            ("A2", Some(300.0), "A"),
            ("A3", Some(200.0), "A"),
            ("B2", Some(50.0), "B"),
        ]);
        let r = Ranking::top_k(&ds, 3, DEFAULT_NAME_MAX_CHARS);
        let caps: Vec<f64> = r.entries().iter().map(|e| e.mkt_cap).collect();
        let sectors: Vec<&str> = r
            .entries()
            .iter()
            .map(|e| e.sector_code.as_deref().unwrap())
            .collect();
        assert_eq!(caps, vec![300.0, 200.0, 100.0]);
        assert_eq!(sectors, vec!["A", "A", "A"]);
        assert_eq!(r.k(), 3);
    }

    #[test]
    fn nulls_never_ranked() {
        let ds = dataset(&[("X", None, "A"), ("Y", Some(1.0), "A"), ("Z", None, "A")]);
        let r = Ranking::top_k(&ds, 15, 40);
        assert_eq!(r.len(), 1);
        assert_eq!(r.entries()[0].ticker, "Y");
    }

    #[test]
    fn ties_keep_input_order() {
        let ds = dataset(&[
            ("FIRST", Some(10.0), "A"),
            ("BIG", Some(20.0), "A"),
            ("SECOND", Some(10.0), "A"),
            ("THIRD", Some(10.0), "A"),
        ]);
        let r = Ranking::top_k(&ds, 3, 40);
        let tickers: Vec<&str> = r.entries().iter().map(|e| e.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["BIG", "FIRST", "SECOND"]);
    }

    #[test]
    fn names_are_truncated() {
        let ds = Dataset::from_instruments(vec![Instrument::new(
            "LONG",
            "International Business Machines Corporation Holdings",
            Some(1.0),
            Some("TECH"),
        )]);
        let r = Ranking::top_k(&ds, 1, 40);
        assert_eq!(r.entries()[0].name.chars().count(), 40);
        assert_eq!(r.entries()[0].name, "International Business Machines Corporat");
    }

    #[test]
    fn rerank_is_prefix() {
        let ds = dataset(&[
            ("A", Some(5.0), "X"),
            ("B", Some(9.0), "X"),
            ("C", Some(9.0), "Y"),
            ("D", Some(1.0), "Y"),
        ]);
        let r = Ranking::top_k(&ds, 4, 40);
        let r2 = r.rerank(2);
        assert_eq!(r2.entries(), &r.entries()[..2]);
    }

    #[test]
    fn zero_k_is_empty() {
        let ds = dataset(&[("A", Some(5.0), "X")]);
        assert!(Ranking::top_k(&ds, 0, 40).is_empty());
    }
}

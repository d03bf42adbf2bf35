//! Report content model: the finished, render-ready section sequence.
//!
//! The model is the only thing handed to a renderer. Every figure in it is
//! already formatted; renderers lay text out and never compute.

use chrono::{DateTime, Utc};
use screenlab_core::{Metadata, MetadataField};
use serde::{Deserialize, Serialize};

use crate::breakdown::SectorBreakdown;
use crate::format;
use crate::ranking::Ranking;
use crate::summary::SummaryStatistics;

/// Current schema version for persisted content models.
pub const SCHEMA_VERSION: u32 = 1;

/// Label used for records with no sector code.
pub const UNASSIGNED_SECTOR: &str = "Unassigned";

pub const SUMMARY_HEADING: &str = "Universe Summary Statistics";
pub const BREAKDOWN_HEADING: &str = "Sector Breakdown";
pub const BREAKDOWN_CAPTION: &str = "Stock Count by Sector:";
pub const TABLE_HEADERS: [&str; 4] = ["Ticker", "Name", "Market Cap ($M)", "Sector"];

/// Where the content came from and when it was built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub source: Option<String>,
    /// BLAKE3 digest of the snapshot text.
    pub source_hash: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleSection {
    pub title: String,
    pub date: String,
    /// `Analysis Date: {date}`
    pub subtitle: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySection {
    pub heading: String,
    pub lines: Vec<SummaryLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub sector: String,
    pub count: String,
    pub percentage: String,
}

impl BreakdownRow {
    /// `TECH: 1,204 (25.1%)`
    pub fn display(&self) -> String {
        format!("{}: {} ({})", self.sector, self.count, self.percentage)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownSection {
    pub heading: String,
    pub caption: String,
    pub rows: Vec<BreakdownRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub ticker: String,
    pub name: String,
    pub market_cap: String,
    pub sector: String,
}

impl TableRow {
    pub fn cells(&self) -> [&str; 4] {
        [
            self.ticker.as_str(),
            self.name.as_str(),
            self.market_cap.as_str(),
            self.sector.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSection {
    pub heading: String,
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// One section descriptor. Renderers switch on the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportSection {
    Title(TitleSection),
    Summary(SummarySection),
    Breakdown(BreakdownSection),
    Table(TableSection),
}

impl ReportSection {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::Summary(_) => "summary",
            Self::Breakdown(_) => "breakdown",
            Self::Table(_) => "table",
        }
    }
}

/// The ordered section sequence plus provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportContentModel {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub provenance: Provenance,
    pub sections: Vec<ReportSection>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Assembles a [`ReportContentModel`] from already-computed aggregates.
#[derive(Debug, Clone)]
pub struct ContentBuilder {
    placeholder: String,
}

impl ContentBuilder {
    /// `placeholder` replaces absent metadata fields and must be non-empty.
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    pub fn build(
        &self,
        metadata: &Metadata,
        summary: &SummaryStatistics,
        breakdown: &SectorBreakdown,
        ranking: &Ranking,
        provenance: Provenance,
    ) -> ReportContentModel {
        ReportContentModel {
            schema_version: SCHEMA_VERSION,
            provenance,
            sections: vec![
                ReportSection::Title(self.title(metadata)),
                ReportSection::Summary(summary_section(summary)),
                ReportSection::Breakdown(breakdown_section(breakdown)),
                ReportSection::Table(table_section(ranking)),
            ],
        }
    }

    fn title(&self, metadata: &Metadata) -> TitleSection {
        let field = |f: MetadataField| metadata.get_or(f, &self.placeholder).to_string();
        let date = field(MetadataField::Date);
        TitleSection {
            title: field(MetadataField::Title),
            subtitle: format!("Analysis Date: {date}"),
            date,
            notes: field(MetadataField::Notes),
        }
    }
}

fn summary_section(s: &SummaryStatistics) -> SummarySection {
    let line = |label: &str, value: String| SummaryLine {
        label: label.to_string(),
        value,
    };
    SummarySection {
        heading: SUMMARY_HEADING.to_string(),
        lines: vec![
            line("Total Number of Stocks", format::count(s.count)),
            line("Total Market Cap", format::market_cap_millions(s.total_mkt_cap)),
            line("Average Market Cap", format::market_cap_millions(s.avg_mkt_cap)),
            line("Median Market Cap", format::market_cap_millions(s.median_mkt_cap)),
            line("Number of Sectors", s.sector_count.to_string()),
        ],
    }
}

fn sector_label(code: Option<&str>) -> String {
    code.unwrap_or(UNASSIGNED_SECTOR).to_string()
}

fn breakdown_section(b: &SectorBreakdown) -> BreakdownSection {
    BreakdownSection {
        heading: BREAKDOWN_HEADING.to_string(),
        caption: BREAKDOWN_CAPTION.to_string(),
        rows: b
            .rows
            .iter()
            .map(|r| BreakdownRow {
                sector: sector_label(r.sector_code.as_deref()),
                count: format::count(r.count),
                percentage: format::percent(r.percentage),
            })
            .collect(),
    }
}

fn table_section(ranking: &Ranking) -> TableSection {
    TableSection {
        heading: format!("Top {} Stocks by Market Cap", ranking.k()),
        headers: TABLE_HEADERS.iter().map(|h| h.to_string()).collect(),
        rows: ranking
            .entries()
            .iter()
            .map(|e| TableRow {
                ticker: e.ticker.clone(),
                name: e.name.clone(),
                market_cap: format::money(e.mkt_cap),
                sector: sector_label(e.sector_code.as_deref()),
            })
            .collect(),
    }
}

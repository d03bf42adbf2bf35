//! Screenlab Runner: aggregation, content building and report export.
//!
//! This crate builds on `screenlab-core` to provide:
//! - Snapshot loading through a source selector
//! - Universe summary statistics, sector breakdown and top-K ranking
//! - Display formatting for money, counts and percentages
//! - The report content model (ordered, render-ready sections)
//! - Renderers (Markdown, JSON) and single-artifact export
//! - TOML configuration

pub mod breakdown;
pub mod config;
pub mod content;
pub mod export;
pub mod format;
pub mod loader;
pub mod ranking;
pub mod runner;
pub mod summary;

pub use breakdown::{SectorBreakdown, SectorShare};
pub use config::{
    ConfigError, OutputConfig, OutputFormat, ReportConfig, ReportSettings, SourceConfig,
};
pub use content::{ContentBuilder, Provenance, ReportContentModel, ReportSection, SCHEMA_VERSION};
pub use export::{
    export_json, import_json, load_report, renderer_for, save_report, JsonRenderer,
    MarkdownRenderer, ReportRenderer,
};
pub use loader::{load_snapshot, parse_snapshot, LoadedSnapshot};
pub use ranking::{RankedInstrument, Ranking, DEFAULT_NAME_MAX_CHARS, DEFAULT_TOP_K};
pub use runner::{build_report, run_report, ReportError, ReportRun};
pub use summary::SummaryStatistics;

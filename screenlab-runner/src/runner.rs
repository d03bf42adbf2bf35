//! Report runner: wires together loading, aggregation and content building.
//!
//! Two entry points:
//! - `run_report()`: resolves the selector, reads the snapshot, then builds.
//!   Used by the CLI.
//! - `build_report()`: takes an already-parsed snapshot. No I/O; used by
//!   tests and by callers that read the file themselves.
//!
//! The content model is assembled only after every fatal check has passed,
//! so a caller never sees a partial model.

use chrono::{DateTime, Utc};
use screenlab_core::data::SourceSelector;
use screenlab_core::{Dataset, IngestError, Metadata};
use thiserror::Error;

use crate::breakdown::SectorBreakdown;
use crate::config::{ConfigError, ReportSettings};
use crate::content::{ContentBuilder, Provenance, ReportContentModel};
use crate::loader::{load_snapshot, LoadedSnapshot};
use crate::ranking::Ranking;
use crate::summary::SummaryStatistics;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),
}

/// Everything one run derived, plus the finished content model.
#[derive(Debug, Clone)]
pub struct ReportRun {
    pub metadata: Metadata,
    pub dataset: Dataset,
    pub summary: SummaryStatistics,
    pub breakdown: SectorBreakdown,
    pub ranking: Ranking,
    pub model: ReportContentModel,
}

/// Select and read a snapshot, then build the report from it.
pub fn run_report(
    selector: &dyn SourceSelector,
    settings: &ReportSettings,
) -> Result<ReportRun, ReportError> {
    let snapshot = load_snapshot(selector)?;
    build_report(snapshot, settings, Utc::now())
}

/// Aggregate a parsed snapshot and assemble its content model.
pub fn build_report(
    snapshot: LoadedSnapshot,
    settings: &ReportSettings,
    generated_at: DateTime<Utc>,
) -> Result<ReportRun, ReportError> {
    if settings.top_k == 0 || settings.name_max_chars == 0 {
        return Err(ConfigError::Invalid(
            "top_k and name_max_chars must be at least 1".into(),
        )
        .into());
    }

    let LoadedSnapshot {
        source,
        metadata,
        dataset,
    } = snapshot;

    for field in metadata.missing_fields() {
        tracing::warn!(
            field = field.as_str(),
            placeholder = %settings.placeholder,
            "metadata field missing from preamble"
        );
    }

    let summary = SummaryStatistics::compute(&dataset);
    let breakdown = SectorBreakdown::compute(&dataset);
    let ranking = Ranking::top_k(&dataset, settings.top_k, settings.name_max_chars);

    tracing::info!(
        count = summary.count,
        valued = summary.valued_count,
        sectors = summary.sector_count,
        ranked = ranking.len(),
        "aggregation complete"
    );

    let provenance = Provenance {
        source: source.path().map(|p| p.display().to_string()),
        source_hash: source.fingerprint().to_string(),
        generated_at,
    };
    let model = ContentBuilder::new(settings.placeholder.as_str()).build(
        &metadata,
        &summary,
        &breakdown,
        &ranking,
        provenance,
    );

    Ok(ReportRun {
        metadata,
        dataset,
        summary,
        breakdown,
        ranking,
        model,
    })
}

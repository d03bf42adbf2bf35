//! Snapshot loading for the runner.
//!
//! Resolves a [`SourceSelector`] to a file, reads it once, and derives
//! metadata and dataset from the same in-memory source. Any fatal ingestion
//! error stops here, before aggregation starts.

use screenlab_core::data::{load_tabular, parse_metadata, RawSource, SourceSelector};
use screenlab_core::{Dataset, IngestError, Metadata};

/// Result of loading one snapshot.
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    pub source: RawSource,
    pub metadata: Metadata,
    pub dataset: Dataset,
}

/// Select, read and parse a snapshot.
pub fn load_snapshot(selector: &dyn SourceSelector) -> Result<LoadedSnapshot, IngestError> {
    let path = selector.select()?;
    tracing::info!(path = %path.display(), "reading snapshot");
    let source = RawSource::from_path(&path)?;
    parse_snapshot(source)
}

/// Parse an already-read source. No I/O.
pub fn parse_snapshot(source: RawSource) -> Result<LoadedSnapshot, IngestError> {
    let metadata = parse_metadata(&source);
    let dataset = load_tabular(&source)?;
    Ok(LoadedSnapshot {
        source,
        metadata,
        dataset,
    })
}

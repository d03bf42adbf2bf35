//! Screenlab Core: snapshot ingestion for stock-universe screens.
//!
//! This crate turns one exported screen file into typed data:
//! - Domain types (metadata, instruments, dataset, data-quality notes)
//! - Source selection (explicit path or newest matching export)
//! - Preamble parsing (title / date / notes)
//! - Tabular loading with placeholder-column removal and market-cap coercion

pub mod data;
pub mod domain;

pub use data::{IngestError, RawSource, SourceSelector, TabularError};
pub use domain::{DataQualityNote, Dataset, Instrument, Metadata, MetadataField};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: public types can cross thread boundaries.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Metadata>();
        require_sync::<Metadata>();
        require_send::<Instrument>();
        require_sync::<Instrument>();
        require_send::<Dataset>();
        require_sync::<Dataset>();
        require_send::<RawSource>();
        require_sync::<RawSource>();
        require_send::<IngestError>();
        require_sync::<IngestError>();
        require_send::<data::LatestSnapshot>();
        require_sync::<data::LatestSnapshot>();
    }

    /// Preamble and table are parsed independently from the same source.
    #[test]
    fn metadata_and_table_share_one_source() {
        let src = RawSource::from_text(
            "\u{feff}Mid Caps,,\n09/30/2024,,\n,,\nTicker,Name,MktCap,SectorCode\nA,Alpha,1,X\n",
        );
        let meta = data::parse_metadata(&src);
        let ds = data::load_tabular(&src).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Mid Caps"));
        assert_eq!(meta.notes, None);
        assert_eq!(ds.len(), 1);
    }
}

//! Domain types for a universe snapshot

pub mod dataset;
pub mod instrument;
pub mod metadata;

pub use dataset::{DataQualityNote, Dataset};
pub use instrument::Instrument;
pub use metadata::{Metadata, MetadataField};

pub const TICKER: &str = "Ticker";
pub const NAME: &str = "Name";
pub const MKT_CAP: &str = "MktCap";
pub const SECTOR_CODE: &str = "SectorCode";

/// Columns every tabular block must carry, in the order they are checked.
pub const REQUIRED_COLUMNS: [&str; 4] = [TICKER, NAME, MKT_CAP, SECTOR_CODE];

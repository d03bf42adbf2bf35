//! Snapshot ingestion: source selection, preamble metadata, tabular block

pub mod error;
pub mod metadata;
pub mod schema;
pub mod source;
pub mod tabular;

pub use error::{IngestError, TabularError};
pub use metadata::{first_token, parse_metadata, PREAMBLE_LINES};
pub use schema::{is_placeholder, ColumnPlan};
pub use source::{FixedPath, LatestSnapshot, RawSource, SourceSelector};
pub use tabular::{coerce_mkt_cap, load_tabular};

//! Preamble parsing: title, date and notes from the first three lines.

use crate::domain::{Metadata, MetadataField};

use super::source::RawSource;

/// Number of free-text lines above the tabular header.
pub const PREAMBLE_LINES: usize = 3;

/// First comma-delimited token that is non-empty after trimming.
///
/// Exporters pad preamble lines with empty cells (`"Title,,,"`), and the text
/// is not guaranteed to sit in the first cell.
pub fn first_token(line: &str) -> Option<String> {
    line.split(',')
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(String::from)
}

/// Extract [`Metadata`] from the preamble. Never fails; absent lines give
/// absent fields.
pub fn parse_metadata(source: &RawSource) -> Metadata {
    let field = |f: MetadataField| source.line(f.line_index()).and_then(first_token);
    Metadata {
        title: field(MetadataField::Title),
        date: field(MetadataField::Date),
        notes: field(MetadataField::Notes),
    }
}

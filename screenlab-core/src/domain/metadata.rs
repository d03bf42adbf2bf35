use serde::{Deserialize, Serialize};

/// Free-text header fields taken from the snapshot preamble.
///
/// Each field is `None` only when its preamble line is absent or holds no
/// non-empty comma-delimited token. Partial metadata is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metadata {
    pub title: Option<String>,
    pub date: Option<String>,
    pub notes: Option<String>,
}

/// Names one of the three preamble fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataField {
    Title,
    Date,
    Notes,
}

impl MetadataField {
    pub const ALL: [MetadataField; 3] = [Self::Title, Self::Date, Self::Notes];

    /// Zero-based preamble line this field is read from.
    pub fn line_index(self) -> usize {
        match self {
            Self::Title => 0,
            Self::Date => 1,
            Self::Notes => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Date => "date",
            Self::Notes => "notes",
        }
    }
}

impl Metadata {
    pub fn get(&self, field: MetadataField) -> Option<&str> {
        match field {
            MetadataField::Title => self.title.as_deref(),
            MetadataField::Date => self.date.as_deref(),
            MetadataField::Notes => self.notes.as_deref(),
        }
    }

    /// Field value, or `placeholder` when absent.
    pub fn get_or<'a>(&'a self, field: MetadataField, placeholder: &'a str) -> &'a str {
        self.get(field).unwrap_or(placeholder)
    }

    /// Fields that resolved to nothing.
    pub fn missing_fields(&self) -> Vec<MetadataField> {
        MetadataField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }
}

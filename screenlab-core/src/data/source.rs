//! Raw snapshot text and the selector trait that decides which file to read.
//!
//! Picking "the freshest export in a folder" is convention, not logic, so it
//! sits behind [`SourceSelector`]. Tests hand the pipeline a [`FixedPath`] or
//! build a [`RawSource`] straight from text.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::error::IngestError;

const BOM: char = '\u{feff}';

/// The lines of one snapshot file. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSource {
    path: Option<PathBuf>,
    lines: Vec<String>,
    fingerprint: String,
}

impl RawSource {
    /// Split decoded text into lines, dropping a leading byte-order marker.
    pub fn from_text(text: &str) -> Self {
        let text = text.strip_prefix(BOM).unwrap_or(text);
        Self {
            path: None,
            lines: text.lines().map(String::from).collect(),
            fingerprint: blake3::hash(text.as_bytes()).to_hex().to_string(),
        }
    }

    /// Read a snapshot from disk. The file is read in one call, so the handle
    /// is closed before any parsing starts.
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => IngestError::SourceNotFound {
                searched: path.display().to_string(),
            },
            _ => IngestError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        let text = String::from_utf8(bytes).map_err(|_| IngestError::Encoding {
            path: path.to_path_buf(),
        })?;
        let mut source = Self::from_text(&text);
        source.path = Some(path.to_path_buf());
        Ok(source)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|s| s.as_str())
    }

    /// BLAKE3 hex digest of the decoded text (BOM excluded).
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Everything after the first `skip` lines, rejoined with `\n`.
    pub fn body(&self, skip: usize) -> String {
        self.lines
            .iter()
            .skip(skip)
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Decides which snapshot file a run reads.
pub trait SourceSelector {
    fn select(&self) -> Result<PathBuf, IngestError>;

    /// Human-readable description for logs and errors.
    fn describe(&self) -> String;
}

/// An explicit file path.
#[derive(Debug, Clone)]
pub struct FixedPath(pub PathBuf);

impl SourceSelector for FixedPath {
    fn select(&self) -> Result<PathBuf, IngestError> {
        if self.0.is_file() {
            Ok(self.0.clone())
        } else {
            Err(IngestError::SourceNotFound {
                searched: self.describe(),
            })
        }
    }

    fn describe(&self) -> String {
        self.0.display().to_string()
    }
}

/// The most recently modified `{prefix}*.{extension}` file in a directory.
#[derive(Debug, Clone)]
pub struct LatestSnapshot {
    pub dir: PathBuf,
    pub prefix: String,
    pub extension: String,
}

impl LatestSnapshot {
    pub fn new(dir: impl Into<PathBuf>, prefix: &str, extension: &str) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.to_string(),
            extension: extension.to_string(),
        }
    }

    fn matches(&self, file_name: &str) -> bool {
        let suffix = format!(".{}", self.extension);
        file_name.starts_with(&self.prefix)
            && file_name.ends_with(&suffix)
            && file_name.len() >= self.prefix.len() + suffix.len()
    }
}

impl SourceSelector for LatestSnapshot {
    fn select(&self) -> Result<PathBuf, IngestError> {
        let not_found = || IngestError::SourceNotFound {
            searched: self.describe(),
        };
        let entries = fs::read_dir(&self.dir).map_err(|_| not_found())?;

        let mut best: Option<(SystemTime, String, PathBuf)> = None;
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if !self.matches(&name) {
                continue;
            }
            let meta = match entry.metadata() {
                Ok(m) if m.is_file() => m,
                _ => continue,
            };
            let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);

            // Newest wins; equal timestamps fall back to the later file name.
            let replace = match &best {
                None => true,
                Some((t, n, _)) => modified > *t || (modified == *t && name > *n),
            };
            if replace {
                best = Some((modified, name, entry.path()));
            }
        }

        match best {
            Some((_, name, path)) => {
                tracing::debug!(file = %name, dir = %self.dir.display(), "selected latest snapshot");
                Ok(path)
            }
            None => Err(not_found()),
        }
    }

    fn describe(&self) -> String {
        format!(
            "{}/{}*.{}",
            self.dir.display(),
            self.prefix,
            self.extension
        )
    }
}

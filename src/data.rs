//! Data structures for per-file observations.
//!
//! This module defines the values that flow from the scan workers into the
//! aggregator: the [`FileObservation`] produced for every regular file and
//! the [`ExtensionLabel`] it is grouped under.

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// Represents a regular file observed during scanning.
///
/// # Fields
/// * `path` - The full path to the file
/// * `size` - Size in bytes (apparent or allocated, see [`crate::cli::SizeMode`])
/// * `owner` - Resolved user name, or the numeric uid when it has no name
/// * `label` - Extension or content class the file is grouped under
#[derive(Debug, Clone)]
pub struct FileObservation {
    pub path: PathBuf,
    pub size: u64,
    pub owner: String,
    pub label: ExtensionLabel,
}

/// The key a file is grouped under in the by-extension view.
///
/// # Variants
/// * `Suffix` - The file name suffix including its leading dot, e.g. `.rs`
/// * `Binary` - No suffix; sampled content contains non-printable bytes
/// * `Text` - No suffix; sampled content is printable ASCII only
/// * `UnknownFormat` - No suffix and the content could not be sampled
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExtensionLabel {
    Suffix(String),
    Binary,
    Text,
    UnknownFormat,
}

impl ExtensionLabel {
    /// Returns the label as displayed in reports.
    ///
    /// # Returns
    /// * The suffix (`".txt"`) for `ExtensionLabel::Suffix`
    /// * `"binary"`, `"text"` or `"unknown format"` for the content classes
    pub fn as_str(&self) -> &str {
        match self {
            ExtensionLabel::Suffix(ext) => ext,
            ExtensionLabel::Binary => "binary",
            ExtensionLabel::Text => "text",
            ExtensionLabel::UnknownFormat => "unknown format",
        }
    }

    /// Extracts the suffix label from a path, if the file name has one.
    ///
    /// The suffix is everything from the last dot of the file name onwards.
    /// Names whose only dot is the leading one (`.bashrc`) and names ending
    /// in a dot have no suffix.
    pub fn from_path(path: &Path) -> Option<ExtensionLabel> {
        path.extension()
            .filter(|ext| !ext.is_empty())
            .map(|ext| ExtensionLabel::Suffix(format!(".{}", ext.to_string_lossy())))
    }
}

impl fmt::Display for ExtensionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ExtensionLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

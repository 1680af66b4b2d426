//! Types for the format catalog.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// A format token reported by the transcoder (e.g. "mkv", "avi").
///
/// Equality is an exact, case-sensitive string match.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatId(String);

impl FormatId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for FormatId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FormatId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The set of formats the transcoder reported at startup.
///
/// Read-only once built; share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatCatalog {
    formats: BTreeSet<FormatId>,
}

impl FormatCatalog {
    /// Number of formats in the catalog.
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// An empty catalog means no formats are available.
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    pub fn contains(&self, format: &str) -> bool {
        self.formats.contains(format)
    }

    /// Formats in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &FormatId> {
        self.formats.iter()
    }

    /// Whether the file's extension names a catalog format.
    ///
    /// The extension is lower-cased before the lookup; files without an
    /// extension never match.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }
}

impl FromIterator<FormatId> for FormatCatalog {
    fn from_iter<I: IntoIterator<Item = FormatId>>(iter: I) -> Self {
        Self {
            formats: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for FormatCatalog {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(FormatId::new).collect()
    }
}

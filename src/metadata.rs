//! Document information metadata.
//!
//! The document parser supplies the info dictionary strings; renderers emit
//! them under their Dublin Core names.

use serde::{Deserialize, Serialize};

/// Document information strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMetadata {
    /// Author
    pub author: Option<String>,
    /// Subject
    pub subject: Option<String>,
    /// Keywords
    pub keywords: Option<String>,
    /// Title
    pub title: Option<String>,
}

impl DocumentMetadata {
    /// Present fields as `(dublin core name, value)` pairs.
    ///
    /// Order is creator, subject, keywords, title. Empty strings are skipped.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("dc:creator", &self.author),
            ("dc:subject", &self.subject),
            ("dc:keywords", &self.keywords),
            ("dc:title", &self.title),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (name, v))
        })
        .collect()
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

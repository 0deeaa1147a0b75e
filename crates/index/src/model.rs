//! Records produced by the aggregation pass.
//!
//! ```text
//! VersionedDocument             one per versioned URL
//! CanonicalVersion {version, url}          → versions.json, _doc-versions
//! RootGroup {version: [RootVersion], label} → _versioned-roots
//! ```
use serde::{Deserialize, Serialize};

/// A document whose URL carries a version segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedDocument {
    pub url: String,
    pub path: String,
    pub root: String,
    pub version: f64,
    pub version_string: String,
    /// `root + suffix`: the same page across versions.
    pub canonical: String,
    pub root_label: Option<String>,
}

/// One version of a canonical page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalVersion {
    pub version: f64,
    pub url: String,
}

/// One version observed under a root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootVersion {
    pub version: f64,
    pub version_string: String,
}

/// Every version published under a root, newest first, with its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootGroup {
    #[serde(rename = "version")]
    pub versions: Vec<RootVersion>,
    pub label: Option<String>,
}

/// Counters for one aggregation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub documents_seen: usize,
    pub versioned_documents: usize,
    /// Documents skipped because their URL was already indexed.
    pub duplicate_urls: usize,
    pub canonical_groups: usize,
    pub roots: usize,
}

impl IndexStats {
    pub fn unversioned_documents(&self) -> usize {
        self.documents_seen
            .saturating_sub(self.versioned_documents)
            .saturating_sub(self.duplicate_urls)
    }
}

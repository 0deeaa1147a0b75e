use indexmap::IndexMap;
use serde_json::Value;
use site::{Document, keys};
use tracing::debug;

use crate::error::IndexError;
use crate::model::{CanonicalVersion, IndexStats, RootGroup, VersionedDocument};

/// Metadata stamped onto one versioned document.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Label of the document's root, when one is configured.
    pub compilation_name: Option<String>,
    /// The document's own version token.
    pub doc_version: String,
    /// Every version of the document's canonical page, newest first.
    pub doc_versions: Vec<CanonicalVersion>,
}

impl Annotation {
    /// Write the three well-known keys into `document`'s data.
    pub fn apply_to<D: Document + ?Sized>(self, document: &mut D) -> Result<(), IndexError> {
        let doc_versions = serde_json::to_value(&self.doc_versions)?;
        let data = document.data_mut();
        data.insert(
            keys::COMPILATION_NAME.to_string(),
            self.compilation_name.map_or(Value::Null, Value::String),
        );
        data.insert(keys::DOC_VERSION.to_string(), Value::String(self.doc_version));
        data.insert(keys::DOC_VERSIONS.to_string(), doc_versions);
        Ok(())
    }
}

/// Read-only result of one aggregation pass.
///
/// Built by [`Aggregator::finish`](crate::Aggregator::finish); there is no way
/// to add documents afterwards. Lookups are cheap and may run in any order.
#[derive(Debug, Clone)]
pub struct VersionIndex {
    documents: IndexMap<String, VersionedDocument>,
    canonical_versions: IndexMap<String, Vec<CanonicalVersion>>,
    root_versions: IndexMap<String, RootGroup>,
    stats: IndexStats,
}

impl VersionIndex {
    pub(crate) fn new(
        documents: IndexMap<String, VersionedDocument>,
        canonical_versions: IndexMap<String, Vec<CanonicalVersion>>,
        root_versions: IndexMap<String, RootGroup>,
        stats: IndexStats,
    ) -> Self {
        Self {
            documents,
            canonical_versions,
            root_versions,
            stats,
        }
    }

    /// The versioned record for `url`, if the URL carried a version.
    pub fn get(&self, url: &str) -> Option<&VersionedDocument> {
        self.documents.get(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.documents.contains_key(url)
    }

    pub fn documents(&self) -> impl Iterator<Item = &VersionedDocument> {
        self.documents.values()
    }

    /// canonical → versions, keys in first-encounter order.
    pub fn canonical_versions(&self) -> &IndexMap<String, Vec<CanonicalVersion>> {
        &self.canonical_versions
    }

    pub fn versions_for(&self, canonical: &str) -> Option<&[CanonicalVersion]> {
        self.canonical_versions.get(canonical).map(Vec::as_slice)
    }

    /// root → label and versions, keys in first-encounter order.
    pub fn root_versions(&self) -> &IndexMap<String, RootGroup> {
        &self.root_versions
    }

    pub fn root_group(&self, root: &str) -> Option<&RootGroup> {
        self.root_versions.get(root)
    }

    /// The root groups as a JSON object, ready to publish as site data.
    pub fn root_versions_value(&self) -> Result<Value, IndexError> {
        Ok(serde_json::to_value(&self.root_versions)?)
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    /// Metadata for `url`, or `None` for an unversioned document.
    pub fn annotation_for(&self, url: &str) -> Option<Annotation> {
        let document = self.documents.get(url)?;
        Some(Annotation {
            compilation_name: document.root_label.clone(),
            doc_version: document.version_string.clone(),
            doc_versions: self
                .canonical_versions
                .get(&document.canonical)
                .cloned()
                .unwrap_or_default(),
        })
    }

    /// Stamp version metadata onto `document`.
    ///
    /// Returns `Ok(false)` and leaves the document untouched when its URL is
    /// not versioned.
    pub fn annotate<D: Document + ?Sized>(&self, document: &mut D) -> Result<bool, IndexError> {
        let Some(annotation) = self.annotation_for(document.url()) else {
            debug!(url = document.url(), "annotate_skipped_unversioned");
            return Ok(false);
        };
        debug!(
            url = document.url(),
            doc_version = %annotation.doc_version,
            siblings = annotation.doc_versions.len(),
            "annotate_success"
        );
        annotation.apply_to(document)?;
        Ok(true)
    }
}

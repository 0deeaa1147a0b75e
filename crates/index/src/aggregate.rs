//! The single aggregation pass.
//!
//! An [`Aggregator`] is the only mutable stage of a run. It observes every
//! document once, collecting two value-deduplicated groupings:
//!
//! ```text
//! canonical → { (version, url) }               e.g. /docs/intro → {2.1 /docs/2.1/intro, ...}
//! root      → { (version, version_string) }    e.g. /docs/      → {2.1 "2.1", ...}
//! ```
//!
//! [`Aggregator::finish`] consumes it and sorts each group newest first,
//! producing the read-only [`VersionIndex`]. Nothing can be added after that.
//!
//! Groups are sets keyed on the full tuple, so observing the same document
//! twice cannot grow them. Equal numeric versions are ordered by URL
//! (canonical groups) or by version string (root groups).

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::time::Instant;

use canonical::VersionPattern;
use indexmap::{IndexMap, IndexSet};
use site::Document;
use tracing::{Level, debug, info};

use crate::index::VersionIndex;
use crate::labels::RootLabels;
use crate::model::{CanonicalVersion, IndexStats, RootGroup, RootVersion, VersionedDocument};

/// `f64` compared and hashed by bit pattern. Versions are parsed from
/// digit runs, so NaN and negative zero never occur.
#[derive(Debug, Clone, Copy)]
struct VersionKey(f64);

impl PartialEq for VersionKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for VersionKey {}

impl Hash for VersionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CanonicalEntry {
    version: VersionKey,
    url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RootEntry {
    version: VersionKey,
    version_string: String,
}

fn newest_first(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Collects versioned documents for one indexing run.
#[derive(Debug, Clone)]
pub struct Aggregator {
    pattern: VersionPattern,
    labels: RootLabels,
    documents: IndexMap<String, VersionedDocument>,
    canonical: IndexMap<String, IndexSet<CanonicalEntry>>,
    roots: IndexMap<String, IndexSet<RootEntry>>,
    documents_seen: usize,
    duplicate_urls: usize,
}

impl Aggregator {
    pub fn new(labels: RootLabels) -> Self {
        Self::with_pattern(VersionPattern::default(), labels)
    }

    pub fn with_pattern(pattern: VersionPattern, labels: RootLabels) -> Self {
        Self {
            pattern,
            labels,
            documents: IndexMap::new(),
            canonical: IndexMap::new(),
            roots: IndexMap::new(),
            documents_seen: 0,
            duplicate_urls: 0,
        }
    }

    /// Record one document. Returns `true` when it was indexed as versioned.
    ///
    /// Unversioned URLs are counted and otherwise ignored. A URL seen before
    /// keeps its first record.
    pub fn observe(&mut self, url: &str, path: &str) -> bool {
        self.documents_seen += 1;

        if self.documents.contains_key(url) {
            self.duplicate_urls += 1;
            debug!(url, "duplicate_url_ignored");
            return false;
        }

        let Some(parsed) = self.pattern.parse(url) else {
            debug!(url, "unversioned_document");
            return false;
        };

        let canonical = parsed.canonical();
        let version = VersionKey(parsed.version);

        self.canonical
            .entry(canonical.clone())
            .or_default()
            .insert(CanonicalEntry {
                version,
                url: url.to_string(),
            });
        self.roots
            .entry(parsed.root.clone())
            .or_default()
            .insert(RootEntry {
                version,
                version_string: parsed.version_string.clone(),
            });

        let root_label = self.labels.get(&parsed.root).map(str::to_string);
        self.documents.insert(
            url.to_string(),
            VersionedDocument {
                url: url.to_string(),
                path: path.to_string(),
                root: parsed.root,
                version: parsed.version,
                version_string: parsed.version_string,
                canonical,
                root_label,
            },
        );
        true
    }

    pub fn observe_document<D: Document + ?Sized>(&mut self, document: &D) -> bool {
        self.observe(document.url(), document.path())
    }

    /// Fold a shard aggregated elsewhere into this one.
    ///
    /// `other` is treated as having been observed after everything already
    /// here: keys it introduces are appended and its duplicate URLs lose.
    pub fn merge(&mut self, other: Aggregator) {
        self.documents_seen += other.documents_seen;
        self.duplicate_urls += other.duplicate_urls;

        for (url, document) in other.documents {
            if self.documents.contains_key(&url) {
                self.duplicate_urls += 1;
                continue;
            }
            self.documents.insert(url, document);
        }
        for (canonical, entries) in other.canonical {
            self.canonical.entry(canonical).or_default().extend(entries);
        }
        for (root, entries) in other.roots {
            self.roots.entry(root).or_default().extend(entries);
        }
    }

    /// Sort every group and freeze the result.
    pub fn finish(self) -> VersionIndex {
        let canonical_versions: IndexMap<String, Vec<CanonicalVersion>> = self
            .canonical
            .into_iter()
            .map(|(canonical, entries)| {
                let mut entries: Vec<CanonicalEntry> = entries.into_iter().collect();
                entries.sort_by(|a, b| {
                    newest_first(a.version.0, b.version.0).then_with(|| a.url.cmp(&b.url))
                });
                let versions = entries
                    .into_iter()
                    .map(|entry| CanonicalVersion {
                        version: entry.version.0,
                        url: entry.url,
                    })
                    .collect();
                (canonical, versions)
            })
            .collect();

        let labels = self.labels;
        let root_versions: IndexMap<String, RootGroup> = self
            .roots
            .into_iter()
            .map(|(root, entries)| {
                let mut entries: Vec<RootEntry> = entries.into_iter().collect();
                entries.sort_by(|a, b| {
                    newest_first(a.version.0, b.version.0)
                        .then_with(|| a.version_string.cmp(&b.version_string))
                });
                let group = RootGroup {
                    versions: entries
                        .into_iter()
                        .map(|entry| RootVersion {
                            version: entry.version.0,
                            version_string: entry.version_string,
                        })
                        .collect(),
                    label: labels.get(&root).map(str::to_string),
                };
                (root, group)
            })
            .collect();

        let stats = IndexStats {
            documents_seen: self.documents_seen,
            versioned_documents: self.documents.len(),
            duplicate_urls: self.duplicate_urls,
            canonical_groups: canonical_versions.len(),
            roots: root_versions.len(),
        };

        VersionIndex::new(self.documents, canonical_versions, root_versions, stats)
    }
}

/// Aggregate a whole document set in one call.
pub fn aggregate<'a, D, I>(documents: I, labels: RootLabels) -> VersionIndex
where
    D: Document + 'a,
    I: IntoIterator<Item = &'a D>,
{
    aggregate_with_pattern(documents, labels, VersionPattern::default())
}

pub fn aggregate_with_pattern<'a, D, I>(
    documents: I,
    labels: RootLabels,
    pattern: VersionPattern,
) -> VersionIndex
where
    D: Document + 'a,
    I: IntoIterator<Item = &'a D>,
{
    let start = Instant::now();
    let span = tracing::span!(Level::INFO, "index.aggregate");
    let _guard = span.enter();

    let mut aggregator = Aggregator::with_pattern(pattern, labels);
    for document in documents {
        aggregator.observe_document(document);
    }
    let index = aggregator.finish();

    let stats = index.stats();
    info!(
        documents_seen = stats.documents_seen,
        versioned_documents = stats.versioned_documents,
        canonical_groups = stats.canonical_groups,
        roots = stats.roots,
        elapsed_micros = start.elapsed().as_micros(),
        "aggregate_success"
    );
    index
}

/// Aggregate on the rayon pool. Output is identical to [`aggregate_with_pattern`].
#[cfg(feature = "parallel")]
pub fn aggregate_parallel<D>(
    documents: &[D],
    labels: RootLabels,
    pattern: VersionPattern,
) -> VersionIndex
where
    D: Document + Sync,
{
    use rayon::prelude::*;

    let start = Instant::now();
    let span = tracing::span!(Level::INFO, "index.aggregate", parallel = true);
    let _guard = span.enter();

    let seed = Aggregator::with_pattern(pattern, labels);
    let merged = documents
        .par_iter()
        .fold(
            || seed.clone(),
            |mut shard, document| {
                shard.observe_document(document);
                shard
            },
        )
        .reduce(
            || seed.clone(),
            |mut left, right| {
                left.merge(right);
                left
            },
        );
    let index = merged.finish();

    let stats = index.stats();
    info!(
        documents_seen = stats.documents_seen,
        versioned_documents = stats.versioned_documents,
        canonical_groups = stats.canonical_groups,
        roots = stats.roots,
        elapsed_micros = start.elapsed().as_micros(),
        "aggregate_success"
    );
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use site::SiteDocument;

    fn docs(urls: &[&str]) -> Vec<SiteDocument> {
        urls.iter()
            .map(|url| SiteDocument::new(*url, format!("src{url}.md")))
            .collect()
    }

    #[test]
    fn canonical_group_sorted_newest_first() {
        let documents = docs(&["/docs/1.0/intro", "/docs/2.1/intro", "/docs/2.0/intro"]);
        let index = aggregate(&documents, RootLabels::new());

        let versions = index.versions_for("/docs/intro").expect("group exists");
        let pairs: Vec<(f64, &str)> = versions
            .iter()
            .map(|v| (v.version, v.url.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (2.1, "/docs/2.1/intro"),
                (2.0, "/docs/2.0/intro"),
                (1.0, "/docs/1.0/intro"),
            ]
        );
    }

    #[test]
    fn root_group_carries_label_and_distinct_versions() {
        let documents = docs(&[
            "/docs/1.0/intro",
            "/docs/1.0/setup",
            "/docs/2.1/intro",
            "/docs/2.0/intro",
        ]);
        let labels: RootLabels = [("/docs/", "Documentation")].into_iter().collect();
        let index = aggregate(&documents, labels);

        let group = index.root_group("/docs/").expect("root exists");
        assert_eq!(group.label.as_deref(), Some("Documentation"));
        let strings: Vec<&str> = group
            .versions
            .iter()
            .map(|v| v.version_string.as_str())
            .collect();
        assert_eq!(strings, vec!["2.1", "2.0", "1.0"]);
    }

    #[test]
    fn unknown_root_has_no_label() {
        let documents = docs(&["/api/3.0/client"]);
        let index = aggregate(&documents, RootLabels::new());
        assert_eq!(index.root_group("/api/").unwrap().label, None);
        assert_eq!(index.get("/api/3.0/client").unwrap().root_label, None);
    }

    #[test]
    fn unversioned_documents_are_excluded() {
        let documents = docs(&["/about", "/docs/1.0/intro"]);
        let index = aggregate(&documents, RootLabels::new());

        assert!(index.get("/about").is_none());
        assert_eq!(index.canonical_versions().len(), 1);
        assert_eq!(index.root_versions().len(), 1);
        assert_eq!(index.stats().unversioned_documents(), 1);
    }

    #[test]
    fn repeated_observation_is_idempotent() {
        let mut aggregator = Aggregator::new(RootLabels::new());
        assert!(aggregator.observe("/docs/1.0/intro", "a.md"));
        assert!(!aggregator.observe("/docs/1.0/intro", "b.md"));
        let index = aggregator.finish();

        assert_eq!(index.versions_for("/docs/intro").unwrap().len(), 1);
        assert_eq!(index.get("/docs/1.0/intro").unwrap().path, "a.md");
        assert_eq!(index.stats().duplicate_urls, 1);
    }

    #[test]
    fn equal_numeric_versions_break_ties_by_url() {
        let documents = docs(&["/docs/2.1.0/intro", "/docs/2.1/intro"]);
        let index = aggregate(&documents, RootLabels::new());

        let urls: Vec<&str> = index
            .versions_for("/docs/intro")
            .unwrap()
            .iter()
            .map(|v| v.url.as_str())
            .collect();
        assert_eq!(urls, vec!["/docs/2.1.0/intro", "/docs/2.1/intro"]);

        // Same numeric value, different tokens: both stay listed under the root.
        let strings: Vec<&str> = index
            .root_group("/docs/")
            .unwrap()
            .versions
            .iter()
            .map(|v| v.version_string.as_str())
            .collect();
        assert_eq!(strings, vec!["2.1", "2.1.0"]);
    }

    #[test]
    fn canonical_keys_keep_first_encounter_order() {
        let documents = docs(&[
            "/docs/1.0/zeta",
            "/docs/1.0/alpha",
            "/docs/2.0/zeta",
            "/api/1.0/alpha",
        ]);
        let index = aggregate(&documents, RootLabels::new());
        let keys: Vec<&str> = index.canonical_versions().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["/docs/zeta", "/docs/alpha", "/api/alpha"]);
    }

    #[test]
    fn merge_matches_sequential_pass() {
        let documents = docs(&[
            "/docs/1.0/intro",
            "/docs/2.0/intro",
            "/docs/2.0/setup",
            "/about",
            "/docs/1.0/intro",
            "/docs/3.0/intro",
        ]);
        let sequential = aggregate(&documents, RootLabels::new());

        let (left, right) = documents.split_at(3);
        let mut first = Aggregator::new(RootLabels::new());
        left.iter().for_each(|d| {
            first.observe_document(d);
        });
        let mut second = Aggregator::new(RootLabels::new());
        right.iter().for_each(|d| {
            second.observe_document(d);
        });
        first.merge(second);
        let merged = first.finish();

        assert_eq!(merged.canonical_versions(), sequential.canonical_versions());
        assert_eq!(merged.root_versions(), sequential.root_versions());
        assert_eq!(merged.stats(), sequential.stats());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_sequential() {
        let urls: Vec<String> = (0..400)
            .map(|i| format!("/docs/{}.{}/page-{}", i % 7, i % 3, i % 11))
            .collect();
        let documents: Vec<SiteDocument> =
            urls.iter().map(|u| SiteDocument::new(u.clone(), "p.md")).collect();

        let sequential = aggregate(&documents, RootLabels::new());
        let parallel =
            aggregate_parallel(documents.as_slice(), RootLabels::new(), VersionPattern::default());

        assert_eq!(parallel.canonical_versions(), sequential.canonical_versions());
        assert_eq!(parallel.root_versions(), sequential.root_versions());
        assert_eq!(parallel.stats(), sequential.stats());
    }
}

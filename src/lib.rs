//! Workspace umbrella crate for docver.
//!
//! Wires the URL parser, the version index and the site model into the three
//! callbacks a host rendering pipeline makes during a build:
//!
//! 1. [`VersionIndexer::pre_render`]: once, before anything renders. Runs the
//!    aggregation pass over every document, publishes root navigation data
//!    and writes `versions.json`.
//! 2. [`VersionIndexer::post_convert`]: once per document, in any order, as
//!    each document's content is finalized. Lookup only.
//! 3. [`VersionIndexer::post_write`]: once, after all output is written.
//!    Ends the run and drops its state.
//!
//! Calling `post_convert` outside a run fails with
//! [`PipelineError::NotReady`]; the host is expected never to do so.

pub mod config;

pub use canonical::{
    CanonicalError, VersionPattern, VersionedUrl, numeric_version, parse_versioned_url,
};
pub use config::{ConfigLoadError, DocverConfig};
pub use index::{
    Aggregator, Annotation, CanonicalVersion, IndexError, IndexStats, RootGroup, RootLabels,
    RootVersion, SUMMARY_FILE_NAME, VersionIndex, VersionedDocument, aggregate, read_summary,
    summary_path,
};
pub use site::{Document, Site, SiteDocument, SiteError, keys};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;
use tracing::{Level, debug, info, warn};

/// Errors surfaced to the host pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigLoadError),

    #[error("version pattern error: {0}")]
    Pattern(#[from] CanonicalError),

    #[error("site data error: {0}")]
    Site(#[from] SiteError),

    #[error("version index error: {0}")]
    Index(#[from] IndexError),

    #[error("version index is not ready (state: {0})")]
    NotReady(IndexerState),

    #[error("version summary already written to {}", .0.display())]
    AlreadyEmitted(PathBuf),
}

/// Where the indexer is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexerState {
    /// No run started yet.
    Uninitialized,
    /// Aggregation finished; annotation allowed, summary not yet written.
    Ready,
    /// Summary written; annotation still allowed.
    Emitted,
    /// `post_write` ran; state discarded.
    Finished,
}

impl fmt::Display for IndexerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndexerState::Uninitialized => "uninitialized",
            IndexerState::Ready => "ready",
            IndexerState::Emitted => "emitted",
            IndexerState::Finished => "finished",
        };
        f.write_str(name)
    }
}

enum Run {
    Uninitialized,
    Ready {
        index: VersionIndex,
        summary: Option<PathBuf>,
    },
    Finished,
}

/// Lifecycle driver for one site build.
///
/// ```
/// use docver::{Document, DocverConfig, Site, SiteDocument, VersionIndexer};
///
/// let dir = tempfile::tempdir().unwrap();
/// let destination = dir.path().join("_site");
/// std::fs::create_dir(&destination).unwrap();
///
/// let mut site = Site::new(&destination).with_documents([
///     SiteDocument::new("/docs/1.0/intro", "1.0/intro.md"),
///     SiteDocument::new("/docs/2.0/intro", "2.0/intro.md"),
/// ]);
///
/// let mut indexer = VersionIndexer::new(DocverConfig::default()).unwrap();
/// indexer.pre_render(&mut site).unwrap();
/// for doc in site.documents_mut() {
///     indexer.post_convert(doc).unwrap();
/// }
/// indexer.post_write(&site);
///
/// assert_eq!(site.documents()[0].data()["_doc-version"], "1.0");
/// assert!(dir.path().join("versions.json").is_file());
/// ```
pub struct VersionIndexer {
    config: DocverConfig,
    pattern: VersionPattern,
    run: Run,
}

impl VersionIndexer {
    pub fn new(config: DocverConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        let pattern = VersionPattern::new(config.min_version_components)?;
        Ok(Self {
            config,
            pattern,
            run: Run::Uninitialized,
        })
    }

    pub fn config(&self) -> &DocverConfig {
        &self.config
    }

    pub fn state(&self) -> IndexerState {
        match &self.run {
            Run::Uninitialized => IndexerState::Uninitialized,
            Run::Ready { summary: None, .. } => IndexerState::Ready,
            Run::Ready {
                summary: Some(_), ..
            } => IndexerState::Emitted,
            Run::Finished => IndexerState::Finished,
        }
    }

    /// The index of the current run, if one is in progress.
    pub fn index(&self) -> Option<&VersionIndex> {
        match &self.run {
            Run::Ready { index, .. } => Some(index),
            _ => None,
        }
    }

    /// Path of the summary written in this run.
    pub fn summary(&self) -> Option<&Path> {
        match &self.run {
            Run::Ready {
                summary: Some(path),
                ..
            } => Some(path),
            _ => None,
        }
    }

    /// Start a run: aggregate every document of `site`.
    ///
    /// Publishes the root groups under [`keys::VERSIONED_ROOTS`] in the site
    /// data and, unless disabled in the configuration, writes the summary.
    /// Any state from an earlier run is discarded first. On error the
    /// indexer is left uninitialized and the site data carries no roots.
    pub fn pre_render(&mut self, site: &mut Site) -> Result<IndexStats, PipelineError> {
        let start = Instant::now();
        let span = tracing::span!(
            Level::INFO,
            "docver.pre_render",
            destination = %site.destination().display(),
            documents = site.documents().len()
        );
        let _guard = span.enter();

        self.run = Run::Uninitialized;
        site.data_mut().remove(keys::VERSIONED_ROOTS);

        let mut labels = self.config.root_labels.clone();
        if let Some(site_labels) = site.string_map(&self.config.labels_data_key)? {
            labels.merge_missing(site_labels);
        }

        let index = self.aggregate(site.documents(), labels);
        let roots = index.root_versions_value()?;

        // Nothing is published until the summary, if due now, is on disk.
        let summary = if self.config.emit_summary {
            Some(write_summary(&self.config, &index, site.destination())?)
        } else {
            None
        };

        site.data_mut().insert(keys::VERSIONED_ROOTS.to_string(), roots);
        let stats = index.stats();
        self.run = Run::Ready { index, summary };

        info!(
            versioned_documents = stats.versioned_documents,
            unversioned_documents = stats.unversioned_documents(),
            canonical_groups = stats.canonical_groups,
            roots = stats.roots,
            elapsed_micros = start.elapsed().as_micros(),
            "pre_render_success"
        );
        Ok(stats)
    }

    #[cfg(feature = "parallel")]
    fn aggregate(&self, documents: &[SiteDocument], labels: RootLabels) -> VersionIndex {
        if self.config.parallel {
            index::aggregate_parallel(documents, labels, self.pattern.clone())
        } else {
            index::aggregate_with_pattern(documents, labels, self.pattern.clone())
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn aggregate(&self, documents: &[SiteDocument], labels: RootLabels) -> VersionIndex {
        if self.config.parallel {
            debug!("parallel aggregation requested without the `parallel` feature");
        }
        index::aggregate_with_pattern(documents, labels, self.pattern.clone())
    }

    /// Write the summary for the current run. Allowed once per run.
    pub fn emit_summary(&mut self, destination: &Path) -> Result<PathBuf, PipelineError> {
        let state = self.state();
        let Run::Ready { index, summary } = &mut self.run else {
            return Err(PipelineError::NotReady(state));
        };
        if let Some(path) = summary {
            return Err(PipelineError::AlreadyEmitted(path.clone()));
        }

        let path = write_summary(&self.config, index, destination)?;
        *summary = Some(path.clone());
        Ok(path)
    }

    /// Stamp version metadata onto a document whose content is final.
    ///
    /// Returns `Ok(false)` for unversioned documents, which are left as they
    /// were.
    pub fn post_convert<D: Document + ?Sized>(
        &self,
        document: &mut D,
    ) -> Result<bool, PipelineError> {
        let Run::Ready { index, .. } = &self.run else {
            return Err(PipelineError::NotReady(self.state()));
        };
        Ok(index.annotate(document)?)
    }

    /// End the run. Nothing is persisted here; the summary was already
    /// written and the index is dropped.
    pub fn post_write(&mut self, site: &Site) {
        debug!(
            destination = %site.destination().display(),
            state = %self.state(),
            "post_write"
        );
        self.run = Run::Finished;
    }

    /// Drive a whole build over `site`: pre-render, annotate every document,
    /// post-write.
    pub fn index_site(&mut self, site: &mut Site) -> Result<IndexStats, PipelineError> {
        let stats = self.pre_render(site)?;
        if let Run::Ready { index, .. } = &self.run {
            for document in site.documents_mut() {
                index.annotate(document)?;
            }
        }
        self.post_write(site);
        Ok(stats)
    }
}

fn write_summary(
    config: &DocverConfig,
    index: &VersionIndex,
    destination: &Path,
) -> Result<PathBuf, PipelineError> {
    index
        .write_summary(destination, &config.summary_file_name)
        .map_err(|err| {
            warn!(error = %err, "emit_summary_failure");
            err.into()
        })
}

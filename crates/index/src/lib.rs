//! # Docver Index
//!
//! Groups versioned documents so every version of a page can link to its
//! siblings, and every versioned root can list the versions it publishes.
//!
//! ## Stages
//!
//! ```text
//! Aggregator (mutable, one pass)  ──finish()──▶  VersionIndex (read-only)
//!                                                 ├── annotate(doc)     any order, any number of times
//!                                                 ├── root_versions()   site-wide navigation data
//!                                                 └── write_summary()   versions.json, once per run
//! ```
//!
//! The split is enforced by the types: annotation and emission need a
//! [`VersionIndex`], and the only way to get one is to finish aggregating.
//!
//! ## Example
//!
//! ```
//! use index::{aggregate, RootLabels};
//! use site::{Document, SiteDocument};
//!
//! let mut documents = vec![
//!     SiteDocument::new("/docs/1.0/intro", "_docs/1.0/intro.md"),
//!     SiteDocument::new("/docs/2.0/intro", "_docs/2.0/intro.md"),
//!     SiteDocument::new("/about", "about.md"),
//! ];
//! let labels: RootLabels = [("/docs/", "Documentation")].into_iter().collect();
//! let index = aggregate(&documents, labels);
//!
//! let versions = index.versions_for("/docs/intro").unwrap();
//! assert_eq!(versions[0].url, "/docs/2.0/intro");
//!
//! assert!(index.annotate(&mut documents[0]).unwrap());
//! assert!(!index.annotate(&mut documents[2]).unwrap());
//! assert_eq!(documents[0].data()["_doc-version"], "1.0");
//! ```

mod aggregate;
mod error;
mod index;
mod labels;
mod model;
mod summary;

#[cfg(feature = "parallel")]
pub use crate::aggregate::aggregate_parallel;
pub use crate::aggregate::{Aggregator, aggregate, aggregate_with_pattern};
pub use crate::error::IndexError;
pub use crate::index::{Annotation, VersionIndex};
pub use crate::labels::RootLabels;
pub use crate::model::{CanonicalVersion, IndexStats, RootGroup, RootVersion, VersionedDocument};
pub use crate::summary::{SUMMARY_FILE_NAME, read_summary, render_summary, summary_path};

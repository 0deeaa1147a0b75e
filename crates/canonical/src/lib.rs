//! Docver canonical URL layer.
//!
//! Splits a document URL into the pieces the version index groups on:
//!
//! ```text
//! /docs/2.1/guide/install
//! └─────┘└─┘ └───────────┘
//!  root  version  suffix        canonical = root + suffix = /docs/guide/install
//! ```
//!
//! ## Rules
//!
//! - The version segment is one or more ASCII digit runs joined by `.`,
//!   preceded by `/` and followed by `/` or the end of the URL.
//! - `root` keeps its trailing `/`. The root is matched greedily, so when a
//!   URL carries several version-like segments the last one wins.
//! - A URL without a version segment is simply unversioned. That is not an
//!   error and yields `None`.
//!
//! ## Numeric ordering
//!
//! Versions sort on a single `f64` built from the leading `major.minor` of
//! the token (see [`numeric_version`]). `"2.1.0"` and `"2.1"` share the key
//! `2.1`. Published `versions.json` files are ordered by this key, so it is
//! kept even though it is lossy for three-part versions.
//!
//! Pure functions only: no I/O, no allocation beyond the returned strings.

mod error;
mod pattern;
mod version;

pub use crate::error::CanonicalError;
pub use crate::pattern::{VersionPattern, VersionedUrl, parse_versioned_url};
pub use crate::version::numeric_version;

//! The `versions.json` summary artifact.
//!
//! Written once per run, one directory above the site destination:
//!
//! ```json
//! {
//!   "/docs/intro": [
//!     { "version": 2.1, "url": "/docs/2.1/intro" },
//!     { "version": 2.0, "url": "/docs/2.0/intro" }
//!   ]
//! }
//! ```
//!
//! Keys keep first-encounter order; every array is newest first. External
//! consumers parse this file, so its shape is fixed.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use indexmap::IndexMap;
use tracing::{Level, info, warn};

use crate::error::IndexError;
use crate::index::VersionIndex;
use crate::model::CanonicalVersion;

pub const SUMMARY_FILE_NAME: &str = "versions.json";

/// `<destination>/../<file_name>`.
pub fn summary_path(destination: &Path, file_name: &str) -> PathBuf {
    destination.join("..").join(file_name)
}

/// Serialize a canonical mapping the way it is written to disk.
pub fn render_summary(
    canonical_versions: &IndexMap<String, Vec<CanonicalVersion>>,
) -> Result<String, IndexError> {
    let mut body = serde_json::to_string_pretty(canonical_versions)?;
    body.push('\n');
    Ok(body)
}

/// Load a summary written by [`VersionIndex::write_summary`].
pub fn read_summary(path: &Path) -> Result<IndexMap<String, Vec<CanonicalVersion>>, IndexError> {
    let body = fs::read_to_string(path).map_err(|source| IndexError::SummaryRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&body).map_err(|source| IndexError::Deserialize {
        path: path.to_path_buf(),
        source,
    })
}

impl VersionIndex {
    /// Write `versions.json` (or `file_name`) next to `destination`.
    ///
    /// The body goes to a sibling temp file first and is renamed into place,
    /// so readers never observe a half-written summary. Any I/O failure is
    /// returned; there is no retry.
    pub fn write_summary(&self, destination: &Path, file_name: &str) -> Result<PathBuf, IndexError> {
        let start = Instant::now();
        let path = summary_path(destination, file_name);
        let span = tracing::span!(
            Level::INFO,
            "index.write_summary",
            path = %path.display()
        );
        let _guard = span.enter();

        let body = render_summary(self.canonical_versions())?;
        let staging = path.with_extension("json.tmp");

        let written = fs::write(&staging, body.as_bytes()).and_then(|()| fs::rename(&staging, &path));
        if let Err(source) = written {
            // Best effort; the staging file may never have been created.
            let _ = fs::remove_file(&staging);
            warn!(error = %source, "write_summary_failure");
            return Err(IndexError::SummaryWrite { path, source });
        }

        info!(
            canonical_groups = self.canonical_versions().len(),
            bytes = body.len(),
            elapsed_micros = start.elapsed().as_micros(),
            "write_summary_success"
        );
        Ok(path)
    }
}

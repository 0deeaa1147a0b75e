use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the version index.
///
/// Unversioned URLs and unlabeled roots are never errors; the index turns
/// them into absent data. Only summary I/O and encoding can fail.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IndexError {
    #[error("failed to serialize version data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write version summary to {}: {source}", path.display())]
    SummaryWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read version summary from {}: {source}", path.display())]
    SummaryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse version summary at {}: {source}", path.display())]
    Deserialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

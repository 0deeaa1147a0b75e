use thiserror::Error;

/// Errors that can occur while building a version pattern.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid version pattern: {0}")]
    InvalidPattern(String),
}

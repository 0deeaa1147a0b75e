use thiserror::Error;

/// Errors raised while reading host-supplied site data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SiteError {
    #[error("invalid site data `{key}`: {reason}")]
    InvalidData { key: String, reason: String },
}

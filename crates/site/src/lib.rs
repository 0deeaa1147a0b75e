//! Docver site model.
//!
//! The version index never owns documents. A host rendering pipeline does:
//! it holds the document collection, the site-wide data map and the output
//! destination, and it calls into the index at fixed lifecycle points. This
//! crate is the contract between the two sides.
//!
//! ## What lives here
//!
//! - [`Document`]: the trait the index reads URLs from and writes metadata into
//! - [`SiteDocument`]: a plain, serializable document for hosts without their own type
//! - [`Site`]: documents + site data + destination directory
//! - [`keys`]: the well-known data keys templates read
//!
//! ## Example
//!
//! ```
//! use site::{Document, Site, SiteDocument};
//!
//! let mut site = Site::new("/srv/build/_site");
//! site.push_document(SiteDocument::new("/docs/1.0/intro", "_docs/1.0/intro.md"));
//! site.push_document(SiteDocument::new("/about", "about.md"));
//!
//! assert_eq!(site.documents().len(), 2);
//! assert_eq!(site.documents()[0].url(), "/docs/1.0/intro");
//! ```

mod document;
mod error;
pub mod keys;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::{Map, Value};

pub use crate::document::{Document, SiteDocument};
pub use crate::error::SiteError;

/// The host's view of a site being built.
#[derive(Debug, Clone, Default)]
pub struct Site {
    destination: PathBuf,
    documents: Vec<SiteDocument>,
    data: Map<String, Value>,
}

impl Site {
    /// Create an empty site writing its output into `destination`.
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            documents: Vec::new(),
            data: Map::new(),
        }
    }

    pub fn with_documents(mut self, documents: impl IntoIterator<Item = SiteDocument>) -> Self {
        self.documents.extend(documents);
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    pub fn push_document(&mut self, document: SiteDocument) {
        self.documents.push(document);
    }

    /// Output directory of the rendered site.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn documents(&self) -> &[SiteDocument] {
        &self.documents
    }

    pub fn documents_mut(&mut self) -> &mut [SiteDocument] {
        &mut self.documents
    }

    /// Site-wide data, shared by every template.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.data
    }

    /// Read a string→string table from site data.
    ///
    /// Returns `Ok(None)` when `key` is absent or `null`. Any other shape is
    /// rejected: a label table with a non-string value is a broken data file,
    /// not a missing one.
    pub fn string_map(&self, key: &str) -> Result<Option<IndexMap<String, String>>, SiteError> {
        let value = match self.data.get(key) {
            None | Some(Value::Null) => return Ok(None),
            Some(value) => value,
        };

        let Value::Object(entries) = value else {
            return Err(SiteError::InvalidData {
                key: key.to_string(),
                reason: format!("expected an object, found {}", value_kind(value)),
            });
        };

        let mut table = IndexMap::with_capacity(entries.len());
        for (name, entry) in entries {
            match entry {
                Value::String(text) => {
                    table.insert(name.clone(), text.clone());
                }
                other => {
                    return Err(SiteError::InvalidData {
                        key: key.to_string(),
                        reason: format!(
                            "entry `{name}` must be a string, found {}",
                            value_kind(other)
                        ),
                    });
                }
            }
        }
        Ok(Some(table))
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

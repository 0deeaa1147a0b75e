//! Document types shared between the host pipeline and the version index.
//!
//! ```text
//! SiteDocument
//! ├── url: String                  # unique key, e.g. /docs/1.2/guide
//! ├── path: String                 # source location, opaque to the index
//! └── data: Map<String, Value>     # front matter; the index writes here
//! ```
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A rendered document as seen by the version index.
///
/// Hosts with their own document type implement this trait instead of
/// converting into [`SiteDocument`]. The index only reads `url`/`path` and
/// only writes through `data_mut`.
pub trait Document {
    /// Output URL; unique within one site.
    fn url(&self) -> &str;

    /// Source location. Carried through, never interpreted.
    fn path(&self) -> &str;

    fn data(&self) -> &Map<String, Value>;

    fn data_mut(&mut self) -> &mut Map<String, Value>;
}

/// Plain document record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteDocument {
    pub url: String,
    pub path: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl SiteDocument {
    pub fn new(url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
            data: Map::new(),
        }
    }
}

impl Document for SiteDocument {
    fn url(&self) -> &str {
        &self.url
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    fn data_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.data
    }
}

impl<D: Document + ?Sized> Document for &mut D {
    fn url(&self) -> &str {
        (**self).url()
    }

    fn path(&self) -> &str {
        (**self).path()
    }

    fn data(&self) -> &Map<String, Value> {
        (**self).data()
    }

    fn data_mut(&mut self) -> &mut Map<String, Value> {
        (**self).data_mut()
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Display names for versioned roots, e.g. `"/docs/" → "Documentation"`.
///
/// Supplied by configuration; the index only looks roots up. A root with no
/// entry is not an error, its groups simply carry no label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RootLabels(IndexMap<String, String>);

impl RootLabels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, root: impl Into<String>, label: impl Into<String>) {
        self.0.insert(root.into(), label.into());
    }

    pub fn get(&self, root: &str) -> Option<&str> {
        self.0.get(root).map(String::as_str)
    }

    /// Add entries from `other` for roots not already labeled here.
    pub fn merge_missing(&mut self, other: impl IntoIterator<Item = (String, String)>) {
        for (root, label) in other {
            self.0.entry(root).or_insert(label);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<IndexMap<String, String>> for RootLabels {
    fn from(table: IndexMap<String, String>) -> Self {
        Self(table)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RootLabels {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(root, label)| (root.into(), label.into()))
                .collect(),
        )
    }
}

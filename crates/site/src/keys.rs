//! Well-known data keys.
//!
//! Templates look these up by name, so renaming any of them breaks every
//! layout that renders a version switcher.

/// Document data: display name of the compilation the document belongs to.
pub const COMPILATION_NAME: &str = "_compilation-name";

/// Document data: the document's own version token, e.g. `"2.1"`.
pub const DOC_VERSION: &str = "_doc-version";

/// Document data: every version of the document, newest first.
pub const DOC_VERSIONS: &str = "_doc-versions";

/// Site data: root → `{ version, label }` for root-level navigation.
pub const VERSIONED_ROOTS: &str = "_versioned-roots";

/// Site data: default location of the root → label table.
pub const ROOT_LABELS: &str = "versioned_root_labels";

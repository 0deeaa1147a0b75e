use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;
use crate::version::numeric_version;

/// A URL split around its version segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedUrl {
    /// Everything before the version segment, trailing `/` included.
    pub root: String,
    /// The version token exactly as it appears in the URL.
    pub version_string: String,
    /// Ordering key, see [`numeric_version`].
    pub version: f64,
    /// Everything after the version segment's trailing `/`. May be empty.
    pub suffix: String,
}

impl VersionedUrl {
    /// Version-less identity of the page: `root + suffix`.
    pub fn canonical(&self) -> String {
        let mut canonical = String::with_capacity(self.root.len() + self.suffix.len());
        canonical.push_str(&self.root);
        canonical.push_str(&self.suffix);
        canonical
    }
}

/// Compiled matcher for version segments.
///
/// The default accepts single-component versions (`/docs/2/intro`). Sites
/// whose unversioned URLs contain bare numbers (`/blog/2024/...`) can require
/// a dotted version with `VersionPattern::new(2)`.
#[derive(Debug, Clone)]
pub struct VersionPattern {
    min_components: usize,
    regex: Regex,
}

impl VersionPattern {
    /// Build a pattern whose version token has at least `min_components`
    /// dot-separated digit runs.
    pub fn new(min_components: usize) -> Result<Self, CanonicalError> {
        if min_components == 0 {
            return Err(CanonicalError::InvalidPattern(
                "a version needs at least one component".into(),
            ));
        }
        let source = format!(
            r"^(.*/)([0-9]+(?:\.[0-9]+){{{},}})(?:/(.*))?$",
            min_components - 1
        );
        let regex = Regex::new(&source)
            .map_err(|err| CanonicalError::InvalidPattern(err.to_string()))?;
        Ok(Self {
            min_components,
            regex,
        })
    }

    pub fn min_components(&self) -> usize {
        self.min_components
    }

    /// Split `url`, or `None` when it carries no version segment.
    ///
    /// A digit run too long to fit an `f64` is not a version: its key would
    /// be infinite and could not be written as a JSON number.
    pub fn parse(&self, url: &str) -> Option<VersionedUrl> {
        let captures = self.regex.captures(url)?;
        let root = captures.get(1)?.as_str();
        let version_string = captures.get(2)?.as_str();
        let suffix = captures.get(3).map_or("", |m| m.as_str());

        let version = numeric_version(version_string);
        if !version.is_finite() {
            return None;
        }

        Some(VersionedUrl {
            root: root.to_string(),
            version_string: version_string.to_string(),
            version,
            suffix: suffix.to_string(),
        })
    }
}

impl Default for VersionPattern {
    fn default() -> Self {
        default_pattern().clone()
    }
}

fn default_pattern() -> &'static VersionPattern {
    static PATTERN: OnceLock<VersionPattern> = OnceLock::new();
    PATTERN.get_or_init(|| VersionPattern::new(1).expect("single-component pattern compiles"))
}

/// Split `url` with the default single-component pattern.
pub fn parse_versioned_url(url: &str) -> Option<VersionedUrl> {
    default_pattern().parse(url)
}

use serde::Serialize;
use std::fmt;

/// Manifest path relative to the package's `META-INF` folder.
///
/// Always slash separated. A single leading `../` addresses a sibling of
/// `META-INF`; deeper escapes are representable but never resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ManifestPath(String);

/// How a manifest path leaves the `META-INF` folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape<'a> {
    /// The path stays under `META-INF`.
    Inside,
    /// `../rest`: `rest` is relative to the folder holding `META-INF`.
    OneLevel(&'a str),
    /// `../../...`: unsupported.
    TooDeep,
}

impl ManifestPath {
    pub const META_INF: &'static str = "META-INF";

    pub fn new(raw: &str) -> Self {
        let normalized = raw.replace('\\', "/");
        match normalized.strip_prefix("/META-INF/") {
            Some(rest) => Self(rest.to_string()),
            None => Self(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bare file name, the key of the manifest cache.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn escape(&self) -> Escape<'_> {
        match self.0.strip_prefix("../") {
            None => Escape::Inside,
            Some(rest) if rest.starts_with("../") => Escape::TooDeep,
            Some(rest) => Escape::OneLevel(rest),
        }
    }
}

impl From<&str> for ManifestPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for ManifestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

use crate::error::{Problem, ProblemResult};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use url::Url;

/// Addressable identifier of the place a manifest was loaded from.
///
/// Archive nesting is expressed the way class loaders address resources:
/// `jar:file:/plugins/a.zip!/lib/b.jar` is the entry, and
/// `jar:jar:file:/plugins/a.zip!/lib/b.jar!/META-INF/plugin.xml` is a file
/// inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SourceReference(String);

impl SourceReference {
    /// `file:` URL of a plain file on disk.
    pub fn for_file(path: &Path) -> ProblemResult<Self> {
        escaped_file_url(path).map(Self)
    }

    /// Root of a random-access archive on disk: `jar:<file-url>!/`.
    pub fn archive_root(archive: &Path) -> ProblemResult<Self> {
        let url = escaped_file_url(archive)?;
        Ok(Self(format!("jar:{url}!/")))
    }

    /// Root of an archive stored as `entry` inside the container rooted at `self`.
    pub fn nested_root(&self, entry: &str) -> Self {
        Self(format!("jar:{}{}!/", self.0, entry))
    }

    /// Reference to `entry` inside the container rooted at `self`.
    pub fn entry(&self, entry: &str) -> ProblemResult<Self> {
        let joined = format!("{}{}", self.0, entry);
        Url::parse(&joined).map_err(|e| Problem::checked(format!("Malformed URL {joined}"), e))?;
        Ok(Self(joined))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `!` separates archive levels, so it is escaped inside file names.
fn escaped_file_url(path: &Path) -> ProblemResult<String> {
    let absolute = std::path::absolute(path)
        .map_err(|e| Problem::checked(format!("Unable to resolve {}", path.display()), e))?;
    let url = Url::from_file_path(&absolute).map_err(|()| {
        Problem::checked(
            format!("Unable to build URL for {}", absolute.display()),
            "not an absolute file path",
        )
    })?;
    Ok(url.as_str().replace('!', "%21"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_and_nested_roots() {
        let dir = tempfile::tempdir().unwrap();
        let zip = dir.path().join("plugin.zip");

        let root = SourceReference::archive_root(&zip).unwrap();
        assert!(root.as_str().starts_with("jar:file:"));
        assert!(root.as_str().ends_with("plugin.zip!/"));

        let nested = root.nested_root("lib/core.jar");
        assert!(nested.as_str().starts_with("jar:jar:file:"));
        assert!(nested.as_str().ends_with("plugin.zip!/lib/core.jar!/"));

        let entry = nested.entry("META-INF/plugin.xml").unwrap();
        assert!(entry.as_str().ends_with("core.jar!/META-INF/plugin.xml"));
    }

    #[test]
    fn test_bang_in_file_name_is_escaped() {
        let dir = tempfile::tempdir().unwrap();
        let reference = SourceReference::for_file(&dir.path().join("odd!name.xml")).unwrap();
        assert!(reference.as_str().ends_with("odd%21name.xml"));
    }
}

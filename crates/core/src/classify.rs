//! Entry classification.
//!
//! A pure function from an entry path (inside any container) and the sought
//! manifest path to what the resolver should do with that entry. Rules are
//! tried in order; a manifest living under `lib/` is therefore still a
//! manifest and never mistaken for a library archive.

use once_cell::sync::Lazy;
use plugscope_api::{Escape, ManifestPath};
use regex::Regex;

/// `.xml` files under a `META-INF` folder. Group 1 is the path relative to it.
static XML_IN_META_INF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:.*/)?META-INF/((?:[^/]+/)*[^/]+\.xml)$").expect("valid META-INF pattern")
});

/// Archives inside a `lib` folder.
static LIB_ARCHIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:.*/)?lib/([^/]+\.(?:jar|zip))$").expect("valid lib archive pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryClass {
    /// `META-INF/<sought path>`.
    PrimaryTarget,
    /// Matches a `../`-escaped sought path.
    EscapedTarget,
    /// Another manifest; cached under its bare file name for later lookups.
    ForwardReference { file_name: String },
    /// A jar at the top level of the container.
    NestedArchive,
    /// A jar or zip under `lib/`.
    LibraryArchive,
    Irrelevant,
}

impl EntryClass {
    pub fn label(&self) -> &'static str {
        match self {
            EntryClass::PrimaryTarget => "primary-target",
            EntryClass::EscapedTarget => "escaped-target",
            EntryClass::ForwardReference { .. } => "forward-reference",
            EntryClass::NestedArchive => "nested-archive",
            EntryClass::LibraryArchive => "library-archive",
            EntryClass::Irrelevant => "irrelevant",
        }
    }
}

pub fn classify(entry_path: &str, sought: &ManifestPath) -> EntryClass {
    if let Some(captures) = XML_IN_META_INF.captures(entry_path) {
        let relative = &captures[1];
        if relative == sought.as_str() {
            return EntryClass::PrimaryTarget;
        }
        let file_name = relative.rsplit('/').next().unwrap_or(relative);
        return EntryClass::ForwardReference {
            file_name: file_name.to_string(),
        };
    }

    match sought.escape() {
        Escape::TooDeep => return EntryClass::Irrelevant,
        Escape::OneLevel(rest) => {
            if entry_path.ends_with(rest) {
                return EntryClass::EscapedTarget;
            }
        }
        Escape::Inside => {}
    }

    if !entry_path.contains('/') && entry_path.ends_with(".jar") {
        return EntryClass::NestedArchive;
    }

    if LIB_ARCHIVE.is_match(entry_path) {
        return EntryClass::LibraryArchive;
    }

    EntryClass::Irrelevant
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plugin_xml() -> ManifestPath {
        ManifestPath::new("plugin.xml")
    }

    #[test]
    fn test_primary_target_at_any_prefix() {
        assert_eq!(
            classify("META-INF/plugin.xml", &plugin_xml()),
            EntryClass::PrimaryTarget
        );
        assert_eq!(
            classify("Sample/META-INF/plugin.xml", &plugin_xml()),
            EntryClass::PrimaryTarget
        );
    }

    #[test]
    fn test_other_manifests_are_forward_references() {
        assert_eq!(
            classify("META-INF/sub/optional.xml", &plugin_xml()),
            EntryClass::ForwardReference {
                file_name: "optional.xml".to_string()
            }
        );
    }

    #[test]
    fn test_nested_path_target() {
        let sought = ManifestPath::new("sub/optional.xml");
        assert_eq!(
            classify("META-INF/sub/optional.xml", &sought),
            EntryClass::PrimaryTarget
        );
    }

    #[test]
    fn test_non_xml_under_meta_inf_is_not_a_manifest() {
        assert_eq!(
            classify("META-INF/MANIFEST.MF", &plugin_xml()),
            EntryClass::Irrelevant
        );
        assert_eq!(
            classify("META-INF/pluginIcon.svg", &plugin_xml()),
            EntryClass::Irrelevant
        );
    }

    #[test]
    fn test_escaped_target() {
        let sought = ManifestPath::new("../sibling/opt.xml");
        assert_eq!(
            classify("sibling/opt.xml", &sought),
            EntryClass::EscapedTarget
        );
        assert_eq!(
            classify("root/sibling/opt.xml", &sought),
            EntryClass::EscapedTarget
        );
        // Plain suffix match, no segment boundary.
        assert_eq!(
            classify("othersibling/opt.xml", &sought),
            EntryClass::EscapedTarget
        );
        assert_eq!(classify("sibling/opt.xml.bak", &sought), EntryClass::Irrelevant);
    }

    #[test]
    fn test_double_escape_is_irrelevant() {
        let sought = ManifestPath::new("../../x.xml");
        assert_eq!(classify("x.xml", &sought), EntryClass::Irrelevant);
        assert_eq!(classify("core.jar", &sought), EntryClass::Irrelevant);
    }

    #[test]
    fn test_archives() {
        assert_eq!(
            classify("core.jar", &plugin_xml()),
            EntryClass::NestedArchive
        );
        assert_eq!(
            classify("Sample/lib/core.jar", &plugin_xml()),
            EntryClass::LibraryArchive
        );
        assert_eq!(
            classify("lib/resources.zip", &plugin_xml()),
            EntryClass::LibraryArchive
        );
        assert_eq!(
            classify("Sample/core.jar", &plugin_xml()),
            EntryClass::Irrelevant
        );
        assert_eq!(
            classify("lib/readme.txt", &plugin_xml()),
            EntryClass::Irrelevant
        );
    }

    #[test]
    fn test_manifest_under_lib_is_still_a_manifest() {
        assert_eq!(
            classify("lib/META-INF/plugin.xml", &plugin_xml()),
            EntryClass::PrimaryTarget
        );
    }
}

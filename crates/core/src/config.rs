use crate::error::{PlugscopeError, Result};
use plugscope_api::{LeniencyPolicy, ManifestPath};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_MANIFEST_NAME: &str = "plugin.xml";

/// Resolver settings. Every field has a default, so a partial JSON file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// Manifest looked up by `create_plugin`, relative to `META-INF`.
    pub manifest_name: String,
    /// When off, missing manifest elements are only warnings.
    pub validate_descriptor: bool,
    /// Make a duplicate root manifest found through a top-level nested jar
    /// fatal instead of a warning.
    pub strict_nested_duplicates: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
            validate_descriptor: true,
            strict_nested_duplicates: false,
        }
    }
}

impl ResolverOptions {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let options: Self = serde_json::from_str(&text)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        let manifest = ManifestPath::new(&self.manifest_name);
        if manifest.as_str().is_empty() || !manifest.as_str().ends_with(".xml") {
            return Err(PlugscopeError::InvalidOptions(format!(
                "manifest_name must name an .xml file, got `{}`",
                self.manifest_name
            )));
        }
        Ok(())
    }

    /// Policy of a top-level `create_plugin` call.
    pub fn top_level_policy(&self) -> LeniencyPolicy {
        if self.validate_descriptor {
            LeniencyPolicy::STRICT
        } else {
            LeniencyPolicy::STRICT.ignoring_missing_config_element()
        }
    }
}

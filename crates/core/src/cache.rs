//! Manifests seen while scanning for something else.
//!
//! Keyed by bare file name. Lives for one top-level resolution so optional
//! manifests found before (or beside) the primary one resolve without a
//! second scan.

use plugscope_api::{RawDocument, SourceReference};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CachedManifest {
    pub source: SourceReference,
    pub document: Arc<RawDocument>,
}

#[derive(Debug, Default)]
pub struct ManifestCache {
    entries: HashMap<String, CachedManifest>,
}

impl ManifestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A later manifest with the same file name replaces the earlier one.
    pub fn insert(
        &mut self,
        file_name: impl Into<String>,
        source: SourceReference,
        document: RawDocument,
    ) {
        self.entries.insert(
            file_name.into(),
            CachedManifest {
                source,
                document: Arc::new(document),
            },
        );
    }

    pub fn get(&self, file_name: &str) -> Option<&CachedManifest> {
        self.entries.get(file_name)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

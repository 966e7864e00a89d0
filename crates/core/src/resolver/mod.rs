//! Plugin descriptor resolution.
//!
//! The resolver locates `META-INF/<manifest>` inside a plugin package and
//! assembles the descriptor:
//! 1. Dispatch on the package kind (directory or archive)
//! 2. Scan containers, classifying every entry and caching other manifests
//! 3. Arbitrate between root and `lib/` candidates
//! 4. Resolve the optional manifests the descriptor declares

mod archive;
mod assembly;
mod context;
mod directory;
mod optional;

pub use context::ResolutionContext;

use crate::classify::{EntryClass, classify};
use crate::config::ResolverOptions;
use crate::container::{ArchiveContainer, Container, DirectoryContainer};
use plugscope_api::{
    DescriptorReader, LeniencyPolicy, ManifestPath, PackageLocation, PluginCreation,
    PluginCreationFail, PluginDescriptor, Problem, ProblemResult,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// An entry of a package together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEntry {
    pub path: String,
    pub class: EntryClass,
}

pub struct PluginResolver {
    reader: Arc<dyn DescriptorReader>,
    options: ResolverOptions,
}

impl PluginResolver {
    pub fn new(reader: Arc<dyn DescriptorReader>) -> Self {
        Self {
            reader,
            options: ResolverOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolves the configured manifest of the package at `path`.
    pub fn create_plugin(&self, path: &Path) -> Result<PluginCreation, PluginCreationFail> {
        let location = PackageLocation::detect(path).map_err(|problem| PluginCreationFail {
            location: path.to_path_buf(),
            problem,
            warnings: Vec::new(),
        })?;
        self.resolve(
            &location,
            &self.options.manifest_name,
            self.options.top_level_policy(),
        )
    }

    /// Resolves `manifest_path` (relative to `META-INF`) inside `location`.
    ///
    /// Every call gets its own manifest cache; nothing is shared between calls.
    pub fn resolve(
        &self,
        location: &PackageLocation,
        manifest_path: &str,
        policy: LeniencyPolicy,
    ) -> Result<PluginCreation, PluginCreationFail> {
        let path = ManifestPath::new(manifest_path);
        info!(
            "Resolving META-INF/{} in {}",
            path,
            location.path().display()
        );

        let mut ctx = ResolutionContext::new(location.path().to_path_buf());
        ctx.enter(&path);
        let outcome = self.load_descriptor(&mut ctx, location, &path, policy);
        debug!("{} manifest(s) cached during resolution", ctx.cache().len());
        let warnings = ctx.into_warnings();

        let problem = match outcome {
            Ok(Some(descriptor)) => {
                debug!(
                    "Resolved {} with {} warning(s)",
                    descriptor.source,
                    warnings.len()
                );
                return Ok(PluginCreation {
                    descriptor,
                    warnings,
                });
            }
            Ok(None) => Problem::missing_file(format!("META-INF/{path} is not found")),
            Err(problem) => problem,
        };

        Err(PluginCreationFail {
            location: location.path().to_path_buf(),
            problem,
            warnings,
        })
    }

    /// Lists the entries of the package at `path` with their classification
    /// against `manifest_path`.
    pub fn classify_entries(
        &self,
        path: &Path,
        manifest_path: &str,
    ) -> ProblemResult<Vec<ClassifiedEntry>> {
        let sought = ManifestPath::new(manifest_path);
        let location = PackageLocation::detect(path)?;
        let mut container: Box<dyn Container> = match &location {
            PackageLocation::Directory(dir) => Box::new(DirectoryContainer::new(dir.clone())),
            PackageLocation::Archive(file) => Box::new(
                ArchiveContainer::open_file(file).map_err(|e| {
                    Problem::checked(format!("Unable to read plugin file {}", file.display()), e)
                })?,
            ),
        };

        let mut entries = Vec::new();
        container
            .for_each_entry(&mut |entry| {
                entries.push(ClassifiedEntry {
                    path: entry.path().to_string(),
                    class: classify(entry.path(), &sought),
                });
                Ok(())
            })
            .map_err(|e| e.into_problem(|| format!("Unable to read {}", container.name())))?;
        Ok(entries)
    }

    fn load_descriptor(
        &self,
        ctx: &mut ResolutionContext,
        location: &PackageLocation,
        path: &ManifestPath,
        policy: LeniencyPolicy,
    ) -> ProblemResult<Option<PluginDescriptor>> {
        let descriptor = match location {
            PackageLocation::Directory(dir) => self.from_directory(ctx, dir, path, policy)?,
            PackageLocation::Archive(file) => self.from_archive_file(ctx, file, path, policy)?,
        };

        let Some(mut descriptor) = descriptor else {
            return Ok(None);
        };
        self.resolve_optional_descriptors(ctx, location, path, &mut descriptor, policy);
        Ok(Some(descriptor))
    }
}

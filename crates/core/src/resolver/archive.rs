use super::assembly::backfill_assets;
use super::{PluginResolver, ResolutionContext};
use crate::classify::{EntryClass, classify};
use crate::container::{ArchiveContainer, Container, Entry};
use crate::error::BoxError;
use plugscope_api::{
    LeniencyPolicy, ManifestPath, PluginDescriptor, Problem, ProblemResult, RawDocument,
    SourceReference,
};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanDepth {
    /// The package archive itself: nested and library archives are followed.
    Outer,
    /// An archive inside the package archive: only manifests count.
    Nested,
}

#[derive(Default)]
struct Candidates {
    root: Option<PluginDescriptor>,
    library: Option<PluginDescriptor>,
}

impl PluginResolver {
    pub(super) fn from_archive_file(
        &self,
        ctx: &mut ResolutionContext,
        file: &Path,
        path: &ManifestPath,
        policy: LeniencyPolicy,
    ) -> ProblemResult<Option<PluginDescriptor>> {
        let unreadable = || format!("Unable to read plugin file {}", file.display());

        let root = SourceReference::archive_root(file)?;
        let mut container =
            ArchiveContainer::open_file(file).map_err(|e| Problem::checked(unreadable(), e))?;
        let found =
            self.scan_archive(ctx, &mut container, &root, path, policy, ScanDepth::Outer)?;
        drop(container);

        // The root descriptor wins over one found in lib/, but some plugins
        // keep their logo only in the lib descriptor.
        match (found.root, found.library) {
            (Some(mut root), Some(library)) => {
                backfill_assets(&mut root, &library);
                Ok(Some(root))
            }
            (Some(root), None) => Ok(Some(root)),
            (None, Some(library)) => Ok(Some(library)),
            (None, None) => {
                ctx.report(
                    policy,
                    Problem::missing_file(format!("META-INF/{path} is not found")),
                )?;
                Ok(None)
            }
        }
    }

    /// Scans an archive stored inside the package archive. Only manifests
    /// count at this depth.
    fn from_nested(
        &self,
        ctx: &mut ResolutionContext,
        bytes: Vec<u8>,
        root: SourceReference,
        path: &ManifestPath,
        policy: LeniencyPolicy,
    ) -> ProblemResult<Option<PluginDescriptor>> {
        let mut container = ArchiveContainer::new(root.to_string(), Cursor::new(bytes))
            .map_err(|e| Problem::checked(format!("Unable to read {root}"), e))?;
        let found =
            self.scan_archive(ctx, &mut container, &root, path, policy, ScanDepth::Nested)?;

        if found.root.is_none() {
            ctx.report(
                policy,
                Problem::missing_file(format!("META-INF/{path} is not found in {root}")),
            )?;
        }
        Ok(found.root)
    }

    /// Single pass over the entries: each one is classified and acted on while
    /// it is the current entry.
    fn scan_archive(
        &self,
        ctx: &mut ResolutionContext,
        container: &mut dyn Container,
        root: &SourceReference,
        path: &ManifestPath,
        policy: LeniencyPolicy,
        depth: ScanDepth,
    ) -> ProblemResult<Candidates> {
        debug!("Scanning {} for META-INF/{}", container.name(), path);
        let mut found = Candidates::default();
        let strict_nested = self.options.strict_nested_duplicates;

        let scanned = container.for_each_entry(&mut |entry| {
            match classify(entry.path(), path) {
                EntryClass::PrimaryTarget | EntryClass::EscapedTarget => {
                    if found.root.is_some() {
                        return ctx.report(
                            policy,
                            Problem::incorrect_structure(format!(
                                "Multiple META-INF/{path} found in {root}"
                            )),
                        );
                    }
                    let document = read_document(entry).map_err(|e| {
                        Problem::checked(format!("Unable to read META-INF/{path}"), e)
                    })?;
                    let source = root.entry(entry.path())?;
                    found.root = Some(self.assemble(ctx, &document, source, policy)?);
                }
                EntryClass::ForwardReference { file_name } => match read_document(entry) {
                    Ok(document) => {
                        let source = root.entry(entry.path())?;
                        ctx.cache_mut().insert(file_name, source, document);
                    }
                    Err(e) => debug!("Unable to read an entry `{}` because {}", entry.path(), e),
                },
                EntryClass::NestedArchive if depth == ScanDepth::Outer => {
                    let nested_root = root.nested_root(entry.path());
                    let Some(descriptor) =
                        self.scan_nested(ctx, entry, nested_root, path, policy)?
                    else {
                        return Ok(());
                    };
                    if found.root.is_none() {
                        found.root = Some(descriptor);
                        return Ok(());
                    }
                    let problem = Problem::incorrect_structure(format!(
                        "Multiple META-INF/{path} found in the root of the plugin"
                    ));
                    if strict_nested {
                        return Err(problem);
                    }
                    // Tolerated: the first candidate is kept.
                    warn!("Ignoring {} from {}", descriptor.source, entry.path());
                    ctx.warn(problem);
                }
                EntryClass::LibraryArchive if depth == ScanDepth::Outer => {
                    let nested_root = root.nested_root(entry.path());
                    if let Some(descriptor) =
                        self.scan_nested(ctx, entry, nested_root, path, policy)?
                    {
                        // The last library candidate wins.
                        found.library = Some(descriptor);
                    }
                }
                _ => {}
            }
            Ok(())
        });

        scanned.map_err(|e| e.into_problem(|| format!("Unable to read {}", root)))?;
        Ok(found)
    }

    fn scan_nested(
        &self,
        ctx: &mut ResolutionContext,
        entry: &mut Entry<'_>,
        nested_root: SourceReference,
        path: &ManifestPath,
        policy: LeniencyPolicy,
    ) -> ProblemResult<Option<PluginDescriptor>> {
        // Jars written by streaming writers keep entry sizes in data
        // descriptors, so the nested archive is buffered and read with its
        // central directory.
        let bytes = entry
            .read_all()
            .map_err(|e| Problem::checked(format!("Unable to read {nested_root}"), e))?;
        self.from_nested(ctx, bytes, nested_root, path, policy.ignoring_missing_file())
    }
}

fn read_document(entry: &mut Entry<'_>) -> Result<RawDocument, BoxError> {
    let bytes = entry.read_all()?;
    Ok(RawDocument::parse(&bytes)?)
}

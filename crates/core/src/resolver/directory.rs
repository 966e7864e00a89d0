use super::{PluginResolver, ResolutionContext};
use crate::container::{Container, DirectoryContainer};
use crate::error::BoxError;
use plugscope_api::{
    Escape, LeniencyPolicy, ManifestPath, PluginDescriptor, Problem, ProblemResult, RawDocument,
    SourceReference, is_jar_or_zip,
};
use std::path::{Path, PathBuf};
use tracing::debug;

impl PluginResolver {
    /// `<dir>/META-INF/<path>`, falling back to the archives and directories in `<dir>/lib`.
    pub(super) fn from_directory(
        &self,
        ctx: &mut ResolutionContext,
        dir: &Path,
        path: &ManifestPath,
        policy: LeniencyPolicy,
    ) -> ProblemResult<Option<PluginDescriptor>> {
        // Entry path relative to `dir`; a `../` path leaves META-INF.
        let entry = match path.escape() {
            Escape::Inside => format!("{}/{}", ManifestPath::META_INF, path),
            Escape::OneLevel(rest) => rest.to_string(),
            Escape::TooDeep => {
                let problem = Problem::missing_file(format!("META-INF/{path} is not found"));
                ctx.report(policy, problem)?;
                return Ok(None);
            }
        };

        let meta_inf = dir.join(ManifestPath::META_INF);
        let descriptor_file = dir.join(&entry);
        if !descriptor_file.is_file() {
            return self.from_lib_directory(ctx, dir, path, policy);
        }

        // Cache every manifest first so sibling optional manifests resolve
        // regardless of file system order.
        self.prescan_manifests(ctx, &meta_inf, path, policy)?;

        let mut container = DirectoryContainer::new(dir.to_path_buf());
        let bytes = container
            .open(&entry)
            .map_err(|e| Problem::checked(format!("Unable to read {entry}"), e))?
            .ok_or_else(|| Problem::missing_file(format!("{entry} is not found")))?;
        let document = RawDocument::parse(&bytes).map_err(|e| {
            Problem::checked(
                format!(
                    "File {} contains invalid plugin descriptor {}",
                    dir.display(),
                    path
                ),
                e,
            )
        })?;

        let source = SourceReference::for_file(&descriptor_file)?;
        self.assemble(ctx, &document, source, policy).map(Some)
    }

    fn prescan_manifests(
        &self,
        ctx: &mut ResolutionContext,
        meta_inf: &Path,
        sought: &ManifestPath,
        policy: LeniencyPolicy,
    ) -> ProblemResult<()> {
        let mut container = DirectoryContainer::new(meta_inf.to_path_buf());
        container
            .for_each_entry(&mut |entry| {
                if !entry.path().ends_with(".xml") {
                    return Ok(());
                }
                let relative = entry.path().to_string();
                let file_name = relative.rsplit('/').next().unwrap_or(&relative).to_string();

                let parsed: Result<RawDocument, BoxError> = entry
                    .read_all()
                    .map_err(BoxError::from)
                    .and_then(|bytes| RawDocument::parse(&bytes).map_err(BoxError::from));

                match parsed {
                    Ok(document) => {
                        let source = SourceReference::for_file(&meta_inf.join(&relative))?;
                        ctx.cache_mut().insert(file_name, source, document);
                    }
                    // Only the manifest being loaded matters; others may be
                    // unrelated or broken optional manifests.
                    Err(cause) if relative == sought.as_str() => {
                        ctx.report(
                            policy,
                            Problem::checked(
                                format!("Unable to read .xml file META-INF/{sought}"),
                                cause,
                            ),
                        )?;
                    }
                    Err(cause) => debug!("Skipping META-INF/{}: {}", relative, cause),
                }
                Ok(())
            })
            .map_err(|e| e.into_problem(|| format!("Unable to scan {}", meta_inf.display())))
    }

    fn from_lib_directory(
        &self,
        ctx: &mut ResolutionContext,
        dir: &Path,
        path: &ManifestPath,
        policy: LeniencyPolicy,
    ) -> ProblemResult<Option<PluginDescriptor>> {
        let lib = dir.join("lib");
        if !lib.is_dir() {
            ctx.report(
                policy,
                Problem::missing_file(format!(
                    "Plugin `lib` directory is not found in {}",
                    dir.display()
                )),
            )?;
            return Ok(None);
        }

        let mut files = std::fs::read_dir(&lib)
            .and_then(|entries| {
                entries
                    .map(|entry| entry.map(|e| e.path()))
                    .collect::<std::io::Result<Vec<_>>>()
            })
            .map_err(|e| Problem::checked(format!("Unable to list {}", lib.display()), e))?;

        if files.is_empty() {
            ctx.report(
                policy,
                Problem::incorrect_structure(format!(
                    "Plugin `lib` directory is empty in {}",
                    dir.display()
                )),
            )?;
            return Ok(None);
        }

        let package_name = file_name(dir);
        order_lib_entries(&mut files, &package_name);

        let relaxed = policy.ignoring_missing_file();
        let mut descriptor = None;

        for file in &files {
            if is_jar_or_zip(file) {
                if let Some(found) = self.from_archive_file(ctx, file, path, relaxed)? {
                    debug!("Found META-INF/{} in {}", path, file.display());
                    descriptor = Some(found);
                    break;
                }
            } else if file.is_dir() {
                if let Some(found) = self.from_directory(ctx, file, path, relaxed)? {
                    if descriptor.is_some() {
                        ctx.report(
                            policy,
                            Problem::incorrect_structure(format!(
                                "Multiple META-INF/{path} found in {}",
                                lib.display()
                            )),
                        )?;
                        return Ok(None);
                    }
                    descriptor = Some(found);
                }
            }
        }

        if descriptor.is_none() {
            ctx.report(
                policy,
                Problem::missing_file(format!("Unable to find valid META-INF/{path}")),
            )?;
        }
        Ok(descriptor)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `resources*` entries first, entries named after the package last, the rest
/// in between. Names break ties so traversal order does not depend on the
/// file system.
fn order_lib_entries(entries: &mut [PathBuf], package_name: &str) {
    entries.sort_by_key(|p| file_name(p));
    entries.sort_by_key(|p| {
        let name = file_name(p);
        if !package_name.is_empty() && name.starts_with(package_name) {
            2
        } else if name.starts_with("resources") {
            0
        } else {
            1
        }
    });
}

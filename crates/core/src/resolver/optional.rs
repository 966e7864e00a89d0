use super::{PluginResolver, ResolutionContext};
use plugscope_api::{
    LeniencyPolicy, ManifestPath, PackageLocation, PluginDescriptor, Problem, ProblemResult,
};
use tracing::{debug, warn};

impl PluginResolver {
    /// Fills `descriptor.optional_descriptors`. Nothing here fails the parent:
    /// unresolved optional manifests are logged and recorded as warnings.
    pub(super) fn resolve_optional_descriptors(
        &self,
        ctx: &mut ResolutionContext,
        location: &PackageLocation,
        resolved_path: &ManifestPath,
        descriptor: &mut PluginDescriptor,
        policy: LeniencyPolicy,
    ) {
        let configs = descriptor.optional_dependency_configs.clone();

        for (dependency_id, declared) in &configs {
            let optional_path = ManifestPath::new(declared);
            if &optional_path == resolved_path {
                ctx.warn(Problem::incorrect_structure(format!(
                    "Plugin has recursive config dependencies for descriptor {resolved_path}"
                )));
            }

            match self.resolve_optional(ctx, location, &optional_path, policy) {
                Ok(Some(optional)) => {
                    debug!(
                        "Resolved optional descriptor {} for {}",
                        optional.source, dependency_id
                    );
                    descriptor
                        .optional_descriptors
                        .insert(dependency_id.clone(), optional);
                }
                Ok(None) => warn!("Optional descriptor META-INF/{} is not found", optional_path),
                Err(problem) => {
                    warn!(
                        "Optional descriptor META-INF/{} of {} is not resolved",
                        optional_path, dependency_id
                    );
                    ctx.warn(problem);
                }
            }
        }
    }

    fn resolve_optional(
        &self,
        ctx: &mut ResolutionContext,
        location: &PackageLocation,
        optional_path: &ManifestPath,
        policy: LeniencyPolicy,
    ) -> ProblemResult<Option<PluginDescriptor>> {
        // Cheap path: the manifest was already seen during a scan.
        if let Some(cached) = ctx.cache().get(optional_path.file_name()).cloned() {
            let descriptor = self.assemble(
                ctx,
                &cached.document,
                cached.source,
                policy.ignoring_missing_config_element(),
            )?;
            return Ok(Some(descriptor));
        }

        if !ctx.enter(optional_path) {
            ctx.warn(Problem::missing_config_element(format!(
                "Optional descriptor META-INF/{optional_path} is part of a dependency cycle \
                 and is skipped"
            )));
            return Ok(None);
        }

        let relaxed = policy
            .ignoring_missing_config_element()
            .ignoring_missing_file();
        let result = self.load_descriptor(ctx, location, optional_path, relaxed);
        ctx.leave(optional_path);
        result
    }
}

use super::{PluginResolver, ResolutionContext};
use plugscope_api::{LeniencyPolicy, PluginDescriptor, ProblemResult, RawDocument, SourceReference};

impl PluginResolver {
    /// Reads `document` into a descriptor bound to the package being resolved.
    pub(super) fn assemble(
        &self,
        ctx: &mut ResolutionContext,
        document: &RawDocument,
        source: SourceReference,
        policy: LeniencyPolicy,
    ) -> ProblemResult<PluginDescriptor> {
        let package = ctx.package().to_path_buf();
        let mut validator = ctx.validator(policy);
        let mut descriptor = self
            .reader
            .read_descriptor(document, &source, &mut validator)?;
        descriptor.source = source;
        descriptor.package = package;
        Ok(descriptor)
    }
}

/// Copies secondary assets the root descriptor lacks from a library descriptor.
pub(super) fn backfill_assets(root: &mut PluginDescriptor, library: &PluginDescriptor) {
    if root.vendor_logo.is_none() {
        root.vendor_logo.clone_from(&library.vendor_logo);
    }
}

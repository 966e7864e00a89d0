//! Collaborator seam between the resolver and manifest dialects.

use crate::error::ProblemResult;
use crate::models::{PluginDescriptor, RawDocument, SourceReference};
use crate::policy::Validator;

/// Turns a parsed manifest document into a descriptor.
///
/// Content problems (a missing `<name>`, an empty dependency id) go through
/// `validator` so the caller's policy decides whether they abort.
pub trait DescriptorReader: Send + Sync {
    fn read_descriptor(
        &self,
        document: &RawDocument,
        source: &SourceReference,
        validator: &mut Validator<'_>,
    ) -> ProblemResult<PluginDescriptor>;

    /// Reader name (for logging/debugging)
    fn name(&self) -> &str;
}

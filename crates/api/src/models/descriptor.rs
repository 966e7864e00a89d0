use crate::error::Problem;
use crate::models::source::SourceReference;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PluginDependency {
    pub id: String,
    pub optional: bool,
}

/// Resolved manifest of a plugin package.
///
/// Identity fields are filled by the [`DescriptorReader`](crate::DescriptorReader);
/// `package` and `optional_descriptors` are filled by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginDescriptor {
    pub id: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub vendor: Option<String>,
    /// Logo resource declared by the vendor element.
    pub vendor_logo: Option<String>,
    pub description: Option<String>,
    pub since_build: Option<String>,
    pub until_build: Option<String>,
    pub dependencies: Vec<PluginDependency>,
    /// Dependency id -> manifest path, in declaration order.
    pub optional_dependency_configs: IndexMap<String, String>,
    /// Dependency id -> resolved optional manifest. Unresolved ids are absent.
    pub optional_descriptors: IndexMap<String, PluginDescriptor>,
    pub source: SourceReference,
    /// Logical location of the package the descriptor belongs to.
    pub package: PathBuf,
}

impl PluginDescriptor {
    pub fn new(source: SourceReference) -> Self {
        Self {
            id: None,
            name: None,
            version: None,
            vendor: None,
            vendor_logo: None,
            description: None,
            since_build: None,
            until_build: None,
            dependencies: Vec::new(),
            optional_dependency_configs: IndexMap::new(),
            optional_descriptors: IndexMap::new(),
            source,
            package: PathBuf::new(),
        }
    }
}

/// Successful top-level resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginCreation {
    pub descriptor: PluginDescriptor,
    /// Problems downgraded by a lenient policy somewhere in the resolution.
    pub warnings: Vec<Problem>,
}

pub mod error;
pub mod models;
pub mod policy;
pub mod reader;

// Re-export commonly used types
pub use error::{PluginCreationFail, Problem, ProblemKind, ProblemResult};
pub use models::*;
pub use policy::{LeniencyPolicy, Validator};
pub use reader::DescriptorReader;

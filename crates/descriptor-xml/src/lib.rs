//! Reader for the `<idea-plugin>` manifest dialect.

pub mod reader;

pub use reader::XmlDescriptorReader;

/// Root element of every plugin manifest, optional ones included.
pub const ROOT_ELEMENT: &str = "idea-plugin";

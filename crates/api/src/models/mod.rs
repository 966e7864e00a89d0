pub mod descriptor;
pub mod document;
pub mod location;
pub mod path;
pub mod source;

pub use descriptor::*;
pub use document::*;
pub use location::*;
pub use path::*;
pub use source::*;

pub mod cache;
pub mod classify;
pub mod config;
pub mod container;
pub mod error;
pub mod logging;
pub mod resolver;

pub use config::ResolverOptions;
pub use error::Result;
pub use resolver::{ClassifiedEntry, PluginResolver};

use plugscope_core::logging::LogSettings;
use plugscope_core::{PluginResolver, ResolverOptions};
use std::sync::Arc;
use tracing::level_filters::LevelFilter;

/// Bootstraps a resolver wired to the `<idea-plugin>` XML reader.
///
/// This is the central factory for callers that do not bring their own
/// `DescriptorReader`.
pub fn build_default_resolver(options: ResolverOptions) -> PluginResolver {
    let reader = plugscope_xml::XmlDescriptorReader::new();
    tracing::debug!(
        "Building resolver with {} for {}",
        plugscope_api::DescriptorReader::name(&reader),
        options.manifest_name
    );
    PluginResolver::new(Arc::new(reader)).with_options(options)
}

/// Initializes logging for a command. Stderr shows warnings only unless
/// `verbose`; the log file always gets everything `RUST_LOG` allows.
///
/// Returns `None` when logging could not be set up; the command still runs.
pub fn init_logging(component: &str, verbose: bool) -> Option<impl Drop> {
    let stderr = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let settings = LogSettings::for_component(component).with_stderr(Some(stderr));
    match plugscope_core::logging::init_logging(&settings) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Logging disabled: {e}");
            None
        }
    }
}

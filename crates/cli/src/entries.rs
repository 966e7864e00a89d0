use plugscope_core::config::DEFAULT_MANIFEST_NAME;
use plugscope_core::ResolverOptions;
use std::path::PathBuf;
use tracing::info;

pub fn run(path: PathBuf, manifest: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let manifest = manifest.unwrap_or_else(|| DEFAULT_MANIFEST_NAME.to_string());
    let resolver = plugscope_runtime::build_default_resolver(ResolverOptions::default());

    info!("Classifying entries of {} against {}", path.display(), manifest);
    let entries = resolver.classify_entries(&path, &manifest)?;

    for entry in &entries {
        println!("{:<18} {}", entry.class.label(), entry.path);
    }
    info!("{} entries", entries.len());
    Ok(())
}

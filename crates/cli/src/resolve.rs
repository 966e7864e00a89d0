use plugscope_core::ResolverOptions;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

pub struct ResolveArgs {
    pub path: PathBuf,
    pub manifest: Option<String>,
    pub no_validate: bool,
    pub strict_nested: bool,
    pub config: Option<PathBuf>,
    pub json: bool,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Report<'a> {
    Resolved {
        descriptor: &'a plugscope_api::PluginDescriptor,
        warnings: &'a [plugscope_api::Problem],
    },
    Failed {
        problem: &'a plugscope_api::Problem,
        warnings: &'a [plugscope_api::Problem],
    },
}

pub fn run(args: ResolveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = match &args.config {
        Some(file) => ResolverOptions::load(file)?,
        None => ResolverOptions::default(),
    };
    if let Some(manifest) = args.manifest {
        options.manifest_name = manifest;
    }
    if args.no_validate {
        options.validate_descriptor = false;
    }
    if args.strict_nested {
        options.strict_nested_duplicates = true;
    }
    options.validate()?;

    let resolver = plugscope_runtime::build_default_resolver(options);
    info!("Resolving plugin at: {}...", args.path.display());

    match resolver.create_plugin(&args.path) {
        Ok(creation) => {
            if args.json {
                let report = Report::Resolved {
                    descriptor: &creation.descriptor,
                    warnings: &creation.warnings,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let descriptor = &creation.descriptor;
                info!("Resolved {}", descriptor.source);
                println!("id:      {}", descriptor.id.as_deref().unwrap_or("-"));
                println!("name:    {}", descriptor.name.as_deref().unwrap_or("-"));
                println!("version: {}", descriptor.version.as_deref().unwrap_or("-"));
                println!("vendor:  {}", descriptor.vendor.as_deref().unwrap_or("-"));
                println!("source:  {}", descriptor.source);
                for (dependency, optional) in &descriptor.optional_descriptors {
                    println!("optional: {} -> {}", dependency, optional.source);
                }
                for warning in &creation.warnings {
                    println!("warning: {}", warning);
                }
            }
            Ok(())
        }
        Err(fail) => {
            if args.json {
                let report = Report::Failed {
                    problem: &fail.problem,
                    warnings: &fail.warnings,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for warning in &fail.warnings {
                    warn!("{}", warning);
                }
            }
            Err(fail.into())
        }
    }
}

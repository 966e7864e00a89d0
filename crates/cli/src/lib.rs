mod entries;
mod resolve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "plugscope",
    version,
    about = "Locates and resolves IDE plugin descriptors",
    long_about = "Plugscope finds META-INF/plugin.xml inside a plugin directory, zip or jar, \
                  including nested jars and lib/ archives, and resolves the optional manifests \
                  the descriptor declares."
)]
pub struct Cli {
    /// Show debug output on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the plugin descriptor of a package
    #[command(
        long_about = "Resolves the manifest of a plugin package and prints the descriptor \
                            together with any warnings. Exits non-zero when resolution fails."
    )]
    Resolve {
        /// Path to a plugin directory, .zip or .jar
        #[arg(value_name = "PLUGIN_PATH")]
        path: PathBuf,

        /// Manifest to look up, relative to META-INF
        #[arg(long, value_name = "NAME")]
        manifest: Option<String>,

        /// Downgrade missing manifest elements to warnings
        #[arg(long)]
        no_validate: bool,

        /// Fail on duplicate manifests found through nested jars
        #[arg(long)]
        strict_nested: bool,

        /// JSON file with resolver options
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the entries of a package with their classification
    Entries {
        /// Path to a plugin directory, .zip or .jar
        #[arg(value_name = "PLUGIN_PATH")]
        path: PathBuf,

        /// Manifest to classify against, relative to META-INF
        #[arg(long, value_name = "NAME")]
        manifest: Option<String>,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Resolve { .. } => "resolve",
        Commands::Entries { .. } => "entries",
    };
    let _guard = plugscope_runtime::init_logging(component, cli.verbose);

    match cli.command {
        Commands::Resolve {
            path,
            manifest,
            no_validate,
            strict_nested,
            config,
            json,
        } => resolve::run(resolve::ResolveArgs {
            path,
            manifest,
            no_validate,
            strict_nested,
            config,
            json,
        }),
        Commands::Entries { path, manifest } => entries::run(path, manifest),
    }
}

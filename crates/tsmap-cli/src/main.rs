#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::doc_markdown)]

mod commands;
mod logging;

use clap::Parser;
use miette::Result;
use std::path::PathBuf;
use tsmap_core::Config;

#[derive(Parser, Debug)]
#[command(name = "tsmap")]
#[command(author, version, about = "Inspect tsconfig path mapping and module formats", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    /// tsconfig to load (default: nearest tsconfig.json above the working directory)
    #[arg(short, long, global = true, value_name = "TSCONFIG", env = "TSMAP_PROJECT")]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Show the candidate paths `paths`/`baseUrl` produce for specifiers
    Map {
        /// Specifiers as written in import/require statements
        #[arg(required = true)]
        specifiers: Vec<String>,
    },

    /// Classify files as CommonJS or ESM
    Classify {
        /// Files to classify
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Apply Node package-scope rules (consult the nearest package.json)
        #[arg(long)]
        package_scope: bool,
    },

    /// Show the package scope (nearest package.json) of a path
    Scope {
        /// File whose scope to look up
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    // Build config
    let config = Config::new(cwd)
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json)
        .with_project(cli.project);

    logging::init(config.verbosity, config.json_logs);

    match cli.command {
        Some(Commands::Version) | None => commands::version::run(cli.json),
        Some(Commands::Map { specifiers }) => commands::map::run(&config, &specifiers, cli.json),
        Some(Commands::Classify {
            files,
            package_scope,
        }) => commands::classify::run(&config, &files, package_scope, cli.json),
        Some(Commands::Scope { path }) => commands::scope::run(&config, &path, cli.json),
    }
}

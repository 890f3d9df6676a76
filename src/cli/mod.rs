pub mod config;
pub mod imports;

use clap::{Parser, Subcommand};
use gopdeps::{GopdepsError, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "gopdeps",
    version,
    about = "List the canonical import paths of Go and Go+ packages"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Collect the imports of every source file under a path
    Imports(imports::ImportsArgs),
    /// Inspect configuration
    Config(config::ConfigArgs),
}

/// Dispatch to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Imports(args) => imports::run(&args),
        Commands::Config(args) => config::run(&args),
    }
}

fn resolve_working_dir(path: Option<&Path>) -> Result<PathBuf> {
    let p = path.unwrap_or_else(|| Path::new("."));
    p.canonicalize()
        .map_err(|_| GopdepsError::Config(format!("Invalid path: {}", p.display())))
}

use crate::cli::resolve_working_dir;
use clap::{Args, Subcommand};
use gopdeps::config::resolve::{resolve_config, CliOverrides};
use gopdeps::config::show::render_show;
use gopdeps::Result;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show resolved configuration with provenance
    Show {
        /// Working directory (defaults to current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

pub fn run(args: &ConfigArgs) -> Result<()> {
    match &args.action {
        ConfigAction::Show { path } => {
            let working_dir = resolve_working_dir(path.as_deref())?;
            let config = resolve_config(&working_dir, &CliOverrides::default())?;
            render_show(&mut std::io::stdout(), &config)?;
        }
    }
    Ok(())
}

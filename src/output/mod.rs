pub mod json;
pub mod text;

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Default, Clone, Copy, ValueEnum, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("unsupported output format: {s}")),
        }
    }
}

/// Everything a scan produced, ready to render.
#[derive(Debug, Clone, Serialize)]
pub struct ImportsReport {
    pub root: PathBuf,
    /// Root import paths of the modules the scanned files belong to
    pub modules: Vec<String>,
    pub files_parsed: usize,
    pub files_failed: usize,
    /// Canonical import paths, sorted
    pub imports: Vec<String>,
}

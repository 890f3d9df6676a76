pub mod ignore;
pub mod provenance;
pub mod resolve;
pub mod schema;
pub mod show;

use crate::output::OutputFormat;
use provenance::ProvenanceMap;
use std::path::PathBuf;

/// Name of the project configuration file.
pub const PROJECT_CONFIG_FILE: &str = ".gopdeps.toml";

/// Fully resolved configuration after all layers are applied.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    // Operational
    pub format: OutputFormat,
    pub quiet: bool,
    pub include_tests: bool,

    // Targeting
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub ignore_patterns: Vec<String>,

    // Module
    /// Root import path used instead of discovering go.mod / gop.mod
    pub module: Option<String>,

    // Provenance
    pub provenance: ProvenanceMap,
    pub loaded_files: Vec<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            quiet: false,
            include_tests: false,
            include: Vec::new(),
            exclude: Vec::new(),
            ignore_patterns: Vec::new(),
            module: None,
            provenance: ProvenanceMap::new(),
            loaded_files: Vec::new(),
        }
    }
}

impl ResolvedConfig {
    /// Exclude patterns from config plus the ignore file.
    pub fn all_excludes(&self) -> Vec<String> {
        let mut exclude = self.exclude.clone();
        exclude.extend(self.ignore_patterns.iter().cloned());
        exclude
    }
}

use crate::config::ignore::load_ignore_file;
use crate::config::provenance::{ProvenanceMap, Source};
use crate::config::schema::FileConfig;
use crate::config::{ResolvedConfig, PROJECT_CONFIG_FILE};
use crate::errors::{GopdepsError, Result};
use crate::output::OutputFormat;
use std::path::{Path, PathBuf};

/// CLI overrides extracted from command arguments.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub format: Option<OutputFormat>,
    pub quiet: bool,
    pub include_tests: bool,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub module: Option<String>,
}

const KEYS: [&str; 6] = [
    "defaults.format",
    "defaults.quiet",
    "defaults.include_tests",
    "targeting.include",
    "targeting.exclude",
    "module.path",
];

/// Resolve configuration by applying layers bottom-up:
/// 1. Built-in defaults
/// 2. User config (~/.config/gopdeps/config.toml)
/// 3. Project config (nearest .gopdeps.toml walking up from working_dir)
/// 4. Environment variables
/// 5. CLI overrides
pub fn resolve_config(working_dir: &Path, cli: &CliOverrides) -> Result<ResolvedConfig> {
    resolve_config_with(working_dir, cli, find_user_config().as_deref(), |name| {
        std::env::var(name).ok()
    })
}

/// [`resolve_config`] with the user config location and environment supplied.
pub fn resolve_config_with(
    working_dir: &Path,
    cli: &CliOverrides,
    user_config: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let mut config = ResolvedConfig::default();
    let mut prov = ProvenanceMap::new();
    for key in KEYS {
        prov.set(key, Source::Default);
    }

    if let Some(path) = user_config.filter(|p| p.exists()) {
        let file = load_file_config(path, "user")?;
        apply_file_config(&mut config, &file, Source::UserConfig(path.to_path_buf()), &mut prov)?;
        config.loaded_files.push(path.to_path_buf());
    }

    if let Some(path) = find_project_config(working_dir) {
        let file = load_file_config(&path, "project")?;
        apply_file_config(&mut config, &file, Source::ProjectConfig(path.clone()), &mut prov)?;
        config.loaded_files.push(path);
    }

    apply_env_vars(&mut config, &mut prov, env)?;
    apply_cli_overrides(&mut config, cli, &mut prov);

    config.ignore_patterns = load_ignore_file(working_dir);
    config.provenance = prov;

    tracing::debug!(files = ?config.loaded_files, "resolved configuration");
    Ok(config)
}

fn find_user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gopdeps").join("config.toml"))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(PROJECT_CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

fn load_file_config(path: &Path, layer: &str) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|_| {
        GopdepsError::Config(format!("Could not read {layer} config: {}", path.display()))
    })?;
    FileConfig::from_toml(&content).map_err(|e| {
        GopdepsError::Config(format!("Invalid {layer} config {}: {e}", path.display()))
    })
}

fn parse_format(value: &str, origin: &Source) -> Result<OutputFormat> {
    value
        .parse()
        .map_err(|e| GopdepsError::Config(format!("{e} (from {origin})")))
}

fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

fn apply_file_config(
    config: &mut ResolvedConfig,
    file: &FileConfig,
    source: Source,
    prov: &mut ProvenanceMap,
) -> Result<()> {
    if let Some(ref format) = file.defaults.format {
        config.format = parse_format(format, &source)?;
        prov.set("defaults.format", source.clone());
    }
    if let Some(quiet) = file.defaults.quiet {
        config.quiet = quiet;
        prov.set("defaults.quiet", source.clone());
    }
    if let Some(include_tests) = file.defaults.include_tests {
        config.include_tests = include_tests;
        prov.set("defaults.include_tests", source.clone());
    }
    if !file.targeting.include.is_empty() {
        config.include = file.targeting.include.clone();
        prov.set("targeting.include", source.clone());
    }
    if !file.targeting.exclude.is_empty() {
        config.exclude = file.targeting.exclude.clone();
        prov.set("targeting.exclude", source.clone());
    }
    if let Some(ref path) = file.module.path {
        config.module = Some(path.clone());
        prov.set("module.path", source);
    }
    Ok(())
}

fn apply_env_vars(
    config: &mut ResolvedConfig,
    prov: &mut ProvenanceMap,
    env: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(val) = env("GOPDEPS_FORMAT") {
        let source = Source::EnvVar("GOPDEPS_FORMAT");
        config.format = parse_format(&val, &source)?;
        prov.set("defaults.format", source);
    }
    if let Some(val) = env("GOPDEPS_QUIET") {
        config.quiet = parse_bool(&val);
        prov.set("defaults.quiet", Source::EnvVar("GOPDEPS_QUIET"));
    }
    if let Some(val) = env("GOPDEPS_INCLUDE_TESTS") {
        config.include_tests = parse_bool(&val);
        prov.set(
            "defaults.include_tests",
            Source::EnvVar("GOPDEPS_INCLUDE_TESTS"),
        );
    }
    if let Some(val) = env("GOPDEPS_EXCLUDE") {
        config.exclude = val.split(',').map(|s| s.trim().to_string()).collect();
        prov.set("targeting.exclude", Source::EnvVar("GOPDEPS_EXCLUDE"));
    }
    if let Some(val) = env("GOPDEPS_MODULE") {
        config.module = Some(val);
        prov.set("module.path", Source::EnvVar("GOPDEPS_MODULE"));
    }
    Ok(())
}

fn apply_cli_overrides(config: &mut ResolvedConfig, cli: &CliOverrides, prov: &mut ProvenanceMap) {
    if let Some(format) = cli.format {
        config.format = format;
        prov.set("defaults.format", Source::CliFlag("--format"));
    }
    if cli.quiet {
        config.quiet = true;
        prov.set("defaults.quiet", Source::CliFlag("--quiet"));
    }
    if cli.include_tests {
        config.include_tests = true;
        prov.set("defaults.include_tests", Source::CliFlag("--include-tests"));
    }
    if !cli.include.is_empty() {
        config.include = cli.include.clone();
        prov.set("targeting.include", Source::CliFlag("--include"));
    }
    if !cli.exclude.is_empty() {
        config.exclude = cli.exclude.clone();
        prov.set("targeting.exclude", Source::CliFlag("--exclude"));
    }
    if let Some(ref module) = cli.module {
        config.module = Some(module.clone());
        prov.set("module.path", Source::CliFlag("--module"));
    }
}

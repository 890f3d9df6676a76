use clap::Args;
use gopdeps::config::resolve::{resolve_config, CliOverrides};
use gopdeps::config::ResolvedConfig;
use gopdeps::output::{json, text, ImportsReport, OutputFormat};
use gopdeps::walk;
use gopdeps::{
    FileSet, GopdepsError, ImportsParser, Module, ModuleResolver, ParseConfig, Result,
};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct ImportsArgs {
    /// File or directory to scan
    pub path: PathBuf,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Include test files (*_test.go, *_test.gop)
    #[arg(long)]
    pub include_tests: bool,

    /// Include glob patterns
    #[arg(long)]
    pub include: Vec<String>,

    /// Exclude glob patterns
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Module root import path, instead of reading go.mod / gop.mod
    #[arg(long)]
    pub module: Option<String>,

    /// Suppress progress output
    #[arg(long)]
    pub quiet: bool,
}

impl ImportsArgs {
    fn to_cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            format: self.format,
            quiet: self.quiet,
            include_tests: self.include_tests,
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            module: self.module.clone(),
        }
    }
}

/// Outcome of scanning one package directory with its own parser.
struct PackageScan {
    imports: HashSet<String>,
    parsed: usize,
    failures: Vec<GopdepsError>,
}

pub fn run(args: &ImportsArgs) -> Result<()> {
    let root = args
        .path
        .canonicalize()
        .map_err(|_| GopdepsError::NoFiles {
            path: args.path.clone(),
        })?;
    let working_dir = if root.is_file() {
        root.parent().map(Path::to_path_buf).unwrap_or_else(|| root.clone())
    } else {
        root.clone()
    };

    let config = resolve_config(&working_dir, &args.to_cli_overrides())?;

    let files = walk::discover_files(
        &root,
        &config.include,
        &config.all_excludes(),
        config.include_tests,
    )?;
    if files.is_empty() {
        return Err(GopdepsError::NoFiles { path: root });
    }

    let packages = assign_modules(&config, walk::group_by_package(&files))?;
    let modules: BTreeSet<String> = packages
        .iter()
        .map(|(module, _)| module.path())
        .filter(|path| !path.is_empty())
        .map(str::to_string)
        .collect();

    let progress = if !config.quiet {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    // One parser per package; parsers are never shared across threads
    let scans: Vec<PackageScan> = packages
        .into_par_iter()
        .map(|(module, files)| {
            let mut parser = ImportsParser::new(FileSet::new(), module, ParseConfig::default());
            let mut parsed = 0;
            let mut failures = Vec::new();
            for file in &files {
                match parser.parse_imports(file) {
                    Ok(()) => parsed += 1,
                    Err(err) => {
                        tracing::warn!("Skipping {}: {}", file.display(), err);
                        failures.push(err);
                    }
                }
                if let Some(ref pb) = progress {
                    pb.inc(1);
                }
            }
            PackageScan {
                imports: parser.into_imports(),
                parsed,
                failures,
            }
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let mut imports: HashSet<String> = HashSet::new();
    let mut files_parsed = 0;
    let mut failures = Vec::new();
    for scan in scans {
        imports.extend(scan.imports);
        files_parsed += scan.parsed;
        failures.extend(scan.failures);
    }

    let mut sorted: Vec<String> = imports.into_iter().collect();
    sorted.sort();

    let report = ImportsReport {
        root,
        modules: modules.into_iter().collect(),
        files_parsed,
        files_failed: failures.len(),
        imports: sorted,
    };

    let mut stdout = std::io::stdout();
    match config.format {
        OutputFormat::Text => text::write_text(&mut stdout, &report)?,
        OutputFormat::Json => json::write_json(&mut stdout, &report)?,
    }

    if !failures.is_empty() {
        for err in failures {
            eprintln!("{:?}", miette::Report::new(err));
        }
        stdout.flush()?;
        std::process::exit(2);
    }

    Ok(())
}

/// Pair every package directory with the module that owns it.
fn assign_modules(
    config: &ResolvedConfig,
    packages: std::collections::BTreeMap<PathBuf, Vec<PathBuf>>,
) -> Result<Vec<(Arc<Module>, Vec<PathBuf>)>> {
    if let Some(ref path) = config.module {
        let module = Arc::new(Module::new(path.clone()));
        return Ok(packages
            .into_values()
            .map(|files| (Arc::clone(&module), files))
            .collect());
    }

    let mut resolver = ModuleResolver::new();
    let unowned = Arc::new(Module::new(""));
    let mut assigned = Vec::with_capacity(packages.len());
    for (dir, files) in packages {
        let module = match resolver.module_for_dir(&dir)? {
            Some(module) => module,
            None => {
                tracing::warn!(
                    "No go.mod or gop.mod above {}; relative imports stay relative",
                    dir.display()
                );
                Arc::clone(&unowned)
            }
        };
        assigned.push((module, files));
    }
    Ok(assigned)
}

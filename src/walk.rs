use crate::errors::Result;
use crate::parse::common::{is_test_file, SourceKind};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default exclude patterns for test files.
pub fn default_excludes() -> Vec<String> {
    SourceKind::ALL
        .iter()
        .map(|kind| format!("*_test.{}", kind.extension()))
        .collect()
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Discover Go and Go+ source files under `root`.
///
/// - Respects `.gitignore`
/// - Applies include/exclude glob patterns
/// - Excludes test files unless `include_tests` is set
/// - Returns sorted paths for deterministic output
///
/// A `root` that is itself a source file is returned on its own.
pub fn discover_files(
    root: &Path,
    include_patterns: &[String],
    exclude_patterns: &[String],
    include_tests: bool,
) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(SourceKind::from_path(root)
            .map(|_| vec![root.to_path_buf()])
            .unwrap_or_default());
    }

    let mut excludes = exclude_patterns.to_vec();
    if !include_tests {
        excludes.extend(default_excludes());
    }
    let exclude_set = build_globset(&excludes)?;

    let include_set = if include_patterns.is_empty() {
        None
    } else {
        Some(build_globset(include_patterns)?)
    };

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .build();

    let mut files = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!("Skipping unreadable entry: {err}");
                continue;
            }
        };

        let path = entry.path();

        if !path.is_file() || SourceKind::from_path(path).is_none() {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);

        if exclude_set.is_match(relative) || exclude_set.is_match(path) {
            continue;
        }
        // Also check just the filename for patterns like *_test.go
        if let Some(fname) = path.file_name() {
            if exclude_set.is_match(Path::new(fname)) {
                continue;
            }
        }
        if !include_tests && is_test_file(path) {
            continue;
        }

        if let Some(ref include) = include_set {
            if !include.is_match(relative) && !include.is_match(path) {
                continue;
            }
        }

        files.push(path.to_path_buf());
    }

    files.sort();

    Ok(files)
}

/// Group files by the directory (package) that contains them.
pub fn group_by_package(files: &[PathBuf]) -> BTreeMap<PathBuf, Vec<PathBuf>> {
    let mut packages: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for file in files {
        let dir = file.parent().map(Path::to_path_buf).unwrap_or_default();
        packages.entry(dir).or_default().push(file.clone());
    }
    packages
}

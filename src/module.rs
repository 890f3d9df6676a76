use crate::errors::{GopdepsError, Result};
use crate::parse::literal::unquote;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Mod files that mark a module root, in lookup order.
pub const MOD_FILES: [&str; 2] = ["gop.mod", "go.mod"];

/// The build module that owns the files being scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Root import path, e.g. "github.com/user/project"
    path: String,
    /// Directory holding the mod file, when loaded from disk
    dir: Option<PathBuf>,
}

impl Module {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            dir: None,
        }
    }

    pub fn with_dir(path: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            dir: Some(dir.into()),
        }
    }

    /// The module's canonical root import path.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Load the module declared directly in `dir`, if it has a mod file.
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        for name in MOD_FILES {
            let mod_path = dir.join(name);
            if !mod_path.is_file() {
                continue;
            }
            let content = std::fs::read_to_string(&mod_path).map_err(|source| {
                GopdepsError::Read {
                    file: mod_path.clone(),
                    source,
                }
            })?;
            return match parse_module_directive(&content) {
                Some(path) => Ok(Some(Self::with_dir(path, dir))),
                None => Err(GopdepsError::Config(format!(
                    "{} has no module directive",
                    mod_path.display()
                ))),
            };
        }
        Ok(None)
    }

    /// Find the module owning `start` by walking up to the nearest mod file.
    pub fn discover(start: &Path) -> Result<Option<Self>> {
        let mut dir = start.to_path_buf();
        loop {
            if let Some(module) = Self::load(&dir)? {
                tracing::debug!(
                    module = module.path(),
                    dir = %dir.display(),
                    "found module"
                );
                return Ok(Some(module));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }
}

/// Parse the module path from go.mod / gop.mod content.
///
/// Accepts both `module example.com/m` and `module "example.com/m"`, with
/// trailing `//` comments.
pub fn parse_module_directive(content: &str) -> Option<String> {
    for line in content.lines() {
        let line = match line.find("//") {
            Some(idx) => &line[..idx],
            None => line,
        }
        .trim();
        let Some(rest) = line.strip_prefix("module") else {
            continue;
        };
        if !rest.starts_with([' ', '\t']) {
            continue;
        }
        let rest = rest.trim();
        if rest.starts_with(['"', '`']) {
            return unquote(rest).ok().filter(|p| !p.is_empty());
        }
        if !rest.is_empty() {
            return Some(rest.to_string());
        }
    }
    None
}

/// Caches module discovery per directory across many files.
#[derive(Debug, Default)]
pub struct ModuleResolver {
    cache: HashMap<PathBuf, Option<Arc<Module>>>,
}

impl ModuleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Module owning the given directory, shared between all its callers.
    pub fn module_for_dir(&mut self, dir: &Path) -> Result<Option<Arc<Module>>> {
        if let Some(cached) = self.cache.get(dir) {
            return Ok(cached.clone());
        }
        let found = Module::discover(dir)?.map(Arc::new);
        self.cache.insert(dir.to_path_buf(), found.clone());
        Ok(found)
    }
}

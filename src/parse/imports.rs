use crate::errors::{GopdepsError, Result};
use crate::module::Module;
use crate::parse::canonical::canonicalize;
use crate::parse::common::ImportSpec;
use crate::parse::fileset::FileSet;
use crate::parse::header::{GoHeaderFrontend, HeaderFrontend};
use crate::parse::literal::decode_string_lit;
use crate::parse::ParseConfig;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Collects the canonical import paths of every file fed to it.
///
/// One parser serves one scan session within a single module. Parsing takes
/// `&mut self`; to scan concurrently, give each worker its own parser and
/// [`merge`](ImportsParser::merge) the results.
pub struct ImportsParser {
    fset: FileSet,
    module: Arc<Module>,
    config: ParseConfig,
    frontend: Box<dyn HeaderFrontend>,
    imports: HashSet<String>,
}

impl ImportsParser {
    pub fn new(fset: FileSet, module: Arc<Module>, config: ParseConfig) -> Self {
        Self {
            fset,
            module,
            config,
            frontend: Box::new(GoHeaderFrontend::new()),
            imports: HashSet::new(),
        }
    }

    /// Replace the header frontend.
    pub fn with_frontend(mut self, frontend: Box<dyn HeaderFrontend>) -> Self {
        self.frontend = frontend;
        self
    }

    /// Read `file` and add the canonical paths of its imports to the set.
    ///
    /// On failure the set is left exactly as it was.
    pub fn parse_imports(&mut self, file: &Path) -> Result<()> {
        let source = std::fs::read(file).map_err(|source| GopdepsError::Read {
            file: file.to_path_buf(),
            source,
        })?;
        self.parse_imports_source(file, &source)
    }

    /// Like [`parse_imports`](Self::parse_imports), with the contents already in memory.
    pub fn parse_imports_source(&mut self, file: &Path, source: &[u8]) -> Result<()> {
        let specs = self
            .frontend
            .parse_header(&mut self.fset, file, source, &self.config)?;
        let before = self.imports.len();
        for spec in &specs {
            self.import_spec(spec);
        }
        tracing::debug!(
            file = %file.display(),
            specs = specs.len(),
            added = self.imports.len() - before,
            "parsed imports"
        );
        Ok(())
    }

    fn import_spec(&mut self, spec: &ImportSpec) {
        let raw = decode_string_lit(&spec.path);
        let canonical = canonicalize(&raw, &self.module);
        self.imports.insert(canonical);
    }

    /// Canonical import paths collected so far.
    pub fn imports(&self) -> &HashSet<String> {
        &self.imports
    }

    pub fn sorted_imports(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.imports.iter().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    pub fn into_imports(self) -> HashSet<String> {
        self.imports
    }

    /// Union another parser's imports into this one.
    pub fn merge(&mut self, other: ImportsParser) {
        self.imports.extend(other.imports);
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn file_set(&self) -> &FileSet {
        &self.fset
    }
}

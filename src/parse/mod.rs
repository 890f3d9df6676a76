pub mod canonical;
pub mod common;
pub mod fileset;
pub mod header;
pub mod imports;
pub mod literal;

pub use common::{BasicLit, ImportSpec, LitKind, SourceKind};
pub use fileset::{FileSet, Pos, Position};
pub use header::{GoHeaderFrontend, HeaderFrontend};
pub use imports::ImportsParser;

use std::path::Path;

/// Whether a file must open with a `package` clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PackageClause {
    /// Required for `.go`, optional for `.gop`
    #[default]
    ByExtension,
    Required,
    Optional,
}

/// Parser settings, handed to each [`ImportsParser`] at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseConfig {
    pub package_clause: PackageClause,
}

impl ParseConfig {
    pub fn requires_package(&self, file: &Path) -> bool {
        match self.package_clause {
            PackageClause::Required => true,
            PackageClause::Optional => false,
            PackageClause::ByExtension => {
                SourceKind::from_path(file).map_or(true, |k| k.requires_package_clause())
            }
        }
    }
}

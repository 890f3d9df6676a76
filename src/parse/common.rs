use crate::parse::fileset::Pos;
use std::path::Path;

/// Kind of a basic literal token, as classified by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

impl LitKind {
    /// Map a tree-sitter-go node kind to a literal kind.
    pub fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            "int_literal" => Some(LitKind::Int),
            "float_literal" => Some(LitKind::Float),
            "imaginary_literal" => Some(LitKind::Imag),
            "rune_literal" => Some(LitKind::Char),
            "interpreted_string_literal" | "raw_string_literal" => Some(LitKind::String),
            _ => None,
        }
    }
}

/// A literal token exactly as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicLit {
    pub kind: LitKind,
    /// Raw token text, quotes included
    pub value: String,
    pub pos: Pos,
}

/// One import declaration from a file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Local name: an identifier, `.` or `_`
    pub name: Option<String>,
    pub path: BasicLit,
    pub pos: Pos,
}

/// Source dialect, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Go,
    GoPlus,
}

impl SourceKind {
    pub const ALL: [SourceKind; 2] = [SourceKind::Go, SourceKind::GoPlus];

    pub fn extension(&self) -> &'static str {
        match self {
            SourceKind::Go => "go",
            SourceKind::GoPlus => "gop",
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ALL.into_iter().find(|kind| kind.extension() == ext)
    }

    /// Go+ lets a file omit its package clause.
    pub fn requires_package_clause(&self) -> bool {
        matches!(self, SourceKind::Go)
    }
}

/// Check if a Go or Go+ file is a test file.
pub fn is_test_file(path: &Path) -> bool {
    SourceKind::from_path(path).is_some()
        && path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.ends_with("_test"))
}

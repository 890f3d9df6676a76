use crate::errors::{GopdepsError, Result};
use crate::parse::common::{BasicLit, ImportSpec, LitKind};
use crate::parse::fileset::FileSet;
use crate::parse::literal::unquote;
use crate::parse::ParseConfig;
use std::path::Path;
use streaming_iterator::StreamingIterator;
use tree_sitter::Node;

/// Characters never allowed in an import path.
const ILLEGAL_IMPORT_CHARS: &str = "!\"#$%&'()*,:;<=>?[\\]^{|}`\u{FFFD}";

/// Yields the import declarations of one file's header.
pub trait HeaderFrontend: Send {
    /// Parse the package clause and import declarations of `source`.
    ///
    /// The file is registered in `fset` and every returned position refers
    /// to it. On error nothing is returned, so callers never see a partial
    /// list from a broken header. Every returned path is a string literal
    /// that decodes to a valid import path.
    fn parse_header(
        &mut self,
        fset: &mut FileSet,
        file: &Path,
        source: &[u8],
        config: &ParseConfig,
    ) -> Result<Vec<ImportSpec>>;
}

/// Header frontend backed by the tree-sitter Go grammar.
///
/// Go+ headers share Go's syntax, except that the package clause is optional,
/// which the grammar already allows.
pub struct GoHeaderFrontend {
    parser: tree_sitter::Parser,
    query: tree_sitter::Query,
}

impl GoHeaderFrontend {
    pub fn new() -> Self {
        let language: tree_sitter::Language = tree_sitter_go::LANGUAGE.into();
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&language)
            .expect("failed to set Go language");
        let query = tree_sitter::Query::new(&language, "(import_spec) @spec")
            .expect("failed to compile Go import query");
        Self { parser, query }
    }

    /// Byte offset where the header ends, checking the header nodes for errors.
    fn header_end(
        &self,
        root: Node<'_>,
        source: &[u8],
        file: &Path,
        config: &ParseConfig,
    ) -> Result<usize> {
        let mut cursor = root.walk();
        let mut end = 0;
        let mut last_row = 0;
        let mut seen_package = false;
        let mut seen_decl = false;
        // Whether a `;` or newline closed the last header node
        let mut terminated = true;

        for node in root.children(&mut cursor) {
            let trailing = seen_decl && !terminated && node.start_position().row == last_row;
            if !node.is_named() {
                match node.kind() {
                    "\n" | ";" | "\0" => {
                        terminated = true;
                        continue;
                    }
                    // A bare keyword at the top level means the parser gave up on the header
                    "package" | "import" => return Err(syntax_error(node, file)),
                    _ if trailing => return Err(trailing_error(node, file)),
                    _ => break,
                }
            }
            match node.kind() {
                "comment" => continue,
                "package_clause" if !seen_package && !seen_decl => {
                    check_node(node, file)?;
                    check_package_name(node, source, file)?;
                    seen_package = true;
                }
                "import_declaration" => {
                    if config.requires_package(file) && !seen_package {
                        return Err(GopdepsError::MissingPackageClause {
                            file: file.to_path_buf(),
                        });
                    }
                    check_node(node, file)?;
                }
                "ERROR" if !seen_decl || starts_header_keyword(node) => {
                    return Err(syntax_error(node, file));
                }
                _ if trailing => return Err(trailing_error(node, file)),
                _ => break,
            }
            seen_decl = true;
            terminated = false;
            end = node.end_byte();
            last_row = node.end_position().row;
        }

        // Error recovery can fold broken header tokens into nodes that look whole
        if let Some(bad) = error_within(root, end) {
            return Err(syntax_error(bad, file));
        }

        if config.requires_package(file) && !seen_package {
            return Err(GopdepsError::MissingPackageClause {
                file: file.to_path_buf(),
            });
        }
        Ok(end)
    }
}

impl Default for GoHeaderFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderFrontend for GoHeaderFrontend {
    fn parse_header(
        &mut self,
        fset: &mut FileSet,
        file: &Path,
        source: &[u8],
        config: &ParseConfig,
    ) -> Result<Vec<ImportSpec>> {
        let base = fset.add_file(file, source);

        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| GopdepsError::Syntax {
                file: file.to_path_buf(),
                line: 1,
                column: 1,
                message: "parser produced no syntax tree".into(),
            })?;
        let root = tree.root_node();
        let end = self.header_end(root, source, file, config)?;
        if end == 0 {
            return Ok(Vec::new());
        }

        let mut cursor = tree_sitter::QueryCursor::new();
        cursor.set_byte_range(0..end);
        let mut matches = cursor.matches(&self.query, root, source);

        let mut specs = Vec::new();
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let node = capture.node;
                let Some(path) = node.child_by_field_name("path") else {
                    return Err(syntax_error(node, file));
                };
                let kind = LitKind::from_node_kind(path.kind())
                    .ok_or_else(|| syntax_error(path, file))?;
                let name = node
                    .child_by_field_name("name")
                    .and_then(|n| n.utf8_text(source).ok())
                    .map(str::to_string);
                let value = path
                    .utf8_text(source)
                    .map_err(|_| error_at(path, file, "import path is not valid UTF-8".into()))?
                    .to_string();
                if kind == LitKind::String {
                    check_import_path(path, &value, file)?;
                }

                specs.push(ImportSpec {
                    name,
                    path: BasicLit {
                        kind,
                        value,
                        pos: fset.pos(base, path.start_byte()),
                    },
                    pos: fset.pos(base, node.start_byte()),
                });
            }
        }

        tracing::trace!(file = %file.display(), imports = specs.len(), "parsed header");
        Ok(specs)
    }
}

/// The grammar tokenizes any backslash sequence, so escapes are checked here.
fn check_import_path(path: Node<'_>, value: &str, file: &Path) -> Result<()> {
    let decoded = unquote(value)
        .map_err(|err| error_at(path, file, format!("invalid import path {value}: {err}")))?;
    if !is_valid_import(&decoded) {
        return Err(error_at(path, file, format!("invalid import path: {value}")));
    }
    Ok(())
}

/// Non-empty, graphic, no spaces, none of [`ILLEGAL_IMPORT_CHARS`].
pub fn is_valid_import(path: &str) -> bool {
    !path.is_empty()
        && path.chars().all(|c| {
            !c.is_control() && !c.is_whitespace() && !ILLEGAL_IMPORT_CHARS.contains(c)
        })
}

fn check_package_name(clause: Node<'_>, source: &[u8], file: &Path) -> Result<()> {
    let mut cursor = clause.walk();
    let named = clause
        .named_children(&mut cursor)
        .find(|n| n.kind() == "package_identifier")
        .is_some_and(|n| !n.is_missing() && !n.utf8_text(source).unwrap_or_default().is_empty());
    if named {
        Ok(())
    } else {
        Err(error_at(clause, file, "expected package name".into()))
    }
}

/// A top-level error node that begins with `package` or `import` is a broken
/// header; other error nodes after the header belong to the file body.
fn starts_header_keyword(node: Node<'_>) -> bool {
    let mut first = node;
    while let Some(child) = first.child(0) {
        first = child;
    }
    matches!(first.kind(), "package" | "import")
}

fn check_node(node: Node<'_>, file: &Path) -> Result<()> {
    if node.has_error() || node.is_missing() {
        return Err(syntax_error(first_error(node), file));
    }
    Ok(())
}

/// Deepest-first search for the node that makes `node` erroneous.
fn first_error(node: Node<'_>) -> Node<'_> {
    if node.is_error() || node.is_missing() {
        return node;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.is_error() || child.is_missing() || child.has_error() {
            return first_error(child);
        }
    }
    node
}

/// First error or missing node below `root` that starts before `end`.
fn error_within(root: Node<'_>, end: usize) -> Option<Node<'_>> {
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if child.start_byte() >= end {
            break;
        }
        if child.is_error() || child.is_missing() {
            return Some(child);
        }
        if child.has_error() {
            if let Some(bad) = error_within(child, end) {
                return Some(bad);
            }
        }
    }
    None
}

fn trailing_error(node: Node<'_>, file: &Path) -> GopdepsError {
    let found = if node.is_named() {
        node.kind().replace('_', " ")
    } else {
        format!("'{}'", node.kind())
    };
    error_at(node, file, format!("expected ';', found {found}"))
}

fn syntax_error(node: Node<'_>, file: &Path) -> GopdepsError {
    let message = if node.is_missing() {
        format!("expected {}", node.kind())
    } else if !node.is_named() {
        format!("unexpected '{}'", node.kind())
    } else if node.is_error() {
        "unexpected input in import header".to_string()
    } else {
        format!("malformed {}", node.kind().replace('_', " "))
    };
    error_at(node, file, message)
}

fn error_at(node: Node<'_>, file: &Path, message: String) -> GopdepsError {
    let point = node.start_position();
    GopdepsError::Syntax {
        file: file.to_path_buf(),
        line: point.row + 1,
        column: point.column + 1,
        message,
    }
}

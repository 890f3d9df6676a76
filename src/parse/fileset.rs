use std::fmt;
use std::path::{Path, PathBuf};

/// A position in a [`FileSet`]: the file's base plus a byte offset.
///
/// `Pos(0)` is never handed out and means "no position".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pos(pub usize);

impl Pos {
    pub const NONE: Pos = Pos(0);

    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

/// Human-readable location resolved from a [`Pos`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub file: PathBuf,
    /// Byte offset within the file
    pub offset: usize,
    /// 1-indexed
    pub line: usize,
    /// 1-indexed byte column
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

#[derive(Debug, Clone)]
struct FileEntry {
    name: PathBuf,
    base: usize,
    size: usize,
    /// Byte offsets at which each line starts
    lines: Vec<usize>,
}

/// Position context shared by every file one parser reads.
///
/// Each added file occupies the range `[base, base + size]`, and bases are
/// handed out in increasing order so a `Pos` identifies exactly one file.
#[derive(Debug, Clone)]
pub struct FileSet {
    base: usize,
    files: Vec<FileEntry>,
}

impl FileSet {
    pub fn new() -> Self {
        Self {
            base: 1,
            files: Vec::new(),
        }
    }

    /// Register a file and its contents, returning the file's base.
    pub fn add_file(&mut self, name: &Path, source: &[u8]) -> usize {
        let base = self.base;
        let mut lines = vec![0];
        lines.extend(
            source
                .iter()
                .enumerate()
                .filter(|(_, &b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        self.files.push(FileEntry {
            name: name.to_path_buf(),
            base,
            size: source.len(),
            lines,
        });
        // +1 so the end-of-file position of one file never equals the next base
        self.base = base + source.len() + 1;
        base
    }

    /// Global position for a byte offset inside the file with the given base.
    pub fn pos(&self, base: usize, offset: usize) -> Pos {
        Pos(base + offset)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn position(&self, pos: Pos) -> Option<Position> {
        if !pos.is_valid() {
            return None;
        }
        let idx = self.files.partition_point(|f| f.base <= pos.0);
        let file = self.files.get(idx.checked_sub(1)?)?;
        let offset = pos.0 - file.base;
        if offset > file.size {
            return None;
        }
        let line = file.lines.partition_point(|&start| start <= offset);
        let line_start = file.lines[line - 1];
        Some(Position {
            file: file.name.clone(),
            offset,
            line,
            column: offset - line_start + 1,
        })
    }
}

impl Default for FileSet {
    fn default() -> Self {
        Self::new()
    }
}

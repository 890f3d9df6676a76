use std::path::Path;

/// Name of the ignore file listing paths to skip.
pub const IGNORE_FILE: &str = ".gopdepsignore";

/// Load `.gopdepsignore` by walking up from the given directory.
/// Parses gitignore-style patterns (skip blank lines and # comments).
pub fn load_ignore_file(start: &Path) -> Vec<String> {
    let mut dir = start.to_path_buf();
    loop {
        let ignore_path = dir.join(IGNORE_FILE);
        if ignore_path.exists() {
            match std::fs::read_to_string(&ignore_path) {
                Ok(content) => return parse_ignore_patterns(&content),
                Err(err) => {
                    tracing::warn!("Could not read {}: {err}", ignore_path.display());
                }
            }
        }
        if !dir.pop() {
            break;
        }
    }
    Vec::new()
}

fn parse_ignore_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| l.to_string())
        .collect()
}

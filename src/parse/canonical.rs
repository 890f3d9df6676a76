use crate::module::Module;

/// Whether an import path is written relative to the importing module.
pub fn is_relative(import_path: &str) -> bool {
    import_path.starts_with('.')
}

/// Map a raw import path to the identifier used in the dependency set.
///
/// Relative paths are joined onto the module root path; anything else is
/// already a full package path and comes back unchanged.
pub fn canonicalize(import_path: &str, module: &Module) -> String {
    if !is_relative(import_path) {
        return import_path.to_string();
    }
    let joined = join(module.path(), import_path);
    if escapes_root(module.path(), &joined) {
        tracing::debug!(
            import = import_path,
            module = module.path(),
            canonical = %joined,
            "relative import climbs above the module root"
        );
    }
    joined
}

/// Join two slash-separated path elements and clean the result.
///
/// Empty elements are ignored; joining two empty elements gives `""`.
pub fn join(base: &str, elem: &str) -> String {
    match (base.is_empty(), elem.is_empty()) {
        (true, true) => String::new(),
        (true, false) => clean(elem),
        (false, true) => clean(base),
        (false, false) => clean(&format!("{base}/{elem}")),
    }
}

/// Lexically normalize a slash-separated path.
///
/// Repeated slashes collapse, `.` elements vanish, and each `..` removes the
/// element before it. Leading `..` elements are kept for unrooted paths and
/// dropped at the root of rooted ones. An empty result becomes `.`.
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            s => parts.push(s),
        }
    }
    let body = parts.join("/");
    if rooted {
        format!("/{body}")
    } else if body.is_empty() {
        ".".to_string()
    } else {
        body
    }
}

fn escapes_root(root: &str, joined: &str) -> bool {
    let climbs = |p: &str| p == ".." || p.starts_with("../");
    climbs(joined) && !climbs(&clean(root))
}

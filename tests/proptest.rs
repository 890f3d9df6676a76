use gopdeps::parse::canonical::{canonicalize, clean, is_relative};
use gopdeps::parse::literal::unquote;
use gopdeps::{FileSet, ImportsParser, Module, ParseConfig};
use proptest::prelude::*;
use std::path::Path;
use std::sync::Arc;

/// Quote `s` as a Go interpreted string literal, escaping with a mix of forms.
fn go_quote(s: &str, use_long_escapes: bool) -> String {
    let mut out = String::from("\"");
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => out.push_str(&format!("\\x{:02x}", c as u32)),
            c if !c.is_ascii() && use_long_escapes => {
                if (c as u32) > 0xffff {
                    out.push_str(&format!("\\U{:08x}", c as u32));
                } else {
                    out.push_str(&format!("\\u{:04X}", c as u32));
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}"
}

fn module_path() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..5).prop_map(|segs| format!("example.com/{}", segs.join("/")))
}

fn relative_path() -> impl Strategy<Value = String> {
    let elem = prop_oneof![segment(), Just(".".to_string()), Just("..".to_string())];
    prop::collection::vec(elem, 0..6).prop_map(|elems| {
        let mut p = String::from(".");
        for e in elems {
            p.push('/');
            p.push_str(&e);
        }
        p
    })
}

proptest! {
    #[test]
    fn absolute_paths_are_untouched(
        path in "[a-z][a-z0-9./_-]{0,30}",
        root in module_path(),
    ) {
        prop_assume!(!is_relative(&path));
        prop_assert_eq!(canonicalize(&path, &Module::new(root)), path);
    }

    #[test]
    fn relative_paths_join_the_root(rel in relative_path(), root in module_path()) {
        let canonical = canonicalize(&rel, &Module::new(root.clone()));
        prop_assert_eq!(&canonical, &clean(&format!("{root}/{rel}")));
        // Already clean: canonicalizing never leaves `.` or empty elements
        prop_assert_eq!(&clean(&canonical), &canonical);
    }

    #[test]
    fn downward_relative_paths_stay_under_root(
        segs in prop::collection::vec(segment(), 1..4),
        root in module_path(),
    ) {
        let rel = format!("./{}", segs.join("/"));
        let canonical = canonicalize(&rel, &Module::new(root.clone()));
        prop_assert_eq!(canonical, format!("{root}/{}", segs.join("/")));
    }

    #[test]
    fn clean_is_idempotent(path in "[a-z./]{0,24}") {
        let once = clean(&path);
        prop_assert_eq!(clean(&once), once);
    }

    #[test]
    fn unquote_reverses_quoting(s in any::<String>(), long in any::<bool>()) {
        let quoted = go_quote(&s, long);
        prop_assert_eq!(unquote(&quoted).unwrap(), s);
    }

    #[test]
    fn raw_strings_decode_verbatim(s in "[^`\r]{0,40}") {
        prop_assert_eq!(unquote(&format!("`{s}`")).unwrap(), s);
    }

    #[test]
    fn file_order_does_not_change_the_set(
        a in prop::collection::vec(segment(), 0..5),
        b in prop::collection::vec(segment(), 0..5),
    ) {
        let source = |names: &[String]| {
            let mut src = String::from("package p\n\nimport (\n");
            for (i, n) in names.iter().enumerate() {
                if i % 2 == 0 {
                    src.push_str(&format!("\t\"./{n}\"\n"));
                } else {
                    src.push_str(&format!("\t\"{n}\"\n"));
                }
            }
            src.push_str(")\n");
            src
        };
        let (sa, sb) = (source(&a), source(&b));
        let module = Arc::new(Module::new("example.com/m"));

        let mut ab = ImportsParser::new(FileSet::new(), Arc::clone(&module), ParseConfig::default());
        ab.parse_imports_source(Path::new("a.go"), sa.as_bytes()).unwrap();
        ab.parse_imports_source(Path::new("b.go"), sb.as_bytes()).unwrap();

        let mut ba = ImportsParser::new(FileSet::new(), module, ParseConfig::default());
        ba.parse_imports_source(Path::new("b.go"), sb.as_bytes()).unwrap();
        ba.parse_imports_source(Path::new("a.go"), sa.as_bytes()).unwrap();
        ba.parse_imports_source(Path::new("a.go"), sa.as_bytes()).unwrap();

        prop_assert_eq!(ab.imports(), ba.imports());
    }
}

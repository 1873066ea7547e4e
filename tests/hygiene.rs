//! Hygiene: enforces coding standards at test time.
//!
//! Scans the production sources under `src/` (sibling `*_test.rs` files are
//! skipped) for constructs that crash the page or silently drop errors. Each
//! pattern has a budget, currently zero everywhere. The budget never grows.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    reason: &'static str,
}

const BUDGETS: &[Budget] = &[
    // Panics: a panic inside a pointer handler kills the editor for the page.
    Budget { pattern: ".unwrap()", max: 0, reason: "panics" },
    Budget { pattern: ".expect(", max: 0, reason: "panics" },
    Budget { pattern: "panic!(", max: 0, reason: "panics" },
    Budget { pattern: "unreachable!(", max: 0, reason: "panics" },
    Budget { pattern: "todo!(", max: 0, reason: "unfinished stub" },
    Budget { pattern: "unimplemented!(", max: 0, reason: "unfinished stub" },
    // Silent loss.
    Budget { pattern: "let _ =", max: 0, reason: "discards a result without inspecting it" },
    Budget { pattern: ".ok()", max: 0, reason: "discards an error without logging it" },
    // Structure.
    Budget { pattern: "#[allow(dead_code)]", max: 0, reason: "hides unused code" },
    Budget { pattern: "unsafe ", max: 0, reason: "no unsafe in a DOM binding crate" },
];

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

#[test]
fn sources_were_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("editor.rs")), "hygiene scan found no sources under src/");
}

#[test]
fn pattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let hits = hits(&files, budget.pattern);
        let count: usize = hits.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let detail = hits.iter().map(|(path, c)| format!("    {path}: {c}")).collect::<Vec<_>>().join("\n");
            failures.push(format!(
                "`{}` budget exceeded ({}): found {count}, max {}\n{detail}",
                budget.pattern, budget.reason, budget.max
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn every_test_module_is_wired() {
    // A sibling `foo_test.rs` that nothing includes would silently never run.
    let mut all = Vec::new();
    collect_all(Path::new("src"), &mut all);
    let sources: Vec<&String> = all.iter().map(|(_, content)| content).collect();
    for (path, _) in all.iter().filter(|(p, _)| p.ends_with("_test.rs")) {
        let Some(name) = Path::new(path).file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        let needle = format!("#[path = \"{name}\"]");
        assert!(sources.iter().any(|s| s.contains(&needle)), "{path} is not included by any module");
    }
}

fn collect_all(dir: &Path, out: &mut Vec<(String, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_all(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path.to_string_lossy().to_string(), content));
            }
        }
    }
}

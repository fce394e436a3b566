//! Source hygiene for the library and binary.
//!
//! Walks `src/` (skipping `*_test.rs` and the test doubles) and counts
//! constructs that panic or swallow errors. Every pattern has a fixed budget.

use std::fs;
use std::path::{Path, PathBuf};

/// `(pattern, budget, note)`. The `.ok()` pair are the optional env lookup in
/// `config.rs` and the optional `.env` load in `main.rs`.
const BUDGETS: &[(&str, usize, &str)] = &[
    (".unwrap()", 0, "propagate with `?` instead"),
    (".expect(", 0, "propagate with `?` instead"),
    ("panic!(", 0, "return an error instead"),
    ("todo!(", 0, "finish the stub"),
    ("let _ =", 0, "inspect or log the discarded value"),
    (".ok()", 2, "only for genuinely optional inputs"),
    ("#[allow(dead_code)]", 0, "delete the dead code"),
];

fn production_sources(dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            production_sources(&path, out);
            continue;
        }
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        let is_rust = name.ends_with(".rs");
        let is_test_only = name.ends_with("_test.rs") || name == "testing.rs";
        if is_rust && !is_test_only {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path, content));
            }
        }
    }
}

#[test]
fn panicking_and_swallowing_constructs_stay_within_budget() {
    let mut files = Vec::new();
    production_sources(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no sources found under src/");

    let mut report = Vec::new();
    for &(pattern, budget, note) in BUDGETS {
        let hits: Vec<String> = files
            .iter()
            .flat_map(|(path, content)| {
                content
                    .lines()
                    .enumerate()
                    .filter(|(_, line)| line.contains(pattern))
                    .map(move |(n, _)| format!("    {}:{}", path.display(), n + 1))
            })
            .collect();
        if hits.len() > budget {
            report.push(format!("`{pattern}`: {} found, budget {budget} ({note})\n{}", hits.len(), hits.join("\n")));
        }
    }

    assert!(report.is_empty(), "hygiene budget exceeded:\n{}", report.join("\n"));
}

//! Architecture enforcement tests.
//!
//! Navigation state has a single writer: the engine. Presenters and CLI
//! commands observe it through `StateReader` and never talk to the host
//! directly. These tests catch violations in CI.

use std::fs;
use std::path::{Path, PathBuf};

/// Patterns that write to a watch channel.
const STATE_WRITES: &[&str] = &["send_modify", "send_if_modified", "watch::Sender<NavigationState>"];

fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).expect("Failed to read directory") {
        let path = entry.expect("Failed to read entry").path();
        if path.is_dir() {
            files.extend(rust_files(&path));
        } else if path.extension().is_some_and(|e| e == "rs") {
            files.push(path);
        }
    }
    files
}

/// Source text before the unit test module, if any.
fn non_test_source(path: &Path) -> String {
    let content =
        fs::read_to_string(path).unwrap_or_else(|_| panic!("Failed to read {}", path.display()));
    match content.find("#[cfg(test)]") {
        Some(idx) => content[..idx].to_string(),
        None => content,
    }
}

#[test]
fn only_engine_writes_navigation_state() {
    let mut violations = Vec::new();

    for path in rust_files(Path::new("src")) {
        if path.starts_with("src/engine") {
            continue;
        }
        let source = non_test_source(&path);
        for pattern in STATE_WRITES {
            if source.contains(pattern) {
                violations.push(format!("{}: uses {}", path.display(), pattern));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Navigation state written outside the engine:\n{}",
        violations.join("\n")
    );
}

#[test]
fn presenters_do_not_call_the_host() {
    let mut violations = Vec::new();

    for path in rust_files(Path::new("src/present")) {
        let source = non_test_source(&path);
        if source.contains("crate::host") {
            violations.push(path.display().to_string());
        }
    }

    assert!(
        violations.is_empty(),
        "Presenter modules must observe state, not drive the host:\n{}",
        violations.join("\n")
    );
}

#[test]
fn commands_do_not_mutate_state_directly() {
    let mut violations = Vec::new();

    for path in rust_files(Path::new("src/cli/commands")) {
        let source = non_test_source(&path);
        if source.contains("notify_route_changed") {
            violations.push(format!(
                "{}: commands navigate through navigate_to only",
                path.display()
            ));
        }
    }

    assert!(violations.is_empty(), "{}", violations.join("\n"));
}

//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles
//! on the chat core's production code:
//! - No blocking I/O inside async functions
//! - No sleeping or retry loops (one request, one outcome)
//!
//! The helpers here do a line-based scan. They are deliberately simple and
//! only need to be good enough to catch violations early.

use std::fs;
use std::path::{Path, PathBuf};

/// Production source directories that are scanned
pub fn production_dirs() -> Vec<PathBuf> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    vec![root.join("chat/core/src")]
}

/// A single offending line
#[derive(Debug)]
pub struct Violation {
    /// File containing the line
    pub path: PathBuf,
    /// 1-based line number
    pub line_number: usize,
    /// What rule was broken
    pub kind: &'static str,
    /// The offending line, trimmed
    pub line: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} - {}: {}",
            self.path.display(),
            self.line_number,
            self.kind,
            self.line
        )
    }
}

/// Run `check` over every production line that is not test code
///
/// `check` receives the file's lines, the index of the line being examined
/// and the code part of that line (comments stripped). It returns the
/// violation kind, if any.
pub fn scan<F>(check: F) -> Vec<Violation>
where
    F: Fn(&[&str], usize, &str) -> Option<&'static str>,
{
    let mut violations = Vec::new();

    for dir in production_dirs() {
        assert!(dir.exists(), "missing source directory {}", dir.display());

        for entry in walkdir::WalkDir::new(&dir)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.path().extension().and_then(|s| s.to_str()) != Some("rs") {
                continue;
            }
            let Ok(content) = fs::read_to_string(entry.path()) else {
                continue;
            };
            let lines: Vec<&str> = content.lines().collect();
            let test_start = test_module_start(&lines);

            for (idx, line) in lines.iter().enumerate() {
                if test_start.is_some_and(|start| idx >= start) {
                    break;
                }
                if is_in_test_function(&lines, idx) {
                    continue;
                }

                let code_part = line.split("//").next().unwrap_or(line);
                if let Some(kind) = check(&lines, idx, code_part) {
                    violations.push(Violation {
                        path: entry.path().to_path_buf(),
                        line_number: idx + 1,
                        kind,
                        line: line.trim().to_string(),
                    });
                }
            }
        }
    }

    violations
}

/// Index of the `#[cfg(test)]` line that opens the file's test module
pub fn test_module_start(lines: &[&str]) -> Option<usize> {
    lines.iter().enumerate().find_map(|(idx, line)| {
        let next = lines.get(idx + 1).map_or("", |l| l.trim());
        (line.trim() == "#[cfg(test)]" && next.starts_with("mod ")).then_some(idx)
    })
}

/// Check if line is inside a test function
pub fn is_in_test_function(lines: &[&str], current_idx: usize) -> bool {
    // Scan backwards to find the enclosing function
    let mut found_fn_idx = None;
    for i in (0..current_idx).rev() {
        let line = lines[i].trim();

        if line.starts_with("fn ") || line.contains(" fn ") {
            found_fn_idx = Some(i);
            break;
        }

        // Stop at module boundaries
        if line.starts_with("mod ") || (line.starts_with("impl ") && line.contains('{')) {
            return false;
        }
    }

    // If we found a function, check if it has a test marker
    if let Some(fn_idx) = found_fn_idx {
        for i in (0..fn_idx).rev() {
            let line = lines[i].trim();

            if line.starts_with("#[test]")
                || line.starts_with("#[tokio::test")
                || line.starts_with("#[cfg(test)]")
            {
                return true;
            }

            // Stop if we hit another function or boundary
            if line.starts_with("fn ") || line.starts_with("mod ") || line.starts_with("impl ") {
                break;
            }
        }
    }

    false
}

/// Check if line is inside an async function
pub fn is_in_async_function(lines: &[&str], current_idx: usize) -> bool {
    for i in (0..=current_idx).rev() {
        let line = lines[i].trim();

        if line.contains("async fn ") {
            return true;
        }

        if (line.starts_with("fn ") || line.contains(" fn ")) && !line.contains("async") {
            return false;
        }

        // Stop at module/impl boundaries
        if line.starts_with("mod ") || (line.starts_with("impl ") && line.contains('{')) {
            return false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_async_function_detection() {
        let code = vec![
            "async fn bad_function() {",
            "    let contents = std::fs::read_to_string(\"file.txt\")?;",
            "}",
        ];
        assert!(is_in_async_function(&code, 1));

        let code = vec![
            "pub fn load() {",
            "    let contents = std::fs::read_to_string(\"config.toml\")?;",
            "}",
        ];
        assert!(!is_in_async_function(&code, 1));
    }

    #[test]
    fn test_test_function_detection() {
        let code = vec![
            "#[test]",
            "fn test_something() {",
            "    std::thread::sleep(d);",
            "}",
        ];
        assert!(is_in_test_function(&code, 2));
    }

    #[test]
    fn test_test_module_start() {
        let code = vec!["fn a() {}", "", "#[cfg(test)]", "mod tests {", "}"];
        assert_eq!(test_module_start(&code), Some(2));
        assert_eq!(test_module_start(&code[..2]), None);
    }

    #[test]
    fn test_production_dirs_exist() {
        for dir in production_dirs() {
            assert!(dir.exists(), "{} not found", dir.display());
        }
    }
}

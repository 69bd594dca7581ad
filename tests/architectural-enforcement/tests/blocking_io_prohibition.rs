//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: The chat core runs on the surface's event loop. Async code in
//! it MUST NOT block that loop.
//! **Required**: `tokio::fs`, `tokio::net`, `tokio::io`, async `reqwest`.
//! **Acceptable**: Blocking calls in plain (non-async) functions, such as
//! loading the config file before the session starts.

use architectural_enforcement::{is_in_async_function, scan};

#[test]
fn test_no_blocking_io_in_async_code() {
    let violations = scan(|lines, idx, code| {
        if code.contains("reqwest::blocking") {
            return Some("Blocking HTTP client");
        }
        if code.contains("std::thread::sleep") {
            return Some("Thread sleep");
        }
        if !is_in_async_function(lines, idx) {
            return None;
        }
        if code.contains("std::fs::") {
            Some("Blocking file I/O in async")
        } else if code.contains("std::net::") {
            Some("Blocking network I/O in async")
        } else if code.contains("std::io::stdin()") || code.contains("std::io::stdout()") {
            Some("Blocking stdin/stdout in async")
        } else if code.contains("std::process::Command") {
            Some("Blocking process I/O in async")
        } else {
            None
        }
    });

    if !violations.is_empty() {
        eprintln!("\nBlocking calls found in async production code:\n");
        for violation in &violations {
            eprintln!("  {violation}");
        }
        panic!(
            "\nFound {} blocking I/O violation(s) in production code.",
            violations.len()
        );
    }
}

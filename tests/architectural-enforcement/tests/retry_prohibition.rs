//! Integration Test: Retry Prohibition
//!
//! **Policy**: One submission is one request. A failed request is terminal for
//! that submission; recovery only happens when the user submits again.
//! Production code MUST NOT sleep, back off, or loop around a send.
//!
//! Timeouts (`tokio::time::timeout`, client timeouts) are allowed; they bound
//! a request, they do not repeat it.

use architectural_enforcement::scan;

#[test]
fn test_no_sleep_or_backoff_in_production_code() {
    let violations = scan(|_, _, code| {
        let lowered = code.to_lowercase();
        if code.contains("time::sleep") || code.contains("thread::sleep") {
            Some("Sleep call")
        } else if code.contains("time::interval") {
            Some("Polling interval")
        } else if lowered.contains("backoff") || lowered.contains("retry") {
            Some("Retry logic")
        } else {
            None
        }
    });

    if !violations.is_empty() {
        eprintln!("\nRetry or sleep found in production code:\n");
        for violation in &violations {
            eprintln!("  {violation}");
        }
        panic!(
            "\nFound {} retry violation(s) in production code.",
            violations.len()
        );
    }
}

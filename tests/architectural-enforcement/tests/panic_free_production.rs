//! Integration Test: No unwrap()/expect() in Production Code
//!
//! **Policy**: Errors propagate with `?` or are handled. Panicking shortcuts
//! belong in tests only.

use architectural_enforcement::find_violations;

#[test]
fn test_no_unwrap_or_expect() {
    let mut violations = Vec::new();
    for dir in ["core/src", "tui/src"] {
        violations.extend(find_violations(dir, |line| {
            line.text.contains(".unwrap()") || line.text.contains(".expect(")
        }));
    }

    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        panic!(
            "\nFound {} unwrap()/expect() call(s) in production code.",
            violations.len()
        );
    }
}

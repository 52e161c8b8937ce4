//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT call sleep methods. Timers are
//! deadlines waited on with `sleep_until`, never fixed pauses.
//! **Exceptions**: Frame rate limiting in `tui/src/app.rs`, test code.

use architectural_enforcement::{find_violations, SourceLine};

fn is_sleep(line: &SourceLine) -> bool {
    line.text.contains("::sleep(") || line.text.contains(".sleep(")
}

#[test]
fn test_no_sleep_in_core() {
    let violations = find_violations("core/src", is_sleep);
    report(&violations);
}

#[test]
fn test_tui_sleeps_only_for_frames() {
    let violations = find_violations("tui/src", |line| {
        let frame_tick =
            line.file.ends_with("tui/src/app.rs") && line.text.contains("FRAME_DURATION");
        is_sleep(line) && !frame_tick
    });
    report(&violations);
}

#[test]
fn test_no_blocking_thread_sleep_anywhere() {
    for dir in ["core/src", "tui/src"] {
        let violations = find_violations(dir, |line| line.text.contains("thread::sleep"));
        report(&violations);
    }
}

fn report(violations: &[SourceLine]) {
    if violations.is_empty() {
        return;
    }

    eprintln!("\n❌ CRITICAL: Sleep calls found in production code!\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }
    eprintln!("\n✅ ACCEPTABLE: sleep_until on a known deadline, frame ticks in the TUI");

    panic!(
        "\nFound {} sleep violation(s) in production code.\nFix these before merging!",
        violations.len()
    );
}

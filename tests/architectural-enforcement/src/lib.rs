//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The core stays headless (no terminal UI crates)
//! - No sleep() calls in production code outside the TUI frame loop
//! - No unwrap()/expect() in production code
//!
//! The helpers here walk the workspace sources and hand each test the
//! production part of every file: comment lines are dropped, and scanning
//! stops at the first `#[cfg(test)]`.

use std::fs;
use std::path::{Path, PathBuf};

/// A line of production code
#[derive(Debug, Clone)]
pub struct SourceLine {
    /// File the line came from, relative to the workspace root
    pub file: PathBuf,
    /// 1-based line number
    pub number: usize,
    /// Line text
    pub text: String,
}

impl std::fmt::Display for SourceLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.file.display(), self.number, self.text.trim())
    }
}

/// Workspace root (two levels above this crate)
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

/// Every `.rs` file under `dir` (relative to the workspace root)
#[must_use]
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let root = workspace_root();
    let path = root.join(dir);
    if !path.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(&path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Production lines of one file
#[must_use]
pub fn production_lines(path: &Path) -> Vec<SourceLine> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };
    let root = workspace_root();
    let file = path.strip_prefix(&root).unwrap_or(path).to_path_buf();

    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.contains("#[cfg(test)]"))
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .map(|(idx, line)| SourceLine {
            file: file.clone(),
            number: idx + 1,
            text: line.split("//").next().unwrap_or(line).to_string(),
        })
        .collect()
}

/// Production lines under `dir` matching `predicate`
#[must_use]
pub fn find_violations<F>(dir: &str, predicate: F) -> Vec<SourceLine>
where
    F: Fn(&SourceLine) -> bool,
{
    rust_files(dir)
        .iter()
        .flat_map(|path| production_lines(path))
        .filter(|line| predicate(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_has_members() {
        let root = workspace_root();
        assert!(root.join("core").join("Cargo.toml").exists());
        assert!(root.join("tui").join("Cargo.toml").exists());
    }

    #[test]
    fn test_scan_stops_at_test_module() {
        let dir = std::env::temp_dir().join("arch-enforcement-scan");
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("sample.rs");
        fs::write(
            &file,
            concat!(
                "// comment with unwrap()\nfn a() {}\n",
                "#[cfg(test)]\nmod tests { fn b() { x.unwrap(); } }\n",
            ),
        )
        .unwrap();

        let lines = production_lines(&file);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].number, 2);
    }
}

//! Candidate-file discovery.
//!
//! Recursively walks the configured test directories to collect source files
//! matching a name suffix (`.cpp` by default), skipping entries whose names
//! start with `.` or `_` and anything matching an exclude glob. Roots that do
//! not exist are skipped silently; a test tree routinely lacks some of the
//! standard subdirectories.

use anyhow::Result;
use glob::Pattern;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Collects files under `paths` whose names end with `suffix`.
///
/// `excludes` are glob patterns matched against both the file name and the
/// full path. When `default_excludes` is set, hidden and underscore-prefixed
/// entries are pruned from the walk.
pub fn collect_test_files(
    paths: &[PathBuf],
    suffix: &str,
    excludes: &[Pattern],
    default_excludes: bool,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if !path.exists() {
            continue;
        }
        // Roots were named explicitly; the hidden/underscore filter applies
        // only to entries discovered beneath them.
        for entry in WalkDir::new(path)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !default_excludes || !is_hidden_or_underscore(e))
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name_matches = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(suffix));
            if name_matches && !is_excluded(&entry, excludes) {
                files.push(entry.into_path());
            }
        }
    }

    Ok(files)
}

fn is_hidden_or_underscore(entry: &walkdir::DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.') || s.starts_with('_'))
}

fn is_excluded(entry: &walkdir::DirEntry, excludes: &[Pattern]) -> bool {
    excludes.iter().any(|pattern| {
        entry
            .file_name()
            .to_str()
            .is_some_and(|name| pattern.matches(name))
            || pattern.matches_path(entry.path())
    })
}

/// Compiles raw exclude arguments into glob patterns.
pub fn compile_excludes(raw: &[String]) -> Result<Vec<Pattern>> {
    raw.iter()
        .map(|s| Pattern::new(s).map_err(|e| anyhow::anyhow!("Invalid exclude '{}': {}", s, e)))
        .collect()
}

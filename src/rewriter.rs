//! Conditional file rewriting.
//!
//! The filesystem half of the driver: reads a file, runs the repair engine
//! on its content, and writes the result back only when the engine reports a
//! change. Unchanged files are never rewritten, so timestamps and build
//! caches stay intact across repeated runs.

use crate::engine;
use crate::remap::RemapTable;
use anyhow::{Context, Result};
use std::path::Path;

/// Reports whether repairing `file` would change it, without writing.
pub fn check_file(file: &Path, table: &RemapTable) -> Result<bool> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    Ok(engine::repair(&content, table).changed)
}

/// Like [`check_file`], but also reports which pipeline stages fired.
///
/// Reads the file once; the flag and the trace describe the same content,
/// so they cannot disagree if the file is modified concurrently.
pub fn inspect_file(file: &Path, table: &RemapTable) -> Result<(bool, Vec<&'static str>)> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let changed = engine::repair(&content, table).changed;
    Ok((changed, engine::stage_trace(&content, table)))
}

/// Repairs `file` in place.
///
/// Returns true iff the file was modified. The write happens only when the
/// repaired text differs from what was read.
pub fn fix_file(file: &Path, table: &RemapTable) -> Result<bool> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let repair = engine::repair(&content, table);
    if repair.changed {
        std::fs::write(file, &repair.text)
            .with_context(|| format!("Failed to write {}", file.display()))?;
    }

    Ok(repair.changed)
}

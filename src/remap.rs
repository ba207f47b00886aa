//! Path remap table.
//!
//! An ordered sequence of `(old_prefix, new_prefix)` literal substitutions,
//! plus the root marker identifying the stale project layout and the
//! relative-path prefix that replaces any occurrence the table itself does
//! not cover. Table order is authoritative: a subdirectory-specific mapping
//! must be listed before a broader prefix that would otherwise shadow it.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ordered prefix substitutions applied when rewriting stale include paths.
///
/// Immutable once constructed; every file in a run sees the same table.
/// Construction validates the preconditions the repair engine's idempotence
/// guarantee rests on (no replacement may reintroduce the text it replaces).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemapTable {
    /// `(old_prefix, new_prefix)` pairs, applied in order.
    entries: Vec<(String, String)>,
    /// Stale path prefix identifying the old layout, e.g. `xpu/src/`.
    root_marker: String,
    /// Catch-all replacement for marker occurrences no entry covered.
    root_replacement: String,
}

impl RemapTable {
    /// Builds a validated table.
    ///
    /// Rejects empty patterns, entries whose replacement contains the prefix
    /// it replaces, and a root replacement containing the marker. Either
    /// defect would leave rewritten text that a second pass rewrites again.
    pub fn new(
        entries: Vec<(String, String)>,
        root_marker: impl Into<String>,
        root_replacement: impl Into<String>,
    ) -> Result<Self> {
        let table = Self {
            entries,
            root_marker: root_marker.into(),
            root_replacement: root_replacement.into(),
        };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<()> {
        if self.root_marker.is_empty() {
            bail!("root marker must not be empty");
        }
        if self.root_replacement.contains(&self.root_marker) {
            bail!(
                "root replacement '{}' contains the marker '{}'",
                self.root_replacement,
                self.root_marker
            );
        }
        for (old, _) in &self.entries {
            if old.is_empty() {
                bail!("remap entry with empty old prefix");
            }
        }
        // No replacement may contain any entry's old prefix, its own or
        // another's: a reintroduced prefix survives the pass that inserted
        // it, so a second pass rewrites the text again.
        for (old, new) in &self.entries {
            if let Some((hit, _)) = self.entries.iter().find(|(p, _)| new.contains(p.as_str())) {
                bail!(
                    "remap entry '{}' -> '{}' reintroduces the stale prefix '{}'",
                    old,
                    new,
                    hit
                );
            }
        }
        if let Some((hit, _)) = self
            .entries
            .iter()
            .find(|(p, _)| self.root_replacement.contains(p.as_str()))
        {
            bail!(
                "root replacement '{}' reintroduces the stale prefix '{}'",
                self.root_replacement,
                hit
            );
        }
        Ok(())
    }

    /// Loads a table from a JSON config file and validates it.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read remap table {}", path.display()))?;
        let table: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse remap table {}", path.display()))?;
        table.validate()?;
        Ok(table)
    }

    /// Returns a table with `entries` inserted ahead of the existing ones.
    ///
    /// Used for command-line `--map` overrides, which take precedence over
    /// config-file and default entries by coming earlier in the order.
    pub fn prepended(self, entries: Vec<(String, String)>) -> Result<Self> {
        let mut merged = entries;
        merged.extend(self.entries);
        Self::new(merged, self.root_marker, self.root_replacement)
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn root_marker(&self) -> &str {
        &self.root_marker
    }

    pub fn root_replacement(&self) -> &str {
        &self.root_replacement
    }
}

impl Default for RemapTable {
    /// The layout migration this tool was written for: test sources moved
    /// two levels below the tree root, so `xpu/src/<dir>/` becomes
    /// `../../src/<dir>/` relative to each test file.
    fn default() -> Self {
        let entries = [
            "xpuLoad",
            "xpuIn2Wav",
            "xpuPlay",
            "xpuProcess",
            "xpuQueue",
            "xpuDaemon",
            "lib",
        ]
        .iter()
        .map(|dir| (format!("xpu/src/{}/", dir), format!("../../src/{}/", dir)))
        .collect();

        Self::new(entries, "xpu/src/", "../../src/")
            .expect("default remap table is valid")
    }
}

/// Parses an `old=new` mapping argument.
pub fn parse_mapping(s: &str) -> Result<(String, String), String> {
    let parts: Vec<&str> = s.splitn(2, '=').collect();
    if parts.len() != 2 || parts[0].is_empty() {
        return Err(format!("Invalid mapping format '{}', expected 'old=new'", s));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_all_source_dirs() {
        let table = RemapTable::default();
        assert_eq!(table.entries().len(), 7);
        assert_eq!(
            table.entries()[0],
            ("xpu/src/xpuLoad/".to_string(), "../../src/xpuLoad/".to_string())
        );
        assert_eq!(table.root_marker(), "xpu/src/");
        assert_eq!(table.root_replacement(), "../../src/");
    }

    #[test]
    fn rejects_empty_marker() {
        assert!(RemapTable::new(vec![], "", "../../src/").is_err());
    }

    #[test]
    fn rejects_replacement_containing_marker() {
        let err = RemapTable::new(vec![], "xpu/src/", "old/xpu/src/").unwrap_err();
        assert!(err.to_string().contains("contains the marker"));
    }

    #[test]
    fn rejects_entry_reintroducing_its_prefix() {
        let entries = vec![("a/".to_string(), "b/a/".to_string())];
        assert!(RemapTable::new(entries, "a/", "c/").is_err());
    }

    #[test]
    fn rejects_entry_reintroducing_another_entrys_prefix() {
        // The second entry rewrites to the first entry's old prefix. Applied
        // in order, that prefix survives the pass and a second repair would
        // rewrite it again, so construction must fail.
        let entries = vec![
            ("aa/".to_string(), "bb/".to_string()),
            ("cc/".to_string(), "aa/".to_string()),
        ];
        let err = RemapTable::new(entries, "zz/", "../").unwrap_err();
        assert!(err.to_string().contains("reintroduces the stale prefix 'aa/'"));
    }

    #[test]
    fn rejects_root_replacement_containing_an_entry_prefix() {
        let entries = vec![("aa/".to_string(), "bb/".to_string())];
        let err = RemapTable::new(entries, "zz/", "aa/").unwrap_err();
        assert!(err.to_string().contains("reintroduces the stale prefix 'aa/'"));
    }

    #[test]
    fn prepended_entries_come_first() {
        let table = RemapTable::default()
            .prepended(vec![("xpu/src/extra/".to_string(), "../extra/".to_string())])
            .unwrap();
        assert_eq!(table.entries()[0].0, "xpu/src/extra/");
        assert_eq!(table.entries().len(), 8);
    }

    #[test]
    fn prepended_revalidates() {
        let bad = vec![("x/".to_string(), "y/x/".to_string())];
        assert!(RemapTable::default().prepended(bad).is_err());
    }

    #[test]
    fn json_round_trip() {
        let table = RemapTable::default();
        let json = serde_json::to_string(&table).unwrap();
        let back: RemapTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries(), table.entries());
        assert_eq!(back.root_marker(), table.root_marker());
        assert_eq!(back.root_replacement(), table.root_replacement());
    }

    #[test]
    fn parse_mapping_accepts_old_new() {
        assert_eq!(
            parse_mapping("a/=b/"),
            Ok(("a/".to_string(), "b/".to_string()))
        );
    }

    #[test]
    fn parse_mapping_rejects_missing_equals() {
        assert!(parse_mapping("nope").is_err());
        assert!(parse_mapping("=new").is_err());
    }
}

//! Include-directive repair engine.
//!
//! A pure text transformation: takes a file's content and the remap table,
//! returns the corrected content plus a `changed` flag. The repair is an
//! ordered pipeline of five stages, each consuming the previous stage's
//! output. The order is load-bearing: the quote repairs must run before the
//! bare-path quoting, and the specific prefix remaps before the root
//! catch-all, or later catch-all patterns shadow earlier corrections.

use crate::remap::RemapTable;
use regex::Regex;
use std::sync::OnceLock;

/// Result of repairing one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repair {
    /// Corrected content. Equals the input when nothing matched.
    pub text: String,
    /// True iff the corrected text differs from the input, byte for byte.
    pub changed: bool,
}

/// One pipeline stage: a named, independently testable transformation.
struct Stage {
    name: &'static str,
    apply: fn(&str, &RemapTable) -> String,
}

/// The repair pipeline, in application order.
static STAGES: [Stage; 5] = [
    Stage {
        name: "doubled-quote",
        apply: fix_doubled_quote,
    },
    Stage {
        name: "stray-trailing-quote",
        apply: fix_stray_trailing_quote,
    },
    Stage {
        name: "missing-quotes",
        apply: fix_missing_quotes,
    },
    Stage {
        name: "remap-prefixes",
        apply: apply_remap_entries,
    },
    Stage {
        name: "remap-root",
        apply: apply_root_catch_all,
    },
];

/// Repairs include directives in `content` against `table`.
///
/// Total over arbitrary text: content without include directives passes
/// through untouched. `changed` is computed once, as a whole-text comparison
/// against the original, not per stage; a stage that rewrites a span to its
/// original bytes does not count as a change.
pub fn repair(content: &str, table: &RemapTable) -> Repair {
    let (text, _) = run_pipeline(content, table);
    let changed = text != content;
    Repair { text, changed }
}

/// Returns the names of the stages whose output differed from their input.
///
/// Diagnostic companion to [`repair`]; the result feeds verbose reporting
/// and carries no contract beyond stage naming.
pub fn stage_trace(content: &str, table: &RemapTable) -> Vec<&'static str> {
    run_pipeline(content, table).1
}

fn run_pipeline(content: &str, table: &RemapTable) -> (String, Vec<&'static str>) {
    let mut text = content.to_string();
    let mut fired = Vec::new();

    for stage in &STAGES {
        let next = (stage.apply)(&text, table);
        if next != text {
            fired.push(stage.name);
        }
        text = next;
    }

    (text, fired)
}

/// Stage 1: `#include "path.h""` with an extra quote glued onto the closing
/// quote. `[^"]+` keeps the match to the shortest plausible path, so two
/// directives on nearby lines are never merged into one match.
fn fix_doubled_quote(text: &str, _table: &RemapTable) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"#include\s+"([^"]+)"""#).expect("doubled-quote pattern compiles")
    });
    re.replace_all(text, "#include \"${1}\"").into_owned()
}

/// Stage 2: a stray quote separated from the directive by spaces or tabs,
/// e.g. `#include "path.h"  "`. Whitespace is non-newline only, so a quote
/// opening a directive on the next line is never consumed. Runs on stage 1
/// output and is a no-op on text stage 1 already fixed.
fn fix_stray_trailing_quote(text: &str, _table: &RemapTable) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"#include\s+"([^"]+)"[ \t]*""#).expect("stray-quote pattern compiles")
    });
    re.replace_all(text, "#include \"${1}\"").into_owned()
}

/// Stage 3: a bare, unquoted path starting with the root marker, e.g.
/// `#include xpu/src/lib/foo.h`, wrapped in double quotes. Quoted
/// directives never match because a quote follows the whitespace, not the
/// marker.
fn fix_missing_quotes(text: &str, table: &RemapTable) -> String {
    let pattern = format!(r"#include\s+({}\S+)", regex::escape(table.root_marker()));
    let re = Regex::new(&pattern).expect("escaped marker pattern compiles");
    re.replace_all(text, "#include \"${1}\"").into_owned()
}

/// Stage 4: the table's `(old, new)` entries as verbatim substring
/// replacements, in table order. Specific prefixes listed earlier win over
/// broader ones; the engine applies, it does not rank.
fn apply_remap_entries(text: &str, table: &RemapTable) -> String {
    let mut result = text.to_string();
    for (old, new) in table.entries() {
        result = result.replace(old, new);
    }
    result
}

/// Stage 5: any marker occurrence the table did not cover becomes the root
/// replacement, so no stale root path survives the pipeline.
fn apply_root_catch_all(text: &str, table: &RemapTable) -> String {
    text.replace(table.root_marker(), table.root_replacement())
}

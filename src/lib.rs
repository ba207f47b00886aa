//! incfix library for repairing broken `#include` directives.
//!
//! This library provides programmatic access to the include-repair
//! functionality. The core workflow involves three phases:
//!
//! 1. **Scanning**: Collect candidate source files by name suffix
//! 2. **Repair**: Run each file's content through the staged repair pipeline
//! 3. **Rewriting**: Write corrected content back, only when it changed
//!
//! The repair engine itself is a pure function over text; all filesystem
//! work lives in [`scanner`] and [`rewriter`].
//!
//! # Example
//!
//! ```no_run
//! use incfix::{engine, remap::RemapTable, rewriter, scanner};
//! use std::path::PathBuf;
//!
//! let table = RemapTable::default();
//!
//! // Repair text directly
//! let out = engine::repair("#include \"xpu/src/lib/foo.h\"\"", &table);
//! assert!(out.changed);
//!
//! // Or walk a test tree and fix files in place
//! let files = scanner::collect_test_files(&[PathBuf::from("tests")], ".cpp", &[], true).unwrap();
//! for file in &files {
//!     if rewriter::fix_file(file, &table).unwrap() {
//!         println!("Fixed: {}", file.display());
//!     }
//! }
//! ```

pub mod cli;
pub mod engine;
pub mod remap;
pub mod rewriter;
pub mod scanner;

// Re-export commonly used types at crate root
pub use engine::{Repair, repair};
pub use remap::RemapTable;

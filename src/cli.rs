//! Command-line interface definitions.
//!
//! Defines the argument parser and subcommands using clap's derive API.
//! Each subcommand corresponds to a distinct operation: reporting files
//! whose includes need repair, fixing them in place, printing the effective
//! remap table, or listing scan targets.

use crate::remap::parse_mapping;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Repair malformed and stale #include directives in C++ test sources.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan files and report which ones the repair engine would change.
    Check {
        /// Directories to scan. Defaults to current directory.
        #[arg(short, long)]
        paths: Option<Vec<PathBuf>>,

        /// File-name suffix selecting candidate files.
        #[arg(long, default_value = ".cpp")]
        suffix: String,

        /// Glob patterns for files/directories to exclude (e.g. "*.generated.cpp").
        /// By default, entries starting with `.` or `_` are excluded.
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Disable default exclusion of `.` and `_` prefixed entries.
        #[arg(long)]
        no_default_excludes: bool,

        /// JSON file holding the remap table. Defaults to the built-in table.
        #[arg(long)]
        table: Option<PathBuf>,

        /// Extra remap entries in `old=new` format, tried before the table's own.
        #[arg(long, value_parser = parse_mapping)]
        map: Vec<(String, String)>,

        /// Emit JSON instead of human-readable output.
        #[arg(long)]
        json: bool,

        /// Print per-file stage diagnostics to stderr.
        #[arg(short, long)]
        verbose: bool,
    },

    /// Repair files in place, writing only those that change.
    Fix {
        /// Interactively confirm each file before writing.
        #[arg(short, long)]
        interactive: bool,

        /// Directories to scan. Defaults to current directory.
        #[arg(short, long)]
        paths: Option<Vec<PathBuf>>,

        /// File-name suffix selecting candidate files.
        #[arg(long, default_value = ".cpp")]
        suffix: String,

        /// Glob patterns for files/directories to exclude (e.g. "*.generated.cpp").
        /// By default, entries starting with `.` or `_` are excluded.
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Disable default exclusion of `.` and `_` prefixed entries.
        #[arg(long)]
        no_default_excludes: bool,

        /// JSON file holding the remap table. Defaults to the built-in table.
        #[arg(long)]
        table: Option<PathBuf>,

        /// Extra remap entries in `old=new` format, tried before the table's own.
        #[arg(long, value_parser = parse_mapping)]
        map: Vec<(String, String)>,
    },

    /// Print the effective remap table.
    Table {
        /// JSON file holding the remap table. Defaults to the built-in table.
        #[arg(long)]
        table: Option<PathBuf>,

        /// Extra remap entries in `old=new` format, tried before the table's own.
        #[arg(long, value_parser = parse_mapping)]
        map: Vec<(String, String)>,

        /// Emit JSON instead of human-readable output.
        #[arg(long)]
        json: bool,
    },

    /// List files that would be scanned without processing them.
    Scan {
        /// Directories to scan. Defaults to current directory.
        #[arg(short, long)]
        paths: Option<Vec<PathBuf>>,

        /// File-name suffix selecting candidate files.
        #[arg(long, default_value = ".cpp")]
        suffix: String,

        /// Glob patterns for files/directories to exclude (e.g. "*.generated.cpp").
        /// By default, entries starting with `.` or `_` are excluded.
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Disable default exclusion of `.` and `_` prefixed entries.
        #[arg(long)]
        no_default_excludes: bool,
    },
}

//! incfix: repair malformed and stale #include directives in test sources.
//!
//! After the source tree moved under `src/`, test files were left with
//! includes pointing at the old `xpu/src/...` layout, some with corrupted
//! quoting. This tool scans the test directories, repairs each file's
//! include directives through a staged pipeline, and rewrites only the
//! files that actually change.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use dialoguer::Confirm;
use glob::Pattern;
use incfix::cli::{Args, Commands};
use incfix::remap::RemapTable;
use incfix::{rewriter, scanner};
use serde::Serialize;
use std::path::PathBuf;

/// Per-file outcome for JSON reporting.
#[derive(Debug, Serialize)]
struct FileReport {
    file: PathBuf,
    changed: bool,
}

/// Summary of a check or fix run.
#[derive(Debug, Serialize)]
struct Diagnostics {
    files_scanned: usize,
    files_changed: usize,
}

#[derive(Debug, Serialize)]
struct RunReport {
    files: Vec<FileReport>,
    diagnostics: Diagnostics,
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Check {
            paths,
            suffix,
            exclude,
            no_default_excludes,
            table,
            map,
            json,
            verbose,
        } => {
            let table = resolve_table(table, map)?;
            let files = discover(paths, &suffix, &exclude, no_default_excludes)?;
            cmd_check(&files, &table, json, verbose)
        }
        Commands::Fix {
            interactive,
            paths,
            suffix,
            exclude,
            no_default_excludes,
            table,
            map,
        } => {
            let table = resolve_table(table, map)?;
            let files = discover(paths, &suffix, &exclude, no_default_excludes)?;
            cmd_fix(&files, &table, interactive)
        }
        Commands::Table { table, map, json } => {
            let table = resolve_table(table, map)?;
            cmd_table(&table, json)
        }
        Commands::Scan {
            paths,
            suffix,
            exclude,
            no_default_excludes,
        } => {
            let files = discover(paths, &suffix, &exclude, no_default_excludes)?;
            cmd_scan(&files)
        }
    }
}

/// Builds the effective remap table: config file or built-in defaults, with
/// `--map` entries inserted ahead of both.
fn resolve_table(path: Option<PathBuf>, overrides: Vec<(String, String)>) -> Result<RemapTable> {
    let base = match path {
        Some(p) => RemapTable::load(&p)?,
        None => RemapTable::default(),
    };
    if overrides.is_empty() {
        Ok(base)
    } else {
        base.prepended(overrides)
    }
}

fn discover(
    paths: Option<Vec<PathBuf>>,
    suffix: &str,
    exclude: &[String],
    no_default_excludes: bool,
) -> Result<Vec<PathBuf>> {
    let scan_paths = paths.unwrap_or_else(|| vec![PathBuf::from(".")]);
    let excludes: Vec<Pattern> = scanner::compile_excludes(exclude)?;
    scanner::collect_test_files(&scan_paths, suffix, &excludes, !no_default_excludes)
}

fn cmd_check(files: &[PathBuf], table: &RemapTable, json: bool, verbose: bool) -> Result<()> {
    let mut reports = Vec::new();

    for file in files {
        let (changed, fired) = rewriter::inspect_file(file, table)?;
        if changed && verbose {
            eprintln!(
                "{} {}: stages {}",
                "info:".blue().bold(),
                file.display(),
                fired.join(", ")
            );
        }
        reports.push(FileReport {
            file: file.clone(),
            changed,
        });
    }

    let diagnostics = Diagnostics {
        files_scanned: reports.len(),
        files_changed: reports.iter().filter(|r| r.changed).count(),
    };

    if json {
        let report = RunReport {
            files: reports,
            diagnostics,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if diagnostics.files_changed == 0 {
        println!(
            "{} All {} files have clean includes",
            "ok:".green().bold(),
            diagnostics.files_scanned
        );
        return Ok(());
    }

    println!(
        "\n{} {} of {} file(s) need repair:\n",
        "Found".red().bold(),
        diagnostics.files_changed,
        diagnostics.files_scanned
    );
    for report in reports.iter().filter(|r| r.changed) {
        println!("  {}", report.file.display());
    }
    println!("\n{} Run `incfix fix` to repair them", "hint:".cyan().bold());

    Ok(())
}

fn cmd_fix(files: &[PathBuf], table: &RemapTable, interactive: bool) -> Result<()> {
    let mut scanned = 0;
    let mut fixed = Vec::new();

    for file in files {
        scanned += 1;

        if interactive {
            if !rewriter::check_file(file, table)? {
                continue;
            }
            let confirmed = Confirm::new()
                .with_prompt(format!("Repair {}?", file.display()))
                .default(true)
                .interact()?;
            if !confirmed {
                println!("{} Skipped {}", "info:".blue().bold(), file.display());
                continue;
            }
        }

        if rewriter::fix_file(file, table)? {
            println!("{} {}", "Fixed:".green().bold(), file.display());
            fixed.push(file.clone());
        }
    }

    if fixed.is_empty() {
        println!("{} No changes needed in {} files", "ok:".green().bold(), scanned);
    } else {
        println!(
            "\n{} Repaired {} of {} files",
            "done:".green().bold(),
            fixed.len(),
            scanned
        );
    }

    Ok(())
}

fn cmd_table(table: &RemapTable, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(table)?);
        return Ok(());
    }

    for (old, new) in table.entries() {
        println!("  {} {} {}", old.red(), "->".dimmed(), new.green());
    }
    println!(
        "  {} {} {} {}",
        table.root_marker().red(),
        "->".dimmed(),
        table.root_replacement().green(),
        "(catch-all)".dimmed()
    );

    Ok(())
}

fn cmd_scan(files: &[PathBuf]) -> Result<()> {
    println!("Would scan {} files:", files.len());
    for file in files {
        println!("  {}", file.display());
    }

    Ok(())
}

//! # codestat
//!
//! A CLI tool that counts code, comment and blank lines under a directory and
//! breaks the totals down by file category and by directory.
//!
//! ## Overview
//!
//! codestat is built on top of codestatlib. It walks the tree, skips build
//! output and version-control directories, classifies every file by
//! extension and prints a fixed-width report. A JSON export with per-file
//! details can be written alongside it.
//!
//! ## Usage
//!
//! ```bash
//! # Report on the current directory
//! codestat
//!
//! # Save the report and a JSON export
//! codestat ./project -o report.txt --json stats.json
//!
//! # Count Markdown and text files too
//! codestat ./project --include-docs
//!
//! # Skip generated sources, show the 50 largest files
//! codestat ./project -e "gen/**" --top 50
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use codestatlib::{
    count_directory, export_json, render_report, CodestatError, CountOptions, ExcludeConfig,
    ReportQuerySet, DEFAULT_TOP_FILES,
};
use console::style;
use tracing::Level;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("codestat")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Count code, comment and blank lines by file type and directory")
        .arg(
            Arg::new("path")
                .help("Directory to analyze (defaults to current directory)")
                .value_parser(value_parser!(PathBuf))
                .default_value("."),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Write the text report to FILE instead of stdout"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Export detailed statistics as JSON to FILE"),
        )
        .arg(
            Arg::new("include-docs")
                .long("include-docs")
                .action(ArgAction::SetTrue)
                .help("Also count documentation files (.md, .txt, .rst)"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .value_name("GLOB")
                .action(ArgAction::Append)
                .help("Exclude files matching glob pattern (can be specified multiple times)"),
        )
        .arg(
            Arg::new("top")
                .long("top")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Number of files in the largest-files table [default: 20]"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet")
                .help("Log every analyzed file and show full error details"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only log warnings and errors"),
        )
}

fn init_logging(matches: &ArgMatches) {
    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else if matches.get_flag("quiet") {
        Level::WARN
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Install a Ctrl-C handler that raises the returned flag.
fn interrupt_flag() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&flag);
    if let Err(e) = ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst)) {
        tracing::warn!("could not install interrupt handler: {}", e);
    }
    flag
}

fn build_exclude(matches: &ArgMatches) -> anyhow::Result<ExcludeConfig> {
    let patterns: Vec<&str> = matches
        .get_many::<String>("exclude")
        .map(|v| v.map(|s| s.as_str()).collect())
        .unwrap_or_default();
    Ok(ExcludeConfig::new().exclude_many(&patterns)?)
}

fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

fn run(matches: &ArgMatches, interrupt: Arc<AtomicBool>) -> anyhow::Result<()> {
    let root = matches
        .get_one::<PathBuf>("path")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let include_docs = matches.get_flag("include-docs");
    let top = matches
        .get_one::<usize>("top")
        .copied()
        .unwrap_or(DEFAULT_TOP_FILES);

    let shown = fs::canonicalize(&root).unwrap_or_else(|_| root.clone());
    tracing::info!("Scanning {}", shown.display());
    tracing::info!(
        "Documentation files: {}",
        if include_docs { "included" } else { "skipped" }
    );

    let options = CountOptions::new()
        .include_docs(include_docs)
        .exclude(build_exclude(matches)?)
        .interrupt(interrupt);
    let result = count_directory(&root, &options)?;

    if result.skipped > 0 {
        tracing::warn!("{} files could not be read and were skipped", result.skipped);
    }

    let report = render_report(&ReportQuerySet::from_result(&result, top));
    match matches.get_one::<PathBuf>("output") {
        Some(path) => {
            write_file(path, &report)?;
            tracing::info!("Report saved to {}", path.display());
        }
        None => print!("{}", report),
    }

    if let Some(path) = matches.get_one::<PathBuf>("json") {
        write_file(path, &export_json(&result)?)?;
        tracing::info!("JSON exported to {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(&matches);
    let verbose = matches.get_flag("verbose");

    match run(&matches, interrupt_flag()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if matches!(
                e.downcast_ref::<CodestatError>(),
                Some(CodestatError::Interrupted)
            ) {
                eprintln!("{}", style("Interrupted").yellow().for_stderr());
            } else if verbose {
                eprintln!("{} {:?}", style("Error:").red().bold().for_stderr(), e);
            } else {
                eprintln!("{} {:#}", style("Error:").red().bold().for_stderr(), e);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_valid() {
        build_command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let matches = build_command().get_matches_from(["codestat"]);
        assert_eq!(
            matches.get_one::<PathBuf>("path"),
            Some(&PathBuf::from("."))
        );
        assert_eq!(matches.get_one::<usize>("top"), None);
        assert!(!matches.get_flag("include-docs"));
    }

    #[test]
    fn test_repeated_excludes() {
        let matches =
            build_command().get_matches_from(["codestat", "src", "-e", "gen/*", "-e", "*.pb.cc"]);
        assert!(build_exclude(&matches).is_ok());

        let bad = build_command().get_matches_from(["codestat", "-e", "[oops"]);
        assert!(build_exclude(&bad).is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = build_command().try_get_matches_from(["codestat", "-v", "-q"]);
        assert!(result.is_err());
    }
}

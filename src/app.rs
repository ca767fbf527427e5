// Declare modules
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::BufWriter;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::OutputGenerator;
use self::models::{ScanOutcome, AUTO_EXCLUDES};
use self::scanner::Scanner;

fn joined(items: &BTreeSet<String>) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Parses the command line and runs once.
pub fn run(interrupt: Arc<AtomicBool>) -> Result<ScanOutcome> {
    run_with(Cli::parse(), interrupt)
}

/// Scans, writes the tree file, then writes the bundle file.
pub fn run_with(args: Cli, interrupt: Arc<AtomicBool>) -> Result<ScanOutcome> {
    let config = resolve_config(args)?;

    let extra: BTreeSet<String> = config
        .excludes
        .iter()
        .filter(|name| !AUTO_EXCLUDES.contains(&name.as_str()))
        .cloned()
        .collect();

    log::info!("Root: {}", config.root.display());
    log::info!("Tree file: {}", config.tree_output.display());
    log::info!("Bundle file: {}", config.bundle_output.display());
    log::info!("Auto excludes: {}", AUTO_EXCLUDES.join(", "));
    log::info!("Extra excludes: {}", joined(&extra));
    log::info!("Ignore globs: {}", joined(&config.ignore_globs));
    log::info!("Extensions: {}", joined(&config.allowed_exts));
    log::info!("Include names: {}", joined(&config.include_names));

    let outcome = Scanner::new(&config)
        .with_interrupt(Arc::clone(&interrupt))
        .scan()?;

    fs::write(
        &config.tree_output,
        OutputGenerator::generate_tree(&outcome.lines),
    )
    .with_context(|| format!("Failed to write {}", config.tree_output.display()))?;

    log::info!("Collected {} file(s) for bundling.", outcome.selected.len());

    let file = File::create(&config.bundle_output)
        .with_context(|| format!("Failed to create {}", config.bundle_output.display()))?;
    let mut out = BufWriter::new(file);
    OutputGenerator::write_bundle(&config.root, &outcome.selected, &mut out, &interrupt)
        .with_context(|| format!("Failed to write {}", config.bundle_output.display()))?;

    log::info!("Done.");
    Ok(outcome)
}

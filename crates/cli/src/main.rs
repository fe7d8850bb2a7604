//! `deadcode` — a polyglot dead-code scanner.
//!
//! This binary is a thin demonstration harness: real per-language parsing
//! is explicitly out of scope, so it wires up
//! [`deadcode_cli::ToyParser`] — a line-oriented scraper — to
//! `deadcode_engine::scan`, renders progress with `indicatif`, and prints
//! the result.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::Parser;
use deadcode_cli::ToyParser;
use deadcode_core::{CancellationToken, ScanConfig};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deadcode")]
#[command(about = "Finds source files unreachable from any entry point")]
#[command(version)]
struct Cli {
    /// Project root to scan. Defaults to the current directory.
    #[arg(value_name = "PATH")]
    project_root: Option<PathBuf>,

    /// Path to a TOML/JSON/YAML config file layered over the defaults.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Print the full result as JSON instead of a summary table.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let project_root = cli
        .project_root
        .unwrap_or(std::env::current_dir().context("failed to read current directory")?);

    let config = ScanConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let progress_bar = bar.clone();
    let progress = Some(Box::new(move |event: deadcode_core::ProgressEvent| {
        progress_bar.set_position(event.percent as u64);
        progress_bar.set_message(format!("{}: {}", event.phase.label(), event.detail));
    }) as deadcode_core::ProgressCallback<'_>);

    let cancellation = CancellationToken::new();
    let result = deadcode_engine::scan(&project_root, &config, &ToyParser, progress, &cancellation)
        .context("scan failed")?;
    bar.finish_and_clear();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result).context("failed to serialize result")?);
    } else {
        print_summary(&result);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("deadcode={level},{}={level}", env!("CARGO_PKG_NAME")))
        .init();
}

fn print_summary(result: &deadcode_core::ScanResult) {
    let summary = &result.summary;
    println!(
        "scanned {} candidates, {} entry points, {} reachable",
        summary.candidate_count, summary.entry_point_count, summary.reachable_count
    );
    println!(
        "{} fully dead, {} partially dead, {} possibly live, {} excluded-generated",
        summary.fully_dead_count, summary.partially_dead_count, summary.skipped_dynamic_count, summary.excluded_generated_count
    );
    println!("{} bytes of dead code", summary.total_dead_bytes);
    for report in &result.fully_dead_files {
        println!("  {} ({} bytes, {} lines)", report.path, report.size_bytes, report.line_count);
    }
}

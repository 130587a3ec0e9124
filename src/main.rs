use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::Parser;
use tracing::{error, info, warn};

use logtally::config::Config;
use logtally::filter::{BoundKind, DateRange, filter_by_date, parse_bound};
use logtally::log::{RunStatus, parse_file};
use logtally::logging;
use logtally::summary::{FilteredReport, Summary, to_pretty_string};

/// Exit code when the input could only be read in part.
const EXIT_PARTIAL: u8 = 2;

#[derive(Parser)]
#[command(name = "logtally", about = "Summarize a structured log file")]
struct Cli {
    /// Log file to read (default: app.log, or `input` from the config file)
    file: Option<PathBuf>,

    /// Where to write the JSON summary (default: log_summary.json)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Also print entries at or after this time (YYYY-MM-DD [HH:MM:SS])
    #[arg(long, value_parser = start_bound)]
    from: Option<NaiveDateTime>,

    /// Also print entries at or before this time (YYYY-MM-DD [HH:MM:SS])
    #[arg(long, value_parser = end_bound)]
    to: Option<NaiveDateTime>,

    /// Config file to use instead of the per-user one
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not echo the summary to stdout
    #[arg(long)]
    no_print: bool,

    /// Debug-level logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn start_bound(s: &str) -> Result<NaiveDateTime, String> {
    parse_bound(s, BoundKind::Start)
}

fn end_bound(s: &str) -> Result<NaiveDateTime, String> {
    parse_bound(s, BoundKind::End)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_cli(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    let input = cli.file.unwrap_or(config.input);
    let output = cli.output.unwrap_or(config.output);

    let run = parse_file(&input).with_context(|| format!("Failed to read {}", input.display()))?;
    info!(
        lines = run.lines_read,
        matched = run.entries.len(),
        skipped = run.skipped.len(),
        "parsed {}",
        input.display()
    );

    let mut exit = ExitCode::SUCCESS;
    if let RunStatus::Interrupted { line_number, cause } = &run.status {
        warn!("reading stopped at line {line_number}: {cause}; summarizing what was read");
        exit = ExitCode::from(EXIT_PARTIAL);
    }

    let filtered = if cli.from.is_some() || cli.to.is_some() {
        let range = DateRange::from_bounds(cli.from, cli.to);
        if range.is_empty() {
            warn!("--from is after --to; no entries can match");
        }
        match filter_by_date(&run.entries, &range) {
            Ok(kept) => Some(kept),
            Err(e) => {
                error!("date filter failed: {:#}", anyhow::Error::from(e));
                exit = ExitCode::FAILURE;
                None
            }
        }
    } else {
        None
    };

    // Stdout carries exactly one JSON document.
    let summary = Summary::build(run.counts);
    let print_summary = config.print_summary && !cli.no_print;
    match (print_summary, &filtered) {
        (true, Some(entries)) => {
            let report = FilteredReport { summary: &summary, entries };
            println!("{}", to_pretty_string(&report, config.indent)?);
        }
        (true, None) => println!("{}", summary.to_json_pretty(config.indent)?),
        (false, Some(entries)) => println!("{}", to_pretty_string(entries, config.indent)?),
        (false, None) => {}
    }
    summary.save(&output, config.indent)?;
    info!("summary written to {}", output.display());

    Ok(exit)
}

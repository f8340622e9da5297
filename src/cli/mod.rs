//! # CLI Module
//!
//! Command-line interface for the archive filter.
//!
//! ## Usage
//! ```bash
//! # Filter an archive, writing tweets.filtered.csv next to it
//! tweet-sift tweets.zip --home-account 14235
//!
//! # Only posts from 2015 onwards, stricter correction matching
//! tweet-sift tweets.zip --since 2015-01-01 --threshold 4
//!
//! # JSON statistics for scripting
//! tweet-sift tweets.zip --format json
//! ```

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tweet_sift::core::pipeline::{Pipeline, DEFAULT_EXCLUDED_TAGS};
use tweet_sift::core::reporter::{
    default_corrected_path, default_output_path, summary_lines, write_outputs, RunReport,
};
use tweet_sift::core::similarity::DEFAULT_CORRECTION_THRESHOLD;
use tweet_sift::error::{error_chain, ConfigError, Result, SiftError};
use tweet_sift::events::{Event, EventChannel, IngestEvent, PipelineEvent};

/// Tweet Sift - keep the posts, drop the noise
#[derive(Parser, Debug)]
#[command(name = "tweet-sift")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Archive export (zip containing tweets.csv)
    input: PathBuf,

    /// Filtered output file [default: input with .filtered.csv extension]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Corrected-records file [default: input with .corrected.csv extension]
    #[arg(long, conflicts_with = "no_corrected")]
    corrected_output: Option<PathBuf>,

    /// Do not write the corrected-records file
    #[arg(long)]
    no_corrected: bool,

    /// Ignore posts published before this day (YYYY-MM-DD)
    #[arg(long)]
    since: Option<String>,

    /// Account id of the archive owner; replies to it are kept
    #[arg(long, default_value = "")]
    home_account: String,

    /// Maximum edit distance treated as a correction
    #[arg(short, long, default_value_t = DEFAULT_CORRECTION_THRESHOLD)]
    threshold: usize,

    /// Exclude posts containing this tag (repeatable) [default: #nowplaying, #followfriday]
    #[arg(long = "exclude-tag")]
    exclude_tags: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    tweet_sift::init_tracing(if cli.verbose { "debug" } else { "warn" });

    let since = cli.since.as_deref().map(parse_date).transpose()?;
    let exclude_tags = if cli.exclude_tags.is_empty() {
        DEFAULT_EXCLUDED_TAGS.iter().map(|t| t.to_string()).collect()
    } else {
        cli.exclude_tags.clone()
    };
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));
    let corrected_output = if cli.no_corrected {
        None
    } else {
        Some(
            cli.corrected_output
                .clone()
                .unwrap_or_else(|| default_corrected_path(&cli.input)),
        )
    };

    let pipeline = Pipeline::builder()
        .home_account_id(cli.home_account.clone())
        .correction_threshold(cli.threshold)
        .excluded_tags(exclude_tags)
        .since(since)
        .build();

    let term = Term::stderr();
    if matches!(cli.format, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Tweet Sift").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
    }

    let (sender, receiver) = EventChannel::new();

    let progress = if matches!(cli.format, OutputFormat::Pretty) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(pb) = progress_clone.as_ref() else {
                continue;
            };
            match event {
                Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
                    pb.set_message(phase.to_string());
                }
                Event::Ingest(IngestEvent::Progress { records_read }) => {
                    pb.set_message(format!("Filtering ({records_read} posts read)"));
                }
                Event::Pipeline(PipelineEvent::Completed { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let result = pipeline.run_with_events(&cli.input, &sender);

    drop(sender);
    event_thread.join().ok();
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let result = result?;
    let report = write_outputs(&result, &output, corrected_output.as_deref())?;

    match cli.format {
        OutputFormat::Pretty => print_pretty_report(&term, &report),
        OutputFormat::Json => print_json_report(&report),
    }

    Ok(())
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| ConfigError::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn print_pretty_report(term: &Term, report: &RunReport) {
    term.write_line(&format!("{} Filtering complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    for line in summary_lines(report) {
        term.write_line(&format!("  {line}")).ok();
    }
    if report.stopped_at_bound {
        term.write_line(&format!(
            "  {}",
            style("older posts skipped (--since)").dim()
        ))
        .ok();
    }

    term.write_line("").ok();
    term.write_line(&format!(
        "  {} {}",
        style("Written:").bold(),
        style(report.output.display()).cyan()
    ))
    .ok();
    if let Some(corrected) = &report.corrected_output {
        term.write_line(&format!(
            "  {} {}",
            style("Corrections:").bold(),
            style(corrected.display()).cyan()
        ))
        .ok();
    }
}

fn print_json_report(report: &RunReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "failed to serialize report"),
    }
}

/// Print an error and every cause beneath it
pub fn report_error(error: &SiftError) {
    let term = Term::stderr();
    let mut chain = error_chain(error).into_iter();
    if let Some(message) = chain.next() {
        term.write_line(&format!("{} {}", style("error:").red().bold(), message))
            .ok();
    }
    for cause in chain {
        term.write_line(&format!("  {} {}", style("caused by:").dim(), cause))
            .ok();
    }
}

//! Command-line interface definitions for the current-affairs pipeline.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! All arguments can be provided via command-line flags; the relevance
//! threshold and quiz seed can also come from environment variables.

use clap::Parser;

/// Command-line arguments for the current-affairs pipeline.
///
/// # Examples
///
/// ```sh
/// # Basic daily run
/// upsc_current_affairs -j ./json -r ./reports
///
/// # Reproducible quiz sampling for a specific date
/// upsc_current_affairs -j ./json -r ./reports --date 2026-08-20 --seed 42
///
/// # Weekly compilation and trend analysis over the trailing 7 days
/// upsc_current_affairs -j ./json -r ./reports --weekly
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for compilation JSON files
    #[arg(short, long)]
    pub json_output_dir: String,

    /// Output directory for plain-text quiz and report documents
    #[arg(short, long)]
    pub report_output_dir: String,

    /// Date to run for (YYYY-MM-DD); defaults to today
    #[arg(short, long)]
    pub date: Option<String>,

    /// Minimum relevance score an item needs to enter the pipeline
    #[arg(short = 't', long, env = "RELEVANCE_THRESHOLD", default_value_t = 50.0)]
    pub threshold: f64,

    /// Seed for quiz sampling; omit for a fresh draw each run
    #[arg(short, long, env = "QUIZ_SEED")]
    pub seed: Option<u64>,

    /// Also build the weekly compilation and trend analysis over the
    /// trailing 7 days ending at the run date
    #[arg(short, long)]
    pub weekly: bool,
}

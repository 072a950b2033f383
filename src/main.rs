//! # UPSC Current Affairs
//!
//! A current-affairs processing pipeline for civil-services exam
//! preparation. News items flow through a relevance filter tuned to the
//! exam syllabus, a content analyzer that builds study material and
//! practice questions, compilation generators for daily and weekly briefs,
//! a trend analyzer, and an integration service that cross-references the
//! static-lesson catalog.
//!
//! ## Usage
//!
//! ```sh
//! upsc_current_affairs -j ./json -r ./reports
//! upsc_current_affairs -j ./json -r ./reports --weekly --seed 42
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Aggregation**: Collect and validate news items per source
//! 2. **Filtering**: Score exam relevance and keep items over the threshold
//! 3. **Analysis**: Build summaries, facts, and questions (parallel, 8 at a time)
//! 4. **Compilation**: Roll analyses into daily (and optionally weekly) briefs
//! 5. **Output**: Write JSON files and plain-text quiz and report documents

use chrono::{Datelike, Duration, Local, NaiveDate, Utc};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod aggregator;
mod analyzer;
mod cli;
mod compilation;
mod integration;
mod models;
mod outputs;
mod questions;
mod relevance;
mod sources;
mod trends;
mod utils;

use cli::Cli;
use integration::{build_question_bank, link_news_to_lessons, sync_catalog, InMemoryCatalog};
use models::{DailyCompilation, NewsAnalysis, Subject};
use outputs::{json, text};
use utils::ensure_writable_dir;

/// Run the daily pipeline for one date: aggregate, filter, analyze, compile.
#[instrument(level = "info", skip(rng), fields(%date))]
async fn run_day(date: NaiveDate, threshold: f64, rng: &mut StdRng) -> (DailyCompilation, Vec<NewsAnalysis>) {
    let items = aggregator::fetch_all(date).await;
    info!(count = items.len(), "Aggregated news items");

    let processed = relevance::filter_by_relevance(&items, threshold, Utc::now());
    info!(
        total = items.len(),
        selected = processed.len(),
        threshold,
        "Filtered by exam relevance"
    );

    let analyses = analyzer::analyze_batch(&processed).await;
    info!(count = analyses.len(), "Analyzed items");

    let daily = compilation::generate_daily(date, &analyses, items.len(), rng);
    (daily, analyses)
}

/// Seed a small lesson catalog, then push links, examples, and question
/// tags for every analysis through it.
fn run_integration(analyses: &[NewsAnalysis]) {
    let mut catalog = InMemoryCatalog::default()
        .with_lesson("polity-12", "Government Schemes for Welfare", Subject::Polity, &["Government Schemes"])
        .with_lesson("polity-05", "Judiciary and Judicial Review", Subject::Polity, &["Judiciary"])
        .with_lesson("econ-03", "Monetary Policy Framework", Subject::Economy, &["Monetary Policy"])
        .with_lesson("econ-08", "Fiscal Policy and the Budget", Subject::Economy, &["Fiscal Policy"])
        .with_lesson("env-02", "Climate Change and India", Subject::Environment, &["Climate Change"])
        .with_lesson("ir-04", "Multilateral Groupings", Subject::InternationalRelations, &["International Groupings"]);

    let mut total_links = 0usize;
    for analysis in analyses {
        let links = link_news_to_lessons(analysis, &catalog);
        total_links += links.len();
        sync_catalog(analysis, &links, &mut catalog);
    }
    let bank = build_question_bank(analyses);
    info!(
        links = total_links,
        examples = catalog.example_log.len(),
        tags = catalog.tag_log.len(),
        bank_prelims = bank.prelims.len(),
        bank_mains = bank.mains.len(),
        "Integration service synced lesson catalog"
    );
}

fn print_digest(daily: &DailyCompilation) {
    println!("\n{}", daily.brief_summary);
    println!(
        "Quiz: {} questions | Coverage: {} selected of {} processed",
        daily.quiz.len(),
        daily.total_selected,
        daily.total_processed
    );
}

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("upsc_current_affairs starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.json_output_dir, ?args.report_output_dir, args.threshold, "Parsed CLI arguments");

    let date = match &args.date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")?,
        None => Local::now().date_naive(),
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    // Early check: ensure the JSON output dir is writable
    if let Err(e) = ensure_writable_dir(&args.json_output_dir).await {
        error!(
            path = %args.json_output_dir,
            error = %e,
            "JSON output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Daily pipeline ----
    let (daily, analyses) = run_day(date, args.threshold, &mut rng).await;

    run_integration(&analyses);

    if let Err(e) = json::write_daily(&daily, &args.json_output_dir).await {
        error!(error = %e, "Failed to write daily JSON");
    }
    if let Err(e) = text::write_daily_documents(&daily, &args.report_output_dir).await {
        error!(error = %e, "Failed to write daily text documents");
    }
    print_digest(&daily);

    // ---- Weekly compilation and trends ----
    if args.weekly {
        let week_start = date - Duration::days(6);
        info!(%week_start, week_end = %date, "Building weekly compilation");

        let mut dailies = Vec::new();
        let mut window: Vec<NewsAnalysis> = Vec::new();
        for offset in (0..7).rev() {
            let day = date - Duration::days(offset);
            if day == date {
                dailies.push(daily.clone());
                window.extend(analyses.iter().cloned());
                continue;
            }
            let (past_daily, past_analyses) = run_day(day, args.threshold, &mut rng).await;
            dailies.push(past_daily);
            window.extend(past_analyses);
        }

        let weekly = compilation::generate_weekly(date.iso_week().week(), &dailies, &mut rng);
        if let Err(e) = json::write_weekly(&weekly, &args.json_output_dir).await {
            error!(error = %e, "Failed to write weekly JSON");
        }

        let trend_report = trends::analyze_trends(&window, week_start, date);
        println!(
            "\nWeek {}: {} trending topics, {} consolidated questions, {} predictions",
            weekly.week_number,
            weekly.trending_topics.len(),
            weekly.consolidated_quiz.len(),
            weekly.predicted_topics.len()
        );
        for prediction in trend_report.exam_predictions.iter().take(5) {
            println!(
                "  {:>5.1}% {:?} {}",
                prediction.probability, prediction.exam_type, prediction.topic
            );
        }
        if trend_report.recurring_themes.is_empty() {
            warn!("No recurring themes detected for the week");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

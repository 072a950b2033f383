//! JSON output generation for compilation data.
//!
//! Serializes daily and weekly compilations for consumption by external
//! clients. Files are organized by date:
//!
//! ```text
//! json_output_dir/
//! └── 2026-08-20/
//!     ├── daily.json
//!     └── week-34.json
//! ```

use crate::models::{DailyCompilation, Result, WeeklyCompilation};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write a [`DailyCompilation`] to `{json_output_dir}/{date}/daily.json`.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir, date = %daily.date))]
pub async fn write_daily(daily: &DailyCompilation, json_output_dir: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(daily)?;

    let dir = format!("{}/{}", json_output_dir, daily.date);
    if let Err(e) = fs::create_dir_all(&dir).await {
        error!(%dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = format!("{dir}/daily.json");
    fs::write(&path, json).await?;
    info!(%path, "Wrote daily compilation JSON");
    Ok(())
}

/// Write a [`WeeklyCompilation`] to `{json_output_dir}/{end_date}/week-{n}.json`.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir, week = weekly.week_number))]
pub async fn write_weekly(weekly: &WeeklyCompilation, json_output_dir: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(weekly)?;

    let dir = format!("{}/{}", json_output_dir, weekly.end_date);
    if let Err(e) = fs::create_dir_all(&dir).await {
        error!(%dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = format!("{dir}/week-{}.json", weekly.week_number);
    fs::write(&path, json).await?;
    info!(%path, "Wrote weekly compilation JSON");
    Ok(())
}

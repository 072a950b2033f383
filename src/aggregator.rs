//! News aggregation: multi-source fetch, validation, and merge.
//!
//! The aggregator is the pipeline's ingestion stage. It dispatches to the
//! per-source feed modules, validates every item against the shape rules
//! below, drops malformed items with a warning, and merges the survivors
//! into a single batch sorted by published date descending.
//!
//! # Validation rules
//!
//! An item is rejected when any of these hold:
//! - empty `id` or `title`
//! - body shorter than 100 characters
//! - published timestamp in the future (beyond a one-day clock-skew slack)
//!   or before the 2000-01-01 sanity floor
//! - empty tag set
//!
//! A single malformed item is dropped from the batch, never fatal to it.

use crate::models::{NewsItem, NewsSource};
use crate::sources;
use crate::utils::truncate_for_log;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use tracing::{debug, info, instrument, warn};

/// Minimum acceptable body length in characters.
pub const MIN_BODY_LEN: usize = 100;

/// Check an item against the aggregator's shape rules.
pub fn validate_news_item(item: &NewsItem) -> bool {
    if item.id.trim().is_empty() {
        debug!(?item.source, "Rejecting item with empty id");
        return false;
    }
    if item.title.trim().is_empty() {
        debug!(id = %item.id, "Rejecting item with empty title");
        return false;
    }
    if item.body.chars().count() < MIN_BODY_LEN {
        debug!(id = %item.id, len = item.body.len(), "Rejecting item with short body");
        return false;
    }
    let floor = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
    let ceiling = Utc::now() + Duration::days(1);
    if item.published < floor || item.published > ceiling {
        debug!(id = %item.id, published = %item.published, "Rejecting item with implausible date");
        return false;
    }
    if item.tags.is_empty() {
        debug!(id = %item.id, "Rejecting item with no tags");
        return false;
    }
    true
}

/// Fetch a single source's items for a date, dropping invalid ones.
#[instrument(level = "info", skip_all, fields(%source, %date))]
pub async fn fetch_news(source: NewsSource, date: NaiveDate) -> Vec<NewsItem> {
    let raw = match source {
        NewsSource::Pib => sources::pib::fetch_articles(date).await,
        NewsSource::TheHindu => sources::the_hindu::fetch_articles(date).await,
        NewsSource::IndianExpress => sources::indian_express::fetch_articles(date).await,
        NewsSource::EconomicTimes => sources::economic_times::fetch_articles(date).await,
        NewsSource::DownToEarth => sources::down_to_earth::fetch_articles(date).await,
    };

    let total = raw.len();
    let items: Vec<NewsItem> = raw
        .into_iter()
        .filter(|item| {
            let ok = validate_news_item(item);
            if !ok {
                warn!(
                    id = %item.id,
                    %source,
                    title_preview = %truncate_for_log(&item.title, 80),
                    "Dropping invalid item"
                );
            }
            ok
        })
        .collect();
    info!(%source, fetched = total, valid = items.len(), "Fetched source");
    items
}

/// Fetch every source for a date and merge into one batch.
///
/// The merged batch is sorted by published date descending; the per-source
/// fetch order breaks exact-timestamp ties (stable sort).
#[instrument(level = "info", skip_all, fields(%date))]
pub async fn fetch_all(date: NaiveDate) -> Vec<NewsItem> {
    let mut merged = Vec::new();
    for source in NewsSource::ALL {
        let items = fetch_news(source, date).await;
        merged.extend(items);
    }
    merged.sort_by(|a, b| b.published.cmp(&a.published));
    info!(count = merged.len(), "Merged all sources");
    merged
}

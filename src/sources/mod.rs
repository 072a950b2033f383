//! Mock news-source feeds standing in for RSS ingestion.
//!
//! This module contains submodules for each publisher the pipeline ingests.
//! There is no network boundary here: each source serves a static in-process
//! fixture set, which is what a production deployment would replace with a
//! real feed client. Every source follows the same contract:
//!
//! - `fetch_articles(date)`: Returns the source's items stamped with the
//!   requested date, with tags extracted by the source-specific parser
//!
//! # Supported sources
//!
//! | Source | Module | Tag vocabulary |
//! |--------|--------|----------------|
//! | PIB | [`pib`] | Scheme/ministry/cabinet terms from official bulletins |
//! | The Hindu | [`the_hindu`] | Analytical and governance terms from editorials |
//! | The Indian Express | [`indian_express`] | Explainer and policy terms |
//! | The Economic Times | [`economic_times`] | Economic indicators and market terms |
//! | Down To Earth | [`down_to_earth`] | Climate and conservation terms |
//!
//! Different sources pull different tag vocabularies out of the same body
//! text, but all of them produce the same [`crate::models::NewsItem`] shape.

pub mod down_to_earth;
pub mod economic_times;
pub mod indian_express;
pub mod pib;
pub mod the_hindu;

use crate::models::{NewsItem, NewsSource};
use chrono::{NaiveDate, TimeZone, Utc};

/// Scan a body for vocabulary words and collect the ones present as tags.
///
/// Matching is case-insensitive. When nothing from the vocabulary appears,
/// a single `fallback` tag is used so validation never sees an empty tag set
/// for a well-formed article.
pub(crate) fn extract_tags(title: &str, body: &str, vocabulary: &[&str], fallback: &str) -> Vec<String> {
    let haystack = format!("{} {}", title.to_lowercase(), body.to_lowercase());
    let mut tags: Vec<String> = vocabulary
        .iter()
        .filter(|word| haystack.contains(&word.to_lowercase()))
        .map(|word| word.to_string())
        .collect();
    if tags.is_empty() {
        tags.push(fallback.to_string());
    }
    tags
}

/// Build a [`NewsItem`] from fixture fields, stamping ids and timestamps.
///
/// Items within a source are staggered by an hour so published-descending
/// ordering is well-defined inside a single day.
pub(crate) fn build_item(
    source: NewsSource,
    slug: &str,
    index: usize,
    date: NaiveDate,
    title: &str,
    body: &str,
    author: Option<&str>,
    tags: Vec<String>,
) -> NewsItem {
    let hour = 6 + (index as u32 % 12);
    let published = Utc
        .from_utc_datetime(&date.and_hms_opt(hour, 0, 0).expect("valid fixture time"));
    NewsItem {
        id: format!("{}-{}-{}", slug, date, index + 1),
        source,
        title: title.to_string(),
        body: body.to_string(),
        published,
        url: format!("https://{}.example.org/{}/{}", slug, date, index + 1),
        author: author.map(|a| a.to_string()),
        tags,
        image: None,
        body_len: body.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_tags_case_insensitive() {
        let tags = extract_tags(
            "Cabinet clears scheme",
            "The CABINET approved a new Scheme today.",
            &["cabinet", "scheme", "ministry"],
            "general",
        );
        assert_eq!(tags, vec!["cabinet".to_string(), "scheme".to_string()]);
    }

    #[test]
    fn test_extract_tags_fallback() {
        let tags = extract_tags("Nothing", "No vocabulary words here.", &["cabinet"], "general");
        assert_eq!(tags, vec!["general".to_string()]);
    }

    #[test]
    fn test_build_item_staggers_timestamps() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 20).unwrap();
        let a = build_item(NewsSource::Pib, "pib", 0, date, "t", "b", None, vec!["x".into()]);
        let b = build_item(NewsSource::Pib, "pib", 1, date, "t", "b", None, vec!["x".into()]);
        assert!(b.published > a.published);
        assert_eq!(a.id, "pib-2026-08-20-1");
    }
}

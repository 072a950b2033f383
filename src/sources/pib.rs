//! Press Information Bureau feed — the official government bulletin.
//!
//! PIB releases announce cabinet decisions, scheme launches, and ministry
//! programmes. The tag parser here pulls the scheme/ministry vocabulary,
//! which downstream stages treat as a strong government-policy signal.

use super::{build_item, extract_tags};
use crate::models::{NewsItem, NewsSource};
use chrono::NaiveDate;
use tracing::{info, instrument};

/// Vocabulary the bulletin parser recognizes as tags.
const TAG_VOCABULARY: &[&str] = &[
    "cabinet",
    "scheme",
    "ministry",
    "yojana",
    "mission",
    "policy",
    "initiative",
    "programme",
    "budget",
    "infrastructure",
];

/// Title, body, author fixtures standing in for the live bulletin feed.
const FIXTURES: &[(&str, &str)] = &[
    (
        "Cabinet approves National Rural Digital Infrastructure Scheme",
        "The Union Cabinet today approved the National Rural Digital Infrastructure \
         Scheme with an outlay of Rs 12000 crore over five years. The scheme will \
         connect 250000 gram panchayats with high-speed broadband and is the largest \
         rural connectivity programme launched by the government. The Ministry of \
         Communications said the initiative aligns with the Digital India mission \
         and will generate employment for 50000 rural youth. The cabinet also noted \
         that 45% of targeted villages already have partial fibre coverage.",
    ),
    (
        "Ministry launches revised crop insurance programme for small farmers",
        "The Ministry of Agriculture launched a revised crop insurance programme \
         covering drought, cyclone and flood damage for small and marginal farmers. \
         The scheme carries a subsidy of Rs 8500 crore and extends coverage to \
         horticulture for the first time. Officials said premium rates will fall by \
         30% for farmers in rain-fed districts, and claimed settlement timelines \
         will shorten from 90 days to 30 days under the new policy framework. The \
         programme draws on monsoon data from the national weather grid.",
    ),
    (
        "Cabinet clears constitutional amendment bill on cooperative federalism",
        "The Cabinet cleared a constitutional amendment bill strengthening \
         cooperative federalism in fiscal matters. The bill amends provisions on \
         the distribution of taxation powers between the Union and the States and \
         will be tabled in Parliament in the coming session. The Law Ministry said \
         the amendment follows Supreme Court observations on fiscal federalism and \
         responds to long-standing demands from State governments. Opposition \
         parties said they would scrutinize the bill's impact on State autonomy.",
    ),
    (
        "Government announces national green hydrogen mission expansion",
        "The government announced an expansion of the National Green Hydrogen \
         Mission with an additional allocation of Rs 19700 crore. The mission \
         targets 5 million tonnes of annual green hydrogen production by 2030 and \
         supports the country's net zero commitment under the Paris Agreement. The \
         Ministry of New and Renewable Energy said 125 GW of additional renewable \
         capacity will be linked to hydrogen production, the largest such \
         commitment by any developing economy, cutting emissions by 50 million \
         tonnes annually.",
    ),
];

/// Fetch the bulletin's articles for a date.
///
/// Fixtures are stamped with the requested date; in production this would be
/// a feed fetch with the same signature.
#[instrument(level = "info", skip_all, fields(%date))]
pub async fn fetch_articles(date: NaiveDate) -> Vec<NewsItem> {
    let items: Vec<NewsItem> = FIXTURES
        .iter()
        .enumerate()
        .map(|(i, (title, body))| {
            let tags = extract_tags(title, body, TAG_VOCABULARY, "government");
            build_item(NewsSource::Pib, "pib", i, date, title, body, None, tags)
        })
        .collect();
    info!(count = items.len(), "Fetched PIB bulletin items");
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_articles_shapes() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 20).unwrap();
        let items = fetch_articles(date).await;
        assert_eq!(items.len(), FIXTURES.len());
        for item in &items {
            assert_eq!(item.source, NewsSource::Pib);
            assert!(item.body.len() >= 100);
            assert!(!item.tags.is_empty());
            assert_eq!(item.body_len, item.body.len());
        }
    }

    #[tokio::test]
    async fn test_bulletin_tags_use_scheme_vocabulary() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 20).unwrap();
        let items = fetch_articles(date).await;
        assert!(items[0].tags.contains(&"cabinet".to_string()));
        assert!(items[0].tags.contains(&"scheme".to_string()));
    }
}

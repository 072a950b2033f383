//! The Hindu feed — editorial and analysis coverage.
//!
//! Editorials argue positions, so the tag parser here looks for the
//! analytical and governance vocabulary rather than scheme names.

use super::{build_item, extract_tags};
use crate::models::{NewsItem, NewsSource};
use chrono::NaiveDate;
use tracing::{info, instrument};

const TAG_VOCABULARY: &[&str] = &[
    "analysis",
    "judiciary",
    "governance",
    "federalism",
    "accountability",
    "reform",
    "constitution",
    "parliament",
    "debate",
    "rights",
];

const FIXTURES: &[(&str, &str, &str)] = &[
    (
        "The basic structure doctrine at fifty: an enduring constraint",
        "Fifty years on, the basic structure doctrine remains the judiciary's most \
         significant check on parliamentary power. However, the doctrine's contours \
         are contested: critics argue that judicial review of constitutional \
         amendments substitutes judges' values for the people's will, while \
         defenders contend that fundamental rights and federalism would be \
         vulnerable without it. Therefore the question is not whether the doctrine \
         should survive but how transparently the Supreme Court applies it. The \
         implications for governance and accountability are significant because \
         every major reform now anticipates a constitutional challenge.",
        "R. Krishnan",
    ),
    (
        "Electoral reform needs more than a new law",
        "The latest round of electoral reform proposals before Parliament addresses \
         campaign finance but leaves the deeper accountability gap untouched. \
         Consequently, analysis of the bill suggests it will formalize disclosure \
         without limiting the flow of unaccounted money into elections. Moreover, \
         the Election Commission's autonomy remains tied to executive discretion in \
         appointments, an arrangement the Supreme Court flagged as a constitutional \
         concern. The significance of this moment lies in whether Parliament treats \
         reform as housekeeping or as a democratic imperative affecting federalism \
         and the rights of voters.",
        "S. Menon",
    ),
    (
        "India's neighbourhood policy and the limits of summit diplomacy",
        "The recent bilateral summit with Bangladesh produced agreements on river \
         water sharing and border trade, but analysis of the joint statement shows \
         familiar ambiguities. However, summit diplomacy cannot substitute for \
         sustained engagement: the treaty commitments on the Teesta river remain \
         unratified a decade after they were drafted. Therefore the significance of \
         this summit lies less in its outcomes than in what it reveals about the \
         constraints on regional diplomacy, where domestic federal politics in both \
         countries shape what national governments can deliver to the United \
         Nations and to each other.",
        "A. Bhattacharya",
    ),
];

/// Fetch the editorial page's articles for a date.
#[instrument(level = "info", skip_all, fields(%date))]
pub async fn fetch_articles(date: NaiveDate) -> Vec<NewsItem> {
    let items: Vec<NewsItem> = FIXTURES
        .iter()
        .enumerate()
        .map(|(i, (title, body, author))| {
            let tags = extract_tags(title, body, TAG_VOCABULARY, "editorial");
            build_item(
                NewsSource::TheHindu,
                "thehindu",
                i,
                date,
                title,
                body,
                Some(author),
                tags,
            )
        })
        .collect();
    info!(count = items.len(), "Fetched The Hindu editorial items");
    items
}

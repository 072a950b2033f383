//! Relevance scoring and subject classification.
//!
//! The filter scores each raw item against a fixed syllabus-keyword taxonomy
//! and promotes qualifying items to [`ProcessedNewsItem`]. The score is the
//! sum of seven independent sub-scores, each capped individually, with the
//! total capped at 100:
//!
//! | Factor | Cap |
//! |--------|-----|
//! | Syllabus keyword match | 25 |
//! | Government/policy signal | 20 |
//! | Constitutional importance | 15 |
//! | International impact | 10 |
//! | Economic implications | 10 |
//! | Environmental significance | 10 |
//! | Historical-precedent signal | 10 |
//!
//! All keyword tables are plain configuration data, not type hierarchies;
//! each subject strategy is a table entry. Keyword matching counts
//! case-insensitive occurrences over title + body.

use crate::models::{
    GsPaper, MainsRelevance, NewsItem, NewsSource, PrelimsLevel, ProcessedNewsItem,
    ProcessingMeta, RelevanceBreakdown, Subject,
};
use crate::utils::count_occurrences;
use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use tracing::{debug, info, instrument};

/// The eight scoring domains of the subject-keyword dictionary.
///
/// Art & Culture and Ethics are classification-only subjects reachable via
/// the mains paper map, not scoring domains.
pub static SUBJECT_KEYWORDS: Lazy<Vec<(Subject, Vec<&'static str>)>> = Lazy::new(|| {
    vec![
        (
            Subject::Polity,
            vec![
                "cabinet", "parliament", "bill", "election", "judiciary", "constitution",
                "governance", "federalism", "supreme court", "amendment",
            ],
        ),
        (
            Subject::Economy,
            vec![
                "gdp", "inflation", "budget", "fiscal", "crore", "trade", "investment",
                "banking", "taxation", "repo rate",
            ],
        ),
        (
            Subject::Geography,
            vec!["monsoon", "river", "drought", "cyclone", "plateau", "delta", "groundwater"],
        ),
        (
            Subject::History,
            vec!["heritage", "ancient", "medieval", "archaeological", "dynasty", "freedom struggle"],
        ),
        (
            Subject::Environment,
            vec![
                "climate", "emissions", "biodiversity", "pollution", "renewable", "wildlife",
                "conservation", "forest",
            ],
        ),
        (
            Subject::ScienceTech,
            vec![
                "satellite", "isro", "artificial intelligence", "vaccine", "quantum",
                "semiconductor", "space", "reusable launch",
            ],
        ),
        (
            Subject::InternationalRelations,
            vec![
                "summit", "bilateral", "united nations", "treaty", "diplomacy", "border",
                "trade agreement", "g20",
            ],
        ),
        (
            Subject::SocialIssues,
            vec![
                "education", "health", "poverty", "gender", "tribal", "welfare", "nutrition",
                "employment",
            ],
        ),
    ]
});

static POLICY_KEYWORDS: &[&str] = &[
    "scheme", "ministry", "policy", "yojana", "mission", "initiative", "programme", "launch",
];

static CONSTITUTIONAL_KEYWORDS: &[&str] = &[
    "constitution", "article", "amendment", "preamble", "supreme court", "judiciary",
    "fundamental rights", "directive principles",
];

/// High-value constitutional phrases that carry a larger per-hit bonus.
static HIGH_VALUE_CONSTITUTIONAL: &[&str] = &[
    "basic structure", "judicial review", "constitutional bench", "article 370",
];

static INTERNATIONAL_BODIES: &[&str] = &[
    "united nations", "world bank", "imf", "wto", "g20", "brics", "european union",
];

static REGIONAL_COUNTRIES: &[&str] = &[
    "china", "pakistan", "bangladesh", "sri lanka", "nepal", "bhutan", "myanmar", "maldives",
];

static ECONOMIC_INDICATORS: &[&str] =
    &["gdp", "inflation", "fiscal deficit", "current account", "cpi", "iip"];

static ECONOMIC_POLICY: &[&str] =
    &["repo rate", "monetary policy", "subsidy", "disinvestment", "tariff"];

static ENVIRONMENT_KEYWORDS: &[&str] = &[
    "climate", "pollution", "biodiversity", "forest", "wildlife", "renewable", "emissions",
    "conservation",
];

/// Critical climate-topic phrases, weighted 3x over plain environment terms.
static CRITICAL_CLIMATE: &[&str] =
    &["climate change", "global warming", "net zero", "paris agreement"];

static HISTORICAL_KEYWORDS: &[&str] = &[
    "first", "largest", "historic", "milestone", "record", "unprecedented", "biggest",
];

/// Keywords signalling directly testable facts, used for the prelims level.
pub(crate) static FACTUAL_KEYWORDS: &[&str] = &[
    "crore", "per cent", "%", "launched", "approved", "signed", "capacity", "target",
];

/// Keywords signalling argumentative content, used for the mains level.
pub(crate) static ANALYTICAL_KEYWORDS: &[&str] = &[
    "however", "therefore", "implications", "significance", "analysis", "debate",
    "moreover", "consequently", "critics",
];

/// Second keyword map: text keyword to syllabus-topic leaf.
static TOPIC_KEYWORDS: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("fundamental rights", "Fundamental Rights"),
        ("basic structure", "Basic Structure Doctrine"),
        ("amendment", "Constitutional Amendments"),
        ("supreme court", "Judiciary"),
        ("federalism", "Centre-State Relations"),
        ("election", "Electoral Process"),
        ("scheme", "Government Schemes"),
        ("yojana", "Government Schemes"),
        ("gdp", "National Income"),
        ("inflation", "Monetary Policy"),
        ("repo rate", "Monetary Policy"),
        ("budget", "Fiscal Policy"),
        ("fiscal", "Fiscal Policy"),
        ("trade agreement", "External Sector"),
        ("monsoon", "Indian Monsoon"),
        ("river", "Drainage Systems"),
        ("drought", "Natural Hazards"),
        ("climate change", "Climate Change"),
        ("biodiversity", "Biodiversity Conservation"),
        ("renewable", "Renewable Energy"),
        ("pollution", "Environmental Pollution"),
        ("satellite", "Space Technology"),
        ("isro", "Space Technology"),
        ("reusable launch", "Space Technology"),
        ("vaccine", "Health Technology"),
        ("summit", "International Groupings"),
        ("united nations", "International Institutions"),
        ("bilateral", "Bilateral Relations"),
        ("education", "Education Policy"),
        ("health", "Health Policy"),
        ("nutrition", "Poverty and Hunger"),
        ("welfare", "Welfare Schemes"),
        ("tribal", "Vulnerable Sections"),
        ("reservation", "Social Justice"),
    ]
});

/// Syllabus topic used when no keyword from [`TOPIC_KEYWORDS`] matches.
pub const GENERIC_TOPIC: &str = "Current Events of National Importance";

/// Default primary subject when no scoring domain matches at all.
pub const FALLBACK_SUBJECT: Subject = Subject::Polity;

/// Mains paper map per primary subject.
fn subject_papers(subject: Subject) -> Vec<GsPaper> {
    match subject {
        Subject::Polity => vec![GsPaper::Gs2],
        Subject::Economy => vec![GsPaper::Gs3],
        Subject::Geography => vec![GsPaper::Gs1],
        Subject::History => vec![GsPaper::Gs1],
        Subject::Environment => vec![GsPaper::Gs3],
        Subject::ScienceTech => vec![GsPaper::Gs3],
        Subject::InternationalRelations => vec![GsPaper::Gs2],
        Subject::SocialIssues => vec![GsPaper::Gs1, GsPaper::Gs2],
        Subject::ArtCulture => vec![GsPaper::Gs1],
        Subject::Ethics => vec![GsPaper::Gs4],
    }
}

fn searchable_text(item: &NewsItem) -> String {
    format!("{} {}", item.title, item.body).to_lowercase()
}

fn keyword_occurrences(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().map(|kw| count_occurrences(text, kw)).sum()
}

/// Occurrence count per scoring domain, in dictionary order.
fn domain_hits(text: &str) -> Vec<(Subject, usize)> {
    SUBJECT_KEYWORDS
        .iter()
        .map(|(subject, keywords)| {
            let hits: usize = keywords.iter().map(|kw| count_occurrences(text, kw)).sum();
            (*subject, hits)
        })
        .collect()
}

/// Compute all seven sub-scores for an item.
pub fn score_breakdown(item: &NewsItem) -> RelevanceBreakdown {
    let text = searchable_text(item);

    // Factor 1: syllabus keyword match, 2 per occurrence, +2 per matched
    // domain once more than one domain matches.
    let hits = domain_hits(&text);
    let total_hits: usize = hits.iter().map(|(_, h)| h).sum();
    let matched_domains = hits.iter().filter(|(_, h)| *h > 0).count();
    let mut syllabus = (total_hits * 2) as f64;
    if matched_domains > 1 {
        syllabus += (matched_domains * 2) as f64;
    }

    // Factor 2: government/policy signal. Official bulletin source carries a
    // fixed bonus; policy vocabulary adds 3 per occurrence.
    let mut government = if item.source.is_government() { 10.0 } else { 0.0 };
    government += (keyword_occurrences(&text, POLICY_KEYWORDS) * 3) as f64;

    // Factor 3: constitutional importance, with a higher per-hit bonus for
    // the high-value phrases.
    let constitutional = (keyword_occurrences(&text, CONSTITUTIONAL_KEYWORDS) * 3
        + keyword_occurrences(&text, HIGH_VALUE_CONSTITUTIONAL) * 6) as f64;

    // Factor 4: international impact.
    let international = (keyword_occurrences(&text, INTERNATIONAL_BODIES) * 2
        + keyword_occurrences(&text, REGIONAL_COUNTRIES) * 2) as f64;

    // Factor 5: economic implications.
    let economic = (keyword_occurrences(&text, ECONOMIC_INDICATORS) * 2
        + keyword_occurrences(&text, ECONOMIC_POLICY) * 2) as f64;

    // Factor 6: environmental significance, critical phrases weighted 3.
    let environmental = (keyword_occurrences(&text, ENVIRONMENT_KEYWORDS)
        + keyword_occurrences(&text, CRITICAL_CLIMATE) * 3) as f64;

    // Factor 7: historical-precedent signal.
    let historical = (keyword_occurrences(&text, HISTORICAL_KEYWORDS) * 3) as f64;

    RelevanceBreakdown {
        syllabus_keywords: syllabus.min(25.0),
        government_policy: government.min(20.0),
        constitutional: constitutional.min(15.0),
        international: international.min(10.0),
        economic: economic.min(10.0),
        environmental: environmental.min(10.0),
        historical: historical.min(10.0),
    }
}

/// Total relevance score for an item, 0–100.
pub fn calculate_relevance_score(item: &NewsItem) -> f64 {
    score_breakdown(item).total()
}

/// Primary and secondary subjects from the domain hit counts.
///
/// Primary is the domain with the most hits (ties broken by dictionary
/// order); secondaries are the remaining matched domains ordered by hit
/// count, at most 3. Falls back to [`FALLBACK_SUBJECT`] when nothing
/// matches.
fn classify_subjects(text: &str) -> (Subject, Vec<Subject>) {
    let mut hits = domain_hits(text);
    hits.retain(|(_, h)| *h > 0);
    if hits.is_empty() {
        return (FALLBACK_SUBJECT, Vec::new());
    }
    // Stable sort keeps dictionary order among equal hit counts.
    hits.sort_by(|a, b| b.1.cmp(&a.1));
    let primary = hits[0].0;
    let secondary = hits.iter().skip(1).take(3).map(|(s, _)| *s).collect();
    (primary, secondary)
}

/// Syllabus topics from the keyword-to-topic map, deduplicated in map order.
fn match_syllabus_topics(text: &str) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();
    for (keyword, topic) in TOPIC_KEYWORDS.iter() {
        if text.contains(keyword) && !topics.iter().any(|t| t == topic) {
            topics.push(topic.to_string());
        }
    }
    if topics.is_empty() {
        topics.push(GENERIC_TOPIC.to_string());
    }
    topics
}

/// Fixed per-source bonus used in the question-probability estimate.
fn source_bonus(source: NewsSource) -> f64 {
    match source {
        NewsSource::Pib => 10.0,
        NewsSource::TheHindu | NewsSource::IndianExpress => 5.0,
        NewsSource::EconomicTimes | NewsSource::DownToEarth => 4.0,
    }
}

/// 0–95 estimate of the item yielding an exam question.
///
/// Formula: 0.5 x relevance + source bonus + recency bonus (+10 under 30
/// days, +5 more under 7 days) + 2 per tag that maps to a syllabus topic,
/// capped at 95. Defined by this arithmetic, not by deeper intent.
fn question_probability(item: &NewsItem, score: f64, now: DateTime<Utc>) -> f64 {
    let mut probability = 0.5 * score + source_bonus(item.source);

    let age = now.signed_duration_since(item.published);
    if age < Duration::days(30) {
        probability += 10.0;
        if age < Duration::days(7) {
            probability += 5.0;
        }
    }

    let tag_matches = item
        .tags
        .iter()
        .filter(|tag| {
            let tag = tag.to_lowercase();
            TOPIC_KEYWORDS.iter().any(|(kw, _)| *kw == tag)
        })
        .count();
    probability += (tag_matches * 2) as f64;

    probability.min(95.0)
}

/// Prelims level from the total score and factual-keyword density.
fn prelims_level(score: f64, factual_hits: usize) -> PrelimsLevel {
    if score >= 70.0 && factual_hits >= 3 {
        PrelimsLevel::High
    } else if score >= 50.0 || factual_hits >= 2 {
        PrelimsLevel::Medium
    } else {
        PrelimsLevel::Low
    }
}

/// Mains relevance: the subject's paper list, elevated to High with Essay
/// when the item carries at least 3 analytical keywords.
fn mains_relevance(primary: Subject, score: f64, analytical_hits: usize) -> MainsRelevance {
    let mut papers = subject_papers(primary);
    let level = if analytical_hits >= 3 {
        if !papers.contains(&GsPaper::Essay) {
            papers.push(GsPaper::Essay);
        }
        PrelimsLevel::High
    } else if score >= 60.0 {
        PrelimsLevel::Medium
    } else {
        PrelimsLevel::Low
    };
    MainsRelevance { papers, level }
}

/// Classification confidence, 0.0–1.0, fixed at creation time.
fn confidence(score: f64, matched_domains: usize) -> f64 {
    (0.4 + score / 200.0 + matched_domains as f64 * 0.05).min(0.95)
}

/// Promote items scoring at or above `threshold` to [`ProcessedNewsItem`].
///
/// Output is sorted by relevance score descending; equal scores keep their
/// input order (stable sort).
#[instrument(level = "info", skip_all, fields(count = items.len(), threshold))]
pub fn filter_by_relevance(
    items: &[NewsItem],
    threshold: f64,
    now: DateTime<Utc>,
) -> Vec<ProcessedNewsItem> {
    let mut processed: Vec<ProcessedNewsItem> = items
        .iter()
        .filter_map(|item| {
            let breakdown = score_breakdown(item);
            let score = breakdown.total();
            if score < threshold {
                debug!(id = %item.id, score, "Below relevance threshold; discarding");
                return None;
            }

            let text = searchable_text(item);
            let (primary, secondary) = classify_subjects(&text);
            let matched_domains = domain_hits(&text).iter().filter(|(_, h)| *h > 0).count();
            let factual_hits = keyword_occurrences(&text, FACTUAL_KEYWORDS);
            let analytical_hits = keyword_occurrences(&text, ANALYTICAL_KEYWORDS);

            Some(ProcessedNewsItem {
                relevance_score: score,
                primary_subject: primary,
                secondary_subjects: secondary,
                syllabus_topics: match_syllabus_topics(&text),
                prelims_relevance: prelims_level(score, factual_hits),
                mains_relevance: mains_relevance(primary, score, analytical_hits),
                question_probability: question_probability(item, score, now),
                meta: ProcessingMeta {
                    processed_at: now,
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    confidence: confidence(score, matched_domains),
                },
                item: item.clone(),
            })
        })
        .collect();

    processed.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    info!(
        input = items.len(),
        selected = processed.len(),
        "Relevance filter complete"
    );
    processed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item_with(source: NewsSource, title: &str, body: &str, tags: &[&str]) -> NewsItem {
        NewsItem {
            id: format!("test-{}", title.len()),
            source,
            title: title.to_string(),
            body_len: body.len(),
            body: body.to_string(),
            published: Utc.with_ymd_and_hms(2026, 8, 20, 9, 0, 0).unwrap(),
            url: "https://example.org/t".to_string(),
            author: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 22, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_all_factors_stay_within_caps() {
        // Keyword-stuffed body pushes every factor toward its cap.
        let body = "cabinet parliament bill election judiciary constitution governance \
                    federalism supreme court amendment gdp inflation budget fiscal crore \
                    trade investment banking monsoon river drought climate change global \
                    warming net zero paris agreement emissions biodiversity pollution \
                    renewable wildlife conservation forest united nations world bank imf \
                    wto g20 brics china pakistan bangladesh scheme ministry policy yojana \
                    mission initiative programme basic structure judicial review article \
                    370 first largest historic milestone record unprecedented repo rate \
                    monetary policy subsidy disinvestment tariff satellite isro summit \
                    bilateral treaty education health poverty welfare"
            .repeat(3);
        let item = item_with(NewsSource::Pib, "Everything at once", &body, &["scheme"]);
        let b = score_breakdown(&item);
        assert!(b.syllabus_keywords <= 25.0);
        assert!(b.government_policy <= 20.0);
        assert!(b.constitutional <= 15.0);
        assert!(b.international <= 10.0);
        assert!(b.economic <= 10.0);
        assert!(b.environmental <= 10.0);
        assert!(b.historical <= 10.0);
        assert_eq!(b.total(), 100.0);
        assert!(calculate_relevance_score(&item) <= 100.0);
    }

    #[test]
    fn test_government_scheme_scenario_scores_above_70() {
        // Scenario: a government bulletin about a named scheme with
        // qualifying keywords must land in the (70, 100] band and resolve
        // to Economy or Polity by keyword dominance.
        let body = "The Union Cabinet approved the flagship scheme with an outlay of \
                    Rs 20000 crore. The cabinet said the scheme will be funded through \
                    the budget and will lift GDP growth. Parliament will review the \
                    scheme after the Supreme Court observations. The ministry called \
                    it the largest and first such programme, a historic milestone. The \
                    scheme draws on Article 282 of the Constitution and includes \
                    an amendment to the fiscal framework together with \
                    a subsidy plus investment in banking infrastructure. Inflation \
                    impact is expected to stay contained.";
        let item = item_with(
            NewsSource::Pib,
            "Cabinet approves flagship scheme",
            body,
            &["cabinet", "scheme"],
        );

        let score = calculate_relevance_score(&item);
        assert!(score > 70.0, "score was {score}");
        assert!(score <= 100.0);

        let processed = filter_by_relevance(&[item], 50.0, now());
        assert_eq!(processed.len(), 1);
        let subject = processed[0].primary_subject;
        assert!(
            subject == Subject::Economy || subject == Subject::Polity,
            "unexpected subject {subject:?}"
        );
    }

    #[test]
    fn test_filter_respects_threshold_and_sorts_descending() {
        let strong = item_with(
            NewsSource::Pib,
            "Cabinet approves scheme",
            &"The cabinet approved the scheme with a budget of Rs 900 crore under the \
              ministry programme, a historic first for parliament."
                .repeat(2),
            &["scheme"],
        );
        let weak = item_with(
            NewsSource::TheHindu,
            "A quiet day",
            &"Nothing notable occurred in the capital today and correspondents filed \
              routine copy about weather and traffic conditions in the city."
                .to_string(),
            &["editorial"],
        );

        let processed = filter_by_relevance(&[weak.clone(), strong.clone()], 30.0, now());
        assert_eq!(processed.len(), 1);
        assert_eq!(processed[0].item.id, strong.id);

        let all = filter_by_relevance(&[weak, strong], 0.0, now());
        assert_eq!(all.len(), 2);
        assert!(all[0].relevance_score >= all[1].relevance_score);
    }

    #[test]
    fn test_fallback_subject_and_generic_topic() {
        let item = item_with(
            NewsSource::TheHindu,
            "An unclassifiable story",
            &"Quiet prose about nothing in particular that mentions no taxonomy words \
              at all, yet runs long enough to pass every shape check we have."
                .to_string(),
            &["editorial"],
        );
        let processed = filter_by_relevance(&[item], 0.0, now());
        assert_eq!(processed[0].primary_subject, FALLBACK_SUBJECT);
        assert!(processed[0].secondary_subjects.is_empty());
        assert_eq!(processed[0].syllabus_topics, vec![GENERIC_TOPIC.to_string()]);
    }

    #[test]
    fn test_secondary_subjects_capped_at_three() {
        let body = "cabinet gdp monsoon climate satellite summit education heritage \
                    parliament inflation river biodiversity isro bilateral health ancient"
            .repeat(2)
            + " padding so the body is comfortably past the one hundred character floor.";
        let item = item_with(NewsSource::IndianExpress, "Wide coverage", &body, &["explained"]);
        let processed = filter_by_relevance(&[item], 0.0, now());
        assert!(processed[0].secondary_subjects.len() <= 3);
    }

    #[test]
    fn test_question_probability_recency_and_cap() {
        let body = "The cabinet approved the scheme with a Rs 500 crore budget, the \
                    largest programme of its kind, a historic first for the ministry.";
        let mut item = item_with(NewsSource::Pib, "Scheme approved", body, &["scheme"]);

        // Under 7 days old: both recency bonuses apply.
        let fresh = filter_by_relevance(std::slice::from_ref(&item), 0.0, now());
        let fresh_p = fresh[0].question_probability;

        // Over 30 days old: no recency bonus.
        item.published = Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap();
        let stale = filter_by_relevance(&[item], 0.0, now());
        let stale_p = stale[0].question_probability;

        assert_eq!(fresh_p - stale_p, 15.0);
        assert!(fresh_p <= 95.0);
    }

    #[test]
    fn test_analytical_items_elevated_for_mains() {
        let body = "However, the implications of the judgment are significant. Therefore \
                    the debate will continue. Moreover, critics argue the analysis of the \
                    court's reasoning leaves federalism questions open. Consequently the \
                    significance extends beyond this case.";
        let item = item_with(NewsSource::TheHindu, "Judgment analysis", body, &["analysis"]);
        let processed = filter_by_relevance(&[item], 0.0, now());
        let mains = &processed[0].mains_relevance;
        assert_eq!(mains.level, PrelimsLevel::High);
        assert!(mains.papers.contains(&GsPaper::Essay));
    }

    #[test]
    fn test_confidence_and_meta_fixed_at_creation() {
        let body = "The cabinet approved the scheme with a Rs 500 crore budget under \
                    the new ministry policy framework announced this session.";
        let item = item_with(NewsSource::Pib, "Scheme", body, &["scheme"]);
        let processed = filter_by_relevance(&[item], 0.0, now());
        let meta = &processed[0].meta;
        assert!(meta.confidence > 0.0 && meta.confidence <= 0.95);
        assert_eq!(meta.processed_at, now());
        assert_eq!(meta.version, env!("CARGO_PKG_VERSION"));
    }
}

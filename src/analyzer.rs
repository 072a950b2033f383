//! Content analysis: summaries, key points, facts, and study material.
//!
//! Turns a relevance-passed item into a full [`NewsAnalysis`]: a
//! two-minute-read summary, ordered key points, extracted facts, background
//! and exam-angle prose, static-syllabus connections, generated practice
//! questions, and previous-year-question references.
//!
//! Prose is built from deterministic templates keyed by subject and source;
//! the section structure (lead, context, relevance, takeaways) is the
//! contract, not the exact wording. Extraction is regex and trigger-word
//! driven, never model based.

use crate::models::{
    ExtractedFact, FactImportance, NewsAnalysis, NewsSource, ProcessedNewsItem, PyqReference,
    Result, PipelineError, Subject, Summary, SyllabusConnection, UpscAngle,
};
use crate::questions;
use crate::utils::{split_sentences, truncate_words, word_count};
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, instrument, warn};

/// Summary word budget for the two-minute read.
pub const SUMMARY_WORD_LIMIT: usize = 300;
/// Maximum key points per analysis.
pub const MAX_KEY_POINTS: usize = 7;
/// Maximum extracted facts per analysis.
pub const MAX_FACTS: usize = 8;
/// Maximum syllabus connections per analysis.
pub const MAX_CONNECTIONS: usize = 5;
/// Maximum previous-year-question references per analysis.
pub const MAX_PYQ_REFS: usize = 5;

static ACTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:cabinet|government|ministry|minister)\b.{0,40}\b(?:approved|launched|announced|cleared|signed|notified)\b")
        .expect("valid action pattern")
});

static CURRENCY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Rs\.?\s?[\d,]+(?:\.\d+)?\s?(?:crore|lakh)").expect("valid currency pattern")
});

static PERCENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+(?:\.\d+)?\s?(?:%|per cent|basis points)").expect("valid percent pattern")
});

static UNIT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d+(?:\.\d+)?\s?(?:GW|MW|million tonnes|tonnes?)\b")
        .expect("valid unit pattern")
});

static DOLLAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\s?[\d,]+(?:\.\d+)?\s?(?:trillion|billion|million)?")
        .expect("valid dollar pattern")
});

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+(?:19|20)\d{2}\b|\b(?:19|20)\d{2}\b")
        .expect("valid date pattern")
});

static SUPERLATIVE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:first|largest|biggest|highest|lowest|fastest|record)\b[^.,;]{3,40}")
        .expect("valid superlative pattern")
});

/// Trigger words marking analytical sentences in editorial copy.
static ANALYTICAL_TRIGGERS: &[&str] = &[
    "however", "therefore", "significance", "implications", "argue", "critics", "moreover",
    "consequently",
];

/// Trigger words marking climate sentences in environment copy.
static CLIMATE_TRIGGERS: &[&str] = &[
    "climate", "emissions", "biodiversity", "conservation", "renewable", "forest", "wildlife",
];

/// Fallback key point used when extraction finds nothing.
pub const DEFAULT_KEY_POINT: &str = "Key development announced";

/// Keyword-driven syllabus-connection rules: trigger, topic, subject, prose.
static CONNECTION_RULES: Lazy<Vec<(&'static str, &'static str, Subject, &'static str)>> =
    Lazy::new(|| {
        vec![
            ("article", "Constitutional Framework", Subject::Polity,
             "Engages specific constitutional provisions and their interpretation"),
            ("amendment", "Constitutional Framework", Subject::Polity,
             "Engages specific constitutional provisions and their interpretation"),
            ("supreme court", "Judiciary", Subject::Polity,
             "Illustrates the judiciary's role in settling contested questions"),
            ("scheme", "Government Schemes", Subject::Polity,
             "Adds a current example of centrally designed welfare delivery"),
            ("yojana", "Government Schemes", Subject::Polity,
             "Adds a current example of centrally designed welfare delivery"),
            ("gdp", "Economic Development", Subject::Economy,
             "Feeds directly into growth and development analysis"),
            ("inflation", "Monetary Policy", Subject::Economy,
             "Connects to the inflation-targeting framework"),
            ("repo rate", "Monetary Policy", Subject::Economy,
             "Connects to the inflation-targeting framework"),
            ("budget", "Fiscal Policy", Subject::Economy,
             "Illustrates budgetary priorities and fiscal space"),
            ("trade", "External Sector", Subject::Economy,
             "Bears on trade policy and external balances"),
            ("climate", "Climate Change", Subject::Environment,
             "Current evidence for climate policy discussion"),
            ("emissions", "Climate Change", Subject::Environment,
             "Current evidence for climate policy discussion"),
            ("biodiversity", "Biodiversity Conservation", Subject::Environment,
             "Adds field evidence on conservation outcomes"),
            ("renewable", "Energy Transition", Subject::Environment,
             "Tracks the renewable build-out against targets"),
            ("monsoon", "Indian Monsoon", Subject::Geography,
             "Links rainfall behaviour to water and agriculture stress"),
            ("river", "Drainage Systems", Subject::Geography,
             "Connects to river systems and interstate water questions"),
            ("satellite", "Space Technology", Subject::ScienceTech,
             "A current milestone in indigenous space capability"),
            ("isro", "Space Technology", Subject::ScienceTech,
             "A current milestone in indigenous space capability"),
            ("summit", "International Groupings", Subject::InternationalRelations,
             "A live instance of summit-level engagement"),
            ("bilateral", "Bilateral Relations", Subject::InternationalRelations,
             "Adds a current case to neighbourhood-policy analysis"),
            ("education", "Education Policy", Subject::SocialIssues,
             "Evidence on education outcomes and policy response"),
            ("health", "Health Policy", Subject::SocialIssues,
             "Evidence on health outcomes and delivery"),
            ("nutrition", "Poverty and Hunger", Subject::SocialIssues,
             "Connects nutrition outcomes to welfare design"),
        ]
    });

/// Default connection guaranteed per primary subject.
fn default_connection(subject: Subject) -> SyllabusConnection {
    let (topic, connection) = match subject {
        Subject::Polity => ("Indian Polity and Governance", "Adds a current illustration to polity preparation"),
        Subject::Economy => ("Indian Economy", "Adds a current data point to economy preparation"),
        Subject::Geography => ("Indian and World Geography", "Adds a current case to geography preparation"),
        Subject::History => ("History of India", "Connects present developments to their historical context"),
        Subject::Environment => ("Environment and Ecology", "Adds current evidence to environment preparation"),
        Subject::ScienceTech => ("Science and Technology", "Adds a current development to S&T preparation"),
        Subject::InternationalRelations => ("India and the World", "Adds a current case to IR preparation"),
        Subject::SocialIssues => ("Social Justice", "Adds current evidence to social-sector preparation"),
        Subject::ArtCulture => ("Indian Art and Culture", "Adds a current reference to culture preparation"),
        Subject::Ethics => ("Ethics and Integrity", "Offers a live case for ethical analysis"),
    };
    SyllabusConnection {
        topic: topic.to_string(),
        subject,
        connection: connection.to_string(),
    }
}

/// Static previous-year-question references per subject.
fn pyq_references(subject: Subject) -> Vec<PyqReference> {
    let entries: &[(u16, &str, &str)] = match subject {
        Subject::Polity => &[
            (2022, "GS Paper II", "Discuss the role of the Finance Commission in fiscal federalism."),
            (2020, "Prelims", "Which Article deals with grants-in-aid to States?"),
            (2019, "GS Paper II", "Judicial review is an integral part of the basic structure. Comment."),
        ],
        Subject::Economy => &[
            (2023, "GS Paper III", "Examine the effectiveness of inflation targeting in India."),
            (2021, "Prelims", "Which of the following constitute the capital account?"),
            (2019, "GS Paper III", "Growth without distributive justice is of no consequence. Discuss."),
        ],
        Subject::Environment => &[
            (2022, "GS Paper III", "Describe the major outcomes of the UNFCCC conferences."),
            (2021, "Prelims", "Which of the following best describes carbon sequestration?"),
        ],
        Subject::Geography => &[
            (2021, "GS Paper I", "Account for the variability of the Indian monsoon."),
            (2020, "Prelims", "Which rivers form the largest delta in the world?"),
        ],
        Subject::ScienceTech => &[
            (2023, "GS Paper III", "Discuss indigenous launch capability and its strategic value."),
            (2020, "Prelims", "With reference to satellite navigation, consider the statements."),
        ],
        Subject::InternationalRelations => &[
            (2022, "GS Paper II", "Evaluate India's neighbourhood-first policy."),
            (2021, "GS Paper II", "Groupings like BRICS reshape multilateralism. Examine."),
        ],
        Subject::SocialIssues => &[
            (2022, "GS Paper II", "Examine the role of mid-day meals in addressing hidden hunger."),
            (2019, "GS Paper I", "Poverty is a multidimensional phenomenon. Elaborate."),
        ],
        Subject::History => &[
            (2020, "GS Paper I", "Assess the contribution of archaeology to early Indian history."),
        ],
        Subject::ArtCulture => &[
            (2020, "GS Paper I", "Safeguarding heritage is a national obligation. Discuss."),
        ],
        Subject::Ethics => &[
            (2021, "GS Paper IV", "Public trust is the foundation of governance. Analyse."),
        ],
    };
    entries
        .iter()
        .take(MAX_PYQ_REFS)
        .map(|(year, paper, question)| PyqReference {
            year: *year,
            paper: paper.to_string(),
            question: question.to_string(),
        })
        .collect()
}

/// Clamp a byte position to the nearest character boundary at or below it.
fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    i = i.min(s.len());
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Clamp a byte position to the nearest character boundary at or above it.
fn ceil_char_boundary(s: &str, mut i: usize) -> usize {
    i = i.min(s.len());
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// A match's surrounding text, 30 characters each side.
fn context_window(text: &str, start: usize, end: usize) -> String {
    let lo = floor_char_boundary(text, start.saturating_sub(30));
    let hi = ceil_char_boundary(text, (end + 30).min(text.len()));
    text[lo..hi].trim().to_string()
}

/// Leading digits of a matched figure, for magnitude heuristics.
fn leading_value(s: &str) -> f64 {
    let digits: String = s
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .filter(|c| *c != ',')
        .collect();
    digits.parse().unwrap_or(0.0)
}

/// Extract facts and figures from the body with the fixed regex battery.
///
/// Each fact carries a 30-character context window each side and an
/// importance set by magnitude: large currency amounts, double-digit
/// percentages, gigawatt-scale figures, billion-dollar amounts, and
/// superlative phrases rank High; the rest Medium. Capped at 8, in match
/// order per pattern.
pub fn extract_facts(body: &str) -> Vec<ExtractedFact> {
    let mut facts: Vec<ExtractedFact> = Vec::new();
    let mut push = |text: String, context: String, importance: FactImportance| {
        if facts.len() < MAX_FACTS && !facts.iter().any(|f| f.text == text) {
            facts.push(ExtractedFact { text, context, importance });
        }
    };

    for m in CURRENCY_PATTERN.find_iter(body) {
        let importance = if leading_value(m.as_str()) >= 1000.0 {
            FactImportance::High
        } else {
            FactImportance::Medium
        };
        push(m.as_str().to_string(), context_window(body, m.start(), m.end()), importance);
    }
    for m in PERCENT_PATTERN.find_iter(body) {
        let importance = if leading_value(m.as_str()) >= 10.0 {
            FactImportance::High
        } else {
            FactImportance::Medium
        };
        push(m.as_str().to_string(), context_window(body, m.start(), m.end()), importance);
    }
    for m in UNIT_PATTERN.find_iter(body) {
        let text = m.as_str().to_lowercase();
        let importance = if text.contains("gw") || text.contains("million tonnes") {
            FactImportance::High
        } else {
            FactImportance::Medium
        };
        push(m.as_str().to_string(), context_window(body, m.start(), m.end()), importance);
    }
    for m in DOLLAR_PATTERN.find_iter(body) {
        let text = m.as_str().to_lowercase();
        let importance = if text.contains("billion") || text.contains("trillion") {
            FactImportance::High
        } else {
            FactImportance::Medium
        };
        push(m.as_str().to_string(), context_window(body, m.start(), m.end()), importance);
    }
    for m in DATE_PATTERN.find_iter(body) {
        push(
            m.as_str().to_string(),
            context_window(body, m.start(), m.end()),
            FactImportance::Medium,
        );
    }
    for m in SUPERLATIVE_PATTERN.find_iter(body) {
        push(
            m.as_str().trim().to_string(),
            context_window(body, m.start(), m.end()),
            FactImportance::High,
        );
    }

    facts
}

/// Extract ordered key points, branching by source type.
///
/// Government bulletins yield action-pattern sentences; editorial sources
/// yield sentences with analytical triggers; the economic source yields
/// sentences carrying percentages or currency figures; the environment
/// source yields climate-trigger sentences. Capped at 7 with a generic
/// fallback when nothing matches.
pub fn extract_key_points(source: NewsSource, body: &str) -> Vec<String> {
    let sentences = split_sentences(body);
    let mut points: Vec<String> = sentences
        .iter()
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            if source.is_government() {
                ACTION_PATTERN.is_match(sentence)
            } else if source.is_economic() {
                PERCENT_PATTERN.is_match(sentence) || CURRENCY_PATTERN.is_match(sentence)
            } else if source.is_environmental() {
                CLIMATE_TRIGGERS.iter().any(|t| lower.contains(t))
            } else {
                ANALYTICAL_TRIGGERS.iter().any(|t| lower.contains(t))
            }
        })
        .take(MAX_KEY_POINTS)
        .cloned()
        .collect();

    if points.is_empty() {
        debug!(%source, "No key points matched; using fallback");
        points.push(DEFAULT_KEY_POINT.to_string());
    }
    points
}

/// Derive syllabus connections from keyword presence.
///
/// Capped at 5; the primary subject's default connection is always present.
pub fn derive_connections(item: &ProcessedNewsItem) -> Vec<SyllabusConnection> {
    let text = format!("{} {}", item.item.title, item.item.body).to_lowercase();
    let mut connections: Vec<SyllabusConnection> = Vec::new();

    for (trigger, topic, subject, prose) in CONNECTION_RULES.iter() {
        if connections.len() >= MAX_CONNECTIONS - 1 {
            break;
        }
        if text.contains(trigger) && !connections.iter().any(|c| c.topic == *topic) {
            connections.push(SyllabusConnection {
                topic: topic.to_string(),
                subject: *subject,
                connection: prose.to_string(),
            });
        }
    }

    let default = default_connection(item.primary_subject);
    if !connections.iter().any(|c| c.topic == default.topic) {
        connections.push(default);
    }
    connections.truncate(MAX_CONNECTIONS);
    connections
}

/// Templated context paragraph keyed by primary subject.
fn context_paragraph(subject: Subject) -> String {
    let body = match subject {
        Subject::Polity => "This sits within the working of India's constitutional machinery, where the relationship between the legislature, executive and judiciary shapes outcomes.",
        Subject::Economy => "This sits within India's macroeconomic context, where growth, prices and public finance interact with policy choices.",
        Subject::Geography => "This sits within India's physical and human geography, where location, climate and resources drive regional outcomes.",
        Subject::History => "This connects present developments to their historical roots and the longer arc of institutional change.",
        Subject::Environment => "This sits within the environment and development balance, where conservation goals meet growth pressures.",
        Subject::ScienceTech => "This sits within India's science and technology push, where indigenous capability carries strategic weight.",
        Subject::InternationalRelations => "This sits within India's external engagement, where bilateral and multilateral tracks advance national interests.",
        Subject::SocialIssues => "This sits within the social-sector landscape, where welfare design meets delivery on the ground.",
        Subject::ArtCulture => "This sits within India's cultural heritage and its contemporary preservation challenges.",
        Subject::Ethics => "This raises questions of probity and public ethics that recur in administration.",
    };
    body.to_string()
}

/// Build the two-minute-read summary.
///
/// Structure: lead sentences, context paragraph, relevance paragraph,
/// takeaways paragraph, truncated to 300 words.
pub fn generate_summary(item: &ProcessedNewsItem, key_points: &[String]) -> Summary {
    let sentences = split_sentences(&item.item.body);
    let lead = sentences
        .iter()
        .take(2)
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");

    let context = context_paragraph(item.primary_subject);

    let relevance = format!(
        "For the exam, this is a {} item with a relevance score of {:.0}, mapping to {} and touching {}.",
        item.primary_subject,
        item.relevance_score,
        item.mains_relevance
            .papers
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        item.syllabus_topics.join(", "),
    );

    let takeaways = format!(
        "Key takeaways: {}.",
        key_points
            .iter()
            .take(3)
            .map(|p| p.trim_end_matches('.'))
            .collect::<Vec<_>>()
            .join("; ")
    );

    let text = truncate_words(
        &format!("{lead}\n\n{context}\n\n{relevance}\n\n{takeaways}"),
        SUMMARY_WORD_LIMIT,
    );
    let words = word_count(&text);
    Summary { text, word_count: words }
}

/// Templated background-context prose.
fn generate_background(item: &ProcessedNewsItem) -> String {
    format!(
        "{} Reported by {}, the development relates to {} on the static syllabus. {}",
        context_paragraph(item.primary_subject),
        item.item.source,
        item.syllabus_topics.join(", "),
        if item.secondary_subjects.is_empty() {
            String::new()
        } else {
            format!(
                "It also carries secondary relevance for {}.",
                item.secondary_subjects
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        }
    )
    .trim_end()
    .to_string()
}

/// Templated prelims/mains/interview framing.
fn generate_upsc_angle(item: &ProcessedNewsItem, facts: &[ExtractedFact]) -> UpscAngle {
    let fact_hint = facts
        .first()
        .map(|f| format!(" Factual hooks such as \"{}\" are directly testable.", f.text))
        .unwrap_or_default();
    UpscAngle {
        prelims: format!(
            "Prelims: expect objective questions on names, figures and provisions from this development.{fact_hint}"
        ),
        mains: format!(
            "Mains: usable as a current example in {} answers on {}.",
            item.mains_relevance
                .papers
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join("/"),
            item.syllabus_topics.join(", ")
        ),
        interview: format!(
            "Interview: be ready to take a considered position on the {} dimensions and defend it with the reported facts.",
            item.primary_subject
        ),
    }
}

/// Generate the full analysis for one processed item.
///
/// # Errors
///
/// Returns [`PipelineError::MissingInput`] when the item lacks the derived
/// fields analysis depends on (empty body or no syllabus topics). Callers
/// running a batch catch this per item and skip.
#[instrument(level = "debug", skip_all, fields(id = %item.item.id))]
pub fn generate_analysis(item: &ProcessedNewsItem) -> Result<NewsAnalysis> {
    if item.item.body.trim().is_empty() {
        return Err(PipelineError::MissingInput(format!(
            "item {} has an empty body",
            item.item.id
        )));
    }
    if item.syllabus_topics.is_empty() {
        return Err(PipelineError::MissingInput(format!(
            "item {} has no syllabus topics",
            item.item.id
        )));
    }

    let key_points = extract_key_points(item.item.source, &item.item.body);
    let facts = extract_facts(&item.item.body);
    let connections = derive_connections(item);
    let summary = generate_summary(item, &key_points);
    let background = generate_background(item);
    let upsc_angle = generate_upsc_angle(item, &facts);
    let (prelims_questions, mains_questions) =
        questions::create_questions(item, &key_points, &facts, &connections);
    let pyq = pyq_references(item.primary_subject);

    Ok(NewsAnalysis {
        item: item.clone(),
        summary,
        key_points,
        facts,
        background,
        upsc_angle,
        connections,
        prelims_questions,
        mains_questions,
        pyq_references: pyq,
    })
}

/// Analyze a batch of processed items, skipping per-item failures.
///
/// Items are processed through a bounded concurrent stream; output keeps
/// input order. A failed item is logged and dropped, never fatal.
#[instrument(level = "info", skip_all, fields(count = items.len()))]
pub async fn analyze_batch(items: &[ProcessedNewsItem]) -> Vec<NewsAnalysis> {
    const PARALLEL_BATCH_SIZE: usize = 8;

    let analyses: Vec<NewsAnalysis> = stream::iter(items)
        .map(|item| async move {
            match generate_analysis(item) {
                Ok(analysis) => Some(analysis),
                Err(e) => {
                    warn!(id = %item.item.id, error = %e, "Analysis failed; skipping item");
                    None
                }
            }
        })
        .buffered(PARALLEL_BATCH_SIZE)
        .filter_map(std::future::ready)
        .collect()
        .await;

    info!(
        input = items.len(),
        analyzed = analyses.len(),
        "Batch analysis complete"
    );
    analyses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GsPaper, MainsRelevance, NewsItem, PrelimsLevel, ProcessingMeta};
    use chrono::{TimeZone, Utc};

    fn processed(source: NewsSource, title: &str, body: &str) -> ProcessedNewsItem {
        ProcessedNewsItem {
            item: NewsItem {
                id: format!("{source:?}-1").to_lowercase(),
                source,
                title: title.to_string(),
                body_len: body.len(),
                body: body.to_string(),
                published: Utc.with_ymd_and_hms(2026, 8, 20, 9, 0, 0).unwrap(),
                url: "https://example.org/a".to_string(),
                author: None,
                tags: vec!["scheme".to_string()],
                image: None,
            },
            relevance_score: 72.0,
            primary_subject: Subject::Economy,
            secondary_subjects: vec![Subject::Polity],
            syllabus_topics: vec!["Government Schemes".to_string()],
            prelims_relevance: PrelimsLevel::High,
            mains_relevance: MainsRelevance {
                papers: vec![GsPaper::Gs3],
                level: PrelimsLevel::Medium,
            },
            question_probability: 75.0,
            meta: ProcessingMeta {
                processed_at: Utc.with_ymd_and_hms(2026, 8, 20, 10, 0, 0).unwrap(),
                version: "0.1.0".to_string(),
                confidence: 0.8,
            },
        }
    }

    const GOV_BODY: &str = "The Union Cabinet approved the National Rural Digital \
        Infrastructure Scheme with an outlay of Rs 12000 crore over five years. The \
        ministry announced that 250000 gram panchayats will be connected, the largest \
        rural connectivity programme to date. Coverage rose 45% in pilot districts \
        during 2025. The government cleared an additional $2 billion line of credit.";

    #[test]
    fn test_extract_facts_patterns_and_cap() {
        let facts = extract_facts(GOV_BODY);
        assert!(!facts.is_empty());
        assert!(facts.len() <= MAX_FACTS);
        assert!(facts.iter().any(|f| f.text.contains("crore")));
        assert!(facts.iter().any(|f| f.text.contains('%')));
        assert!(facts.iter().any(|f| f.text.contains('$')));
    }

    #[test]
    fn test_fact_importance_magnitude_heuristics() {
        let facts = extract_facts("The scheme costs Rs 12000 crore while the pilot cost Rs 80 crore. Growth was 45% overall but only 3% in cities.");
        let big = facts.iter().find(|f| f.text.contains("12000")).unwrap();
        let small = facts.iter().find(|f| f.text.contains("80")).unwrap();
        assert_eq!(big.importance, FactImportance::High);
        assert_eq!(small.importance, FactImportance::Medium);

        let big_pct = facts.iter().find(|f| f.text.starts_with("45")).unwrap();
        let small_pct = facts.iter().find(|f| f.text.starts_with('3')).unwrap();
        assert_eq!(big_pct.importance, FactImportance::High);
        assert_eq!(small_pct.importance, FactImportance::Medium);
    }

    #[test]
    fn test_fact_context_window_bounds() {
        let facts = extract_facts(GOV_BODY);
        for fact in &facts {
            assert!(fact.context.contains(fact.text.trim()) || !fact.context.is_empty());
        }
    }

    #[test]
    fn test_key_points_government_action_patterns() {
        let points = extract_key_points(NewsSource::Pib, GOV_BODY);
        assert!(points.len() <= MAX_KEY_POINTS);
        assert!(points[0].contains("Cabinet approved"));
        assert!(points.iter().any(|p| p.contains("announced") || p.contains("cleared")));
    }

    #[test]
    fn test_key_points_editorial_triggers() {
        let body = "The court delivered its verdict. However, the implications for \
                    federalism are far from settled. Critics argue the reasoning is thin.";
        let points = extract_key_points(NewsSource::TheHindu, body);
        assert_eq!(points.len(), 2);
        assert!(points[0].starts_with("However"));
    }

    #[test]
    fn test_key_points_economic_figures() {
        let body = "Markets opened flat. GDP grew 7.2% in the quarter. The deficit \
                    stood at Rs 280000 crore for the period.";
        let points = extract_key_points(NewsSource::EconomicTimes, body);
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_key_points_fallback() {
        let body = "A short report with no matching sentences at all, which still \
                    needs a placeholder point for downstream consumers.";
        let points = extract_key_points(NewsSource::Pib, body);
        assert_eq!(points, vec![DEFAULT_KEY_POINT.to_string()]);
    }

    #[test]
    fn test_connections_include_subject_default_and_cap() {
        let item = processed(NewsSource::Pib, "Scheme news", GOV_BODY);
        let connections = derive_connections(&item);
        assert!(!connections.is_empty());
        assert!(connections.len() <= MAX_CONNECTIONS);
        assert!(connections.iter().any(|c| c.topic == "Indian Economy"
            || connections.len() == MAX_CONNECTIONS));
        // Keyword "scheme" is present, so the schemes connection fires.
        assert!(connections.iter().any(|c| c.topic == "Government Schemes"));
    }

    #[test]
    fn test_summary_structure_and_word_cap() {
        let item = processed(NewsSource::Pib, "Scheme news", GOV_BODY);
        let points = extract_key_points(NewsSource::Pib, GOV_BODY);
        let summary = generate_summary(&item, &points);
        assert!(summary.word_count <= SUMMARY_WORD_LIMIT);
        assert_eq!(summary.word_count, crate::utils::word_count(&summary.text));
        assert!(summary.text.contains("Key takeaways"));
        assert!(summary.text.contains("relevance score"));
    }

    #[test]
    fn test_generate_analysis_complete_shape() {
        let item = processed(NewsSource::Pib, "Scheme news", GOV_BODY);
        let analysis = generate_analysis(&item).unwrap();
        assert_eq!(analysis.prelims_questions.len(), 5);
        assert_eq!(analysis.mains_questions.len(), 2);
        assert!(analysis.key_points.len() <= MAX_KEY_POINTS);
        assert!(analysis.facts.len() <= MAX_FACTS);
        assert!(!analysis.connections.is_empty());
        assert!(analysis.pyq_references.len() <= MAX_PYQ_REFS);
        for q in &analysis.prelims_questions {
            assert_eq!(q.options.len(), 4);
            assert!(q.correct_answer < 4);
        }
    }

    #[test]
    fn test_generate_analysis_rejects_missing_inputs() {
        let mut item = processed(NewsSource::Pib, "Broken", GOV_BODY);
        item.item.body = String::new();
        assert!(generate_analysis(&item).is_err());

        let mut item = processed(NewsSource::Pib, "Broken", GOV_BODY);
        item.syllabus_topics.clear();
        assert!(generate_analysis(&item).is_err());
    }

    #[tokio::test]
    async fn test_analyze_batch_skips_failures() {
        let good = processed(NewsSource::Pib, "Good", GOV_BODY);
        let mut bad = processed(NewsSource::Pib, "Bad", GOV_BODY);
        bad.syllabus_topics.clear();

        let analyses = analyze_batch(&[good.clone(), bad, good]).await;
        assert_eq!(analyses.len(), 2);
    }
}

//! Trend detection across a window of analyses.
//!
//! Works over any span of [`NewsAnalysis`] records (a week in the normal
//! pipeline run) and reports recurring themes, emerging topics, subject and
//! source distributions, and ranked exam-topic predictions. Everything here
//! is pure over its inputs; an empty window yields empty collections.

use crate::models::{
    EmergingTopic, ExamPrediction, ExamType, ImportanceTier, NewsAnalysis, PredictedImportance,
    RecurringTheme, SourceDistribution, Subject, SubjectDistribution, TrendAnalysis,
};
use crate::relevance::{ANALYTICAL_KEYWORDS, FACTUAL_KEYWORDS};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// Maximum merged exam predictions reported per window.
pub const MAX_PREDICTIONS: usize = 15;
/// Trailing window, in days, within which a topic counts as newly seen.
const EMERGING_WINDOW_DAYS: i64 = 7;
/// Minimum appearances-per-day growth for an emerging topic.
const MIN_GROWTH_RATE: f64 = 0.3;

/// Title patterns mapped to canonical theme names.
static TITLE_THEMES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)\b(scheme|yojana|mission|abhiyan)\b", "Government Schemes"),
        (r"(?i)\b(supreme court|high court|verdict|judgment)\b", "Judicial Pronouncements"),
        (r"(?i)\b(gdp|inflation|repo rate|fiscal)\b", "Macroeconomic Indicators"),
        (r"(?i)\b(summit|bilateral|treaty|g20|brics)\b", "International Engagements"),
        (r"(?i)\b(climate|emission|renewable|biodiversity)\b", "Climate and Environment"),
        (r"(?i)\b(election|parliament|bill|ordinance)\b", "Legislative and Electoral"),
        (r"(?i)\b(isro|satellite|mission to|spacecraft)\b", "Space Programme"),
    ]
    .into_iter()
    .map(|(pattern, theme)| (Regex::new(pattern).expect("valid theme pattern"), theme))
    .collect()
});

/// Key-point phrases mapped to theme names, checked by substring.
static KEY_POINT_THEMES: &[(&str, &str)] = &[
    ("crore", "Public Expenditure"),
    ("approved", "Cabinet Decisions"),
    ("agreement", "International Engagements"),
    ("target", "Policy Targets"),
];

struct ThemeTally {
    occurrences: usize,
    item_ids: Vec<String>,
    relevance_sum: f64,
}

/// Themes an analysis contributes, deduplicated within the analysis.
fn themes_for(analysis: &NewsAnalysis) -> Vec<String> {
    let mut themes: Vec<String> = Vec::new();
    let mut push = |theme: String| {
        if !themes.contains(&theme) {
            themes.push(theme);
        }
    };

    for (pattern, theme) in TITLE_THEMES.iter() {
        if pattern.is_match(&analysis.item.item.title) {
            push((*theme).to_string());
        }
    }
    for point in &analysis.key_points {
        let lowered = point.to_lowercase();
        for (needle, theme) in KEY_POINT_THEMES {
            if lowered.contains(needle) {
                push((*theme).to_string());
            }
        }
    }
    for topic in &analysis.item.syllabus_topics {
        push(topic.clone());
    }
    push(analysis.item.primary_subject.to_string());
    themes
}

/// Detect themes appearing at least twice across the window.
fn recurring_themes(analyses: &[NewsAnalysis]) -> Vec<RecurringTheme> {
    let mut order: Vec<String> = Vec::new();
    let mut tally: BTreeMap<String, ThemeTally> = BTreeMap::new();

    for analysis in analyses {
        for theme in themes_for(analysis) {
            if !tally.contains_key(&theme) {
                order.push(theme.clone());
            }
            let entry = tally.entry(theme).or_insert(ThemeTally {
                occurrences: 0,
                item_ids: Vec::new(),
                relevance_sum: 0.0,
            });
            entry.occurrences += 1;
            entry.item_ids.push(analysis.item.item.id.clone());
            entry.relevance_sum += analysis.item.relevance_score;
        }
    }

    let mut themes: Vec<RecurringTheme> = order
        .into_iter()
        .filter_map(|theme| {
            let t = &tally[&theme];
            if t.occurrences < 2 {
                return None;
            }
            let avg_relevance = t.relevance_sum / t.occurrences as f64;
            let weight = t.occurrences as f64 * 10.0 + avg_relevance;
            let importance = if weight > 200.0 {
                ImportanceTier::Critical
            } else if weight > 150.0 {
                ImportanceTier::Important
            } else {
                ImportanceTier::Moderate
            };
            Some(RecurringTheme {
                theme,
                occurrences: t.occurrences,
                item_ids: t.item_ids.clone(),
                importance,
            })
        })
        .collect();
    themes.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
    themes
}

/// Detect syllabus topics first seen in the trailing window and growing.
fn emerging_topics(analyses: &[NewsAnalysis], period_end: NaiveDate) -> Vec<EmergingTopic> {
    let mut order: Vec<String> = Vec::new();
    let mut sightings: BTreeMap<String, (NaiveDate, usize)> = BTreeMap::new();

    for analysis in analyses {
        let seen = analysis.item.item.published.date_naive();
        for topic in &analysis.item.syllabus_topics {
            if !sightings.contains_key(topic) {
                order.push(topic.clone());
            }
            let entry = sightings.entry(topic.clone()).or_insert((seen, 0));
            entry.0 = entry.0.min(seen);
            entry.1 += 1;
        }
    }

    order
        .into_iter()
        .filter_map(|topic| {
            let (first_seen, occurrences) = sightings[&topic];
            let age_days = (period_end - first_seen).num_days();
            if age_days > EMERGING_WINDOW_DAYS {
                return None;
            }
            let growth_rate = occurrences as f64 / age_days.max(1) as f64;
            if growth_rate <= MIN_GROWTH_RATE {
                return None;
            }
            let weight = growth_rate * 50.0 + occurrences as f64 * 10.0;
            let predicted_importance = if weight > 80.0 {
                PredictedImportance::High
            } else if weight > 50.0 {
                PredictedImportance::Medium
            } else {
                PredictedImportance::Low
            };
            Some(EmergingTopic { topic, growth_rate, first_seen, predicted_importance })
        })
        .collect()
}

/// Percentage share of analyses per primary subject, insertion-ordered.
fn subject_distribution(analyses: &[NewsAnalysis]) -> SubjectDistribution {
    let mut order: Vec<Subject> = Vec::new();
    let mut counts: BTreeMap<Subject, usize> = BTreeMap::new();
    for analysis in analyses {
        let subject = analysis.item.primary_subject;
        if !counts.contains_key(&subject) {
            order.push(subject);
        }
        *counts.entry(subject).or_insert(0) += 1;
    }
    let total = analyses.len().max(1) as f64;
    order
        .into_iter()
        .map(|subject| (subject, counts[&subject] as f64 * 100.0 / total))
        .collect()
}

fn source_distribution(analyses: &[NewsAnalysis]) -> SourceDistribution {
    let mut dist: SourceDistribution = Vec::new();
    for analysis in analyses {
        let source = analysis.item.item.source;
        match dist.iter_mut().find(|(s, _)| *s == source) {
            Some((_, count)) => *count += 1,
            None => dist.push((source, 1)),
        }
    }
    dist
}

/// Type a theme by the vocabulary it leans on.
fn exam_type_for(theme: &str) -> ExamType {
    let lowered = theme.to_lowercase();
    let factual = FACTUAL_KEYWORDS.iter().any(|kw| lowered.contains(kw));
    let analytical = ANALYTICAL_KEYWORDS.iter().any(|kw| lowered.contains(kw));
    match (factual, analytical) {
        (true, false) => ExamType::Prelims,
        (false, true) => ExamType::Mains,
        _ => ExamType::Both,
    }
}

/// Merge theme, emerging-topic, and subject-share predictions.
fn exam_predictions(
    themes: &[RecurringTheme],
    emerging: &[EmergingTopic],
    subjects: &SubjectDistribution,
    period_end: NaiveDate,
) -> Vec<ExamPrediction> {
    let mut predictions: Vec<ExamPrediction> = Vec::new();

    for theme in themes {
        let tier_bonus = match theme.importance {
            ImportanceTier::Critical => 30.0,
            ImportanceTier::Important => 20.0,
            ImportanceTier::Moderate => 0.0,
        };
        let occurrence_bonus = (theme.occurrences as f64 * 5.0).min(20.0);
        predictions.push(ExamPrediction {
            topic: theme.theme.clone(),
            exam_type: exam_type_for(&theme.theme),
            probability: (50.0 + tier_bonus + occurrence_bonus).min(95.0),
            reasoning: format!("Recurred {} times across the period", theme.occurrences),
        });
    }

    for topic in emerging {
        let recency = if (period_end - topic.first_seen).num_days() <= 3 {
            10.0
        } else {
            5.0
        };
        predictions.push(ExamPrediction {
            topic: topic.topic.clone(),
            exam_type: ExamType::Prelims,
            probability: (40.0 + topic.growth_rate * 20.0 + recency).min(85.0),
            reasoning: format!(
                "Emerging since {} at {:.1} appearances/day",
                topic.first_seen, topic.growth_rate
            ),
        });
    }

    for (subject, share) in subjects {
        if *share > 15.0 {
            predictions.push(ExamPrediction {
                topic: subject.to_string(),
                exam_type: ExamType::Both,
                probability: (60.0 + share / 2.0).min(95.0),
                reasoning: format!("{share:.0}% of the period's coverage"),
            });
        }
    }

    predictions.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    predictions.truncate(MAX_PREDICTIONS);
    predictions
}

/// Detect trends over a window of analyses.
#[instrument(level = "info", skip_all, fields(%period_start, %period_end, count = analyses.len()))]
pub fn analyze_trends(
    analyses: &[NewsAnalysis],
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> TrendAnalysis {
    let themes = recurring_themes(analyses);
    let emerging = emerging_topics(analyses, period_end);
    let subjects = subject_distribution(analyses);
    let sources = source_distribution(analyses);
    let predictions = exam_predictions(&themes, &emerging, &subjects, period_end);

    info!(
        themes = themes.len(),
        emerging = emerging.len(),
        predictions = predictions.len(),
        "Analyzed trends"
    );
    TrendAnalysis {
        period_start,
        period_end,
        recurring_themes: themes,
        emerging_topics: emerging,
        subject_distribution: subjects,
        source_distribution: sources,
        exam_predictions: predictions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::generate_analysis;
    use crate::models::{
        GsPaper, MainsRelevance, NewsItem, NewsSource, PrelimsLevel, ProcessedNewsItem,
        ProcessingMeta,
    };
    use chrono::{TimeZone, Utc};

    fn analysis(n: usize, day: u32, title: &str, topic: &str, score: f64) -> NewsAnalysis {
        let body = "The Union Cabinet approved the programme with an outlay of Rs 500 \
                    crore. The ministry announced rollout across 12 states covering 45% \
                    of districts in the first phase."
            .to_string();
        let item = ProcessedNewsItem {
            item: NewsItem {
                id: format!("item-{n}"),
                source: NewsSource::Pib,
                title: title.to_string(),
                body_len: body.len(),
                body,
                published: Utc.with_ymd_and_hms(2026, 8, day, 9, 0, 0).unwrap(),
                url: format!("https://example.org/{n}"),
                author: None,
                tags: vec!["scheme".to_string()],
                image: None,
            },
            relevance_score: score,
            primary_subject: Subject::Economy,
            secondary_subjects: vec![],
            syllabus_topics: vec![topic.to_string()],
            prelims_relevance: PrelimsLevel::High,
            mains_relevance: MainsRelevance {
                papers: vec![GsPaper::Gs3],
                level: PrelimsLevel::Medium,
            },
            question_probability: 70.0,
            meta: ProcessingMeta {
                processed_at: Utc.with_ymd_and_hms(2026, 8, 25, 10, 0, 0).unwrap(),
                version: "0.1.0".to_string(),
                confidence: 0.8,
            },
        };
        generate_analysis(&item).unwrap()
    }

    fn period() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2026, 8, 18).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 24).unwrap(),
        )
    }

    #[test]
    fn test_recurring_theme_requires_two_occurrences() {
        let (start, end) = period();
        let analyses = vec![
            analysis(1, 19, "New housing scheme cleared", "Government Schemes", 60.0),
            analysis(2, 20, "Scheme expanded to eastern states", "Government Schemes", 65.0),
            analysis(3, 21, "ISRO satellite placed in orbit", "Space Technology", 55.0),
        ];
        let trends = analyze_trends(&analyses, start, end);
        assert!(trends
            .recurring_themes
            .iter()
            .any(|t| t.theme == "Government Schemes" && t.occurrences >= 2));
        // Single sighting never recurs.
        assert!(!trends
            .recurring_themes
            .iter()
            .any(|t| t.theme == "Space Programme"));
    }

    #[test]
    fn test_theme_tier_follows_weight() {
        let (start, end) = period();
        // 12 high-relevance sightings: 12*10 + 90 = 210 > 200.
        let analyses: Vec<NewsAnalysis> = (0..12)
            .map(|n| analysis(n, 19 + (n as u32 % 5), "Pension scheme widened", "Government Schemes", 90.0))
            .collect();
        let trends = analyze_trends(&analyses, start, end);
        let theme = trends
            .recurring_themes
            .iter()
            .find(|t| t.theme == "Government Schemes")
            .unwrap();
        assert_eq!(theme.importance, ImportanceTier::Critical);
        assert_eq!(theme.item_ids.len(), 12);
    }

    #[test]
    fn test_emerging_topic_rejected_outside_recency_gate() {
        let (start, end) = period();
        // First seen 10 days before period end, then heavy repetition. The
        // growth rate clears the 0.3 floor but the recency gate must reject it.
        let analyses: Vec<NewsAnalysis> = (0..8)
            .map(|n| analysis(n, 14, "Semiconductor fab announced", "Industrial Policy", 70.0))
            .collect();
        let trends = analyze_trends(&analyses, start, end);
        assert!((end - NaiveDate::from_ymd_opt(2026, 8, 14).unwrap()).num_days() == 10);
        assert!(!trends
            .emerging_topics
            .iter()
            .any(|t| t.topic == "Industrial Policy"));
    }

    #[test]
    fn test_emerging_topic_inside_gate_with_growth() {
        let (start, end) = period();
        // First seen 2 days before period end, 3 sightings: growth 1.5 > 0.3.
        let analyses: Vec<NewsAnalysis> = (0..3)
            .map(|n| analysis(n, 22, "Green hydrogen corridor", "Renewable Energy", 70.0))
            .collect();
        let trends = analyze_trends(&analyses, start, end);
        let topic = trends
            .emerging_topics
            .iter()
            .find(|t| t.topic == "Renewable Energy")
            .unwrap();
        assert!((topic.growth_rate - 1.5).abs() < 1e-9);
        // 1.5*50 + 3*10 = 105 > 80.
        assert_eq!(topic.predicted_importance, PredictedImportance::High);
    }

    #[test]
    fn test_distributions_sum() {
        let (start, end) = period();
        let analyses = vec![
            analysis(1, 19, "Budget session opens", "Fiscal Policy", 60.0),
            analysis(2, 20, "Budget session continues", "Fiscal Policy", 60.0),
        ];
        let trends = analyze_trends(&analyses, start, end);
        let total: f64 = trends.subject_distribution.iter().map(|(_, p)| p).sum();
        assert!((total - 100.0).abs() < 1e-9);
        let sources: usize = trends.source_distribution.iter().map(|(_, c)| c).sum();
        assert_eq!(sources, 2);
    }

    #[test]
    fn test_predictions_sorted_capped_and_clamped() {
        let (start, end) = period();
        let analyses: Vec<NewsAnalysis> = (0..20)
            .map(|n| {
                let topic = match n % 4 {
                    0 => "Government Schemes",
                    1 => "Fiscal Policy",
                    2 => "Renewable Energy",
                    _ => "Judiciary",
                };
                analysis(n, 19 + (n as u32 % 5), "Flagship scheme progress reviewed", topic, 75.0)
            })
            .collect();
        let trends = analyze_trends(&analyses, start, end);
        assert!(trends.exam_predictions.len() <= MAX_PREDICTIONS);
        for pair in trends.exam_predictions.windows(2) {
            assert!(pair[0].probability >= pair[1].probability);
        }
        for p in &trends.exam_predictions {
            assert!(p.probability <= 95.0);
        }
    }

    #[test]
    fn test_empty_window_yields_empty_collections() {
        let (start, end) = period();
        let trends = analyze_trends(&[], start, end);
        assert!(trends.recurring_themes.is_empty());
        assert!(trends.emerging_topics.is_empty());
        assert!(trends.subject_distribution.is_empty());
        assert!(trends.source_distribution.is_empty());
        assert!(trends.exam_predictions.is_empty());
    }
}

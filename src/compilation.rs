//! Daily and weekly compilation generation.
//!
//! The daily brief ranks a day's analyses, balances a quiz across
//! difficulty bands, and buckets updates into four fixed categories. The
//! weekly compilation rolls seven daily briefs into trending topics, a
//! deduplicated consolidated quiz, revision notes, and topic predictions.
//!
//! Quiz sampling takes a caller-supplied [`StdRng`] so selection is
//! reproducible under a fixed seed. Aggregate stages never raise on empty
//! input; they return well-formed zeroed structures, since downstream
//! consumers expect always-present shapes.

use crate::models::{
    CategorizedUpdates, DailyCompilation, Difficulty, ImportanceTier, MainsQuestion,
    NewsAnalysis, PredictedTopic, PrelimsQuestion, RevisionNote, Subject, TrendingTopic,
    WeeklyCompilation,
};
use chrono::NaiveDate;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// Top stories kept in a daily brief.
pub const DAILY_TOP_STORIES: usize = 10;
/// Daily quiz size, split 3:5:2 across Easy:Medium:Hard.
pub const DAILY_QUIZ_TARGETS: [(Difficulty, usize); 3] = [
    (Difficulty::Easy, 3),
    (Difficulty::Medium, 5),
    (Difficulty::Hard, 2),
];
/// Consolidated weekly quiz size.
pub const WEEKLY_QUIZ_SIZE: usize = 20;
/// Question-text prefix length used for weekly deduplication.
pub const DEDUP_PREFIX_LEN: usize = 50;

fn subject_emoji(subject: Subject) -> &'static str {
    match subject {
        Subject::Polity => "🏛️",
        Subject::Economy => "📈",
        Subject::Geography => "🗺️",
        Subject::History => "📜",
        Subject::Environment => "🌿",
        Subject::ScienceTech => "🔬",
        Subject::InternationalRelations => "🌏",
        Subject::SocialIssues => "🤝",
        Subject::ArtCulture => "🎭",
        Subject::Ethics => "⚖️",
    }
}

/// Rank analyses by relevance descending; ties keep input order.
fn rank_by_relevance(analyses: &[NewsAnalysis]) -> Vec<NewsAnalysis> {
    let mut ranked = analyses.to_vec();
    ranked.sort_by(|a, b| {
        b.item
            .relevance_score
            .partial_cmp(&a.item.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

/// Sample `target` questions from a band, or the whole band when short.
fn sample_band(band: &[&PrelimsQuestion], target: usize, rng: &mut StdRng) -> Vec<PrelimsQuestion> {
    let mut indices: Vec<usize> = (0..band.len()).collect();
    indices.shuffle(rng);
    indices
        .into_iter()
        .take(target)
        .map(|i| band[i].clone())
        .collect()
}

/// Pick the difficulty-balanced daily quiz from the day's questions.
fn daily_quiz(analyses: &[NewsAnalysis], rng: &mut StdRng) -> Vec<PrelimsQuestion> {
    let pool: Vec<&PrelimsQuestion> = analyses
        .iter()
        .flat_map(|a| a.prelims_questions.iter())
        .collect();

    let mut quiz = Vec::new();
    for (difficulty, target) in DAILY_QUIZ_TARGETS {
        let band: Vec<&PrelimsQuestion> = pool
            .iter()
            .copied()
            .filter(|q| q.difficulty == difficulty)
            .collect();
        quiz.extend(sample_band(&band, target, rng));
    }
    quiz
}

/// Templated per-subject brief text with emoji labels.
fn brief_summary(date: NaiveDate, top: &[NewsAnalysis]) -> String {
    if top.is_empty() {
        return format!("No exam-relevant developments selected for {date}.");
    }
    let mut by_subject: BTreeMap<Subject, Vec<&NewsAnalysis>> = BTreeMap::new();
    for analysis in top {
        by_subject
            .entry(analysis.item.primary_subject)
            .or_default()
            .push(analysis);
    }

    let mut out = format!("Daily brief for {date}: {} stories selected.\n", top.len());
    for (subject, stories) in by_subject {
        out.push_str(&format!("\n{} {}:\n", subject_emoji(subject), subject));
        for story in stories {
            out.push_str(&format!(
                "  - {} ({:.0})\n",
                story.item.item.title, story.item.relevance_score
            ));
        }
    }
    out
}

/// Bucket a story into one of the four fixed update categories.
///
/// Subject decides first; a content-keyword fallback covers subjects
/// outside the four buckets, defaulting to the government bucket.
fn bucket_updates(top: &[NewsAnalysis]) -> CategorizedUpdates {
    let mut updates = CategorizedUpdates::default();
    for analysis in top {
        let line = analysis.item.item.title.clone();
        match analysis.item.primary_subject {
            Subject::Economy => updates.economy.push(line),
            Subject::InternationalRelations => updates.international.push(line),
            Subject::Environment | Subject::Geography => updates.environment.push(line),
            Subject::Polity => updates.government.push(line),
            _ => {
                let body = analysis.item.item.body.to_lowercase();
                if body.contains("trade") || body.contains("gdp") || body.contains("market") {
                    updates.economy.push(line);
                } else if body.contains("summit") || body.contains("bilateral") {
                    updates.international.push(line);
                } else if body.contains("climate") || body.contains("forest") {
                    updates.environment.push(line);
                } else {
                    updates.government.push(line);
                }
            }
        }
    }
    updates
}

/// Build a day's brief from its analyses.
///
/// Returns a well-formed empty compilation when `analyses` is empty.
#[instrument(level = "info", skip_all, fields(%date, count = analyses.len()))]
pub fn generate_daily(
    date: NaiveDate,
    analyses: &[NewsAnalysis],
    total_processed: usize,
    rng: &mut StdRng,
) -> DailyCompilation {
    let ranked = rank_by_relevance(analyses);
    let top_stories: Vec<NewsAnalysis> = ranked.into_iter().take(DAILY_TOP_STORIES).collect();
    let quiz = daily_quiz(analyses, rng);
    let summary = brief_summary(date, &top_stories);
    let updates = bucket_updates(&top_stories);

    info!(
        selected = analyses.len(),
        top = top_stories.len(),
        quiz = quiz.len(),
        "Generated daily compilation"
    );
    DailyCompilation {
        date,
        brief_summary: summary,
        updates,
        total_processed,
        total_selected: analyses.len(),
        top_stories,
        quiz,
    }
}

/// Tier a topic from its weekly frequency and best relevance score.
///
/// Non-decreasing in both inputs: raising either frequency or max
/// relevance never lowers the tier.
fn trending_tier(frequency: usize, max_relevance: f64) -> ImportanceTier {
    let weight = frequency as f64 * 10.0 + max_relevance;
    if weight > 150.0 {
        ImportanceTier::Critical
    } else if weight > 100.0 {
        ImportanceTier::Important
    } else {
        ImportanceTier::Moderate
    }
}

/// Count topic frequency and max relevance across a week's top stories.
fn trending_topics(dailies: &[DailyCompilation]) -> Vec<TrendingTopic> {
    // Insertion-ordered tally so equal frequencies keep first-seen order.
    let mut order: Vec<String> = Vec::new();
    let mut tally: BTreeMap<String, (usize, f64)> = BTreeMap::new();

    for daily in dailies {
        for story in &daily.top_stories {
            for topic in &story.item.syllabus_topics {
                if !tally.contains_key(topic) {
                    order.push(topic.clone());
                }
                let entry = tally.entry(topic.clone()).or_insert((0, 0.0));
                entry.0 += 1;
                entry.1 = entry.1.max(story.item.relevance_score);
            }
        }
    }

    let mut topics: Vec<TrendingTopic> = order
        .into_iter()
        .map(|topic| {
            let (frequency, max_relevance) = tally[&topic];
            let importance = trending_tier(frequency, max_relevance);
            TrendingTopic { topic, frequency, importance }
        })
        .collect();
    topics.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    topics
}

/// Build the deduplicated, topic-balanced consolidated quiz.
///
/// Deduplicates on the first 50 characters of question text, then samples
/// proportionally per topic group with remainder fill, capped at 20.
fn consolidated_quiz(dailies: &[DailyCompilation], rng: &mut StdRng) -> Vec<PrelimsQuestion> {
    let all: Vec<&PrelimsQuestion> = dailies
        .iter()
        .flat_map(|d| d.top_stories.iter())
        .flat_map(|a| a.prelims_questions.iter())
        .collect();

    // Prefix dedup.
    let deduped: Vec<&PrelimsQuestion> = all
        .into_iter()
        .unique_by(|q| q.question.chars().take(DEDUP_PREFIX_LEN).collect::<String>())
        .collect();

    if deduped.len() <= WEEKLY_QUIZ_SIZE {
        return deduped.into_iter().cloned().collect();
    }

    // Group by topic, preserving first-seen group order.
    let mut group_order: Vec<String> = Vec::new();
    let mut groups: BTreeMap<String, Vec<&PrelimsQuestion>> = BTreeMap::new();
    for q in &deduped {
        if !groups.contains_key(&q.topic) {
            group_order.push(q.topic.clone());
        }
        groups.entry(q.topic.clone()).or_default().push(q);
    }

    let total = deduped.len();
    let mut quiz: Vec<PrelimsQuestion> = Vec::new();
    let mut leftovers: Vec<Vec<PrelimsQuestion>> = Vec::new();
    for topic in &group_order {
        let group = &groups[topic];
        let share = (WEEKLY_QUIZ_SIZE * group.len()) / total;
        let sampled = sample_band(group, group.len(), rng);
        let (taken, rest) = sampled.split_at(share.min(sampled.len()));
        quiz.extend_from_slice(taken);
        leftovers.push(rest.to_vec());
    }

    // Remainder fill, round-robin over the groups in order.
    let mut cursor = 0;
    while quiz.len() < WEEKLY_QUIZ_SIZE && leftovers.iter().any(|l| !l.is_empty()) {
        let idx = cursor % leftovers.len();
        let group = &mut leftovers[idx];
        if let Some(q) = group.pop() {
            quiz.push(q);
        }
        cursor += 1;
    }
    quiz.truncate(WEEKLY_QUIZ_SIZE);
    quiz
}

/// Per-subject revision notes from deduplicated key points.
fn revision_notes(dailies: &[DailyCompilation]) -> Vec<RevisionNote> {
    let mut by_subject: BTreeMap<Subject, Vec<String>> = BTreeMap::new();
    for daily in dailies {
        for story in &daily.top_stories {
            let notes = by_subject.entry(story.item.primary_subject).or_default();
            for point in &story.key_points {
                if !notes.contains(point) && notes.len() < 10 {
                    notes.push(point.clone());
                }
            }
        }
    }
    by_subject
        .into_iter()
        .map(|(subject, points)| RevisionNote { subject, points })
        .collect()
}

/// Predicted topics: top-5 trending, tier-boosted, merged with
/// government-sourced high-relevance topics at a fixed 75.
fn predicted_topics(
    dailies: &[DailyCompilation],
    trending: &[TrendingTopic],
) -> Vec<PredictedTopic> {
    let mut predictions: Vec<PredictedTopic> = trending
        .iter()
        .take(5)
        .map(|t| {
            let base = t.frequency as f64 * 10.0;
            let boosted = match t.importance {
                ImportanceTier::Critical => base * 1.5,
                ImportanceTier::Important => base * 1.2,
                ImportanceTier::Moderate => base,
            };
            PredictedTopic {
                topic: t.topic.clone(),
                probability: boosted.min(95.0),
                reasoning: format!(
                    "Appeared {} times this week at {:?} importance",
                    t.frequency, t.importance
                ),
            }
        })
        .collect();

    for daily in dailies {
        for story in &daily.top_stories {
            if story.item.item.source.is_government() && story.item.relevance_score >= 70.0 {
                for topic in &story.item.syllabus_topics {
                    if !predictions.iter().any(|p| &p.topic == topic) {
                        predictions.push(PredictedTopic {
                            topic: topic.clone(),
                            probability: 75.0,
                            reasoning: "High-relevance government announcement this week"
                                .to_string(),
                        });
                    }
                }
            }
        }
    }

    predictions.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    predictions.truncate(10);
    predictions
}

/// Roll a week of daily briefs into a [`WeeklyCompilation`].
///
/// Zero input days produce a compilation with empty arrays, never an error.
#[instrument(level = "info", skip_all, fields(week_number, days = dailies.len()))]
pub fn generate_weekly(
    week_number: u32,
    dailies: &[DailyCompilation],
    rng: &mut StdRng,
) -> WeeklyCompilation {
    let fallback = NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch date");
    let start_date = dailies.iter().map(|d| d.date).min().unwrap_or(fallback);
    let end_date = dailies.iter().map(|d| d.date).max().unwrap_or(fallback);

    let mut highlights: Vec<String> = dailies
        .iter()
        .filter_map(|daily| {
            daily.top_stories.first().map(|top| {
                format!(
                    "{}: {} [{}] ({:.0})",
                    daily.date,
                    top.item.item.title,
                    top.item.primary_subject,
                    top.item.relevance_score
                )
            })
        })
        .collect();
    if !dailies.is_empty() {
        let selected: usize = dailies.iter().map(|d| d.total_selected).sum();
        let processed: usize = dailies.iter().map(|d| d.total_processed).sum();
        highlights.push(format!(
            "Week {week_number}: {selected} stories selected from {processed} processed across {} days",
            dailies.len()
        ));
    }

    let trending = trending_topics(dailies);
    let quiz = consolidated_quiz(dailies, rng);
    let mains_topics: Vec<MainsQuestion> = dailies
        .iter()
        .flat_map(|d| d.top_stories.iter())
        .flat_map(|a| a.mains_questions.iter())
        .take(10)
        .cloned()
        .collect();
    let notes = revision_notes(dailies);
    let predictions = predicted_topics(dailies, &trending);

    info!(
        trending = trending.len(),
        quiz = quiz.len(),
        predictions = predictions.len(),
        "Generated weekly compilation"
    );
    WeeklyCompilation {
        week_number,
        start_date,
        end_date,
        highlights,
        trending_topics: trending,
        consolidated_quiz: quiz,
        mains_topics,
        revision_notes: notes,
        predicted_topics: predictions,
    }
}

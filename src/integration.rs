//! Bridge from pipeline output to the static-lesson catalog.
//!
//! The lesson catalog is an external collaborator; this module talks to it
//! only through the [`LessonCatalog`] trait, with an in-memory
//! implementation for the pipeline's offline runs and for tests. Links are
//! scored by word and concept overlap, and a cross-referenced question bank
//! rolls up the window's generated questions with breakdown counts.

use crate::models::{
    Difficulty, MainsQuestion, NewsAnalysis, PrelimsQuestion, Subject,
};
use tracing::{debug, info, instrument};

/// Maximum lesson links reported per analysis.
pub const MAX_LESSON_LINKS: usize = 10;
/// Maximum analyses folded into one lesson enhancement.
pub const MAX_ENHANCEMENT_SOURCES: usize = 5;

/// A catalog lesson as seen across the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonRef {
    pub lesson_id: String,
    pub title: String,
}

/// How strongly a news item maps onto a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStrength {
    High,
    Medium,
    Low,
}

/// A scored link from one news item to one catalog lesson.
#[derive(Debug, Clone)]
pub struct LessonLink {
    pub lesson_id: String,
    pub lesson_title: String,
    pub news_id: String,
    pub relevance: f64,
    pub strength: LinkStrength,
}

/// Sections appended to a lesson from current affairs.
#[derive(Debug, Clone)]
pub struct LessonEnhancement {
    pub lesson_id: String,
    pub recent_developments: Vec<String>,
    pub contemporary_examples: Vec<String>,
    pub exam_perspective: Vec<String>,
}

/// A cross-referenced bank of the window's generated questions.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    pub prelims: Vec<PrelimsQuestion>,
    pub mains: Vec<MainsQuestion>,
    pub by_subject: Vec<(Subject, usize)>,
    pub by_difficulty: Vec<(Difficulty, usize)>,
}

/// Read and write access to the static-lesson catalog.
///
/// The write methods are fire-and-forget; the catalog owns persistence and
/// failure handling on its side of the boundary.
pub trait LessonCatalog {
    fn lessons_for_subject(&self, subject: Subject) -> Vec<LessonRef>;
    fn lessons_for_topic(&self, topic: &str) -> Vec<LessonRef>;
    fn update_lessons_with_examples(&mut self, lesson_id: &str, examples: &[String]);
    fn tag_questions_with_current_affairs(&mut self, question_id: &str, refs: &[String]);
}

/// In-memory catalog used by offline runs and tests.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    lessons: Vec<(Subject, Vec<String>, LessonRef)>,
    /// `(lesson_id, example)` pairs received through the write boundary.
    pub example_log: Vec<(String, String)>,
    /// `(question_id, reference)` pairs received through the write boundary.
    pub tag_log: Vec<(String, String)>,
}

impl InMemoryCatalog {
    pub fn with_lesson(
        mut self,
        lesson_id: &str,
        title: &str,
        subject: Subject,
        topics: &[&str],
    ) -> Self {
        self.lessons.push((
            subject,
            topics.iter().map(|t| t.to_string()).collect(),
            LessonRef {
                lesson_id: lesson_id.to_string(),
                title: title.to_string(),
            },
        ));
        self
    }
}

impl LessonCatalog for InMemoryCatalog {
    fn lessons_for_subject(&self, subject: Subject) -> Vec<LessonRef> {
        self.lessons
            .iter()
            .filter(|(s, _, _)| *s == subject)
            .map(|(_, _, lesson)| lesson.clone())
            .collect()
    }

    fn lessons_for_topic(&self, topic: &str) -> Vec<LessonRef> {
        self.lessons
            .iter()
            .filter(|(_, topics, _)| topics.iter().any(|t| t == topic))
            .map(|(_, _, lesson)| lesson.clone())
            .collect()
    }

    fn update_lessons_with_examples(&mut self, lesson_id: &str, examples: &[String]) {
        debug!(lesson_id, count = examples.len(), "Recorded lesson examples");
        for example in examples {
            self.example_log.push((lesson_id.to_string(), example.clone()));
        }
    }

    fn tag_questions_with_current_affairs(&mut self, question_id: &str, refs: &[String]) {
        debug!(question_id, count = refs.len(), "Recorded question tags");
        for reference in refs {
            self.tag_log.push((question_id.to_string(), reference.clone()));
        }
    }
}

/// Words of a title worth comparing: lowercased, longer than 3 characters.
fn significant_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 3)
        .map(str::to_string)
        .collect()
}

/// Score one lesson against one analysis.
///
/// Title-word overlap scores 20 per shared word, direct topic alignment a
/// flat 30, and connection-concept overlap 15 per shared concept word.
fn link_relevance(analysis: &NewsAnalysis, lesson: &LessonRef) -> f64 {
    let news_words = significant_words(&analysis.item.item.title);
    let lesson_words = significant_words(&lesson.title);
    let overlap = lesson_words
        .iter()
        .filter(|w| news_words.contains(w))
        .count();
    let mut score = overlap as f64 * 20.0;

    let lesson_title = lesson.title.to_lowercase();
    if analysis
        .item
        .syllabus_topics
        .iter()
        .any(|t| lesson_title.contains(&t.to_lowercase()))
    {
        score += 30.0;
    }

    let concept_overlap = analysis
        .connections
        .iter()
        .flat_map(|c| significant_words(&c.topic))
        .filter(|w| lesson_words.contains(w))
        .count();
    score += concept_overlap as f64 * 15.0;
    score.min(100.0)
}

fn strength_for(relevance: f64) -> LinkStrength {
    if relevance >= 70.0 {
        LinkStrength::High
    } else if relevance >= 40.0 {
        LinkStrength::Medium
    } else {
        LinkStrength::Low
    }
}

/// Link one analysis to catalog lessons, strongest first, at most 10.
///
/// Candidates come from subject, syllabus-topic, and connection lookups,
/// deduplicated by lesson id before scoring.
#[instrument(level = "debug", skip_all, fields(item = %analysis.item.item.id))]
pub fn link_news_to_lessons(
    analysis: &NewsAnalysis,
    catalog: &dyn LessonCatalog,
) -> Vec<LessonLink> {
    let mut candidates: Vec<LessonRef> = catalog.lessons_for_subject(analysis.item.primary_subject);
    for topic in &analysis.item.syllabus_topics {
        candidates.extend(catalog.lessons_for_topic(topic));
    }
    for connection in &analysis.connections {
        candidates.extend(catalog.lessons_for_topic(&connection.topic));
    }
    let mut seen: Vec<String> = Vec::new();
    candidates.retain(|lesson| {
        if seen.contains(&lesson.lesson_id) {
            false
        } else {
            seen.push(lesson.lesson_id.clone());
            true
        }
    });

    let mut links: Vec<LessonLink> = candidates
        .into_iter()
        .map(|lesson| {
            let relevance = link_relevance(analysis, &lesson);
            LessonLink {
                lesson_id: lesson.lesson_id,
                lesson_title: lesson.title,
                news_id: analysis.item.item.id.clone(),
                relevance,
                strength: strength_for(relevance),
            }
        })
        .collect();
    links.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    links.truncate(MAX_LESSON_LINKS);
    links
}

/// Fold at most 5 analyses into lesson-enhancement sections.
pub fn enhance_lesson_content(
    lesson: &LessonRef,
    analyses: &[NewsAnalysis],
) -> LessonEnhancement {
    let selected = &analyses[..analyses.len().min(MAX_ENHANCEMENT_SOURCES)];
    LessonEnhancement {
        lesson_id: lesson.lesson_id.clone(),
        recent_developments: selected
            .iter()
            .map(|a| format!("{} ({})", a.item.item.title, a.item.item.published.date_naive()))
            .collect(),
        contemporary_examples: selected
            .iter()
            .filter_map(|a| {
                a.facts
                    .first()
                    .map(|f| format!("{}: {}", a.item.item.title, f.context))
            })
            .collect(),
        exam_perspective: selected
            .iter()
            .map(|a| a.upsc_angle.prelims.clone())
            .collect(),
    }
}

/// Push examples and question tags for one analysis through the catalog.
///
/// Both writes are fire-and-forget per the catalog contract; nothing here
/// reads a result back.
pub fn sync_catalog(
    analysis: &NewsAnalysis,
    links: &[LessonLink],
    catalog: &mut dyn LessonCatalog,
) {
    let examples: Vec<String> = analysis.key_points.clone();
    for link in links.iter().filter(|l| l.strength != LinkStrength::Low) {
        catalog.update_lessons_with_examples(&link.lesson_id, &examples);
    }
    let refs = vec![analysis.item.item.id.clone()];
    for question in &analysis.prelims_questions {
        catalog.tag_questions_with_current_affairs(&question.id, &refs);
    }
}

/// Roll a window's generated questions into a cross-referenced bank.
#[instrument(level = "info", skip_all, fields(count = analyses.len()))]
pub fn build_question_bank(analyses: &[NewsAnalysis]) -> QuestionBank {
    let mut by_subject: Vec<(Subject, usize)> = Vec::new();
    let mut by_difficulty: Vec<(Difficulty, usize)> = Vec::new();
    let mut prelims: Vec<PrelimsQuestion> = Vec::new();
    let mut mains: Vec<MainsQuestion> = Vec::new();

    for analysis in analyses {
        let subject = analysis.item.primary_subject;
        match by_subject.iter_mut().find(|(s, _)| *s == subject) {
            Some((_, count)) => *count += analysis.prelims_questions.len(),
            None => by_subject.push((subject, analysis.prelims_questions.len())),
        }
        for question in &analysis.prelims_questions {
            match by_difficulty.iter_mut().find(|(d, _)| *d == question.difficulty) {
                Some((_, count)) => *count += 1,
                None => by_difficulty.push((question.difficulty, 1)),
            }
        }
        prelims.extend(analysis.prelims_questions.iter().cloned());
        mains.extend(analysis.mains_questions.iter().cloned());
    }

    info!(
        prelims = prelims.len(),
        mains = mains.len(),
        "Built question bank"
    );
    QuestionBank { prelims, mains, by_subject, by_difficulty }
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

    fn analysis(title: &str, topic: &str) -> NewsAnalysis {
        let body = "The Union Cabinet approved the new welfare scheme with an outlay \
                    of Rs 900 crore. The ministry announced coverage of 45% of eligible \
                    households in the first phase of the rollout."
            .to_string();
        let item = ProcessedNewsItem {
            item: NewsItem {
                id: "pib-2026-08-20-1".to_string(),
                source: NewsSource::Pib,
                title: title.to_string(),
                body_len: body.len(),
                body,
                published: Utc.with_ymd_and_hms(2026, 8, 20, 9, 0, 0).unwrap(),
                url: "https://example.org/1".to_string(),
                author: None,
                tags: vec!["scheme".to_string()],
                image: None,
            },
            relevance_score: 72.0,
            primary_subject: Subject::Polity,
            secondary_subjects: vec![Subject::Economy],
            syllabus_topics: vec![topic.to_string()],
            prelims_relevance: PrelimsLevel::High,
            mains_relevance: MainsRelevance {
                papers: vec![GsPaper::Gs2],
                level: PrelimsLevel::Medium,
            },
            question_probability: 75.0,
            meta: ProcessingMeta {
                processed_at: Utc.with_ymd_and_hms(2026, 8, 20, 10, 0, 0).unwrap(),
                version: "0.1.0".to_string(),
                confidence: 0.8,
            },
        };
        generate_analysis(&item).unwrap()
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::default()
            .with_lesson(
                "polity-12",
                "Government Schemes for Welfare",
                Subject::Polity,
                &["Government Schemes"],
            )
            .with_lesson(
                "polity-03",
                "Union Executive",
                Subject::Polity,
                &["Council of Ministers"],
            )
            .with_lesson(
                "geo-07",
                "Monsoon Systems",
                Subject::Geography,
                &["Indian Monsoon"],
            )
    }

    #[test]
    fn test_links_ranked_and_strength_bands() {
        let analysis = analysis(
            "Cabinet clears welfare scheme for rural households",
            "Government Schemes",
        );
        let links = link_news_to_lessons(&analysis, &catalog());
        // Off-subject lesson never becomes a candidate.
        assert!(!links.iter().any(|l| l.lesson_id == "geo-07"));
        let top = &links[0];
        assert_eq!(top.lesson_id, "polity-12");
        // "welfare" overlap (20) + topic alignment (30) + the two words of
        // the "Government Schemes" connection topic (30).
        assert!((top.relevance - 80.0).abs() < 1e-9);
        assert_eq!(top.strength, LinkStrength::High);
        for pair in links.windows(2) {
            assert!(pair[0].relevance >= pair[1].relevance);
        }
    }

    #[test]
    fn test_candidates_deduplicated_by_lesson_id() {
        // Subject lookup and topic lookup both return polity-12.
        let analysis = analysis("Welfare scheme expanded", "Government Schemes");
        let links = link_news_to_lessons(&analysis, &catalog());
        let matches = links.iter().filter(|l| l.lesson_id == "polity-12").count();
        assert_eq!(matches, 1);
    }

    #[test]
    fn test_enhancement_sections_capped() {
        let analyses: Vec<NewsAnalysis> = (0..8)
            .map(|n| analysis(&format!("Scheme update {n}"), "Government Schemes"))
            .collect();
        let lesson = LessonRef {
            lesson_id: "polity-12".to_string(),
            title: "Government Schemes for Welfare".to_string(),
        };
        let enhancement = enhance_lesson_content(&lesson, &analyses);
        assert_eq!(enhancement.recent_developments.len(), MAX_ENHANCEMENT_SOURCES);
        assert!(enhancement.contemporary_examples.len() <= MAX_ENHANCEMENT_SOURCES);
        assert_eq!(enhancement.exam_perspective.len(), MAX_ENHANCEMENT_SOURCES);
    }

    #[test]
    fn test_sync_catalog_writes_logged() {
        let analysis = analysis(
            "Cabinet clears welfare scheme for rural households",
            "Government Schemes",
        );
        let mut catalog = catalog();
        let links = link_news_to_lessons(&analysis, &catalog);
        sync_catalog(&analysis, &links, &mut catalog);
        assert!(catalog
            .example_log
            .iter()
            .any(|(lesson_id, _)| lesson_id == "polity-12"));
        // Every prelims question is tagged back to the item.
        assert_eq!(catalog.tag_log.len(), analysis.prelims_questions.len());
        assert!(catalog
            .tag_log
            .iter()
            .all(|(_, r)| r == "pib-2026-08-20-1"));
    }

    #[test]
    fn test_question_bank_breakdowns() {
        let analyses = vec![
            analysis("Scheme one announced", "Government Schemes"),
            analysis("Scheme two announced", "Government Schemes"),
        ];
        let bank = build_question_bank(&analyses);
        assert_eq!(bank.prelims.len(), 10);
        assert_eq!(bank.mains.len(), 4);
        assert_eq!(bank.by_subject, vec![(Subject::Polity, 10)]);
        let total: usize = bank.by_difficulty.iter().map(|(_, c)| c).sum();
        assert_eq!(total, 10);
    }
}

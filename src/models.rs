//! Data models for news items and their processed representations.
//!
//! This module defines the core data structures flowing through the pipeline:
//! - [`NewsItem`]: Raw ingested article data from a news source
//! - [`ProcessedNewsItem`]: A news item promoted by the relevance filter with
//!   derived scoring and classification fields
//! - [`NewsAnalysis`]: A processed item wrapped with generated study material
//! - Aggregate types: [`DailyCompilation`], [`WeeklyCompilation`], [`TrendAnalysis`]
//!
//! Every stage produces new immutable records; no type here is mutated after
//! the stage that creates it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of publishers the aggregator knows how to ingest.
///
/// Each source carries its own tag vocabulary during ingestion but always
/// produces the same [`NewsItem`] shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewsSource {
    /// Press Information Bureau — the official government bulletin.
    Pib,
    /// The Hindu — editorial/analysis heavy national daily.
    TheHindu,
    /// The Indian Express — national daily, explainer focused.
    IndianExpress,
    /// The Economic Times — business and economy daily.
    EconomicTimes,
    /// Down To Earth — environment and development fortnightly.
    DownToEarth,
}

impl NewsSource {
    /// All sources, in the aggregator's canonical fetch order.
    pub const ALL: [NewsSource; 5] = [
        NewsSource::Pib,
        NewsSource::TheHindu,
        NewsSource::IndianExpress,
        NewsSource::EconomicTimes,
        NewsSource::DownToEarth,
    ];

    /// Whether this is the official government bulletin source.
    pub fn is_government(&self) -> bool {
        matches!(self, NewsSource::Pib)
    }

    /// Whether this source is editorial/analysis heavy.
    pub fn is_editorial(&self) -> bool {
        matches!(self, NewsSource::TheHindu | NewsSource::IndianExpress)
    }

    /// Whether this source focuses on business and economy coverage.
    pub fn is_economic(&self) -> bool {
        matches!(self, NewsSource::EconomicTimes)
    }

    /// Whether this source focuses on environment coverage.
    pub fn is_environmental(&self) -> bool {
        matches!(self, NewsSource::DownToEarth)
    }
}

impl fmt::Display for NewsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NewsSource::Pib => "PIB",
            NewsSource::TheHindu => "The Hindu",
            NewsSource::IndianExpress => "The Indian Express",
            NewsSource::EconomicTimes => "The Economic Times",
            NewsSource::DownToEarth => "Down To Earth",
        };
        write!(f, "{name}")
    }
}

/// The closed subject taxonomy used to classify every processed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subject {
    Polity,
    Economy,
    Geography,
    History,
    Environment,
    ScienceTech,
    InternationalRelations,
    SocialIssues,
    ArtCulture,
    Ethics,
}

impl Subject {
    /// All subjects, in taxonomy order.
    pub const ALL: [Subject; 10] = [
        Subject::Polity,
        Subject::Economy,
        Subject::Geography,
        Subject::History,
        Subject::Environment,
        Subject::ScienceTech,
        Subject::InternationalRelations,
        Subject::SocialIssues,
        Subject::ArtCulture,
        Subject::Ethics,
    ];
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Subject::Polity => "Polity",
            Subject::Economy => "Economy",
            Subject::Geography => "Geography",
            Subject::History => "History",
            Subject::Environment => "Environment",
            Subject::ScienceTech => "Science & Technology",
            Subject::InternationalRelations => "International Relations",
            Subject::SocialIssues => "Social Issues",
            Subject::ArtCulture => "Art & Culture",
            Subject::Ethics => "Ethics",
        };
        write!(f, "{name}")
    }
}

/// A raw news item as ingested from a source feed, before any scoring.
///
/// Immutable once created. Validation rules are enforced by
/// `aggregator::validate_news_item`, not by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    /// Stable identifier, unique within a batch.
    pub id: String,
    pub source: NewsSource,
    pub title: String,
    /// Full article body text.
    pub body: String,
    pub published: DateTime<Utc>,
    pub url: String,
    pub author: Option<String>,
    /// Free-text tags extracted by the source-specific parser.
    pub tags: Vec<String>,
    pub image: Option<String>,
    /// Original body length in characters, recorded at ingestion.
    pub body_len: usize,
}

/// The seven independent relevance sub-scores, each capped individually.
///
/// Caps: syllabus 25, government 20, constitutional 15, international 10,
/// economic 10, environmental 10, historical 10.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RelevanceBreakdown {
    pub syllabus_keywords: f64,
    pub government_policy: f64,
    pub constitutional: f64,
    pub international: f64,
    pub economic: f64,
    pub environmental: f64,
    pub historical: f64,
}

impl RelevanceBreakdown {
    /// Sum of all factors, capped at 100.
    pub fn total(&self) -> f64 {
        let sum = self.syllabus_keywords
            + self.government_policy
            + self.constitutional
            + self.international
            + self.economic
            + self.environmental
            + self.historical;
        sum.min(100.0)
    }
}

/// How testable an item is in the objective (prelims) stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrelimsLevel {
    High,
    Medium,
    Low,
}

/// General Studies papers of the descriptive (mains) stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GsPaper {
    Gs1,
    Gs2,
    Gs3,
    Gs4,
    Essay,
}

impl fmt::Display for GsPaper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GsPaper::Gs1 => "GS Paper I",
            GsPaper::Gs2 => "GS Paper II",
            GsPaper::Gs3 => "GS Paper III",
            GsPaper::Gs4 => "GS Paper IV",
            GsPaper::Essay => "Essay",
        };
        write!(f, "{name}")
    }
}

/// Mains testability: which papers an item maps to and how strongly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainsRelevance {
    pub papers: Vec<GsPaper>,
    pub level: PrelimsLevel,
}

/// Provenance metadata stamped on every processed item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingMeta {
    pub processed_at: DateTime<Utc>,
    pub version: String,
    /// Heuristic confidence in the classification, 0.0–1.0. Fixed at
    /// creation time.
    pub confidence: f64,
}

/// A news item promoted by the relevance filter, with derived fields.
///
/// Created once by `relevance::filter_by_relevance`; never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedNewsItem {
    pub item: NewsItem,
    /// Heuristic 0–100 estimate of exam testability.
    pub relevance_score: f64,
    pub primary_subject: Subject,
    /// Other matching subjects, at most 3, ordered by hit count.
    pub secondary_subjects: Vec<Subject>,
    /// Matched syllabus taxonomy leaves.
    pub syllabus_topics: Vec<String>,
    pub prelims_relevance: PrelimsLevel,
    pub mains_relevance: MainsRelevance,
    /// 0–95 estimate of this item yielding an exam question.
    pub question_probability: f64,
    pub meta: ProcessingMeta,
}

/// Importance of an extracted fact, set by magnitude heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactImportance {
    High,
    Medium,
}

/// A fact or figure pulled out of the article body by the fact extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedFact {
    /// The matched text (an amount, percentage, date, or ranking phrase).
    pub text: String,
    /// Surrounding text window for reading the fact in context.
    pub context: String,
    pub importance: FactImportance,
}

/// A link from a news item to a static-syllabus topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyllabusConnection {
    pub topic: String,
    pub subject: Subject,
    /// Short prose describing how the news connects to the topic.
    pub connection: String,
}

/// Difficulty band for generated objective questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A generated objective (prelims) question.
///
/// Invariant: exactly 4 options and `correct_answer` is a valid index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrelimsQuestion {
    pub id: String,
    pub question: String,
    pub options: [String; 4],
    pub correct_answer: usize,
    pub explanation: String,
    pub difficulty: Difficulty,
    pub topic: String,
}

/// A generated descriptive (mains) question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainsQuestion {
    pub id: String,
    pub question: String,
    pub word_limit: usize,
    pub paper: GsPaper,
    pub marks: u32,
    /// Ordered points a model answer should cover.
    pub answer_points: Vec<String>,
    pub approach: String,
}

/// Reference to a previous-year question on a related theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PyqReference {
    pub year: u16,
    pub paper: String,
    pub question: String,
}

/// Two-minute-read summary plus its counted length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub text: String,
    pub word_count: usize,
}

/// Prelims/mains/interview framing of why an item matters for the exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpscAngle {
    pub prelims: String,
    pub mains: String,
    pub interview: String,
}

/// The full study-material package generated for one processed item.
///
/// One analysis exists per [`ProcessedNewsItem`]; created once by the
/// content analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsAnalysis {
    pub item: ProcessedNewsItem,
    pub summary: Summary,
    /// Ordered key points, at most 7.
    pub key_points: Vec<String>,
    /// Extracted facts and figures, at most 8.
    pub facts: Vec<ExtractedFact>,
    pub background: String,
    pub upsc_angle: UpscAngle,
    /// Static-syllabus connections, at most 5, never empty.
    pub connections: Vec<SyllabusConnection>,
    /// Exactly 5 generated prelims questions.
    pub prelims_questions: Vec<PrelimsQuestion>,
    /// Exactly 2 generated mains questions.
    pub mains_questions: Vec<MainsQuestion>,
    /// Related previous-year questions, at most 5.
    pub pyq_references: Vec<PyqReference>,
}

/// The four fixed buckets a daily brief sorts updates into.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorizedUpdates {
    pub government: Vec<String>,
    pub economy: Vec<String>,
    pub international: Vec<String>,
    pub environment: Vec<String>,
}

/// One day's rolled-up brief: top stories, quiz, and categorized updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyCompilation {
    pub date: NaiveDate,
    /// Top stories ranked by relevance, at most 10.
    pub top_stories: Vec<NewsAnalysis>,
    /// Difficulty-balanced quiz drawn from the day's prelims questions.
    pub quiz: Vec<PrelimsQuestion>,
    pub brief_summary: String,
    pub updates: CategorizedUpdates,
    pub total_processed: usize,
    pub total_selected: usize,
}

/// Importance tier for trending topics and recurring themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ImportanceTier {
    Moderate,
    Important,
    Critical,
}

/// A syllabus topic trending across a week of briefs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub topic: String,
    pub frequency: usize,
    pub importance: ImportanceTier,
}

/// A topic predicted to matter for the exam, with its reasoning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictedTopic {
    pub topic: String,
    /// 0–95.
    pub probability: f64,
    pub reasoning: String,
}

/// Per-subject revision notes built from deduplicated key points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionNote {
    pub subject: Subject,
    /// At most 10 deduplicated points.
    pub points: Vec<String>,
}

/// A week's rolled-up compilation across daily briefs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyCompilation {
    pub week_number: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// One highlight line per day plus a trailing aggregate-stats line.
    pub highlights: Vec<String>,
    pub trending_topics: Vec<TrendingTopic>,
    /// Deduplicated, topic-balanced quiz of at most 20 questions.
    pub consolidated_quiz: Vec<PrelimsQuestion>,
    /// Selected mains questions for the week, at most 10.
    pub mains_topics: Vec<MainsQuestion>,
    pub revision_notes: Vec<RevisionNote>,
    /// Ranked predictions, at most 10.
    pub predicted_topics: Vec<PredictedTopic>,
}

/// A theme recurring across the analysis window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTheme {
    pub theme: String,
    pub occurrences: usize,
    /// Ids of the contributing news items.
    pub item_ids: Vec<String>,
    pub importance: ImportanceTier,
}

/// Predicted-importance label for an emerging topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictedImportance {
    High,
    Medium,
    Low,
}

/// A topic first seen recently and gaining appearances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergingTopic {
    pub topic: String,
    /// Appearances per day since first sighting.
    pub growth_rate: f64,
    pub first_seen: NaiveDate,
    pub predicted_importance: PredictedImportance,
}

/// Which exam stage a prediction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamType {
    Prelims,
    Mains,
    Both,
}

/// A ranked exam-topic prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamPrediction {
    pub topic: String,
    pub exam_type: ExamType,
    /// 0–95 (emerging-topic predictions cap at 85).
    pub probability: f64,
    pub reasoning: String,
}

/// Per-subject share of the analysis window, in percent.
pub type SubjectDistribution = Vec<(Subject, f64)>;

/// Per-source item counts over the analysis window.
pub type SourceDistribution = Vec<(NewsSource, usize)>;

/// Trend detection output over a window of analyses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub recurring_themes: Vec<RecurringTheme>,
    pub emerging_topics: Vec<EmergingTopic>,
    pub subject_distribution: SubjectDistribution,
    pub source_distribution: SourceDistribution,
    /// Merged predictions sorted by probability descending, at most 15.
    pub exam_predictions: Vec<ExamPrediction>,
}

/// Errors raised by pipeline stages.
///
/// Item-level failures are caught at the batch loop and logged; only the
/// single item is skipped, never the batch.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("invalid news item {id}: {reason}")]
    InvalidItem { id: String, reason: String },

    #[error("analysis requires a processed item: {0}")]
    MissingInput(String),

    #[error("unknown source: {0}")]
    UnknownSource(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_item() -> NewsItem {
        let body = "Cabinet approved the new scheme with an outlay of Rs 5000 crore \
                    to support rural infrastructure across all districts of the country."
            .to_string();
        NewsItem {
            id: "pib-001".to_string(),
            source: NewsSource::Pib,
            title: "Cabinet approves rural infrastructure scheme".to_string(),
            body_len: body.len(),
            body,
            published: Utc.with_ymd_and_hms(2026, 8, 20, 9, 0, 0).unwrap(),
            url: "https://pib.gov.in/PressRelease/001".to_string(),
            author: None,
            tags: vec!["scheme".to_string(), "cabinet".to_string()],
            image: None,
        }
    }

    #[test]
    fn test_source_predicates() {
        assert!(NewsSource::Pib.is_government());
        assert!(!NewsSource::Pib.is_editorial());
        assert!(NewsSource::TheHindu.is_editorial());
        assert!(NewsSource::EconomicTimes.is_economic());
        assert!(NewsSource::DownToEarth.is_environmental());
    }

    #[test]
    fn test_subject_display_labels() {
        assert_eq!(Subject::ScienceTech.to_string(), "Science & Technology");
        assert_eq!(Subject::ArtCulture.to_string(), "Art & Culture");
        assert_eq!(Subject::Polity.to_string(), "Polity");
    }

    #[test]
    fn test_breakdown_total_caps_at_100() {
        let breakdown = RelevanceBreakdown {
            syllabus_keywords: 25.0,
            government_policy: 20.0,
            constitutional: 15.0,
            international: 10.0,
            economic: 10.0,
            environmental: 10.0,
            historical: 10.0,
        };
        assert_eq!(breakdown.total(), 100.0);
    }

    #[test]
    fn test_news_item_serde_round_trip() {
        let item = sample_item();
        let json = serde_json::to_string(&item).unwrap();
        let back: NewsItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, item.id);
        assert_eq!(back.source, item.source);
        assert_eq!(back.published, item.published);
        assert_eq!(back.tags, item.tags);
    }

    #[test]
    fn test_prelims_question_shape() {
        let q = PrelimsQuestion {
            id: "q-1".to_string(),
            question: "Which ministry administers the scheme?".to_string(),
            options: [
                "Ministry of Finance".to_string(),
                "Ministry of Rural Development".to_string(),
                "Ministry of Home Affairs".to_string(),
                "NITI Aayog".to_string(),
            ],
            correct_answer: 1,
            explanation: "Announced in the bulletin.".to_string(),
            difficulty: Difficulty::Medium,
            topic: "Government Schemes".to_string(),
        };
        assert_eq!(q.options.len(), 4);
        assert!(q.correct_answer < 4);

        let json = serde_json::to_string(&q).unwrap();
        let back: PrelimsQuestion = serde_json::from_str(&json).unwrap();
        assert_eq!(back.options.len(), 4);
        assert_eq!(back.correct_answer, 1);
    }

    #[test]
    fn test_importance_tier_ordering() {
        assert!(ImportanceTier::Critical > ImportanceTier::Important);
        assert!(ImportanceTier::Important > ImportanceTier::Moderate);
    }
}

//! Practice-question generation.
//!
//! Produces exactly 5 prelims questions and 2 mains questions per analysis.
//! The prelims set covers five fixed archetypes: fact-based,
//! statement-based ("which of the above"), match-the-following,
//! application-based, and static-link. Distractor generation is
//! deterministic given the correct answer string and a distractor kind, so
//! a question set can be asserted exactly in tests.

use crate::models::{
    Difficulty, ExtractedFact, GsPaper, MainsQuestion, PrelimsQuestion, ProcessedNewsItem,
    Subject, SyllabusConnection,
};

/// The three deterministic distractor strategies.
#[derive(Debug, Clone, Copy)]
pub enum DistractorKind {
    /// Scale the first number found in the answer up or down.
    NumericInflation,
    /// Flip a directional/approval word via a fixed antonym table.
    PolarityFlip,
    /// Substitute a nearby concept from a fixed alternatives table.
    ConceptSubstitution,
}

/// Directional and approval antonyms for polarity flips.
const POLARITY_PAIRS: &[(&str, &str)] = &[
    ("approved", "rejected"),
    ("increase", "decrease"),
    ("increased", "decreased"),
    ("rose", "fell"),
    ("expanded", "contracted"),
    ("launched", "withdrew"),
    ("above", "below"),
    ("growth", "contraction"),
];

/// Concept alternatives used for substitution distractors, keyed by subject.
fn concept_alternatives(subject: Subject) -> [&'static str; 3] {
    match subject {
        Subject::Polity => ["NITI Aayog", "the Finance Commission", "the Law Commission"],
        Subject::Economy => ["the RBI", "SEBI", "the GST Council"],
        Subject::Geography => ["the Survey of India", "the IMD", "the Geological Survey"],
        Subject::History => ["the ASI", "the National Archives", "the Sahitya Akademi"],
        Subject::Environment => ["the CPCB", "the NGT", "the Forest Survey of India"],
        Subject::ScienceTech => ["DRDO", "CSIR", "the Department of Science"],
        Subject::InternationalRelations => ["the UN Security Council", "ASEAN", "the G7"],
        Subject::SocialIssues => ["NITI Aayog", "the NHRC", "the NCW"],
        Subject::ArtCulture => ["the Lalit Kala Akademi", "INTACH", "the National Museum"],
        Subject::Ethics => ["the CVC", "the Lokpal", "the CIC"],
    }
}

/// First integer substring of `s`, with its byte range.
fn first_number(s: &str) -> Option<(u64, std::ops::Range<usize>)> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let end = s[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map(|o| start + o)
        .unwrap_or(s.len());
    s[start..end].parse().ok().map(|n| (n, start..end))
}

/// Produce three wrong options for a correct answer string.
///
/// Deterministic: the same `(correct, kind)` pair always yields the same
/// distractors. Falls back through the strategies when one does not apply
/// (no number to inflate, no polarity word to flip).
pub fn distractors(correct: &str, kind: DistractorKind, subject: Subject) -> [String; 3] {
    match kind {
        DistractorKind::NumericInflation => {
            if let Some((n, range)) = first_number(correct) {
                let variants = [n.saturating_mul(2), n / 2 + 1, n.saturating_add(n / 2 + 5)];
                let mut out = variants.map(|v| {
                    let mut s = correct.to_string();
                    s.replace_range(range.clone(), &v.to_string());
                    s
                });
                // A /2+1 variant can collide with the original for tiny n.
                if out[1] == correct {
                    out[1] = {
                        let mut s = correct.to_string();
                        s.replace_range(range.clone(), &(n + 3).to_string());
                        s
                    };
                }
                out
            } else {
                distractors(correct, DistractorKind::PolarityFlip, subject)
            }
        }
        DistractorKind::PolarityFlip => {
            let lower = correct.to_lowercase();
            if let Some((from, to)) = POLARITY_PAIRS
                .iter()
                .find(|(from, _)| lower.contains(from))
            {
                let flipped = lower.replace(from, to);
                [
                    flipped,
                    format!("It is proposed but not yet {}", to),
                    format!("It was deferred rather than {}", from),
                ]
            } else {
                distractors(correct, DistractorKind::ConceptSubstitution, subject)
            }
        }
        DistractorKind::ConceptSubstitution => {
            concept_alternatives(subject).map(|alt| format!("It concerns {alt} instead"))
        }
    }
}

/// Deterministic placement of the correct option among the four.
fn correct_index(correct: &str) -> usize {
    correct.len() % 4
}

/// Assemble a four-option array with the correct answer at a deterministic
/// index and distractors filling the rest in order.
fn build_options(correct: &str, wrong: [String; 3]) -> ([String; 4], usize) {
    let idx = correct_index(correct);
    let mut options: [String; 4] = Default::default();
    let mut wrong_iter = wrong.into_iter();
    for (i, slot) in options.iter_mut().enumerate() {
        if i == idx {
            *slot = correct.to_string();
        } else {
            *slot = wrong_iter.next().expect("three distractors");
        }
    }
    (options, idx)
}

fn first_topic(item: &ProcessedNewsItem) -> String {
    item.syllabus_topics
        .first()
        .cloned()
        .unwrap_or_else(|| "Current Affairs".to_string())
}

/// A fact-based recall question from the strongest extracted fact.
fn fact_question(
    item: &ProcessedNewsItem,
    facts: &[ExtractedFact],
    n: usize,
) -> PrelimsQuestion {
    let correct = facts
        .first()
        .map(|f| f.text.clone())
        .unwrap_or_else(|| item.item.title.clone());
    let (options, idx) = build_options(
        &correct,
        distractors(&correct, DistractorKind::NumericInflation, item.primary_subject),
    );
    PrelimsQuestion {
        id: format!("{}-pq{}", item.item.id, n),
        question: format!(
            "With reference to \"{}\", which of the following figures or statements is correct?",
            item.item.title
        ),
        options,
        correct_answer: idx,
        explanation: format!(
            "Reported in {} on {}.",
            item.item.source,
            item.item.published.date_naive()
        ),
        difficulty: Difficulty::Easy,
        topic: first_topic(item),
    }
}

/// A "consider the following statements" question from the key points.
fn statement_question(
    item: &ProcessedNewsItem,
    key_points: &[String],
    n: usize,
) -> PrelimsQuestion {
    let statements: Vec<String> = key_points
        .iter()
        .take(3)
        .enumerate()
        .map(|(i, p)| format!("{}. {}", i + 1, p))
        .collect();
    let count = statements.len().max(1);
    let question = format!(
        "Consider the following statements regarding {}:\n{}\nWhich of the statements given above is/are correct?",
        item.item.title,
        statements.join("\n")
    );
    // Statements come straight from the source text, so all are correct.
    let correct = match count {
        1 => "1 only",
        2 => "Both 1 and 2",
        _ => "1, 2 and 3",
    };
    let options: [String; 4] = match count {
        1 => ["1 only", "None of the above", "Cannot be determined", "1 and 2 only"],
        2 => ["1 only", "2 only", "Both 1 and 2", "Neither 1 nor 2"],
        _ => ["1 and 2 only", "2 and 3 only", "1, 2 and 3", "None of the above"],
    }
    .map(String::from);
    let idx = options
        .iter()
        .position(|o| o == correct)
        .expect("correct option present");
    PrelimsQuestion {
        id: format!("{}-pq{}", item.item.id, n),
        question,
        options,
        correct_answer: idx,
        explanation: "All listed statements restate the reported development.".to_string(),
        difficulty: Difficulty::Medium,
        topic: first_topic(item),
    }
}

/// A match-the-following question pairing topics with subjects.
fn match_question(
    item: &ProcessedNewsItem,
    connections: &[SyllabusConnection],
    n: usize,
) -> PrelimsQuestion {
    let pairs: Vec<String> = connections
        .iter()
        .take(3)
        .enumerate()
        .map(|(i, c)| format!("{}. {} : {}", (b'A' + i as u8) as char, c.topic, c.subject))
        .collect();
    let question = format!(
        "Match the following topics with their subject areas:\n{}\nWhich of the pairings given above is/are correctly matched?",
        pairs.join("\n")
    );
    let options: [String; 4] = [
        "A only",
        "A and B only",
        "All of the above",
        "None of the above",
    ]
    .map(String::from);
    // Pairings are generated from the true connections, so all match.
    PrelimsQuestion {
        id: format!("{}-pq{}", item.item.id, n),
        question,
        options,
        correct_answer: 2,
        explanation: "Each topic is paired with the subject it belongs to.".to_string(),
        difficulty: Difficulty::Medium,
        topic: first_topic(item),
    }
}

/// An application question on the development's significance.
fn application_question(item: &ProcessedNewsItem, n: usize) -> PrelimsQuestion {
    let correct = format!(
        "It bears directly on {} within {}",
        first_topic(item),
        item.primary_subject
    );
    let (options, idx) = build_options(
        &correct,
        distractors(&correct, DistractorKind::ConceptSubstitution, item.primary_subject),
    );
    PrelimsQuestion {
        id: format!("{}-pq{}", item.item.id, n),
        question: format!(
            "Which of the following best explains the significance of \"{}\"?",
            item.item.title
        ),
        options,
        correct_answer: idx,
        explanation: format!(
            "The development maps to {} under {}.",
            first_topic(item),
            item.primary_subject
        ),
        difficulty: Difficulty::Hard,
        topic: first_topic(item),
    }
}

/// A static-syllabus link question from the first connection.
fn static_link_question(
    item: &ProcessedNewsItem,
    connections: &[SyllabusConnection],
    n: usize,
) -> PrelimsQuestion {
    let (topic, subject) = connections
        .first()
        .map(|c| (c.topic.clone(), c.subject))
        .unwrap_or_else(|| (first_topic(item), item.primary_subject));
    let correct = subject.to_string();
    let mut others = Subject::ALL.iter().filter(|s| **s != subject);
    let wrong = [
        others.next().expect("nine remaining subjects").to_string(),
        others.next().expect("nine remaining subjects").to_string(),
        others.next().expect("nine remaining subjects").to_string(),
    ];
    let (options, idx) = build_options(&correct, wrong);
    PrelimsQuestion {
        id: format!("{}-pq{}", item.item.id, n),
        question: format!(
            "The topic \"{topic}\", recently in the news, falls under which subject area of the syllabus?"
        ),
        options,
        correct_answer: idx,
        explanation: format!("\"{topic}\" is part of the {subject} syllabus."),
        difficulty: Difficulty::Easy,
        topic,
    }
}

/// Generate the fixed question set for one analysis.
///
/// Returns exactly 5 prelims questions (one per archetype) and exactly 2
/// mains questions (analytical 250 words, critical evaluation 150 words).
pub fn create_questions(
    item: &ProcessedNewsItem,
    key_points: &[String],
    facts: &[ExtractedFact],
    connections: &[SyllabusConnection],
) -> (Vec<PrelimsQuestion>, Vec<MainsQuestion>) {
    let prelims = vec![
        fact_question(item, facts, 1),
        statement_question(item, key_points, 2),
        match_question(item, connections, 3),
        application_question(item, 4),
        static_link_question(item, connections, 5),
    ];

    let paper = item
        .mains_relevance
        .papers
        .first()
        .copied()
        .unwrap_or(GsPaper::Gs2);

    let analytical = MainsQuestion {
        id: format!("{}-mq1", item.item.id),
        question: format!(
            "Discuss the significance of the development \"{}\" for {}. Examine its implications for policy and implementation.",
            item.item.title, item.primary_subject
        ),
        word_limit: 250,
        paper,
        marks: 15,
        answer_points: key_points.iter().take(4).cloned().collect(),
        approach: "Open with the development in one line, map it to the syllabus theme, present two or three implications with evidence from the report, and close with a balanced way forward.".to_string(),
    };

    let critical = MainsQuestion {
        id: format!("{}-mq2", item.item.id),
        question: format!(
            "Critically evaluate the approach reflected in \"{}\". What challenges remain?",
            item.item.title
        ),
        word_limit: 150,
        paper,
        marks: 10,
        answer_points: connections
            .iter()
            .take(3)
            .map(|c| c.connection.clone())
            .collect(),
        approach: "State the approach, weigh strengths against gaps, and end with one concrete challenge and a remedial step.".to_string(),
    };

    (prelims, vec![analytical, critical])
}

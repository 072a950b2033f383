//! Plain-text rendering of quiz documents and daily reports.
//!
//! The renderers are pure string builders so tests can assert on content
//! without touching the filesystem; thin async writers place the documents
//! next to the JSON output in a dated directory.

use crate::models::{DailyCompilation, PrelimsQuestion, Result};
use tokio::fs;
use tracing::{info, instrument};

const OPTION_LETTERS: [char; 4] = ['a', 'b', 'c', 'd'];

/// Render questions as a printable quiz with the answer key appended.
///
/// Options are lettered `a)` through `d)`; the key lists the correct letter
/// and the explanation per question.
pub fn render_quiz(title: &str, questions: &[PrelimsQuestion]) -> String {
    let mut out = format!("{title}\n{}\n\n", "=".repeat(title.len()));

    for (number, question) in questions.iter().enumerate() {
        out.push_str(&format!("Q{}. {}\n", number + 1, question.question));
        for (letter, option) in OPTION_LETTERS.iter().zip(question.options.iter()) {
            out.push_str(&format!("   {letter}) {option}\n"));
        }
        out.push('\n');
    }

    out.push_str("Answer Key\n----------\n");
    for (number, question) in questions.iter().enumerate() {
        out.push_str(&format!(
            "Q{}. {})  {}\n",
            number + 1,
            OPTION_LETTERS[question.correct_answer],
            question.explanation
        ));
    }
    out
}

/// Render a daily compilation as a flat printable report.
pub fn render_daily_report(daily: &DailyCompilation) -> String {
    let mut out = format!(
        "UPSC Current Affairs — Daily Report — {}\n\n{}\n",
        daily.date, daily.brief_summary
    );

    if !daily.top_stories.is_empty() {
        out.push_str("\nTop Stories\n-----------\n");
        for (rank, story) in daily.top_stories.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} [{} | {:.0}]\n",
                rank + 1,
                story.item.item.title,
                story.item.primary_subject,
                story.item.relevance_score
            ));
            out.push_str(&format!("   {}\n", story.summary.text));
            for point in &story.key_points {
                out.push_str(&format!("   - {point}\n"));
            }
            out.push('\n');
        }
    }

    let sections: [(&str, &Vec<String>); 4] = [
        ("Government & Polity", &daily.updates.government),
        ("Economy", &daily.updates.economy),
        ("International", &daily.updates.international),
        ("Environment", &daily.updates.environment),
    ];
    for (heading, lines) in sections {
        if lines.is_empty() {
            continue;
        }
        out.push_str(&format!("{heading}\n{}\n", "-".repeat(heading.len())));
        for line in lines {
            out.push_str(&format!("- {line}\n"));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "Coverage: {} selected of {} processed\n",
        daily.total_selected, daily.total_processed
    ));
    out
}

/// Write the quiz and report documents into `{report_output_dir}/{date}/`.
#[instrument(level = "info", skip_all, fields(report_output_dir = %report_output_dir, date = %daily.date))]
pub async fn write_daily_documents(daily: &DailyCompilation, report_output_dir: &str) -> Result<()> {
    let dir = format!("{}/{}", report_output_dir, daily.date);
    fs::create_dir_all(&dir).await?;

    let quiz_title = format!("Daily Quiz — {}", daily.date);
    let quiz_path = format!("{dir}/quiz.txt");
    fs::write(&quiz_path, render_quiz(&quiz_title, &daily.quiz)).await?;

    let report_path = format!("{dir}/report.txt");
    fs::write(&report_path, render_daily_report(daily)).await?;

    info!(%quiz_path, %report_path, "Wrote daily text documents");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    fn question(n: usize, correct_answer: usize) -> PrelimsQuestion {
        PrelimsQuestion {
            id: format!("q-{n}"),
            question: format!("Sample question number {n}?"),
            options: [
                "Option one".to_string(),
                "Option two".to_string(),
                "Option three".to_string(),
                "Option four".to_string(),
            ],
            correct_answer,
            explanation: format!("Explanation for question {n}."),
            difficulty: Difficulty::Easy,
            topic: "Government Schemes".to_string(),
        }
    }

    #[test]
    fn test_quiz_letters_and_answer_key() {
        let quiz = render_quiz("Test Quiz", &[question(1, 2), question(2, 0)]);
        assert!(quiz.contains("Q1. Sample question number 1?"));
        assert!(quiz.contains("   a) Option one"));
        assert!(quiz.contains("   d) Option four"));
        assert!(quiz.contains("Answer Key"));
        assert!(quiz.contains("Q1. c)"));
        assert!(quiz.contains("Q2. a)"));
        // The key follows every question block.
        let key_pos = quiz.find("Answer Key").unwrap();
        let last_q = quiz.rfind("Q2. Sample").unwrap();
        assert!(key_pos > last_q);
    }

    #[test]
    fn test_empty_quiz_still_renders_key_heading() {
        let quiz = render_quiz("Empty", &[]);
        assert!(quiz.starts_with("Empty\n=====\n"));
        assert!(quiz.contains("Answer Key"));
    }

    #[test]
    fn test_report_sections_skip_empty_buckets() {
        use crate::compilation::generate_daily;
        use chrono::NaiveDate;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let date = NaiveDate::from_ymd_opt(2026, 8, 20).unwrap();
        let daily = generate_daily(date, &[], 0, &mut StdRng::seed_from_u64(1));
        let report = render_daily_report(&daily);
        assert!(report.contains("Daily Report — 2026-08-20"));
        assert!(!report.contains("Economy\n-------"));
        assert!(report.contains("Coverage: 0 selected of 0 processed"));
    }
}

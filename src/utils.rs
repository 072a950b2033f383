//! Utility functions for text processing, string manipulation, and file
//! system operations.
//!
//! This module provides helper functions used throughout the pipeline:
//! - Sentence splitting and word counting for summary generation
//! - String truncation for logging and word-budget enforcement
//! - File system validation for output directories

use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Split text into sentences on terminal punctuation.
///
/// Splits on `.`, `!`, and `?` followed by whitespace, trims each piece,
/// and drops fragments shorter than 10 characters (stray abbreviations,
/// initials, list markers).
///
/// # Returns
///
/// Sentences in document order, without their terminal punctuation trimmed
/// away (the terminator stays attached).
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            let boundary = chars.peek().is_none_or(|next| next.is_whitespace());
            if boundary {
                let trimmed = current.trim();
                if trimmed.len() >= 10 {
                    sentences.push(trimmed.to_string());
                }
                current.clear();
            }
        }
    }
    let tail = current.trim();
    if tail.len() >= 10 {
        sentences.push(tail.to_string());
    }
    sentences
}

/// Count whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Truncate text to at most `max_words` words, preserving word boundaries.
///
/// Returns the original string when it already fits the budget.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        text.to_string()
    } else {
        words[..max_words].join(" ")
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes with an ellipsis and byte
/// count indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}…(+{} bytes)", &s[..max], s.len() - max)
    }
}

/// Case-insensitive count of non-overlapping occurrences of `needle` in
/// `haystack`.
///
/// Keyword tables are lowercase; the haystack is lowercased once by callers
/// that loop over many keywords, so this helper assumes both sides are
/// already lowercase.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

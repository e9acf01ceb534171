// src/analyze/mod.rs
//! Factor scorers: five independent, side-effect-free passes over the
//! normalized text. Each takes the lexicon by reference and returns a fresh
//! value; nothing here holds state between calls.

pub mod categorize;
pub mod liberation;
pub mod quality;
pub mod safety;
pub mod sentiment;
pub mod tags;

// Re-export convenient types.
pub use crate::analyze::categorize::{categorize, CategoryAssignment, GENERAL_CATEGORY};
pub use crate::analyze::liberation::{score_liberation, LiberationAlignmentFactors};
pub use crate::analyze::quality::{assess_quality, QualityMetrics};
pub use crate::analyze::safety::{assess_safety, ContentWarning, SafetyAssessment};
pub use crate::analyze::sentiment::{analyze_sentiment, OverallSentiment, SentimentProfile};
pub use crate::analyze::tags::{demographic_tags, generate_tags, MAX_TOPIC_TAGS};

/// Non-overlapping occurrences of `keyword` in `text` that start a word.
/// Keywords act as prefixes, so the stem `organiz` hits "organizing" while
/// `gun` does not hit "begun".
pub(crate) fn occurrences(text: &str, keyword: &str) -> usize {
    if keyword.is_empty() {
        return 0;
    }
    text.match_indices(keyword)
        .filter(|(at, _)| {
            text[..*at]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric())
        })
        .count()
}

/// True when `keyword` starts a word somewhere in `text`.
pub(crate) fn contains_keyword(text: &str, keyword: &str) -> bool {
    occurrences(text, keyword) > 0
}

/// Total occurrences of every keyword in the list.
pub(crate) fn count_hits(text: &str, keywords: &[String]) -> usize {
    keywords.iter().map(|k| occurrences(text, k)).sum()
}

/// Number of distinct keywords that appear at least once.
pub(crate) fn distinct_hits(text: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .filter(|k| contains_keyword(text, k))
        .count()
}

/// Whitespace tokens with leading/trailing punctuation stripped.
/// Inner punctuation survives (`self-care`, `don't`).
pub(crate) fn words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Sentence segments split on `.`, `!` and `?`, trimmed, empties dropped.
pub(crate) fn sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

pub(crate) fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

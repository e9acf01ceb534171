//! Sentiment / tone analyzer.
//!
//! Token-level polarity against fixed word lists, with a divisor floor so a
//! single hit in a short post cannot swing the score to the extremes.

use serde::{Deserialize, Serialize};

use super::{distinct_hits, words};
use crate::content::NormalizedText;
use crate::lexicon::Lexicon;

/// `sentiment_score = (pos - neg) / max(pos + neg, SENTIMENT_DIVISOR_FLOOR)`
pub const SENTIMENT_DIVISOR_FLOOR: f64 = 10.0;
pub const POSITIVE_THRESHOLD: f64 = 0.2;
pub const NEGATIVE_THRESHOLD: f64 = -0.2;
pub const NEUTRAL_BAND: f64 = 0.1;

pub const JOY_DENOMINATOR: f64 = 5.0;
pub const EMPOWERMENT_DENOMINATOR: f64 = 5.0;
pub const HEALING_DENOMINATOR: f64 = 4.0;
pub const ORGANIZING_DENOMINATOR: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallSentiment {
    Positive,
    Neutral,
    Negative,
    Mixed,
}

impl OverallSentiment {
    /// >0.2 positive, <-0.2 negative, |s|<=0.1 neutral, anything between mixed.
    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            OverallSentiment::Positive
        } else if score < NEGATIVE_THRESHOLD {
            OverallSentiment::Negative
        } else if score.abs() <= NEUTRAL_BAND {
            OverallSentiment::Neutral
        } else {
            OverallSentiment::Mixed
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentProfile {
    pub overall_sentiment: OverallSentiment,
    /// In [-1, 1].
    pub sentiment_score: f64,
    pub joy: f64,
    pub empowerment: f64,
    pub healing_potential: f64,
    pub organizing_energy: f64,
}

fn sub_score(hits: usize, denominator: f64) -> f64 {
    (hits as f64 / denominator).min(1.0)
}

pub fn analyze_sentiment(text: &NormalizedText, lexicon: &Lexicon) -> SentimentProfile {
    let lower = text.lower();
    let st = &lexicon.sentiment;

    let (mut pos, mut neg) = (0usize, 0usize);
    for w in words(lower) {
        if st.positive.contains(w) {
            pos += 1;
        }
        if st.negative.contains(w) {
            neg += 1;
        }
    }

    let denom = ((pos + neg) as f64).max(SENTIMENT_DIVISOR_FLOOR);
    let sentiment_score = ((pos as f64 - neg as f64) / denom).clamp(-1.0, 1.0);

    SentimentProfile {
        overall_sentiment: OverallSentiment::from_score(sentiment_score),
        sentiment_score,
        joy: sub_score(distinct_hits(lower, &st.joy.keywords), JOY_DENOMINATOR),
        empowerment: sub_score(
            distinct_hits(lower, &st.empowerment.keywords),
            EMPOWERMENT_DENOMINATOR,
        ),
        healing_potential: sub_score(
            distinct_hits(lower, &st.healing.keywords),
            HEALING_DENOMINATOR,
        ),
        organizing_energy: sub_score(
            distinct_hits(lower, &st.organizing.keywords),
            ORGANIZING_DENOMINATOR,
        ),
    }
}

//! # Decision Engine
//! Pure, testable logic that maps the five scorer outputs to a routing
//! decision: community relevance, whether a human must review the item, and
//! how far the headline signals agree. No I/O.
//!
//! Policy: any single review trigger routes the item to human review. Every
//! trigger that fires is reported so moderators can see why.

use serde::{Deserialize, Serialize};

use crate::analyze::{
    LiberationAlignmentFactors, OverallSentiment, QualityMetrics, SafetyAssessment,
    SentimentProfile,
};

pub const RELEVANCE_LIBERATION_WEIGHT: f64 = 0.4;
pub const RELEVANCE_SAFETY_WEIGHT: f64 = 0.3;
pub const RELEVANCE_QUALITY_WEIGHT: f64 = 0.3;

pub const MIN_LIBERATION_ALIGNMENT: f64 = 0.4;
pub const MIN_SAFETY_SCORE: f64 = 0.7;
pub const MIN_CULTURAL_ACCURACY: f64 = 0.6;
pub const MAX_NEGATIVE_SENTIMENT: f64 = -0.5;
pub const MIN_SOURCE_CREDIBILITY: f64 = 0.5;

pub const MIN_CONFIDENCE: f64 = 0.5;
pub const MAX_CONFIDENCE: f64 = 1.0;

/// Why an item was routed to human review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewReason {
    LowLiberationAlignment,
    LowSafetyScore,
    LowCulturalAccuracy,
    StronglyNegativeSentiment,
    LowSourceCredibility,
}

impl ReviewReason {
    /// Human-readable line for moderation queues.
    pub fn describe(self) -> &'static str {
        match self {
            ReviewReason::LowLiberationAlignment => "liberation alignment below 0.4",
            ReviewReason::LowSafetyScore => "safety score below 0.7",
            ReviewReason::LowCulturalAccuracy => "cultural accuracy below 0.6",
            ReviewReason::StronglyNegativeSentiment => "negative sentiment below -0.5",
            ReviewReason::LowSourceCredibility => "source credibility below 0.5",
        }
    }
}

impl std::fmt::Display for ReviewReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// The scalar signals the decision reads, lifted out of the scorer outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signals {
    pub liberation: f64,
    pub safety: f64,
    pub quality_composite: f64,
    pub cultural_accuracy: f64,
    pub source_credibility: f64,
    pub sentiment: OverallSentiment,
    pub sentiment_score: f64,
}

impl Signals {
    pub fn from_parts(
        liberation: &LiberationAlignmentFactors,
        safety: &SafetyAssessment,
        sentiment: &SentimentProfile,
        quality: &QualityMetrics,
    ) -> Self {
        Self {
            liberation: liberation.overall_score,
            safety: safety.safety_score,
            quality_composite: quality.composite(),
            cultural_accuracy: quality.cultural_accuracy,
            source_credibility: quality.source_credibility,
            sentiment: sentiment.overall_sentiment,
            sentiment_score: sentiment.sentiment_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub community_relevance: f64,
    pub requires_human_review: bool,
    /// Empty when the item is auto-accepted.
    pub review_reasons: Vec<ReviewReason>,
    /// In [0.5, 1.0].
    pub confidence: f64,
}

pub fn community_relevance(s: &Signals) -> f64 {
    let raw = RELEVANCE_LIBERATION_WEIGHT * s.liberation
        + RELEVANCE_SAFETY_WEIGHT * s.safety
        + RELEVANCE_QUALITY_WEIGHT * s.quality_composite;
    raw.clamp(0.0, 1.0)
}

/// Every trigger that fires, in a fixed order.
pub fn review_reasons(s: &Signals) -> Vec<ReviewReason> {
    let mut reasons = Vec::new();
    if s.liberation < MIN_LIBERATION_ALIGNMENT {
        reasons.push(ReviewReason::LowLiberationAlignment);
    }
    if s.safety < MIN_SAFETY_SCORE {
        reasons.push(ReviewReason::LowSafetyScore);
    }
    if s.cultural_accuracy < MIN_CULTURAL_ACCURACY {
        reasons.push(ReviewReason::LowCulturalAccuracy);
    }
    if s.sentiment == OverallSentiment::Negative && s.sentiment_score < MAX_NEGATIVE_SENTIMENT {
        reasons.push(ReviewReason::StronglyNegativeSentiment);
    }
    if s.source_credibility < MIN_SOURCE_CREDIBILITY {
        reasons.push(ReviewReason::LowSourceCredibility);
    }
    reasons
}

/// Population variance (divides by n).
fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

/// High when liberation, safety and quality agree; never below 0.5.
pub fn confidence(s: &Signals) -> f64 {
    let v = variance(&[s.liberation, s.safety, s.quality_composite]);
    (1.0 - v).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

pub fn make_decision(s: &Signals) -> RoutingDecision {
    let review_reasons = review_reasons(s);
    RoutingDecision {
        community_relevance: community_relevance(s),
        requires_human_review: !review_reasons.is_empty(),
        review_reasons,
        confidence: confidence(s),
    }
}

//! Classification result and its builder.
//!
//! The result is immutable once built. Anything the builder was not given
//! falls back to a documented default ("General", empty tag lists) instead of
//! failing.

use serde::{Deserialize, Serialize};

use crate::analyze::{
    CategoryAssignment, LiberationAlignmentFactors, QualityMetrics, SafetyAssessment,
    SentimentProfile, GENERAL_CATEGORY, MAX_TOPIC_TAGS,
};
use crate::content::{ContentItem, NormalizedText};
use crate::engine::{ReviewReason, RoutingDecision};

pub const URL_ID_PREFIX: &str = "url-";
pub const TEXT_ID_PREFIX: &str = "content-";
/// Used only when no model version was supplied.
pub const UNKNOWN_MODEL_VERSION: &str = "unknown";

/// First 6 bytes of SHA-256, hex encoded (12 chars).
pub(crate) fn short_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// `url-<hash(url)>` when the item has a non-blank URL, else
/// `content-<hash(normalized text)>`. Same input, same id.
pub fn content_id(item: &ContentItem, text: &NormalizedText) -> String {
    match item.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => format!("{URL_ID_PREFIX}{}", short_hash(url)),
        None => format!("{TEXT_ID_PREFIX}{}", short_hash(text.as_str())),
    }
}

/// Outputs of the four numeric scorers, bundled for the builder.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorScores {
    pub liberation: LiberationAlignmentFactors,
    pub safety: SafetyAssessment,
    pub sentiment: SentimentProfile,
    pub quality: QualityMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub content_id: String,
    pub primary_category: String,
    pub secondary_categories: Vec<String>,
    pub liberation_alignment: LiberationAlignmentFactors,
    pub liberation_alignment_score: f64,
    pub community_relevance: f64,
    pub safety: SafetyAssessment,
    pub demographic_tags: Vec<String>,
    /// At most 12.
    pub topic_tags: Vec<String>,
    pub sentiment: SentimentProfile,
    pub quality: QualityMetrics,
    pub classification_confidence: f64,
    pub model_version: String,
    pub requires_human_review: bool,
    #[serde(default)]
    pub review_reasons: Vec<ReviewReason>,
}

impl ClassificationResult {
    pub fn builder(
        content_id: impl Into<String>,
        scores: FactorScores,
        decision: RoutingDecision,
    ) -> ClassificationBuilder {
        ClassificationBuilder {
            content_id: content_id.into(),
            scores,
            decision,
            model_version: None,
            category: None,
            topic_tags: Vec::new(),
            demographic_tags: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassificationBuilder {
    content_id: String,
    scores: FactorScores,
    decision: RoutingDecision,
    model_version: Option<String>,
    category: Option<CategoryAssignment>,
    topic_tags: Vec<String>,
    demographic_tags: Vec<String>,
}

impl ClassificationBuilder {
    pub fn model_version(mut self, v: impl Into<String>) -> Self {
        self.model_version = Some(v.into());
        self
    }

    pub fn category(mut self, c: CategoryAssignment) -> Self {
        self.category = Some(c);
        self
    }

    pub fn topic_tags(mut self, tags: Vec<String>) -> Self {
        self.topic_tags = tags;
        self
    }

    pub fn demographic_tags(mut self, tags: Vec<String>) -> Self {
        self.demographic_tags = tags;
        self
    }

    pub fn build(self) -> ClassificationResult {
        let CategoryAssignment {
            primary, secondary, ..
        } = self.category.unwrap_or_default();
        let primary = if primary.trim().is_empty() {
            GENERAL_CATEGORY.to_string()
        } else {
            primary
        };

        let model_version = self
            .model_version
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_MODEL_VERSION.to_string());

        let mut topic_tags = self.topic_tags;
        topic_tags.truncate(MAX_TOPIC_TAGS);

        let FactorScores {
            liberation,
            safety,
            sentiment,
            quality,
        } = self.scores;

        ClassificationResult {
            content_id: self.content_id,
            primary_category: primary,
            secondary_categories: secondary,
            liberation_alignment_score: liberation.overall_score,
            liberation_alignment: liberation,
            community_relevance: self.decision.community_relevance,
            safety,
            demographic_tags: self.demographic_tags,
            topic_tags,
            sentiment,
            quality,
            classification_confidence: self.decision.confidence,
            model_version,
            requires_human_review: self.decision.requires_human_review,
            review_reasons: self.decision.review_reasons,
        }
    }
}

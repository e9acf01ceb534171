//! Batch roll-up for moderation dashboards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classification::ClassificationResult;
use crate::engine::ReviewReason;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub requires_review: usize,
    pub auto_accepted: usize,
    /// 0.0 for an empty batch.
    pub mean_community_relevance: f64,
    pub mean_confidence: f64,
    pub primary_categories: BTreeMap<String, usize>,
    pub review_reasons: BTreeMap<ReviewReason, usize>,
}

pub fn summarize(results: &[ClassificationResult]) -> BatchSummary {
    let mut s = BatchSummary {
        total: results.len(),
        ..Default::default()
    };
    if results.is_empty() {
        return s;
    }

    let (mut relevance, mut confidence) = (0.0, 0.0);
    for r in results {
        if r.requires_human_review {
            s.requires_review += 1;
        }
        relevance += r.community_relevance;
        confidence += r.classification_confidence;
        *s.primary_categories
            .entry(r.primary_category.clone())
            .or_default() += 1;
        for reason in &r.review_reasons {
            *s.review_reasons.entry(*reason).or_default() += 1;
        }
    }
    s.auto_accepted = s.total - s.requires_review;
    s.mean_community_relevance = relevance / s.total as f64;
    s.mean_confidence = confidence / s.total as f64;
    s
}

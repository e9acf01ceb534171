//! The classification engine context.
//!
//! A `Classifier` owns a lexicon handle and a model registry. There is no
//! process-wide instance: build as many as you like, each with its own
//! tables and config.

use rayon::prelude::*;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::analyze::{
    analyze_sentiment, assess_quality, assess_safety, categorize, demographic_tags,
    generate_tags, score_liberation,
};
use crate::classification::{content_id, short_hash, ClassificationResult, FactorScores};
use crate::content::{ContentItem, NormalizedText};
use crate::engine::{make_decision, Signals};
use crate::error::ClassifyError;
use crate::lexicon::{Lexicon, LexiconHandle};
use crate::metrics::{record_classification, record_invalid_item};
use crate::registry::{ModelConfig, ModelConfigPatch, ModelRegistry};

#[derive(Clone, Default)]
pub struct Classifier {
    lexicon: LexiconHandle,
    registry: ModelRegistry,
}

impl Classifier {
    pub fn new(lexicon: Arc<Lexicon>, config: ModelConfig) -> Self {
        Self {
            lexicon: LexiconHandle::new(lexicon),
            registry: ModelRegistry::new(config),
        }
    }

    /// Share an existing handle (e.g. one watched by the hot-reload thread).
    pub fn with_handle(lexicon: LexiconHandle, registry: ModelRegistry) -> Self {
        Self { lexicon, registry }
    }

    pub fn lexicon_handle(&self) -> &LexiconHandle {
        &self.lexicon
    }

    pub fn classify(&self, item: &ContentItem) -> ClassificationResult {
        let lexicon = self.lexicon.current();
        let config = self.registry.current();
        let result = classify_with(item, &lexicon, &config.version);
        dev_log_classification(&result);
        record_classification(result.requires_human_review);
        result
    }

    /// Classify an untyped payload; `null` and non-objects are rejected.
    pub fn classify_value(&self, value: &Value) -> Result<ClassificationResult, ClassifyError> {
        match ContentItem::from_value(value) {
            Ok(item) => Ok(self.classify(&item)),
            Err(e) => {
                record_invalid_item();
                warn!(target: "classifier", error = %e, "rejected submission");
                Err(e)
            }
        }
    }

    /// Classify every item in parallel. Output order matches input order and
    /// every item sees the same lexicon and model version.
    pub fn batch_classify(&self, items: &[ContentItem]) -> Vec<ClassificationResult> {
        let lexicon = self.lexicon.current();
        let version = self.registry.current().version.clone();
        let results: Vec<ClassificationResult> = items
            .par_iter()
            .map(|item| classify_with(item, &lexicon, &version))
            .collect();
        for r in &results {
            dev_log_classification(r);
            record_classification(r.requires_human_review);
        }
        results
    }

    /// Per-item isolation: a bad entry yields its own `Err` and never
    /// affects its neighbours.
    pub fn batch_classify_values(
        &self,
        values: &[Value],
    ) -> Vec<Result<ClassificationResult, ClassifyError>> {
        let lexicon = self.lexicon.current();
        let version = self.registry.current().version.clone();
        let results: Vec<Result<ClassificationResult, ClassifyError>> = values
            .par_iter()
            .map(|v| ContentItem::from_value(v).map(|item| classify_with(&item, &lexicon, &version)))
            .collect();
        for r in &results {
            match r {
                Ok(res) => {
                    dev_log_classification(res);
                    record_classification(res.requires_human_review);
                }
                Err(_) => record_invalid_item(),
            }
        }
        results
    }

    pub fn get_model_config(&self) -> ModelConfig {
        self.registry.current().as_ref().clone()
    }

    pub fn update_model_config(&self, patch: ModelConfigPatch) -> ModelConfig {
        self.registry.update(patch).as_ref().clone()
    }

    pub fn swap_lexicon(&self, lexicon: Lexicon) {
        self.lexicon.swap(Arc::new(lexicon));
    }

    pub fn lexicon_version(&self) -> String {
        self.lexicon.current().version.clone()
    }
}

/// The full pipeline for one item against a fixed lexicon snapshot.
pub fn classify_with(item: &ContentItem, lexicon: &Lexicon, model_version: &str) -> ClassificationResult {
    let text = NormalizedText::from_item(item);

    let scores = FactorScores {
        liberation: score_liberation(&text, lexicon),
        safety: assess_safety(&text, lexicon),
        sentiment: analyze_sentiment(&text, lexicon),
        quality: assess_quality(&text, item, lexicon),
    };
    let decision = make_decision(&Signals::from_parts(
        &scores.liberation,
        &scores.safety,
        &scores.sentiment,
        &scores.quality,
    ));

    ClassificationResult::builder(content_id(item, &text), scores, decision)
        .model_version(model_version)
        .category(categorize(&text, lexicon))
        .topic_tags(generate_tags(&text, item, lexicon))
        .demographic_tags(demographic_tags(&text, lexicon))
        .build()
}

/// Anonymized: the content id is already a hash, the rest are scores.
fn dev_log_classification(r: &ClassificationResult) {
    if !crate::dev_logging_enabled() {
        return;
    }
    let id = short_hash(&r.content_id);
    debug!(
        target: "classifier",
        %id,
        category = %r.primary_category,
        liberation = r.liberation_alignment_score,
        safety = r.safety.safety_score,
        relevance = r.community_relevance,
        confidence = r.classification_confidence,
        review = r.requires_human_review,
        reasons = ?r.review_reasons,
        "classified"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fridge() -> ContentItem {
        ContentItem::new(
            "Community fridge mutual aid",
            "Neighbors organize a free food drive; join us!",
        )
    }

    #[test]
    fn classify_is_deterministic() {
        let c = Classifier::default();
        assert_eq!(c.classify(&fridge()), c.classify(&fridge()));
    }

    #[test]
    fn result_carries_active_model_version() {
        let c = Classifier::default();
        c.update_model_config(ModelConfigPatch {
            version: Some("3.1.0".into()),
            ..Default::default()
        });
        assert_eq!(c.classify(&fridge()).model_version, "3.1.0");
    }

    #[test]
    fn classify_value_rejects_null_and_scalars() {
        let c = Classifier::default();
        assert!(matches!(
            c.classify_value(&Value::Null),
            Err(ClassifyError::InvalidContentItem { .. })
        ));
        assert!(c.classify_value(&json!(42)).is_err());
        assert!(c.classify_value(&json!({})).is_ok());
    }

    #[test]
    fn batch_values_isolate_bad_entries() {
        let c = Classifier::default();
        let out = c.batch_classify_values(&[json!({"title": "a"}), Value::Null, json!({"title": "b"})]);
        assert_eq!(out.len(), 3);
        assert!(out[0].is_ok());
        assert!(out[1].is_err());
        assert!(out[2].is_ok());
    }

    #[test]
    fn instances_do_not_share_config() {
        let a = Classifier::default();
        let b = Classifier::default();
        a.update_model_config(ModelConfigPatch {
            model_name: Some("other".into()),
            ..Default::default()
        });
        assert_eq!(a.get_model_config().model_name, "other");
        assert_ne!(b.get_model_config().model_name, "other");
    }

    #[test]
    fn lexicon_swap_changes_version() {
        let c = Classifier::default();
        let mut lex = (*Lexicon::embedded()).clone();
        lex.version = "test-swap".into();
        c.swap_lexicon(lex);
        assert_eq!(c.lexicon_version(), "test-swap");
    }
}

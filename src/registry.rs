//! Model registry: the active `ModelConfig`, for audit and transparency
//! reporting only. Scoring never reads it apart from `version`, which is
//! stamped onto every result.
//!
//! Updates build a new config from a shallow patch and swap the `Arc`;
//! a config is never edited in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tracing::info;

pub const DEFAULT_MODEL_NAME: &str = "community-liberation-classifier";
pub const DEFAULT_MODEL_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingDiversity {
    pub communities: Vec<String>,
    pub languages: Vec<String>,
    pub regions: Vec<String>,
}

impl Default for TrainingDiversity {
    fn default() -> Self {
        let own = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect();
        Self {
            communities: own(&[
                "Black",
                "Indigenous",
                "Latinx",
                "Asian American",
                "LGBTQ+",
                "Disability",
                "Immigrant",
            ]),
            languages: own(&["en", "es"]),
            regions: own(&["North America", "Caribbean"]),
        }
    }
}

/// Declared metadata for the notional model behind the lexicon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_name: String,
    /// Semver string; copied onto every `ClassificationResult`.
    pub version: String,
    pub accuracy: f64,
    /// Lower is better.
    pub bias_score: f64,
    pub community_validated: bool,
    pub cultural_sensitivity_score: f64,
    pub trauma_awareness_score: f64,
    pub last_updated: DateTime<Utc>,
    pub training_diversity: TrainingDiversity,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL_NAME.to_string(),
            version: DEFAULT_MODEL_VERSION.to_string(),
            accuracy: 0.87,
            bias_score: 0.12,
            community_validated: true,
            cultural_sensitivity_score: 0.92,
            trauma_awareness_score: 0.89,
            last_updated: Utc::now(),
            training_diversity: TrainingDiversity::default(),
        }
    }
}

/// Partial update; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfigPatch {
    pub model_name: Option<String>,
    pub version: Option<String>,
    pub accuracy: Option<f64>,
    pub bias_score: Option<f64>,
    pub community_validated: Option<bool>,
    pub cultural_sensitivity_score: Option<f64>,
    pub trauma_awareness_score: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
    pub training_diversity: Option<TrainingDiversity>,
}

impl ModelConfig {
    /// Shallow merge: each present patch field replaces the whole field.
    /// `last_updated` is refreshed unless the patch sets it.
    pub fn merged(&self, patch: ModelConfigPatch) -> Self {
        Self {
            model_name: patch.model_name.unwrap_or_else(|| self.model_name.clone()),
            version: patch.version.unwrap_or_else(|| self.version.clone()),
            accuracy: patch.accuracy.unwrap_or(self.accuracy),
            bias_score: patch.bias_score.unwrap_or(self.bias_score),
            community_validated: patch.community_validated.unwrap_or(self.community_validated),
            cultural_sensitivity_score: patch
                .cultural_sensitivity_score
                .unwrap_or(self.cultural_sensitivity_score),
            trauma_awareness_score: patch
                .trauma_awareness_score
                .unwrap_or(self.trauma_awareness_score),
            last_updated: patch.last_updated.unwrap_or_else(Utc::now),
            training_diversity: patch
                .training_diversity
                .unwrap_or_else(|| self.training_diversity.clone()),
        }
    }
}

/// Single-writer, many-reader holder for the active config.
#[derive(Clone)]
pub struct ModelRegistry {
    inner: Arc<RwLock<Arc<ModelConfig>>>,
}

impl ModelRegistry {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    pub fn current(&self) -> Arc<ModelConfig> {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Merge `patch` into the current config and swap it in.
    /// Returns the new config.
    pub fn update(&self, patch: ModelConfigPatch) -> Arc<ModelConfig> {
        let mut guard = match self.inner.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        let next = Arc::new(guard.merged(patch));
        *guard = next.clone();
        drop(guard);
        info!(
            target: "registry",
            model = %next.model_name,
            version = %next.version,
            "model config replaced"
        );
        next
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn empty_patch_keeps_fields_but_refreshes_timestamp() {
        let old_ts = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let base = ModelConfig {
            last_updated: old_ts,
            ..ModelConfig::default()
        };
        let next = base.merged(ModelConfigPatch::default());
        assert_eq!(next.version, base.version);
        assert_eq!(next.training_diversity, base.training_diversity);
        assert!(next.last_updated > old_ts);
    }

    #[test]
    fn patch_timestamp_wins() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let next = ModelConfig::default().merged(ModelConfigPatch {
            last_updated: Some(ts),
            ..Default::default()
        });
        assert_eq!(next.last_updated, ts);
    }

    #[test]
    fn nested_diversity_is_replaced_wholesale() {
        let next = ModelConfig::default().merged(ModelConfigPatch {
            training_diversity: Some(TrainingDiversity {
                communities: vec!["Deaf".into()],
                languages: vec![],
                regions: vec![],
            }),
            ..Default::default()
        });
        assert_eq!(next.training_diversity.communities, vec!["Deaf".to_string()]);
        assert!(next.training_diversity.languages.is_empty());
    }

    #[test]
    fn update_swaps_without_touching_old_snapshot() {
        let reg = ModelRegistry::default();
        let before = reg.current();
        let after = reg.update(ModelConfigPatch {
            version: Some("2.0.0".into()),
            accuracy: Some(0.9),
            ..Default::default()
        });
        assert_eq!(before.version, DEFAULT_MODEL_VERSION);
        assert_eq!(after.version, "2.0.0");
        assert_eq!(reg.current().accuracy, 0.9);
        assert_eq!(reg.current().bias_score, before.bias_score);
    }

    #[test]
    fn patch_deserializes_from_partial_json() {
        let p: ModelConfigPatch =
            serde_json::from_value(serde_json::json!({ "bias_score": 0.05 })).unwrap();
        assert_eq!(p.bias_score, Some(0.05));
        assert!(p.version.is_none());
    }
}

// src/lib.rs
// Public library surface for the service binary and integration tests.

pub mod analyze;
pub mod api;
pub mod classification;
pub mod classifier;
pub mod content;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod metrics;
pub mod registry;
pub mod summary;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::classification::ClassificationResult;
pub use crate::classifier::Classifier;
pub use crate::content::ContentItem;
pub use crate::engine::ReviewReason;
pub use crate::error::ClassifyError;
pub use crate::lexicon::{Lexicon, LexiconError, LexiconHandle};
pub use crate::registry::{ModelConfig, ModelConfigPatch, ModelRegistry};
pub use crate::summary::{summarize, BatchSummary};

pub const ENV_DEV_LOG: &str = "CLASSIFIER_DEV_LOG";

/// Debug build or SHUTTLE_ENV in {local, development, dev}.
pub fn is_dev_env() -> bool {
    cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        )
}

// Dev logging gate: CLASSIFIER_DEV_LOG=1 AND dev env
pub fn dev_logging_enabled() -> bool {
    std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1") && is_dev_env()
}

//! Classification errors.
//!
//! Field-level gaps are never errors: the pipeline defaults them. The only
//! failure is a top-level input that is not a content item at all.

/// Errors surfaced by the classification entry points.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("invalid content item: {reason}")]
    InvalidContentItem { reason: String },
}

impl ClassifyError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidContentItem {
            reason: reason.into(),
        }
    }
}

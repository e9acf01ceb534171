use anyhow::Context;
use axum::{routing::get, Router};
use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub const CLASSIFICATIONS_TOTAL: &str = "classifications_total";
pub const REVIEW_REQUIRED_TOTAL: &str = "classifications_review_required_total";
pub const INVALID_ITEMS_TOTAL: &str = "classify_invalid_items_total";

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(CLASSIFICATIONS_TOTAL, "Content items classified.");
        describe_counter!(
            REVIEW_REQUIRED_TOTAL,
            "Classified items routed to human review."
        );
        describe_counter!(
            INVALID_ITEMS_TOTAL,
            "Submissions rejected as not being a content item."
        );
    });
}

pub(crate) fn record_classification(requires_review: bool) {
    counter!(CLASSIFICATIONS_TOTAL).increment(1);
    if requires_review {
        counter!(REVIEW_REQUIRED_TOTAL).increment(1);
    }
}

pub(crate) fn record_invalid_item() {
    counter!(INVALID_ITEMS_TOTAL).increment(1);
}

#[derive(Clone)]
pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder on first call; later calls reuse it.
    pub fn init() -> anyhow::Result<Self> {
        let handle = HANDLE
            .get_or_try_init(|| {
                PrometheusBuilder::new()
                    .install_recorder()
                    .context("prometheus: install recorder")
            })?
            .clone();
        ensure_metrics_described();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

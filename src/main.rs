//! Community Content Classifier — Binary Entrypoint
//! Boots the Axum HTTP server: loads the lexicon, wires the classifier into
//! shared state, and starts the dev-only lexicon watcher.

use anyhow::Context;
use shuttle_axum::ShuttleAxum;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use community_content_classifier::api::{create_router, AppState};
use community_content_classifier::lexicon::{
    start_hot_reload_thread, Lexicon, LexiconHandle, DEFAULT_LEXICON_PATH, ENV_LEXICON_PATH,
};
use community_content_classifier::{dev_logging_enabled, Classifier, ModelRegistry};

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - CLASSIFIER_DEV_LOG=1
fn enable_dev_tracing() {
    if !dev_logging_enabled() {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("classifier=debug,lexicon=info,registry=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let lexicon = Lexicon::load_default().context("failed to load lexicon")?;
    let handle = LexiconHandle::new(lexicon);

    let path = std::env::var(ENV_LEXICON_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LEXICON_PATH));
    start_hot_reload_thread(handle.clone(), path.clone());

    let classifier = Classifier::with_handle(handle, ModelRegistry::default());
    let state = AppState {
        classifier,
        lexicon_path: path,
    };
    let router = create_router(state);

    Ok(router.into())
}

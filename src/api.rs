use std::path::PathBuf;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::classification::ClassificationResult;
use crate::classifier::Classifier;
use crate::lexicon::{Lexicon, DEFAULT_LEXICON_PATH, ENV_LEXICON_PATH};
use crate::metrics::Metrics;
use crate::registry::{ModelConfig, ModelConfigPatch};
use crate::summary::{summarize, BatchSummary};

#[derive(Clone)]
pub struct AppState {
    pub classifier: Classifier,
    /// Source for `/admin/reload-lexicon`.
    pub lexicon_path: PathBuf,
}

impl AppState {
    pub fn new(classifier: Classifier) -> Self {
        let lexicon_path = std::env::var(ENV_LEXICON_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LEXICON_PATH));
        Self {
            classifier,
            lexicon_path,
        }
    }
}

/// Router over a fresh classifier with the embedded lexicon.
pub fn router() -> Router {
    create_router(AppState::new(Classifier::default()))
}

pub fn create_router(state: AppState) -> Router {
    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/classify", post(classify))
        .route("/batch", post(classify_batch))
        .route("/model", get(model))
        .route("/admin/model", post(admin_update_model))
        .route("/admin/reload-lexicon", post(admin_reload_lexicon))
        .layer(CorsLayer::very_permissive())
        .with_state(state);

    match Metrics::init() {
        Ok(m) => app.merge(m.router()),
        Err(e) => {
            warn!(error = %e, "metrics disabled");
            app
        }
    }
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

async fn classify(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    match state.classifier.classify_value(&body) {
        Ok(result) => Json(result).into_response(),
        Err(e) => error_body(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum BatchEntry {
    Ok(Box<ClassificationResult>),
    Err { error: String },
}

#[derive(Serialize)]
struct BatchResp {
    results: Vec<BatchEntry>,
    summary: BatchSummary,
}

async fn classify_batch(
    State(state): State<AppState>,
    Json(items): Json<Vec<Value>>,
) -> Response {
    let classifier = state.classifier.clone();
    let joined = tokio::task::spawn_blocking(move || classifier.batch_classify_values(&items)).await;
    let outcomes = match joined {
        Ok(o) => o,
        Err(e) => return error_body(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };

    let ok: Vec<ClassificationResult> = outcomes
        .iter()
        .filter_map(|r| r.as_ref().ok().cloned())
        .collect();
    let summary = summarize(&ok);
    let results = outcomes
        .into_iter()
        .map(|r| match r {
            Ok(res) => BatchEntry::Ok(Box::new(res)),
            Err(e) => BatchEntry::Err {
                error: e.to_string(),
            },
        })
        .collect();

    Json(BatchResp { results, summary }).into_response()
}

#[derive(Serialize)]
struct ModelResp {
    model: ModelConfig,
    lexicon_version: String,
}

async fn model(State(state): State<AppState>) -> Json<ModelResp> {
    Json(ModelResp {
        model: state.classifier.get_model_config(),
        lexicon_version: state.classifier.lexicon_version(),
    })
}

async fn admin_update_model(
    State(state): State<AppState>,
    Json(patch): Json<ModelConfigPatch>,
) -> Json<ModelConfig> {
    Json(state.classifier.update_model_config(patch))
}

async fn admin_reload_lexicon(State(state): State<AppState>) -> Response {
    match Lexicon::from_path(&state.lexicon_path) {
        Ok(lex) => {
            let version = lex.version.clone();
            state.classifier.swap_lexicon(lex);
            Json(json!({ "reloaded": true, "version": version })).into_response()
        }
        Err(e) => {
            warn!(target: "lexicon", error = %e, "manual reload rejected");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

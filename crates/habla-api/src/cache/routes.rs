use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{ApiState, metrics};

use super::WordCache;

/// Create the word cache routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/cache_translation", post(cache_translation))
        .route("/get_translation/{word}", get(get_translation))
}

#[derive(Debug, Deserialize)]
struct CacheTranslationParams {
    word: String,
    translation: String,
}

#[derive(Debug, Serialize)]
struct CacheStatus {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct CachedTranslation {
    /// `null` when the word was never cached
    translation: Option<String>,
}

/// Record a word translation (`?word=...&translation=...`)
async fn cache_translation(
    State(cache): State<Arc<WordCache>>,
    Query(params): Query<CacheTranslationParams>,
) -> Json<CacheStatus> {
    cache.store(&params.word, params.translation);
    metrics::record_cache_store();
    tracing::debug!(word = %params.word, "Cached word translation");

    Json(CacheStatus { status: "ok" })
}

/// Look up a cached word translation
async fn get_translation(
    State(cache): State<Arc<WordCache>>,
    Path(word): Path<String>,
) -> Json<CachedTranslation> {
    let translation = cache.lookup(&word);
    metrics::record_cache_lookup(translation.is_some());

    Json(CachedTranslation { translation })
}

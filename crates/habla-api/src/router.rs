use axum::{Json, Router, extract::State, middleware, routing::get};
use serde_json::{Value, json};
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{
    ApiConfig, ApiState, cache, chat, error::ApiError, metrics,
    middleware::{cors, request_id},
    translation,
};

/// API routes, with the frontend served for every other path
pub fn router(config: &ApiConfig) -> Result<Router<ApiState>, ApiError> {
    Ok(Router::new()
        .route("/health", get(health))
        .merge(translation::routes())
        .merge(cache::routes())
        .merge(chat::routes(config)?)
        .fallback_service(ServeDir::new(&config.frontend_dir)))
}

/// The full application: routes, state and the middleware stack
pub fn app(config: &ApiConfig, state: ApiState) -> Result<Router, ApiError> {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Ok(router(config)?
        .with_state(state)
        .layer(cors::create_cors_layer(config.parsed_allowed_origins()))
        .layer(trace_layer)
        .layer(middleware::from_fn(metrics::track_metrics))
        .layer(middleware::from_fn(request_id::request_id_middleware)))
}

async fn health(State(state): State<ApiState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "environment": state.environment,
        "cached_words": state.word_cache.len(),
    }))
}
